use crate::api::AccuWeatherClient;
use crate::cli::presenter;
use crate::config::Settings;
use crate::error::{AppError, LookupError, Result, Stage};
use crate::models::{CityQuery, DashboardReport, Severity};
use crate::pipeline::Pipeline;
use clap::{Args, Parser, Subcommand};
use colored::*;
use dialoguer::{theme::ColorfulTheme, Input};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{error, info};

/// Current weather and air quality for a city, from AccuWeather
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Runs a single lookup instead of the interactive dashboard
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up current weather and air quality for a city
    Lookup(LookupArgs),
}

#[derive(Args, Debug)]
pub struct LookupArgs {
    /// City name, e.g. "Lagos"
    #[arg(short, long)]
    pub city: String,
}

/// Spinner text shown while a stage is in flight.
fn stage_message(stage: Stage) -> &'static str {
    match stage {
        Stage::Search => "Searching for location...",
        Stage::Weather => "Fetching weather data...",
        Stage::AirQuality => "Fetching air quality data...",
    }
}

/// CLI application
pub struct App {
    pipeline: Pipeline,
}

impl App {
    /// Builds the provider client from settings.
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = AccuWeatherClient::new(settings.api_key.clone(), &settings.base_url)?;
        info!(
            "Using AccuWeather at {} filtered to country {}",
            settings.base_url, settings.country
        );
        Ok(Self {
            pipeline: Pipeline::new(client, settings.country.clone()),
        })
    }

    /// Run a single command
    pub async fn run_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Lookup(args) => self.lookup(&args.city).await,
        }
    }

    /// Looks up one city and prints the report.
    ///
    /// Every lookup failure, including a blank city name, is printed here and then
    /// returned as `AppError::Lookup`, so the interactive loop can carry on while a
    /// one-shot run still exits non-zero.
    pub async fn lookup(&self, city: &str) -> Result<()> {
        let outcome = match CityQuery::new(city) {
            Ok(query) => self.run_pipeline(&query).await?,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(report) => {
                println!(
                    "{}",
                    presenter::paint(
                        &format!("Found location key: {}", report.location_key),
                        Severity::Success
                    )
                );
                println!("{}", presenter::render(&report));
                Ok(())
            },
            Err(e) => {
                error!("Lookup for {:?} failed: {}", city.trim(), e);
                println!("{}", presenter::paint(&e.user_message(), Severity::Error));
                Err(AppError::Lookup(e))
            },
        }
    }

    /// Runs the pipeline behind a spinner. The outer error is the spinner setup only.
    async fn run_pipeline(
        &self,
        query: &CityQuery,
    ) -> Result<std::result::Result<DashboardReport, LookupError>> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}")?);
        spinner.enable_steady_tick(Duration::from_millis(100));

        let outcome = self
            .pipeline
            .run_with(query, |stage| spinner.set_message(stage_message(stage)))
            .await;
        spinner.finish_and_clear();
        Ok(outcome)
    }

    /// Country search results are restricted to.
    pub fn country(&self) -> &str {
        self.pipeline.country()
    }
}

/// Prompts the user for a city name.
pub fn prompt_city() -> Result<String> {
    let city: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("City Name (e.g., Mubi, Maiduguri, Lagos)")
        .allow_empty(true)
        .interact_text()?;
    Ok(city)
}

/// Banner printed when the interactive dashboard starts.
pub fn banner(country: &str) -> String {
    format!(
        "{}\n{}",
        "Environmental Monitoring".cyan().bold(),
        format!(
            "Enter a city name ({}) to get current weather and air quality",
            country
        )
        .dimmed()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;
    use clap::CommandFactory;
    use mockito::Matcher;
    use serde_json::json;

    fn settings_for(base_url: &str) -> Settings {
        Settings {
            api_key: "k".to_string(),
            base_url: base_url.to_string(),
            country: "NG".to_string(),
            log_dir: None,
            log_format: LogFormat::Pretty,
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_lookup_subcommand() {
        let cli = Cli::try_parse_from(["weather-dashboard", "lookup", "--city", "Mubi"]).unwrap();
        match cli.command {
            Some(Commands::Lookup(args)) => assert_eq!(args.city, "Mubi"),
            None => panic!("expected lookup subcommand"),
        }
    }

    #[test]
    fn test_no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["weather-dashboard"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_stage_messages() {
        assert_eq!(stage_message(Stage::Search), "Searching for location...");
        assert_eq!(stage_message(Stage::Weather), "Fetching weather data...");
        assert_eq!(stage_message(Stage::AirQuality), "Fetching air quality data...");
    }

    #[test]
    fn test_banner_names_country() {
        assert!(banner("NG").contains("(NG)"));
    }

    #[tokio::test]
    async fn test_blank_city_is_rejected_without_calling_provider() {
        let mut server = mockito::Server::new_async().await;
        let search = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let app = App::new(&settings_for(&server.url())).unwrap();
        let result = app.lookup("   ").await;

        match result {
            Err(AppError::Lookup(e)) => {
                assert!(matches!(e, LookupError::EmptyQuery));
                assert_eq!(e.user_message(), "Please enter a city name");
            },
            other => panic!("expected EmptyQuery, got {:?}", other),
        }
        search.assert_async().await;
    }

    #[tokio::test]
    async fn test_lookup_command_reports_country_mismatch() {
        let mut server = mockito::Server::new_async().await;
        let _search = server
            .mock("GET", "/locations/v1/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!([{ "Key": "623", "Country": { "ID": "FR" } }]).to_string())
            .create_async()
            .await;

        let app = App::new(&settings_for(&server.url())).unwrap();
        assert_eq!(app.country(), "NG");
        let result = app
            .run_command(Commands::Lookup(LookupArgs {
                city: "Paris".to_string(),
            }))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Lookup(LookupError::NoCountryMatch { .. }))
        ));
    }
}
