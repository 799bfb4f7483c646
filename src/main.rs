mod api;
mod cli;
mod config;
mod error;
mod models;
mod pipeline;

use clap::Parser;
use cli::{App, Cli};
use colored::*;
use config::{LogFormat, Settings};
use dialoguer::{theme::ColorfulTheme, Select};
use error::{AppError, Result};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Sets up `tracing`. Defaults to `warn` so log lines do not interleave with the prompt;
/// `RUST_LOG` overrides. The returned guard must live until exit to flush file logs.
fn init_logging(settings: &Settings) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match &settings.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, "weather-dashboard.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let builder = builder.with_writer(writer).with_ansi(false);
            match settings.log_format {
                LogFormat::Json => builder.json().init(),
                LogFormat::Pretty => builder.init(),
            }
            Ok(Some(guard))
        },
        None => {
            let builder = builder.with_writer(std::io::stderr);
            match settings.log_format {
                LogFormat::Json => builder.json().init(),
                LogFormat::Pretty => builder.init(),
            }
            Ok(None)
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            println!(
                "{} {}",
                "Error: Failed to load configuration.".red(),
                "Set ACCUWEATHER_API_KEY (a .env file works too).".red()
            );
            return Err(e);
        },
    };
    let log_guard = init_logging(&settings)?;

    info!("Initializing weather dashboard...");
    let app = match App::new(&settings) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {:?}", e);
            println!(
                "{}",
                "Error: Failed to initialize application. Check logs.".red()
            );
            return Err(e);
        },
    };

    // One-shot mode
    if let Some(command) = cli.command {
        return match app.run_command(command).await {
            // Already shown to the user; only the exit status is left to report
            Err(AppError::Lookup(_)) => {
                drop(log_guard);
                std::process::exit(1);
            },
            other => other,
        };
    }

    println!("{}", cli::banner(app.country()));

    // Main interactive loop
    loop {
        let options = &["Get Weather Data", "Exit"];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("What would you like to do?")
            .items(options)
            .default(0)
            .interact_opt()? // Ctrl+C / Esc yields None
            .unwrap_or(options.len() - 1); // Default to Exit if cancelled

        println!("\n---\n");

        let command_result = match selection {
            0 => match cli::prompt_city() {
                Ok(city) => app.lookup(&city).await,
                Err(e) => {
                    println!("{} {}", "Failed to get input:".red(), e);
                    continue;
                },
            },
            1 => {
                println!("{}", "Exiting dashboard. Goodbye!".green());
                break;
            },
            _ => unreachable!(),
        };

        // Lookup failures were already shown to the user by the presenter
        match command_result {
            Ok(()) | Err(AppError::Lookup(_)) => {},
            Err(e) => {
                error!("Command execution failed: {:?}", e);
                println!(
                    "{} {}",
                    "Error executing command:".red(),
                    e.to_string().red()
                );
            },
        }

        println!("\n---\n");
    }

    Ok(())
}
