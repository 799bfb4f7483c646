//! Defines the application's error types: `LookupError` for the weather pipeline,
//! `AppError` for everything else, and a convenience `Result` alias.
//!
//! Uses the `thiserror` crate for ergonomic error definition and provides `From`
//! implementations to convert common external errors into `AppError` variants.
//! Errors that do not implement `Clone` are wrapped in `Arc` to allow both types to be cloneable.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// The provider call a pipeline failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Search,
    Weather,
    AirQuality,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Search => "location search",
            Stage::Weather => "current conditions",
            Stage::AirQuality => "air quality",
        };
        f.write_str(name)
    }
}

/// Failures of a single city lookup. Scoped to one query, never fatal to the process.
#[derive(Error, Debug, Clone)]
pub enum LookupError {
    /// The city input was empty.
    #[error("Please enter a city name")]
    EmptyQuery,

    /// The location search returned no results at all.
    #[error("No matching city found")]
    NoMatch,

    /// The location search returned results, none of them in the configured country.
    #[error("No {country} city found. Try a different name.")]
    NoCountryMatch { country: String },

    /// A fetch endpoint answered with an empty list.
    #[error("{stage} returned no data")]
    EmptyResult { stage: Stage },

    /// Network failure, timeout, or a non-success HTTP status.
    #[error("{stage} request failed: {source}")]
    Transport {
        stage: Stage,
        source: Arc<reqwest::Error>,
    },

    /// The provider answered with malformed JSON or an unexpected payload shape.
    #[error("{stage} response could not be read: {source}")]
    Decode {
        stage: Stage,
        source: Arc<serde_json::Error>,
    },
}

impl LookupError {
    /// Drops the request URL from the reqwest error: its query string holds the API key.
    pub(crate) fn transport(stage: Stage, err: reqwest::Error) -> Self {
        LookupError::Transport {
            stage,
            source: Arc::new(err.without_url()),
        }
    }

    pub(crate) fn decode(stage: Stage, err: serde_json::Error) -> Self {
        LookupError::Decode {
            stage,
            source: Arc::new(err),
        }
    }

    /// Message shown to the user, worded per stage the way the dashboard has always shown it.
    pub fn user_message(&self) -> String {
        let stage = match self {
            LookupError::Transport { stage, .. }
            | LookupError::Decode { stage, .. }
            | LookupError::EmptyResult { stage } => *stage,
            _ => return self.to_string(),
        };
        let prefix = match stage {
            Stage::Search => "Search error",
            Stage::Weather => "Weather fetch error",
            Stage::AirQuality => "Some slight Issues",
        };
        format!("{}: {}", prefix, self)
    }
}

/// The primary error enumeration for all application-specific errors.
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// Error building the HTTP client (`reqwest`).
    #[error("API Error: {0}")]
    Api(Arc<reqwest::Error>),

    /// A city lookup failed.
    #[error("{0}")]
    Lookup(#[from] LookupError),

    /// Error related to accessing environment variables.
    #[error("Environment Error: {0}")]
    Env(#[from] std::env::VarError),

    /// Error related to standard I/O operations.
    #[error("I/O Error: {0}")]
    Io(Arc<std::io::Error>),

    /// Error specific to CLI logic or argument handling.
    #[error("CLI Error: {0}")]
    Cli(String),

    /// Error originating from user interaction prompts (`dialoguer`).
    #[error("Dialoguer Error: {0}")]
    Dialoguer(Arc<dialoguer::Error>),

    /// Error related to progress spinner style templating (`indicatif`).
    #[error("Progress Style Template Error: {0}")]
    Template(Arc<indicatif::style::TemplateError>),
}

/// A specialized `Result` type using the application's `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

// --- From implementations ---
// Arc is used for non-Clone error types.

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Api(Arc::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(Arc::new(err))
    }
}

impl From<dialoguer::Error> for AppError {
    fn from(err: dialoguer::Error) -> Self {
        AppError::Dialoguer(Arc::new(err))
    }
}

impl From<indicatif::style::TemplateError> for AppError {
    fn from(err: indicatif::style::TemplateError) -> Self {
        AppError::Template(Arc::new(err))
    }
}
