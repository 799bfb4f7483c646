//! Process-wide settings, read once at startup from the environment (and `.env`).

use crate::api::DEFAULT_BASE_URL;
use crate::error::{AppError, Result};
use std::env;
use std::path::PathBuf;
use tracing::error;

pub const DEFAULT_COUNTRY: &str = "NG";

/// Log output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    /// Country code search results are filtered to, upper-cased.
    pub country: String,
    /// When set, logs go to a daily rolling file in this directory instead of stderr.
    pub log_dir: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Settings {
    /// Reads `ACCUWEATHER_API_KEY` (required), `ACCUWEATHER_BASE_URL`, `WEATHER_COUNTRY`,
    /// `WEATHER_LOG_DIR` and `WEATHER_LOG_FORMAT`.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let api_key = env::var("ACCUWEATHER_API_KEY").map_err(|e| {
            error!("ACCUWEATHER_API_KEY environment variable not set: {}", e);
            AppError::Env(e)
        })?;
        if api_key.trim().is_empty() {
            return Err(AppError::Cli("ACCUWEATHER_API_KEY is empty".to_string()));
        }

        let base_url = env::var("ACCUWEATHER_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let country = env::var("WEATHER_COUNTRY")
            .ok()
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_COUNTRY.to_string());

        let log_dir = env::var_os("WEATHER_LOG_DIR").map(PathBuf::from);

        let log_format = match env::var("WEATHER_LOG_FORMAT") {
            Ok(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            api_key,
            base_url,
            country,
            log_dir,
            log_format,
        })
    }
}
