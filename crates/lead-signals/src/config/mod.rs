use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::gateway::{BrightDataSettings, SearchLocale};
use crate::signals::{IntentThresholds, DEFAULT_RESULT_COUNT};

const DEFAULT_ENDPOINT: &str = "https://api.brightdata.com/request";

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub search: SearchConfig,
    pub scoring: ScoringConfig,
    pub presets_dir: PathBuf,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let search = SearchConfig {
            endpoint: env::var("SERP_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            api_key: optional_var("SERP_API_KEY"),
            zone: optional_var("SERP_ZONE"),
            country: env::var("DEFAULT_COUNTRY").unwrap_or_else(|_| "us".to_string()),
            language: env::var("DEFAULT_LANGUAGE").unwrap_or_else(|_| "en".to_string()),
            timeout_secs: number_var("SERP_TIMEOUT_SECS", 30)?,
            result_count: number_var("SERP_RESULT_COUNT", DEFAULT_RESULT_COUNT)?,
        };

        let defaults = IntentThresholds::default();
        let scoring = ScoringConfig {
            thresholds: IntentThresholds {
                high: number_var("INTENT_HIGH_THRESHOLD", defaults.high)?,
                medium: number_var("INTENT_MEDIUM_THRESHOLD", defaults.medium)?,
            },
        };

        let presets_dir =
            PathBuf::from(env::var("PRESETS_DIR").unwrap_or_else(|_| "presets".to_string()));

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            search,
            scoring,
            presets_dir,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// SERP backend connection and query shaping.
#[derive(Clone)]
pub struct SearchConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub zone: Option<String>,
    pub country: String,
    pub language: String,
    pub timeout_secs: u64,
    pub result_count: usize,
}

impl SearchConfig {
    pub fn locale(&self) -> SearchLocale {
        SearchLocale {
            country: self.country.clone(),
            language: self.language.clone(),
        }
    }

    /// Credentials are only required once a command actually queries the
    /// backend.
    pub fn brightdata_settings(&self) -> Result<BrightDataSettings, ConfigError> {
        let api_key = self
            .api_key
            .clone()
            .ok_or(ConfigError::MissingVar { name: "SERP_API_KEY" })?;
        let zone = self
            .zone
            .clone()
            .ok_or(ConfigError::MissingVar { name: "SERP_ZONE" })?;

        Ok(BrightDataSettings {
            endpoint: self.endpoint.clone(),
            api_key,
            zone,
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("zone", &self.zone)
            .field("country", &self.country)
            .field("language", &self.language)
            .field("timeout_secs", &self.timeout_secs)
            .field("result_count", &self.result_count)
            .finish()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScoringConfig {
    pub thresholds: IntentThresholds,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { name: &'static str, value: String },
    MissingVar { name: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { name, value } => {
                write!(f, "{name} must be a non-negative integer (got '{value}')")
            }
            ConfigError::MissingVar { name } => {
                write!(f, "{name} must be set to query the search backend")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn number_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { name, value: raw }),
        Err(_) => Ok(default),
    }
}
