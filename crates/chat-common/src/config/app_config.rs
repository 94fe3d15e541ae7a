//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if one
//! is present). Every setting has a default.

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub store: StoreConfig,
    pub presentation: PresentationConfig,
    pub events: EventsConfig,
    pub telemetry: TelemetryConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            _ => Err(format!("unknown environment: {s}")),
        }
    }
}

/// Limits applied to composed messages
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_max_content_length")]
    pub max_content_length: usize,
}

/// Display rules
#[derive(Debug, Clone, Deserialize)]
pub struct PresentationConfig {
    /// Consecutive messages from one author collapse under a single header
    /// while they are at most this many seconds apart. `0` disables the
    /// window, so only the author change starts a new header.
    #[serde(default = "default_grouping_window_secs")]
    pub grouping_window_secs: u64,
}

impl PresentationConfig {
    #[must_use]
    pub fn grouping_window(&self) -> Option<Duration> {
        (self.grouping_window_secs > 0).then(|| Duration::from_secs(self.grouping_window_secs))
    }
}

/// Event fan-out settings
#[derive(Debug, Clone, Deserialize)]
pub struct EventsConfig {
    #[serde(default = "default_event_buffer")]
    pub broadcast_buffer: usize,
}

/// Logging output settings
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub json: bool,
}

// Default value functions
fn default_app_name() -> String {
    "chat-client".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_content_length() -> usize {
    4000
}

fn default_grouping_window_secs() -> u64 {
    300 // 5 minutes
}

fn default_event_buffer() -> usize {
    256
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: default_env(),
            },
            store: StoreConfig {
                max_content_length: default_max_content_length(),
            },
            presentation: PresentationConfig {
                grouping_window_secs: default_grouping_window_secs(),
            },
            events: EventsConfig {
                broadcast_buffer: default_event_buffer(),
            },
            telemetry: TelemetryConfig { json: false },
        }
    }
}

/// Read and parse an optional variable; unset means `None`, unparseable is an error
fn parse_var<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        Err(_) => Ok(None),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is set to a value that does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let env = parse_var::<Environment>("APP_ENV")?.unwrap_or_default();

        let config = Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env,
            },
            store: StoreConfig {
                max_content_length: parse_var("MAX_CONTENT_LENGTH")?
                    .unwrap_or_else(default_max_content_length),
            },
            presentation: PresentationConfig {
                grouping_window_secs: parse_var("GROUPING_WINDOW_SECS")?
                    .unwrap_or_else(default_grouping_window_secs),
            },
            events: EventsConfig {
                broadcast_buffer: parse_var("EVENT_BUFFER")?.unwrap_or_else(default_event_buffer),
            },
            telemetry: TelemetryConfig {
                json: parse_var("LOG_JSON")?.unwrap_or(env.is_production()),
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would leave the client unusable
    ///
    /// # Errors
    /// Returns the first zero-valued limit found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.max_content_length == 0 {
            return Err(ConfigError::InvalidValue("MAX_CONTENT_LENGTH", "0".to_string()));
        }
        if self.events.broadcast_buffer == 0 {
            return Err(ConfigError::InvalidValue("EVENT_BUFFER", "0".to_string()));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
