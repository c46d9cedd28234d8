use chrono::Weekday;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::workflows::matching::DEFAULT_THRESHOLD;

/// Distinguishes runtime behavior for different stages of the service.
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
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub engine: EngineConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_format = LogFormat::parse(
            &env::var("APP_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string()),
        )?;

        let rules_dir = env::var("TENDER_MAPPING_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/tender_mapping"));
        let policy_path = env::var("TENDER_POLICY_PATH").ok().map(PathBuf::from);
        let weekend_days = match env::var("TENDER_WEEKEND_DAYS") {
            Ok(raw) => Some(parse_weekend(&raw)?),
            Err(_) => None,
        };
        let match_threshold = match env::var("TENDER_MATCH_THRESHOLD") {
            Ok(raw) => parse_threshold(&raw)?,
            Err(_) => DEFAULT_THRESHOLD,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                format: log_format,
            },
            engine: EngineConfig {
                rules_dir,
                policy_path,
                weekend_days,
                match_threshold,
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing output controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::InvalidLogFormat(other.to_string())),
        }
    }
}

/// Locations and regional settings for the procurement engine and rule matcher.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub rules_dir: PathBuf,
    pub policy_path: Option<PathBuf>,
    /// Overrides the policy's weekend when set.
    pub weekend_days: Option<Vec<Weekday>>,
    pub match_threshold: f64,
}

fn parse_weekend(raw: &str) -> Result<Vec<Weekday>, ConfigError> {
    let mut days = Vec::new();
    for token in raw.split(',').map(str::trim).filter(|token| !token.is_empty()) {
        let day = token
            .parse::<Weekday>()
            .map_err(|_| ConfigError::InvalidWeekday(token.to_string()))?;
        if !days.contains(&day) {
            days.push(day);
        }
    }

    if days.len() >= 7 {
        return Err(ConfigError::NoWorkingDays);
    }

    Ok(days)
}

fn parse_threshold(raw: &str) -> Result<f64, ConfigError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::InvalidThreshold(raw.to_string()))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::InvalidThreshold(raw.to_string()))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidLogFormat(String),
    InvalidWeekday(String),
    NoWorkingDays,
    InvalidThreshold(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidLogFormat(value) => {
                write!(f, "APP_LOG_FORMAT '{}' must be 'compact' or 'json'", value)
            }
            ConfigError::InvalidWeekday(value) => {
                write!(f, "TENDER_WEEKEND_DAYS entry '{}' is not a weekday", value)
            }
            ConfigError::NoWorkingDays => {
                write!(f, "TENDER_WEEKEND_DAYS must leave at least one working day")
            }
            ConfigError::InvalidThreshold(value) => {
                write!(f, "TENDER_MATCH_THRESHOLD '{}' must be within 0..=1", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
