use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use crate::workflows::screening::{ReasoningConfig, ScreeningConfig};

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

/// Top-level configuration for the application, assembled from the
/// environment. Screening policy lives here rather than in code so thresholds
/// and the launcher denylist can change without a redeploy.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub reasoning: ReasoningConfig,
    pub screening: ScreeningConfig,
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

        let reasoning_defaults = ReasoningConfig::default();
        let reasoning = ReasoningConfig {
            endpoint: env::var("GEMINI_API_URL").unwrap_or(reasoning_defaults.endpoint),
            api_key: env::var("GEMINI_API_KEY").map_err(|_| ConfigError::MissingApiKey)?,
            temperature: parse_env("GEMINI_TEMPERATURE", reasoning_defaults.temperature)?,
            max_output_tokens: parse_env(
                "GEMINI_MAX_OUTPUT_TOKENS",
                reasoning_defaults.max_output_tokens,
            )?,
            request_timeout: Duration::from_secs(parse_env("GEMINI_TIMEOUT_SECS", 30u64)?),
        };

        let screening_defaults = ScreeningConfig::default();
        let launcher_denylist = match env::var("APP_LAUNCHER_DENYLIST") {
            Ok(raw) => raw
                .split(',')
                .map(|entry| entry.trim().to_lowercase())
                .filter(|entry| !entry.is_empty())
                .collect(),
            Err(_) => screening_defaults.launcher_denylist,
        };
        let screening = ScreeningConfig {
            minimum_age: parse_env("APP_MIN_AGE", screening_defaults.minimum_age)?,
            launcher_denylist,
            answer_truncate_length: parse_env(
                "APP_ANSWER_TRUNCATE_LENGTH",
                screening_defaults.answer_truncate_length,
            )?,
            reasoning_language: env::var("APP_REASONING_LANGUAGE")
                .unwrap_or(screening_defaults.reasoning_language),
            cache_retention: Duration::from_secs(
                parse_env("APP_CACHE_RETENTION_HOURS", 24u64)?.saturating_mul(3600),
            ),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            reasoning,
            screening,
        })
    }
}

fn parse_env<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { key }),
        Err(_) => Ok(default),
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    MissingApiKey,
    InvalidNumber { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::MissingApiKey => write!(f, "GEMINI_API_KEY must be set"),
            ConfigError::InvalidNumber { key } => write!(f, "{key} must be a valid number"),
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
