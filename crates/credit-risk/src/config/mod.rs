use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::assessment::{IntakePolicy, ThresholdTable};

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
    pub scoring: ScoringConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringConfig::from_env()?,
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Model artifact location and the intake/messaging dials applied around it.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub model_path: Option<PathBuf>,
    pub thresholds: ThresholdTable,
    pub intake: IntakePolicy,
}

impl ScoringConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let model_path = env::var("CREDIT_RISK_MODEL_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let thresholds = match env::var("CREDIT_RISK_THRESHOLDS") {
            Ok(raw) => raw
                .parse::<ThresholdTable>()
                .map_err(|_| ConfigError::InvalidThresholds(raw))?,
            Err(_) => ThresholdTable::default(),
        };

        let defaults = IntakePolicy::default();
        let open_accounts_min =
            parse_u8("CREDIT_RISK_OPEN_ACCOUNTS_MIN", defaults.open_accounts_min)?;
        let open_accounts_max =
            parse_u8("CREDIT_RISK_OPEN_ACCOUNTS_MAX", defaults.open_accounts_max)?;
        if open_accounts_min > open_accounts_max {
            return Err(ConfigError::InvalidOpenAccountsRange {
                min: open_accounts_min,
                max: open_accounts_max,
            });
        }

        let require_positive_amounts = parse_flag(
            "CREDIT_RISK_REQUIRE_POSITIVE_AMOUNTS",
            defaults.require_positive_amounts,
        )?;

        Ok(Self {
            model_path,
            thresholds,
            intake: IntakePolicy {
                open_accounts_min,
                open_accounts_max,
                require_positive_amounts,
            },
        })
    }
}

fn parse_u8(name: &'static str, default: u8) -> Result<u8, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u8>()
            .map_err(|_| ConfigError::InvalidValue { name, value: raw }),
        Err(_) => Ok(default),
    }
}

fn parse_flag(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(name) {
        Ok(raw) => {
            let normalized = raw.trim().to_ascii_lowercase();
            match normalized.as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidValue { name, value: raw }),
            }
        }
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidThresholds(String),
    InvalidOpenAccountsRange { min: u8, max: u8 },
    InvalidValue { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidThresholds(value) => write!(
                f,
                "CREDIT_RISK_THRESHOLDS must be 'three_tier' or 'two_tier', found '{}'",
                value
            ),
            ConfigError::InvalidOpenAccountsRange { min, max } => write!(
                f,
                "open account bounds are inverted (min {} > max {})",
                min, max
            ),
            ConfigError::InvalidValue { name, value } => {
                write!(f, "{} has an invalid value '{}'", name, value)
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
