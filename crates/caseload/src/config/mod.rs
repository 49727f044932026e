use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::intake::DEFAULT_MAX_UPLOAD_BATCH;

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

/// Top-level configuration for the intake service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub intake: IntakeConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("CASELOAD_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("CASELOAD_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("CASELOAD_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("CASELOAD_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let max_upload_batch = match env::var("CASELOAD_MAX_UPLOAD_BATCH") {
            Ok(raw) => {
                let parsed = raw.trim().parse::<usize>();
                match parsed {
                    Ok(limit) if limit > 0 => limit,
                    _ => return Err(ConfigError::InvalidUploadBatch { value: raw }),
                }
            }
            Err(_) => DEFAULT_MAX_UPLOAD_BATCH,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            intake: IntakeConfig { max_upload_batch },
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

/// Limits applied by the intake service.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    pub max_upload_batch: usize,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidUploadBatch { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "CASELOAD_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "CASELOAD_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidUploadBatch { value } => write!(
                f,
                "CASELOAD_MAX_UPLOAD_BATCH must be a positive integer (got '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidUploadBatch { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
