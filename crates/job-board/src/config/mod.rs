use crate::pipeline::applicants::TransitionPolicy;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

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
    pub board: BoardConfig,
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

        let fixtures_path = env::var("BOARD_FIXTURES")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let transition_policy = match env::var("BOARD_TRANSITIONS") {
            Ok(raw) => raw
                .parse::<TransitionPolicy>()
                .map_err(|_| ConfigError::InvalidTransitionPolicy(raw))?,
            Err(_) => TransitionPolicy::default(),
        };

        let apply_latency_ms = env::var("BOARD_APPLY_LATENCY_MS")
            .unwrap_or_else(|_| DEFAULT_APPLY_LATENCY_MS.to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidApplyLatency)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            board: BoardConfig {
                fixtures_path,
                transition_policy,
                apply_latency: Duration::from_millis(apply_latency_ms),
            },
        })
    }
}

const DEFAULT_APPLY_LATENCY_MS: u64 = 1500;

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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Seed data and lifecycle rules for the applicant and job stores.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// JSON fixture to seed the stores with; the built-in sample set is used when absent.
    pub fixtures_path: Option<PathBuf>,
    pub transition_policy: TransitionPolicy,
    /// Simulated round trip for job seeker applications.
    pub apply_latency: Duration,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            fixtures_path: None,
            transition_policy: TransitionPolicy::default(),
            apply_latency: Duration::from_millis(DEFAULT_APPLY_LATENCY_MS),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTransitionPolicy(String),
    InvalidApplyLatency,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTransitionPolicy(value) => write!(
                f,
                "BOARD_TRANSITIONS must be 'permissive' or 'guarded' (found '{}')",
                value
            ),
            ConfigError::InvalidApplyLatency => {
                write!(f, "BOARD_APPLY_LATENCY_MS must be a whole number of milliseconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidTransitionPolicy(_)
            | ConfigError::InvalidApplyLatency => None,
        }
    }
}
