use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::workflows::jobs::scoring::{
    ScoringConfig, ScoringConfigDocument, ScoringConfigError, ScoringProfile, UnknownProfile,
};

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
    pub scoring: ScoringSettings,
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

        let profile = match env::var("JOBBOT_PROFILE") {
            Ok(value) if !value.trim().is_empty() => value.parse::<ScoringProfile>()?,
            _ => ScoringProfile::default(),
        };
        let config_path = env::var("JOBBOT_SCORING_CONFIG")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringSettings {
                profile,
                config_path,
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Which scoring configuration a run uses: a JSON file when given, else a named preset.
#[derive(Debug, Clone, Default)]
pub struct ScoringSettings {
    pub profile: ScoringProfile,
    pub config_path: Option<PathBuf>,
}

impl ScoringSettings {
    pub fn resolve(&self) -> Result<ScoringConfig, ConfigError> {
        match &self.config_path {
            Some(path) => load_scoring_file(path),
            None => Ok(self.profile.config()?),
        }
    }
}

pub fn load_scoring_file(path: &Path) -> Result<ScoringConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ScoringFile {
        path: path.to_path_buf(),
        source,
    })?;
    let document: ScoringConfigDocument =
        serde_json::from_str(&raw).map_err(|source| ConfigError::ScoringDocument {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(ScoringConfig::try_from(document)?)
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    UnknownProfile(UnknownProfile),
    ScoringFile {
        path: PathBuf,
        source: std::io::Error,
    },
    ScoringDocument {
        path: PathBuf,
        source: serde_json::Error,
    },
    Scoring(ScoringConfigError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::UnknownProfile(err) => write!(f, "JOBBOT_PROFILE: {}", err),
            ConfigError::ScoringFile { path, .. } => {
                write!(f, "unable to read scoring config {}", path.display())
            }
            ConfigError::ScoringDocument { path, source } => {
                write!(f, "invalid scoring config {}: {}", path.display(), source)
            }
            ConfigError::Scoring(err) => write!(f, "invalid scoring config: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::UnknownProfile(err) => Some(err),
            ConfigError::ScoringFile { source, .. } => Some(source),
            ConfigError::ScoringDocument { source, .. } => Some(source),
            ConfigError::Scoring(err) => Some(err),
        }
    }
}

impl From<UnknownProfile> for ConfigError {
    fn from(value: UnknownProfile) -> Self {
        Self::UnknownProfile(value)
    }
}

impl From<ScoringConfigError> for ConfigError {
    fn from(value: ScoringConfigError) -> Self {
        Self::Scoring(value)
    }
}
