use crate::assistance::ServiceError;
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;

/// Top-level failure surfaced by the binary entry points.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("service error: {0}")]
    Service(#[from] ServiceError),
    #[error("invalid seed data: {0}")]
    SeedData(String),
}
