use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;

/// Errors from the I/O-facing parts of the crate. Evaluation itself never
/// fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid spending profile: {0}")]
    Profile(#[source] serde_json::Error),
    #[error("unknown card '{0}'")]
    UnknownCard(String),
}

pub type Result<T> = std::result::Result<T, Error>;
