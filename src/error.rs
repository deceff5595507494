use std::path::PathBuf;

use crate::config::ConfigError;
use crate::gazetteer::GazetteerError;
use crate::ingest::IngestError;
use crate::params::ParamError;
use crate::report::VehicleLookupError;
use crate::telemetry::TelemetryError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("invalid parameter: {0}")]
    Param(#[from] ParamError),
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to load {}: {source}", .path.display())]
    Ingest {
        path: PathBuf,
        #[source]
        source: IngestError,
    },
    #[error("failed to load gazetteer {}: {source}", .path.display())]
    Gazetteer {
        path: PathBuf,
        #[source]
        source: GazetteerError,
    },
    #[error(transparent)]
    Vehicle(#[from] VehicleLookupError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to write report: {0}")]
    Output(#[from] serde_json::Error),
}
