//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use glossa_config::ConfigError;
use glossa_core::RegistryError;
use glossa_properties::OpenRootError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    OpenRoot(#[from] OpenRootError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("failed to write output: {0}")]
    WriteOutput(io::Error),
}
