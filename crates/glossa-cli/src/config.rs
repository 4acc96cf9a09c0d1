//! Configuration loading for the CLI.
//!
//! `ortho_config` supplies defaults, the configuration file and `GLOSSA_*`
//! environment variables. The CLI's own global flags are applied on top so
//! they always win.

use std::ffi::OsString;

use glossa_config::Config;
use ortho_config::OrthoConfig;

use crate::AppError;
use crate::cli::Cli;

pub(crate) trait ConfigLoader {
    /// Loads configuration for the CLI.
    ///
    /// `program` is the invoked binary name; subcommand tokens are never
    /// forwarded to the loader.
    fn load(&self, program: &OsString) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, program: &OsString) -> Result<Config, AppError> {
        Config::load_from_iter([program.clone()]).map_err(AppError::LoadConfiguration)
    }
}

/// Overlays the global flags given on the command line.
pub(crate) fn apply_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(root) = &cli.root {
        config.bundle_root = Some(root.clone());
    }
    if let Some(locale) = &cli.locale {
        config.locale = Some(locale.clone());
    }
    if let Some(namespace) = &cli.namespace {
        config.namespace = Some(namespace.clone());
    }
    if let Some(filter) = &cli.log_filter {
        config.log_filter = Some(filter.clone());
    }
    if let Some(format) = cli.log_format {
        config.log_format = Some(format);
    }
    config
}
