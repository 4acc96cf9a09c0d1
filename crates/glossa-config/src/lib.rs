//! Layered configuration for the glossa command-line tool.
//!
//! [`Config`] is merged by `ortho_config` from built-in defaults, an optional
//! configuration file, `GLOSSA_*` environment variables and command-line
//! flags, in increasing order of precedence. Every field is optional; the
//! accessors substitute the defaults from this crate so callers never deal
//! with unset values.

mod defaults;
mod logging;

use camino::{Utf8Path, Utf8PathBuf};
use glossa_core::{Locale, Namespace};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use unic_langid::LanguageIdentifierError;

pub use self::defaults::{
    DEFAULT_BUNDLE_ROOT, DEFAULT_LOCALE, DEFAULT_LOG_FILTER, default_log_format,
};
pub use self::logging::{LogFormat, LogFormatParseError};

/// Settings shared by every glossa command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "GLOSSA")]
pub struct Config {
    /// Directory holding the `.properties` bundle tree.
    pub bundle_root: Option<Utf8PathBuf>,
    /// Locale tag bundles are loaded for, such as `en-US`.
    pub locale: Option<String>,
    /// Dotted namespace bundles are loaded from.
    pub namespace: Option<String>,
    /// `tracing` filter expression.
    pub log_filter: Option<String>,
    /// Log output format.
    pub log_format: Option<LogFormat>,
}

/// Errors raised when a configured value cannot be interpreted.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configured locale tag is not a valid language identifier.
    #[error("invalid locale '{tag}': {source}")]
    InvalidLocale {
        /// Tag as configured.
        tag: String,
        /// Parser failure.
        #[source]
        source: LanguageIdentifierError,
    },
}

impl Config {
    /// Directory bundles are read from.
    #[must_use]
    pub fn bundle_root(&self) -> &Utf8Path {
        self.bundle_root
            .as_deref()
            .unwrap_or_else(|| Utf8Path::new(DEFAULT_BUNDLE_ROOT))
    }

    /// Locale tag as configured, before validation.
    #[must_use]
    pub fn locale_tag(&self) -> &str {
        self.locale.as_deref().unwrap_or(DEFAULT_LOCALE)
    }

    /// Parsed locale bundles are loaded for.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLocale`] when the tag does not parse.
    pub fn locale(&self) -> Result<Locale, ConfigError> {
        let tag = self.locale_tag();
        tag.parse().map_err(|source| ConfigError::InvalidLocale {
            tag: tag.to_owned(),
            source,
        })
    }

    /// Namespace bundles are loaded from. Defaults to the root namespace.
    #[must_use]
    pub fn namespace(&self) -> Namespace {
        Namespace::new(self.namespace.as_deref().unwrap_or_default())
    }

    /// Filter expression for the tracing subscriber.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Output format for the tracing subscriber.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format.unwrap_or_else(default_log_format)
    }
}
