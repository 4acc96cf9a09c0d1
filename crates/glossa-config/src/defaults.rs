use crate::logging::LogFormat;

/// Directory bundles are read from when none is configured.
pub const DEFAULT_BUNDLE_ROOT: &str = ".";

/// Locale bundles are loaded for when none is configured.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}
