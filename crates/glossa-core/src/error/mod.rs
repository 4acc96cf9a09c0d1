//! Domain errors raised by registry operations.
//!
//! Every failure reaches the immediate caller as a [`RegistryError`]. Callers
//! that only care about the category can match on [`RegistryError::kind`].

use thiserror::Error;

use crate::format::FormatError;
use crate::loader::LoadError;

/// Errors arising from registry operations.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// A required argument was empty.
    #[error("argument '{argument}' must not be empty")]
    InvalidArgument {
        /// Name of the offending argument.
        argument: &'static str,
    },

    /// The bundle is not registered, or the loader could not find it.
    #[error("bundle '{bundle}' not found")]
    BundleNotFound {
        /// Bundle name that was requested.
        bundle: String,
    },

    /// None of the consulted bundles contain the key.
    #[error("{}", key_not_found_message(.key, .bundle.as_deref()))]
    KeyNotFound {
        /// Key that was requested.
        key: String,
        /// Bundle that was consulted, or `None` after a full scan.
        bundle: Option<String>,
    },

    /// The resolved template and the supplied values are incompatible.
    #[error("failed to format message: {0}")]
    Format(#[from] FormatError),

    /// The loader found the bundle but could not read or parse it.
    #[error("failed to load bundle '{bundle}': {source}")]
    Load {
        /// Bundle name that was requested.
        bundle: String,
        /// Underlying loader failure.
        #[source]
        source: LoadError,
    },
}

fn key_not_found_message(key: &str, bundle: Option<&str>) -> String {
    match bundle {
        Some(name) => format!("key '{key}' not found in bundle '{name}'"),
        None => format!("key '{key}' not found in any registered bundle"),
    }
}

/// Category tag for a [`RegistryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryErrorKind {
    /// See [`RegistryError::InvalidArgument`].
    InvalidArgument,
    /// See [`RegistryError::BundleNotFound`].
    BundleNotFound,
    /// See [`RegistryError::KeyNotFound`].
    KeyNotFound,
    /// See [`RegistryError::Format`].
    Format,
    /// See [`RegistryError::Load`].
    Load,
}

impl RegistryError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> RegistryErrorKind {
        match self {
            Self::InvalidArgument { .. } => RegistryErrorKind::InvalidArgument,
            Self::BundleNotFound { .. } => RegistryErrorKind::BundleNotFound,
            Self::KeyNotFound { .. } => RegistryErrorKind::KeyNotFound,
            Self::Format(_) => RegistryErrorKind::Format,
            Self::Load { .. } => RegistryErrorKind::Load,
        }
    }

    /// Returns `true` for the misses a resolution scan skips over.
    #[must_use]
    pub const fn is_lookup_miss(&self) -> bool {
        matches!(
            self.kind(),
            RegistryErrorKind::BundleNotFound | RegistryErrorKind::KeyNotFound
        )
    }
}
