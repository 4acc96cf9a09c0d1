//! The loading seam between the registry and bundle storage.

use std::io;
use std::sync::Arc;

use thiserror::Error;

use crate::text_set::{Locale, Namespace, TextSet};

/// Errors a [`TextSetLoader`] reports back to the registry.
///
/// I/O errors are wrapped in `Arc` so the error stays `Clone`.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    /// No bundle exists under the namespace for the requested locale.
    #[error("bundle '{bundle}' for locale {locale} not found in namespace '{namespace}'")]
    NotFound {
        /// Namespace that was searched.
        namespace: String,
        /// Bundle name that was requested.
        bundle: String,
        /// Locale that was requested.
        locale: String,
    },

    /// The bundle exists but could not be read.
    #[error("failed to read bundle '{bundle}' from {location}: {source}")]
    Io {
        /// Bundle name that was requested.
        bundle: String,
        /// Where the loader looked, in loader-specific terms.
        location: String,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// The bundle was read but its contents are malformed.
    #[error("malformed bundle '{bundle}' at line {line}: {message}")]
    Parse {
        /// Bundle name that was requested.
        bundle: String,
        /// One-based line number of the offending entry.
        line: usize,
        /// Description of the problem.
        message: String,
    },
}

impl LoadError {
    /// Builds a [`LoadError::NotFound`] for the given request.
    #[must_use]
    pub fn not_found(namespace: &Namespace, bundle: &str, locale: &Locale) -> Self {
        Self::NotFound {
            namespace: namespace.to_string(),
            bundle: bundle.to_owned(),
            locale: locale.to_string(),
        }
    }
}

/// Produces the [`TextSet`] for a bundle name in a namespace and locale.
///
/// Implementations may block on I/O. The registry calls them while holding
/// its mutation gate but never while holding the lock readers use.
///
/// # Example
///
/// ```
/// use glossa_core::{LoadError, Locale, Namespace, TextSet, TextSetLoader};
///
/// struct Empty;
///
/// impl TextSetLoader for Empty {
///     fn load(
///         &self,
///         namespace: &Namespace,
///         bundle: &str,
///         locale: &Locale,
///     ) -> Result<TextSet, LoadError> {
///         Err(LoadError::not_found(namespace, bundle, locale))
///     }
/// }
/// ```
pub trait TextSetLoader: Send + Sync {
    /// Loads the named bundle.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotFound`] when no such bundle exists, or another
    /// [`LoadError`] when it exists but cannot be read or parsed.
    fn load(
        &self,
        namespace: &Namespace,
        bundle: &str,
        locale: &Locale,
    ) -> Result<TextSet, LoadError>;
}

impl<T: TextSetLoader + ?Sized> TextSetLoader for Arc<T> {
    fn load(
        &self,
        namespace: &Namespace,
        bundle: &str,
        locale: &Locale,
    ) -> Result<TextSet, LoadError> {
        (**self).load(namespace, bundle, locale)
    }
}

impl<T: TextSetLoader + ?Sized> TextSetLoader for Box<T> {
    fn load(
        &self,
        namespace: &Namespace,
        bundle: &str,
        locale: &Locale,
    ) -> Result<TextSet, LoadError> {
        (**self).load(namespace, bundle, locale)
    }
}
