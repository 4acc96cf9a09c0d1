//! Filesystem loader resolving bundles to `.properties` files.

use std::io;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs::Dir;
use glossa_core::{LoadError, Locale, Namespace, TextSet, TextSetLoader};
use thiserror::Error;
use tracing::debug;

use crate::parser::parse;

/// File extension of bundle files.
pub const EXTENSION: &str = "properties";

/// Errors raised while opening the bundle root.
#[derive(Debug, Error)]
#[error("failed to open bundle root {path}: {source}")]
pub struct OpenRootError {
    /// Directory that could not be opened.
    pub path: Utf8PathBuf,
    /// Underlying I/O error.
    #[source]
    pub source: io::Error,
}

/// Loads bundles from `.properties` files beneath a root directory.
///
/// A bundle `messages` in namespace `org.example` for locale `en-US` is read
/// from `org/example/messages_en_US.properties` relative to the root. Only
/// the exact locale is consulted. Reads go through a capability handle, so
/// a bundle or namespace name cannot reach outside the root.
#[derive(Debug)]
pub struct PropertiesLoader {
    root: Dir,
    root_path: Utf8PathBuf,
}

impl PropertiesLoader {
    /// Opens `root` as the directory bundles are read from.
    ///
    /// # Errors
    ///
    /// Returns [`OpenRootError`] when the directory cannot be opened.
    pub fn open(root: impl AsRef<Utf8Path>) -> Result<Self, OpenRootError> {
        let root_path = root.as_ref().to_path_buf();
        let root = Dir::open_ambient_dir(&root_path, cap_std::ambient_authority()).map_err(
            |source| OpenRootError {
                path: root_path.clone(),
                source,
            },
        )?;
        Ok(Self { root, root_path })
    }

    /// Directory bundles are read from.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root_path
    }

    /// Path of the file holding `bundle`, relative to the root.
    #[must_use]
    pub fn bundle_path(namespace: &Namespace, bundle: &str, locale: &Locale) -> Utf8PathBuf {
        let mut path: Utf8PathBuf = namespace.segments().collect();
        let file_name = match &locale.region {
            Some(region) => format!("{bundle}_{}_{region}.{EXTENSION}", locale.language),
            None => format!("{bundle}_{}.{EXTENSION}", locale.language),
        };
        path.push(file_name);
        path
    }
}

impl TextSetLoader for PropertiesLoader {
    fn load(
        &self,
        namespace: &Namespace,
        bundle: &str,
        locale: &Locale,
    ) -> Result<TextSet, LoadError> {
        let path = Self::bundle_path(namespace, bundle, locale);
        debug!(bundle, path = %path, root = %self.root_path, "reading bundle file");

        let source = match self.root.read_to_string(&path) {
            Ok(source) => source,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!(bundle, path = %path, "bundle file not found");
                return Err(LoadError::not_found(namespace, bundle, locale));
            }
            Err(error) => {
                return Err(LoadError::Io {
                    bundle: bundle.to_owned(),
                    location: self.root_path.join(&path).into_string(),
                    source: Arc::new(error),
                });
            }
        };

        let entries = parse(&source).map_err(|error| LoadError::Parse {
            bundle: bundle.to_owned(),
            line: error.line,
            message: error.message,
        })?;
        debug!(bundle, entries = entries.len(), "parsed bundle file");
        Ok(TextSet::new(bundle, locale.clone(), entries))
    }
}
