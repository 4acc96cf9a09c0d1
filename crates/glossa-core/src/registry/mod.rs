//! Bundle registry and key resolution.
//!
//! The [`Registry`] maps bundle names to loaded [`TextSet`]s. Keys resolve
//! against one named bundle, or against every registered bundle in ascending
//! name order so the answer does not depend on registration order.
//!
//! Mutations are serialised by a mutation gate and applied under a short
//! write lock. Readers hold the read lock for the whole of a lookup or scan,
//! so each one observes a single consistent snapshot and never sees a
//! removed or half-loaded bundle.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use crate::error::RegistryError;
use crate::format::{FormatArg, Formatter, PrintfFormatter};
use crate::loader::{LoadError, TextSetLoader};
use crate::text_set::{Locale, Namespace, TextSet};

type BundleMap = HashMap<String, Arc<TextSet>>;

/// Thread-safe registry of loaded bundles.
///
/// Construct one per process (or per test) and share it by reference or
/// `Arc`. All methods take `&self`.
///
/// # Example
///
/// ```
/// use glossa_core::{LoadError, Locale, Namespace, Registry, TextSet, TextSetLoader};
///
/// struct Fixed;
///
/// impl TextSetLoader for Fixed {
///     fn load(&self, _: &Namespace, bundle: &str, locale: &Locale) -> Result<TextSet, LoadError> {
///         let text = if bundle == "T1" { "one" } else { "two" };
///         Ok(TextSet::new(bundle, locale.clone(), [("msg", text)]))
///     }
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let registry = Registry::new(Fixed);
/// let locale: Locale = "en".parse()?;
/// let namespace = Namespace::new("app");
/// registry.add_bundle(&namespace, "T2", &locale)?;
/// registry.add_bundle(&namespace, "T1", &locale)?;
///
/// assert_eq!(registry.get_string("msg")?, "one");
/// registry.remove_bundle("T1")?;
/// assert_eq!(registry.get_string("msg")?, "two");
/// # Ok(()) }
/// ```
pub struct Registry<L, F = PrintfFormatter> {
    loader: L,
    formatter: F,
    bundles: RwLock<BundleMap>,
    mutation_gate: Mutex<()>,
}

impl<L: TextSetLoader> Registry<L> {
    /// Creates an empty registry using the default [`PrintfFormatter`].
    #[must_use]
    pub fn new(loader: L) -> Self {
        Self::with_formatter(loader, PrintfFormatter::new())
    }
}

impl<L: TextSetLoader, F: Formatter> Registry<L, F> {
    /// Creates an empty registry with a custom formatter.
    #[must_use]
    pub fn with_formatter(loader: L, formatter: F) -> Self {
        Self {
            loader,
            formatter,
            bundles: RwLock::new(HashMap::new()),
            mutation_gate: Mutex::new(()),
        }
    }

    /// Loads a bundle and registers it under `bundle_name`.
    ///
    /// A bundle already registered under the same name is replaced. If the
    /// load fails, the registry is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidArgument`] for an empty bundle name,
    /// [`RegistryError::BundleNotFound`] when the loader has no such bundle,
    /// and [`RegistryError::Load`] when the bundle exists but cannot be read.
    pub fn add_bundle(
        &self,
        namespace: &Namespace,
        bundle_name: &str,
        locale: &Locale,
    ) -> Result<(), RegistryError> {
        require_non_empty(bundle_name, "bundle_name")?;
        info!(
            bundle = bundle_name,
            namespace = %namespace,
            locale = %locale,
            "adding bundle"
        );

        let _gate = self.lock_mutations();
        let text_set = self
            .loader
            .load(namespace, bundle_name, locale)
            .map_err(|error| match error {
                LoadError::NotFound { .. } => RegistryError::BundleNotFound {
                    bundle: bundle_name.to_owned(),
                },
                other => RegistryError::Load {
                    bundle: bundle_name.to_owned(),
                    source: other,
                },
            })?;

        let replaced = self
            .write_bundles()
            .insert(bundle_name.to_owned(), Arc::new(text_set))
            .is_some();
        if replaced {
            debug!(bundle = bundle_name, "replaced previously registered bundle");
        }
        Ok(())
    }

    /// Unregisters `bundle_name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::BundleNotFound`] when no such bundle is
    /// registered, including for an empty name. Removing twice fails the
    /// second time.
    pub fn remove_bundle(&self, bundle_name: &str) -> Result<(), RegistryError> {
        debug!(bundle = bundle_name, "removing bundle");
        let _gate = self.lock_mutations();
        match self.write_bundles().remove(bundle_name) {
            Some(_) => {
                info!(bundle = bundle_name, "removed bundle");
                Ok(())
            }
            None => Err(RegistryError::BundleNotFound {
                bundle: bundle_name.to_owned(),
            }),
        }
    }

    /// Returns the currently registered bundle names in no particular order.
    ///
    /// The result is a copy; later mutations do not affect it.
    #[must_use]
    pub fn list_bundle_names(&self) -> Vec<String> {
        self.read_bundles().keys().cloned().collect()
    }

    /// Returns `true` when `bundle_name` is registered.
    #[must_use]
    pub fn contains_bundle(&self, bundle_name: &str) -> bool {
        self.read_bundles().contains_key(bundle_name)
    }

    /// Returns the text set registered under `bundle_name`.
    #[must_use]
    pub fn text_set(&self, bundle_name: &str) -> Option<Arc<TextSet>> {
        self.read_bundles().get(bundle_name).cloned()
    }

    /// Resolves `key` by scanning every registered bundle in ascending name
    /// order and returning the first match.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidArgument`] for an empty key and
    /// [`RegistryError::KeyNotFound`] when no bundle holds the key, including
    /// when none are registered.
    pub fn get_string(&self, key: &str) -> Result<String, RegistryError> {
        require_non_empty(key, "key")?;

        let bundles = self.read_bundles();
        let mut names: Vec<&str> = bundles.keys().map(String::as_str).collect();
        names.sort_unstable();

        for name in names {
            match lookup(&bundles, key, name) {
                Ok(text) => return Ok(text),
                Err(error) if error.is_lookup_miss() => {
                    debug!(bundle = name, key, "bundle does not contain key");
                }
                Err(error) => return Err(error),
            }
        }

        Err(RegistryError::KeyNotFound {
            key: key.to_owned(),
            bundle: None,
        })
    }

    /// Resolves `key` in the bundle registered as `bundle_name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidArgument`] for an empty key or bundle
    /// name, [`RegistryError::BundleNotFound`] when the bundle is not
    /// registered and [`RegistryError::KeyNotFound`] when it lacks the key.
    pub fn get_string_from_bundle(
        &self,
        key: &str,
        bundle_name: &str,
    ) -> Result<String, RegistryError> {
        require_non_empty(key, "key")?;
        require_non_empty(bundle_name, "bundle_name")?;
        lookup(&self.read_bundles(), key, bundle_name)
    }

    /// Resolves `key` as [`Registry::get_string`] does, then formats it.
    ///
    /// # Errors
    ///
    /// Propagates resolution errors unchanged and returns
    /// [`RegistryError::Format`] when the text and `args` do not fit.
    pub fn get_formatted_string(
        &self,
        key: &str,
        args: &[FormatArg],
    ) -> Result<String, RegistryError> {
        debug!(key, args = ?args, "formatting message");
        let template = self.get_string(key)?;
        Ok(self.formatter.format(&template, args)?)
    }

    /// Resolves `key` in `bundle_name`, then formats it.
    ///
    /// # Errors
    ///
    /// Propagates resolution errors unchanged and returns
    /// [`RegistryError::Format`] when the text and `args` do not fit.
    pub fn get_formatted_string_from_bundle(
        &self,
        key: &str,
        bundle_name: &str,
        args: &[FormatArg],
    ) -> Result<String, RegistryError> {
        debug!(key, bundle = bundle_name, args = ?args, "formatting message");
        let template = self.get_string_from_bundle(key, bundle_name)?;
        Ok(self.formatter.format(&template, args)?)
    }

    /// Returns the loader bundles are read through.
    #[must_use]
    pub const fn loader(&self) -> &L {
        &self.loader
    }

    fn lock_mutations(&self) -> MutexGuard<'_, ()> {
        self.mutation_gate.lock().unwrap_or_else(|poisoned| {
            warn!("recovering poisoned registry mutation gate");
            poisoned.into_inner()
        })
    }

    fn read_bundles(&self) -> RwLockReadGuard<'_, BundleMap> {
        self.bundles.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_bundles(&self) -> RwLockWriteGuard<'_, BundleMap> {
        self.bundles.write().unwrap_or_else(|poisoned| {
            warn!("recovering poisoned registry bundle map");
            poisoned.into_inner()
        })
    }
}

impl<L, F> fmt::Debug for Registry<L, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bundles = self.bundles.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<&String> = bundles.keys().collect();
        names.sort_unstable();
        f.debug_struct("Registry")
            .field("bundles", &names)
            .finish_non_exhaustive()
    }
}

fn lookup(bundles: &BundleMap, key: &str, bundle_name: &str) -> Result<String, RegistryError> {
    let text_set = bundles
        .get(bundle_name)
        .ok_or_else(|| RegistryError::BundleNotFound {
            bundle: bundle_name.to_owned(),
        })?;
    text_set
        .get(key)
        .map(str::to_owned)
        .ok_or_else(|| RegistryError::KeyNotFound {
            key: key.to_owned(),
            bundle: Some(bundle_name.to_owned()),
        })
}

fn require_non_empty(value: &str, argument: &'static str) -> Result<(), RegistryError> {
    if value.is_empty() {
        return Err(RegistryError::InvalidArgument { argument });
    }
    Ok(())
}
