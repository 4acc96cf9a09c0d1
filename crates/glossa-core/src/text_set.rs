//! Immutable key-to-text mappings and the identifiers used to load them.

use std::collections::HashMap;
use std::fmt;

use unic_langid::LanguageIdentifier;

/// Language and region designator selecting which translation is loaded.
pub type Locale = LanguageIdentifier;

/// Opaque scope handed to a [`TextSetLoader`](crate::TextSetLoader).
///
/// Loaders decide what a namespace means. The properties loader treats it as
/// a dotted package path (`org.example.app`) mapped onto directories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Namespace(String);

impl Namespace {
    /// Creates a namespace from its textual form.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the namespace as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the non-empty dot-separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').filter(|segment| !segment.is_empty())
    }

    /// Returns `true` for the root namespace.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments().next().is_none()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Namespace {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The loaded contents of one bundle for one locale.
///
/// A text set never changes after construction. The registry replaces it
/// wholesale when the same bundle name is registered again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSet {
    bundle: String,
    locale: Locale,
    entries: HashMap<String, String>,
}

impl TextSet {
    /// Builds a text set from key/value pairs. Later duplicates win.
    #[must_use]
    pub fn new<K, V>(
        bundle: impl Into<String>,
        locale: Locale,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            bundle: bundle.into(),
            locale,
            entries: entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Name of the bundle this set was loaded for.
    #[must_use]
    pub fn bundle(&self) -> &str {
        &self.bundle
    }

    /// Locale this set was loaded for.
    #[must_use]
    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Looks up the text for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns `true` when `key` is present, even if its text is empty.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates over the keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the set holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
