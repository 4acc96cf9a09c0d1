//! Runtime registry for localised message lookup.
//!
//! The `glossa-core` crate holds named *bundles* of key-to-text mappings, one
//! per bundle name, each loaded for a specific locale. Keys resolve either
//! against a named bundle or, when no bundle is given, by scanning every
//! registered bundle in ascending name order and returning the first hit.
//! Resolved text can be passed through a printf-style [`Formatter`] with
//! positional [`FormatArg`] values.
//!
//! Loading is delegated to a [`TextSetLoader`], so the registry itself knows
//! nothing about where bundles live. The `glossa-properties` crate supplies a
//! loader for Java-style `.properties` files.
//!
//! # Example
//!
//! ```
//! use glossa_core::{
//!     FormatArg, LoadError, Locale, Namespace, Registry, TextSet, TextSetLoader,
//! };
//!
//! struct Greetings;
//!
//! impl TextSetLoader for Greetings {
//!     fn load(
//!         &self,
//!         _namespace: &Namespace,
//!         bundle: &str,
//!         locale: &Locale,
//!     ) -> Result<TextSet, LoadError> {
//!         Ok(TextSet::new(bundle, locale.clone(), [("greeting", "Hello %s!!!")]))
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Registry::new(Greetings);
//! let locale: Locale = "en-US".parse()?;
//! registry.add_bundle(&Namespace::new("app"), "messages", &locale)?;
//!
//! let text = registry.get_formatted_string("greeting", &[FormatArg::from("world")])?;
//! assert_eq!(text, "Hello world!!!");
//! # Ok(()) }
//! ```

pub mod error;
pub mod format;
mod loader;
pub mod registry;
mod text_set;

#[cfg(test)]
mod tests;

pub use self::error::{RegistryError, RegistryErrorKind};
pub use self::format::{FormatArg, FormatError, Formatter, MAX_FIELD_WIDTH, PrintfFormatter};
pub use self::loader::{LoadError, TextSetLoader};
pub use self::registry::Registry;
pub use self::text_set::{Locale, Namespace, TextSet};
