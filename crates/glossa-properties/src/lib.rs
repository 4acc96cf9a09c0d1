//! Java-style `.properties` bundles for the glossa registry.
//!
//! [`PropertiesLoader`] implements [`glossa_core::TextSetLoader`] over a
//! directory tree: the namespace selects a subdirectory and the bundle name
//! plus locale select the file. [`parse`] exposes the underlying parser for
//! callers that already hold the text.

mod loader;
mod parser;

#[cfg(test)]
mod tests;

pub use self::loader::{EXTENSION, OpenRootError, PropertiesLoader};
pub use self::parser::{ParseError, parse};
