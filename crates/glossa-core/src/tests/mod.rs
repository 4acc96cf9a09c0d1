//! Crate-level integration and BDD tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use crate::error::RegistryErrorKind;
use crate::loader::{LoadError, TextSetLoader};
use crate::registry::Registry;
use crate::text_set::{Locale, Namespace, TextSet};


/// In-memory loader keyed by bundle name and locale tag.
#[derive(Debug, Default, Clone)]
pub(crate) struct MemoryLoader {
    bundles: HashMap<(String, String), Vec<(String, String)>>,
}

impl MemoryLoader {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_bundle(mut self, bundle: &str, locale: &str, entries: &[(&str, &str)]) -> Self {
        self.insert(bundle, locale, entries);
        self
    }

    pub(crate) fn insert(&mut self, bundle: &str, locale: &str, entries: &[(&str, &str)]) {
        let owned = entries
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        self.bundles
            .insert((bundle.to_owned(), locale.to_owned()), owned);
    }
}

impl TextSetLoader for MemoryLoader {
    fn load(
        &self,
        namespace: &Namespace,
        bundle: &str,
        locale: &Locale,
    ) -> Result<TextSet, LoadError> {
        self.bundles
            .get(&(bundle.to_owned(), locale.to_string()))
            .map(|entries| TextSet::new(bundle, locale.clone(), entries.iter().cloned()))
            .ok_or_else(|| LoadError::not_found(namespace, bundle, locale))
    }
}

pub(crate) fn en_us() -> Locale {
    "en-US".parse().expect("valid locale tag")
}

/// Loader holding the bundles the message fixtures are written against.
pub(crate) fn sample_loader() -> MemoryLoader {
    MemoryLoader::new()
        .with_bundle(
            "I18N_Resource_Bundle",
            "en-US",
            &[
                ("com.sample.message", "Hello All!!!"),
                ("com.sample.formattedmessage", "Hello %s!!!"),
                ("com.sample.formattedmessage1", "Hello %d!!!"),
                ("com.sample.empty", ""),
            ],
        )
        .with_bundle(
            "Test1_Resource_Bundle",
            "en-US",
            &[
                ("test1.message", "test message 1"),
                ("generic.message", "Right message"),
                ("generic.formatted.message", "This is a formatted message %s."),
            ],
        )
        .with_bundle(
            "Test2_Resource_Bundle",
            "en-US",
            &[
                ("test2.message", "test message 2"),
                ("generic.message", "Wrong message"),
                ("generic.formatted.message", "This is the wrong message %s."),
            ],
        )
}

#[test]
fn readers_never_observe_partial_mutations() {
    let loader = MemoryLoader::new()
        .with_bundle("a_bundle", "en-US", &[("msg", "from a")])
        .with_bundle("z_bundle", "en-US", &[("msg", "from z")]);
    let registry = Arc::new(Registry::new(loader));
    let namespace = Namespace::new("app");
    let locale = en_us();
    registry
        .add_bundle(&namespace, "z_bundle", &locale)
        .expect("register z_bundle");

    thread::scope(|scope| {
        let writer = Arc::clone(&registry);
        let (writer_namespace, writer_locale) = (namespace.clone(), locale.clone());
        scope.spawn(move || {
            for _ in 0..200 {
                writer
                    .add_bundle(&writer_namespace, "a_bundle", &writer_locale)
                    .expect("register a_bundle");
                writer.remove_bundle("a_bundle").expect("remove a_bundle");
            }
        });

        for _ in 0..4 {
            let reader = Arc::clone(&registry);
            scope.spawn(move || {
                for _ in 0..200 {
                    let text = reader.get_string("msg").expect("z_bundle always answers");
                    assert!(
                        text == "from a" || text == "from z",
                        "unexpected resolution: {text}"
                    );
                    let names = reader.list_bundle_names();
                    assert!(names.iter().any(|name| name == "z_bundle"));
                    assert!(names.len() <= 2, "unexpected names: {names:?}");
                }
            });
        }
    });

    assert_eq!(registry.list_bundle_names(), vec![String::from("z_bundle")]);
    assert_eq!(registry.get_string("msg").expect("resolve"), "from z");
}

#[test]
fn registry_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Registry<MemoryLoader>>();
}

#[test]
fn end_to_end_scan_then_format() {
    let registry = Registry::new(sample_loader());
    let namespace = Namespace::new("org.example");
    let locale = en_us();
    for bundle in ["Test2_Resource_Bundle", "Test1_Resource_Bundle"] {
        registry
            .add_bundle(&namespace, bundle, &locale)
            .expect("register bundle");
    }

    let text = registry
        .get_formatted_string("generic.formatted.message", &["Thor".into()])
        .expect("format");
    assert_eq!(text, "This is a formatted message Thor.");

    let error = registry
        .get_formatted_string("com.sample.formattedmessage", &["value1".into()])
        .expect_err("I18N_Resource_Bundle is not registered");
    assert_eq!(error.kind(), RegistryErrorKind::KeyNotFound);
}
