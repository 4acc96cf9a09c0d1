//! Unit tests for the CLI runtime.

use std::ffi::OsString;
use std::fs;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use glossa_config::{Config, LogFormat};
use glossa_core::FormatArg;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use crate::args::parse_format_arg;
use crate::cli::{Cli, CliCommand};
use crate::{AppError, ConfigLoader, apply_overrides, run_with_loader};

struct FixedConfigLoader(Config);

impl ConfigLoader for FixedConfigLoader {
    fn load(&self, _program: &OsString) -> Result<Config, AppError> {
        Ok(self.0.clone())
    }
}

struct Bundles {
    dir: TempDir,
}

impl Bundles {
    fn root(&self) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.dir.path().to_path_buf()).expect("UTF-8 temp dir")
    }

    fn loader(&self) -> FixedConfigLoader {
        FixedConfigLoader(Config {
            bundle_root: Some(self.root()),
            namespace: Some(String::from("app")),
            ..Config::default()
        })
    }
}

#[fixture]
fn bundles() -> Bundles {
    let dir = TempDir::new().expect("create temp dir");
    let app = dir.path().join("app");
    fs::create_dir_all(&app).expect("create namespace directory");
    fs::write(
        app.join("Test1_Resource_Bundle_en_US.properties"),
        "generic.message=Right message\ngreeting=Hello %s!!!\ncount=%d items\n",
    )
    .expect("write Test1");
    fs::write(
        app.join("Test2_Resource_Bundle_en_US.properties"),
        "generic.message=Wrong message\ntest2.message=test message 2\n",
    )
    .expect("write Test2");
    Bundles { dir }
}

struct Outcome {
    status: ExitCode,
    stdout: String,
    stderr: String,
}

fn invoke(loader: &FixedConfigLoader, args: &[&str]) -> Outcome {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let argv = std::iter::once("glossa")
        .chain(args.iter().copied())
        .map(OsString::from);
    let status = run_with_loader(argv, &mut stdout, &mut stderr, loader);
    Outcome {
        status,
        stdout: String::from_utf8(stdout).expect("stdout is UTF-8"),
        stderr: String::from_utf8(stderr).expect("stderr is UTF-8"),
    }
}

#[rstest]
#[case::null("null", FormatArg::Null)]
#[case::truthy("true", FormatArg::Bool(true))]
#[case::falsy("false", FormatArg::Bool(false))]
#[case::integer("42", FormatArg::Int(42))]
#[case::negative("-7", FormatArg::Int(-7))]
#[case::float("2.5", FormatArg::Float(2.5))]
#[case::exponent("1e3", FormatArg::Float(1000.0))]
#[case::text("value1", FormatArg::from("value1"))]
#[case::infinity_is_text("inf", FormatArg::from("inf"))]
#[case::capitalised_null_is_text("NULL", FormatArg::from("NULL"))]
fn words_become_typed_arguments(#[case] word: &str, #[case] expected: FormatArg) {
    assert_eq!(parse_format_arg(word), expected);
}

#[test]
fn raw_mode_keeps_text() {
    let words = vec![String::from("42"), String::from("null")];
    assert_eq!(
        crate::args::format_args(&words, true),
        vec![FormatArg::from("42"), FormatArg::from("null")]
    );
}

#[test]
fn global_flags_override_loaded_configuration() {
    let cli = Cli::try_parse_from([
        "glossa",
        "list",
        "--root",
        "/srv/bundles",
        "--locale",
        "fr-FR",
        "--log-format",
        "json",
    ])
    .expect("parse arguments");
    let base = Config {
        namespace: Some(String::from("org.example")),
        locale: Some(String::from("de-DE")),
        ..Config::default()
    };

    let config = apply_overrides(base, &cli);
    assert_eq!(config.bundle_root().as_str(), "/srv/bundles");
    assert_eq!(config.locale_tag(), "fr-FR");
    assert_eq!(config.namespace().as_str(), "org.example");
    assert_eq!(config.log_format(), LogFormat::Json);
}

#[test]
fn from_bundle_is_registered_once() {
    let cli = Cli::try_parse_from([
        "glossa", "get", "key", "--bundle", "a", "--from", "b", "--bundle", "b",
    ])
    .expect("parse arguments");
    let CliCommand::Get { bundles, .. } = cli.command else {
        panic!("expected get command");
    };
    assert_eq!(bundles.to_register(), vec![String::from("a"), String::from("b")]);
}

#[rstest]
fn get_scans_bundles_alphabetically(bundles: Bundles) {
    let outcome = invoke(
        &bundles.loader(),
        &[
            "get",
            "generic.message",
            "--bundle",
            "Test2_Resource_Bundle",
            "--bundle",
            "Test1_Resource_Bundle",
        ],
    );
    assert_eq!(outcome.status, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    assert_eq!(outcome.stdout, "Right message\n");
}

#[rstest]
fn get_from_named_bundle(bundles: Bundles) {
    let outcome = invoke(
        &bundles.loader(),
        &["get", "generic.message", "--from", "Test2_Resource_Bundle"],
    );
    assert_eq!(outcome.status, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    assert_eq!(outcome.stdout, "Wrong message\n");
}

#[rstest]
#[case::string(&["format", "greeting", "value1"], "Hello value1!!!\n")]
#[case::null(&["format", "greeting", "null"], "Hello null!!!\n")]
#[case::integer(&["format", "count", "3"], "3 items\n")]
#[case::raw_string(&["format", "--raw", "greeting", "null"], "Hello null!!!\n")]
fn format_substitutes_arguments(bundles: Bundles, #[case] args: &[&str], #[case] expected: &str) {
    let mut argv = args.to_vec();
    argv.extend(["--bundle", "Test1_Resource_Bundle"]);
    let outcome = invoke(&bundles.loader(), &argv);
    assert_eq!(outcome.status, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    assert_eq!(outcome.stdout, expected);
}

#[rstest]
fn format_reports_incompatible_arguments(bundles: Bundles) {
    let outcome = invoke(
        &bundles.loader(),
        &["format", "count", "st", "--bundle", "Test1_Resource_Bundle"],
    );
    assert_eq!(outcome.status, ExitCode::FAILURE);
    assert!(
        outcome.stderr.contains("failed to format message"),
        "stderr: {}",
        outcome.stderr
    );
}

#[rstest]
fn list_prints_sorted_names(bundles: Bundles) {
    let outcome = invoke(
        &bundles.loader(),
        &[
            "list",
            "--bundle",
            "Test2_Resource_Bundle",
            "--bundle",
            "Test1_Resource_Bundle",
        ],
    );
    assert_eq!(outcome.status, ExitCode::SUCCESS, "stderr: {}", outcome.stderr);
    assert_eq!(outcome.stdout, "Test1_Resource_Bundle\nTest2_Resource_Bundle\n");
}

#[rstest]
#[case::unknown_key(&["get", "missing.key", "--bundle", "Test1_Resource_Bundle"], "not found in any registered bundle")]
#[case::unknown_bundle(&["get", "key", "--bundle", "Nope"], "bundle 'Nope' not found")]
#[case::bad_locale(&["get", "key", "--locale", "not a locale"], "invalid locale")]
#[case::bad_root(&["get", "key", "--root", "/nonexistent/glossa/root"], "failed to open bundle root")]
#[case::missing_key(&["get"], "KEY")]
fn failures_exit_with_message(
    bundles: Bundles,
    #[case] args: &[&str],
    #[case] fragment: &str,
) {
    let outcome = invoke(&bundles.loader(), args);
    assert_eq!(outcome.status, ExitCode::FAILURE);
    assert!(outcome.stdout.is_empty(), "stdout: {}", outcome.stdout);
    assert!(
        outcome.stderr.contains(fragment),
        "expected {fragment:?} in stderr: {}",
        outcome.stderr
    );
}

#[rstest]
fn help_goes_to_stdout(bundles: Bundles) {
    let outcome = invoke(&bundles.loader(), &["--help"]);
    assert_eq!(outcome.status, ExitCode::SUCCESS);
    assert!(outcome.stdout.contains("Usage"), "stdout: {}", outcome.stdout);
    assert!(outcome.stderr.is_empty());
}
