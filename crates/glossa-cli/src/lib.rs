//! Command-line runtime for the glossa message tool.
//!
//! The module owns argument parsing, configuration bootstrapping, bundle
//! registration and output. It can be driven from the binary entrypoint or
//! from tests, where configuration loading and the output streams are
//! substituted.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use glossa_config::Config;
use glossa_core::Registry;
use glossa_properties::PropertiesLoader;
use tracing::debug;

mod args;
mod cli;
mod config;
mod errors;
mod telemetry;

use args::format_args;
use cli::{BundleSelection, Cli, CliCommand};
pub(crate) use config::{ConfigLoader, OrthoConfigLoader, apply_overrides};
pub(crate) use errors::AppError;

struct CliRunner<'a, W: Write, E: Write, L: ConfigLoader> {
    stdout: &'a mut W,
    stderr: &'a mut E,
    loader: &'a L,
}

impl<'a, W, E, L> CliRunner<'a, W, E, L>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    fn new(stdout: &'a mut W, stderr: &'a mut E, loader: &'a L) -> Self {
        Self {
            stdout,
            stderr,
            loader,
        }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let program = args
            .first()
            .cloned()
            .unwrap_or_else(|| OsString::from("glossa"));

        let result = Cli::try_parse_from(&args)
            .map_err(AppError::CliUsage)
            .and_then(|cli| {
                let config = apply_overrides(self.loader.load(&program)?, &cli);
                telemetry::initialise(&config)?;
                let lines = execute(&cli.command, &config)?;
                self.emit(&lines)
            });

        match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(AppError::CliUsage(error)) if !error.use_stderr() => {
                let _ = write!(self.stdout, "{error}");
                ExitCode::SUCCESS
            }
            Err(error) => {
                let _ = writeln!(self.stderr, "{error}");
                ExitCode::FAILURE
            }
        }
    }

    fn emit(&mut self, lines: &[String]) -> Result<(), AppError> {
        for line in lines {
            writeln!(self.stdout, "{line}").map_err(AppError::WriteOutput)?;
        }
        self.stdout.flush().map_err(AppError::WriteOutput)
    }
}

/// Runs the CLI using the provided arguments and output streams.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    run_with_loader(args, stdout, stderr, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
pub(crate) fn run_with_loader<I, W, E, L>(
    args: I,
    stdout: &mut W,
    stderr: &mut E,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner::new(stdout, stderr, loader).run(args)
}

/// Registers the bundles a command names and performs it.
fn execute(command: &CliCommand, config: &Config) -> Result<Vec<String>, AppError> {
    match command {
        CliCommand::Get { key, bundles } => {
            let registry = open_registry(config, &bundles.to_register())?;
            Ok(vec![resolve(&registry, key, bundles)?])
        }
        CliCommand::Format {
            key,
            args,
            raw,
            bundles,
        } => {
            let registry = open_registry(config, &bundles.to_register())?;
            let values = format_args(args, *raw);
            let text = match &bundles.from {
                Some(bundle) => registry.get_formatted_string_from_bundle(key, bundle, &values)?,
                None => registry.get_formatted_string(key, &values)?,
            };
            Ok(vec![text])
        }
        CliCommand::List { bundles } => {
            let registry = open_registry(config, bundles)?;
            let mut names = registry.list_bundle_names();
            names.sort_unstable();
            Ok(names)
        }
    }
}

fn open_registry(
    config: &Config,
    bundles: &[String],
) -> Result<Registry<PropertiesLoader>, AppError> {
    let locale = config.locale()?;
    let namespace = config.namespace();
    let registry = Registry::new(PropertiesLoader::open(config.bundle_root())?);
    debug!(root = %config.bundle_root(), count = bundles.len(), "registering bundles");
    for bundle in bundles {
        registry.add_bundle(&namespace, bundle, &locale)?;
    }
    Ok(registry)
}

fn resolve(
    registry: &Registry<PropertiesLoader>,
    key: &str,
    bundles: &BundleSelection,
) -> Result<String, AppError> {
    let text = match &bundles.from {
        Some(bundle) => registry.get_string_from_bundle(key, bundle)?,
        None => registry.get_string(key)?,
    };
    Ok(text)
}

#[cfg(test)]
mod tests;
