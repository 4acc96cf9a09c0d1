//! CLI argument definitions for the glossa tool.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use glossa_config::LogFormat;

/// Command-line interface for resolving localised messages.
#[derive(Parser, Debug)]
#[command(
    name = "glossa",
    version,
    about = "Resolve and format messages from .properties bundles",
    disable_help_subcommand = true
)]
pub(crate) struct Cli {
    /// Directory holding the bundle tree.
    #[arg(long, global = true, value_name = "DIR")]
    pub(crate) root: Option<Utf8PathBuf>,
    /// Locale tag bundles are loaded for (for example `en-US`).
    #[arg(long, global = true, value_name = "TAG")]
    pub(crate) locale: Option<String>,
    /// Dotted namespace bundles are loaded from.
    #[arg(long, global = true, value_name = "NAMESPACE")]
    pub(crate) namespace: Option<String>,
    /// Tracing filter expression.
    #[arg(long, global = true, value_name = "FILTER")]
    pub(crate) log_filter: Option<String>,
    /// Log output format (`json` or `compact`).
    #[arg(long, global = true, value_name = "FORMAT")]
    pub(crate) log_format: Option<LogFormat>,
    /// The operation to perform.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Operations offered by the CLI.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Prints the text registered for a key.
    Get {
        /// Key to resolve.
        key: String,
        /// Bundles to register and consult.
        #[command(flatten)]
        bundles: BundleSelection,
    },
    /// Prints the text for a key with the arguments substituted.
    Format {
        /// Key to resolve.
        key: String,
        /// Positional format arguments.
        #[arg(value_name = "ARG", num_args = 0.., allow_negative_numbers = true)]
        args: Vec<String>,
        /// Passes every argument as a string.
        #[arg(long)]
        raw: bool,
        /// Bundles to register and consult.
        #[command(flatten)]
        bundles: BundleSelection,
    },
    /// Registers bundles and prints their names.
    List {
        /// Bundles to register.
        #[arg(long = "bundle", value_name = "NAME")]
        bundles: Vec<String>,
    },
}

/// Bundle flags shared by the lookup commands.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct BundleSelection {
    /// Registers a bundle; may be repeated.
    #[arg(long = "bundle", value_name = "NAME")]
    pub(crate) bundles: Vec<String>,
    /// Resolves from this bundle only, registering it if needed.
    #[arg(long, value_name = "NAME")]
    pub(crate) from: Option<String>,
}

impl BundleSelection {
    /// Names to register, in command-line order and without duplicates.
    pub(crate) fn to_register(&self) -> Vec<String> {
        let mut names = self.bundles.clone();
        if let Some(from) = &self.from {
            names.push(from.clone());
        }
        let mut seen = std::collections::HashSet::new();
        names.retain(|name| seen.insert(name.clone()));
        names
    }
}
