//! CLI entrypoint for the glossa message tool.
//!
//! The binary delegates to [`glossa_cli::run`], which loads configuration,
//! registers the requested bundles and prints the resolved message.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    glossa_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
