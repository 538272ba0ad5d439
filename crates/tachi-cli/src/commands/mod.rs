//! Command handlers. Each submodule translates parsed arguments into calls
//! on the core services and renders the result.

use std::io::{self, Write};
use std::path::Path;

use crate::error::{CliResult, IntoCli};

pub mod completions;
pub mod generate;
pub mod init;
#[cfg(feature = "interactive")]
pub mod interactive;
pub mod settings;
pub mod validate;

/// Ask a yes/no question on stdin. Anything but `y`/`yes` means no.
pub(crate) fn confirm(question: &str) -> CliResult<bool> {
    print!("{question} [y/N] ");
    io::stdout()
        .flush()
        .with_cli_context(|| "failed to flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .with_cli_context(|| "failed to read confirmation input")?;

    Ok(is_yes(&input))
}

fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// `true` when `dir` exists and has at least one entry.
pub(crate) fn is_non_empty_dir(dir: &Path) -> CliResult<bool> {
    match std::fs::read_dir(dir) {
        Ok(mut entries) => Ok(entries.next().is_some()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_cli_context(|| format!("failed to inspect {}", dir.display())),
    }
}
