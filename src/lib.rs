//! Core library entry for the `readmegen` CLI.
//!
//! The pipeline is gather → analyze → generate → validate. Only the gather
//! stage talks to the outside world, through the [`ports::RepoHost`] port.

pub mod adapters;
pub mod analyze;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod gather;
pub mod generate;
pub mod model;
pub mod ports;
pub mod validate;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// `--help` and `--version` print to stdout and succeed.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return err.print().map_err(|e| format!("failed to print help: {e}"));
        }
        Err(err) => return Err(err.to_string().trim_end().to_string()),
    };
    commands::dispatch(&cli)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_succeeds_on_help() {
        assert!(run(["readmegen", "--help"]).is_ok());
        assert!(run(["readmegen", "--version"]).is_ok());
    }

    #[test]
    fn run_errors_on_missing_repo_and_unknown_flag() {
        let err = run(["readmegen"]).unwrap_err();
        assert!(err.contains("<REPO>"), "{err}");
        assert!(run(["readmegen", "a/b", "--bogus"]).is_err());
    }

    #[test]
    fn run_rejects_invalid_repository() {
        let err = run(["readmegen", "https://gitlab.com/a/b"]).unwrap_err();
        assert!(err.starts_with("Error: Invalid GitHub repository URL"));
    }
}
