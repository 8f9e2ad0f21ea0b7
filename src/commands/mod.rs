//! Command dispatch.

pub mod generate;

use crate::cli::Cli;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::model::RepoRef;

/// Runs the pipeline described by `cli`.
///
/// Settings come from the environment, with `--token` taking precedence.
/// When `READMEGEN_REPLAY` names a cassette, host calls are served from it;
/// when `READMEGEN_RECORD` does, live calls are recorded into it and the
/// cassette is written once the run ends, even on error.
///
/// # Errors
///
/// Returns an `Error: ...` line for an invalid repository reference (before
/// any network access), an unusable cassette, or any pipeline failure.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let config = Config::from_env().with_token(cli.token.clone());
    let repo = RepoRef::parse(&cli.repo).map_err(|e| format!("Error: {e}"))?;
    tracing::debug!(%repo, authenticated = config.token.is_some(), "starting");

    let ctx = ServiceContext::from_config(&config, &repo.to_string())
        .map_err(|e| format!("Error: {e}"))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Error: failed to start async runtime: {e}"))?;

    let options = generate::GenerateOptions::from(cli);
    let mut stdout = std::io::stdout().lock();
    runtime
        .block_on(generate::run(&ctx, &repo, &options, &mut stdout))
        .map_err(|e| format!("Error: {e}"))
}
