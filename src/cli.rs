//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

use crate::model::ProjectType;

/// Top-level CLI parser for `readmegen`.
#[derive(Debug, Parser)]
#[command(
    name = "readmegen",
    version,
    about = "Generate a README for a public GitHub repository",
    after_help = "Environment:\n  \
        GITHUB_TOKEN          GitHub personal access token (optional for public repos)\n  \
        READMEGEN_RECORD      Record API calls to this cassette file\n  \
        READMEGEN_REPLAY      Serve API calls from this cassette file\n\n\
        Examples:\n  \
        readmegen https://github.com/expressjs/express\n  \
        readmegen octokit/octokit.js --output README.md\n  \
        readmegen owner/repo --template nodejs"
)]
pub struct Cli {
    /// Repository URL (https://github.com/owner/repo) or shorthand (owner/repo).
    pub repo: String,

    /// Write the README to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Force a project type instead of detecting it.
    #[arg(short, long, value_name = "TYPE", value_enum)]
    pub template: Option<ProjectType>,

    /// Skip validation of the generated README.
    #[arg(long)]
    pub no_validate: bool,

    /// GitHub access token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}
