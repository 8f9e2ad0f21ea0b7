//! The README pipeline: gather, analyze, generate, validate, write.

use std::io::Write;
use std::path::PathBuf;

use crate::analyze::analyze_repo_as;
use crate::cli::Cli;
use crate::context::ServiceContext;
use crate::gather::gather_repo_data;
use crate::generate::generate_readme;
use crate::model::{ProjectType, RepoRef};
use crate::ports::HostError;
use crate::validate::{format_report, validate};

/// What to generate and where to put it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Repository reference as the user typed it.
    pub source: String,
    /// Destination file; stdout when absent.
    pub output: Option<PathBuf>,
    /// Forced project type.
    pub template: Option<ProjectType>,
    /// Run the validator and print its report.
    pub validate: bool,
}

impl From<&Cli> for GenerateOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            source: cli.repo.clone(),
            output: cli.output.clone(),
            template: cli.template,
            validate: !cli.no_validate,
        }
    }
}

/// Runs the pipeline for `repo`.
///
/// Progress and the validation report go to stderr. The README goes to
/// `stdout` unless an output file is set, in which case it is written
/// through `ctx.fs` only after every earlier stage has succeeded.
///
/// # Errors
///
/// Returns a one-line message when the host fails or the output file
/// cannot be written.
pub async fn run(
    ctx: &ServiceContext,
    repo: &RepoRef,
    options: &GenerateOptions,
    stdout: &mut impl Write,
) -> Result<(), String> {
    eprintln!("[1/4] Fetching repository data from {}...", options.source);
    let data = gather_repo_data(ctx.host.as_ref(), repo).await.map_err(|e| host_message(&e))?;

    eprintln!("[2/4] Analyzing repository structure...");
    let analysis = analyze_repo_as(&data, options.template);

    eprintln!("[3/4] Generating README...");
    let readme = generate_readme(&analysis);

    if options.validate {
        eprintln!("[4/4] Validating generated README...");
        let result = validate(&readme);
        eprintln!("\n{}", format_report(&result));
    } else {
        eprintln!("[4/4] Skipping validation.");
    }

    match &options.output {
        Some(path) => {
            ctx.fs
                .write(path, &readme)
                .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
            let shown = std::path::absolute(path).unwrap_or_else(|_| path.clone());
            eprintln!("\nREADME written to {}", shown.display());
        }
        None => {
            stdout
                .write_all(readme.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|e| format!("failed to write README to stdout: {e}"))?;
        }
    }

    eprintln!("\nDone.");
    Ok(())
}

/// The error text followed by its remediation hint, if any.
fn host_message(err: &HostError) -> String {
    match err.hint() {
        Some(hint) => format!("{err}. {hint}"),
        None => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RepoMetadata, TreeEntry};
    use crate::ports::{FileSystem, HostFuture, RepoHost};
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    /// Serves a small node project, or fails every call with `error`.
    struct FakeHost {
        error: Option<HostError>,
    }

    impl FakeHost {
        fn result<T: Send + 'static>(&self, value: T) -> HostFuture<'_, T> {
            let result = match &self.error {
                Some(err) => Err(err.clone()),
                None => Ok(value),
            };
            Box::pin(async move { result })
        }
    }

    impl RepoHost for FakeHost {
        fn fetch_metadata(&self, repo: &RepoRef) -> HostFuture<'_, RepoMetadata> {
            self.result(RepoMetadata {
                name: repo.repo.clone(),
                full_name: repo.to_string(),
                language: "JavaScript".into(),
                license: Some("MIT".into()),
                default_branch: "main".into(),
                ..RepoMetadata::default()
            })
        }

        fn fetch_tree(&self, _repo: &RepoRef, _branch: &str) -> HostFuture<'_, Vec<TreeEntry>> {
            self.result(vec![TreeEntry::file("package.json", 90)])
        }

        fn fetch_file(&self, _repo: &RepoRef, path: &str) -> HostFuture<'_, Option<String>> {
            let content = (path == "package.json").then(|| {
                r#"{"dependencies":{"express":"^4.18.0"},"scripts":{"start":"node index.js"}}"#
                    .to_string()
            });
            self.result(content)
        }
    }

    #[derive(Clone, Default)]
    struct MemoryFs {
        files: Arc<Mutex<HashMap<PathBuf, String>>>,
    }

    impl FileSystem for MemoryFs {
        fn write(
            &self,
            path: &Path,
            contents: &str,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            self.files.lock().unwrap().insert(path.to_path_buf(), contents.to_string());
            Ok(())
        }
    }

    fn context(error: Option<HostError>) -> (ServiceContext, MemoryFs) {
        let fs = MemoryFs::default();
        (ServiceContext::new(Box::new(FakeHost { error }), Box::new(fs.clone())), fs)
    }

    fn options(output: Option<&str>) -> GenerateOptions {
        GenerateOptions {
            source: "me/my-app".into(),
            output: output.map(PathBuf::from),
            template: None,
            validate: true,
        }
    }

    fn repo() -> RepoRef {
        RepoRef { owner: "me".into(), repo: "my-app".into() }
    }

    #[tokio::test]
    async fn writes_readme_to_stdout_by_default() {
        let (ctx, fs) = context(None);
        let mut stdout = Vec::new();
        run(&ctx, &repo(), &options(None), &mut stdout).await.unwrap();

        let readme = String::from_utf8(stdout).unwrap();
        assert!(readme.starts_with("# my-app\n"));
        assert!(readme.contains("npm start"));
        assert!(fs.files.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn writes_readme_to_output_file_only() {
        let (ctx, fs) = context(None);
        let mut stdout = Vec::new();
        run(&ctx, &repo(), &options(Some("out/README.md")), &mut stdout).await.unwrap();

        assert!(stdout.is_empty());
        let files = fs.files.lock().unwrap();
        let readme = &files[Path::new("out/README.md")];
        assert!(readme.contains("| express | ^4.18.0 |"));
    }

    #[tokio::test]
    async fn template_override_changes_generated_sections() {
        let (ctx, _fs) = context(None);
        let mut stdout = Vec::new();
        let opts =
            GenerateOptions { template: Some(ProjectType::Rust), validate: false, ..options(None) };
        run(&ctx, &repo(), &opts, &mut stdout).await.unwrap();

        let readme = String::from_utf8(stdout).unwrap();
        assert!(readme.contains("cargo run"));
        assert!(!readme.contains("## Dependencies"));
    }

    #[tokio::test]
    async fn host_failure_writes_nothing_and_carries_hint() {
        let (ctx, fs) = context(Some(HostError::NotFound { resource: "repos/me/my-app".into() }));
        let mut stdout = Vec::new();
        let err = run(&ctx, &repo(), &options(Some("README.md")), &mut stdout).await.unwrap_err();

        assert_eq!(
            err,
            "not found: repos/me/my-app. Repository not found. Check the URL and ensure it is \
             public or that GITHUB_TOKEN is set."
        );
        assert!(stdout.is_empty());
        assert!(fs.files.lock().unwrap().is_empty());
    }

    #[test]
    fn options_follow_cli_flags() {
        use clap::Parser;
        let cli = Cli::parse_from(["readmegen", "a/b", "--no-validate", "-t", "go"]);
        let opts = GenerateOptions::from(&cli);
        assert_eq!(opts.source, "a/b");
        assert!(!opts.validate);
        assert_eq!(opts.template, Some(ProjectType::Go));
    }
}
