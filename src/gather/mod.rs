//! Data gathering: pulls metadata, the tree, and a bounded set of files.

use futures::stream::{self, StreamExt, TryStreamExt};

use crate::model::{FileContents, RepoData, RepoRef, TreeEntry};
use crate::ports::repo_host::{HostError, RepoHost};

/// Root-level manifest and documentation files fetched when present, in order.
pub const KEY_FILES: [&str; 14] = [
    "package.json",
    "requirements.txt",
    "setup.py",
    "pyproject.toml",
    "Cargo.toml",
    "go.mod",
    "Makefile",
    "Dockerfile",
    "docker-compose.yml",
    "docker-compose.yaml",
    ".env.example",
    "LICENSE",
    "CONTRIBUTING.md",
    "CHANGELOG.md",
];

/// Extensions of files sampled for API extraction.
pub const SOURCE_EXTENSIONS: [&str; 7] = [".js", ".ts", ".py", ".go", ".rs", ".java", ".rb"];

/// Path fragments that mark vendored or generated code.
const EXCLUDED_FRAGMENTS: [&str; 4] = ["node_modules", "vendor", "dist", ".min."];

/// Maximum number of source files sampled.
pub const MAX_SOURCE_FILES: usize = 5;

/// Source files at or above this size are skipped.
pub const MAX_SOURCE_BYTES: u64 = 50_000;

/// Upper bound on file fetches in flight at once.
const FETCH_CONCURRENCY: usize = 4;

/// Returns the key files present in `tree`, in allow-list order.
#[must_use]
pub fn present_key_files(tree: &[TreeEntry]) -> Vec<&'static str> {
    KEY_FILES
        .iter()
        .copied()
        .filter(|key| tree.iter().any(|e| e.is_file() && e.path == *key))
        .collect()
}

/// Returns the first [`MAX_SOURCE_FILES`] small, non-vendored source files in tree order.
#[must_use]
pub fn select_source_files(tree: &[TreeEntry]) -> Vec<&TreeEntry> {
    tree.iter()
        .filter(|e| {
            e.is_file()
                && e.size < MAX_SOURCE_BYTES
                && SOURCE_EXTENSIONS.iter().any(|ext| e.path.ends_with(ext))
                && !EXCLUDED_FRAGMENTS.iter().any(|frag| e.path.contains(frag))
        })
        .take(MAX_SOURCE_FILES)
        .collect()
}

/// Fetches everything the analyzer needs for `repo`.
///
/// Metadata and the tree are fetched first. Key files and sampled source
/// files are then fetched with bounded concurrency; results keep request
/// order. A file the host reports as missing is left out of the mapping.
///
/// # Errors
///
/// Returns the first host error other than a missing file.
pub async fn gather_repo_data(host: &dyn RepoHost, repo: &RepoRef) -> Result<RepoData, HostError> {
    let metadata = host.fetch_metadata(repo).await?;
    tracing::debug!(branch = %metadata.default_branch, "fetched repository metadata");

    let tree = host.fetch_tree(repo, &metadata.default_branch).await?;
    tracing::debug!(entries = tree.len(), "fetched repository tree");

    let mut paths: Vec<String> =
        present_key_files(&tree).into_iter().map(str::to_string).collect();
    for entry in select_source_files(&tree) {
        if !paths.contains(&entry.path) {
            paths.push(entry.path.clone());
        }
    }

    let fetched: Vec<(String, Option<String>)> = stream::iter(paths)
        .map(|path| async move {
            let content = host.fetch_file(repo, &path).await?;
            tracing::debug!(%path, found = content.is_some(), "fetched file");
            Ok::<_, HostError>((path, content))
        })
        .buffered(FETCH_CONCURRENCY)
        .try_collect()
        .await?;

    let files: FileContents = fetched
        .into_iter()
        .filter_map(|(path, content)| content.map(|c| (path, c)))
        .collect();

    Ok(RepoData { metadata, tree, files })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RepoMetadata;
    use crate::ports::repo_host::HostFuture;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory host; records every file path requested.
    struct FakeHost {
        tree: Vec<TreeEntry>,
        files: HashMap<String, Result<Option<String>, HostError>>,
        requested: Mutex<Vec<String>>,
    }

    impl FakeHost {
        fn new(tree: Vec<TreeEntry>) -> Self {
            Self { tree, files: HashMap::new(), requested: Mutex::new(Vec::new()) }
        }

        fn with_file(mut self, path: &str, result: Result<Option<String>, HostError>) -> Self {
            self.files.insert(path.to_string(), result);
            self
        }
    }

    impl RepoHost for FakeHost {
        fn fetch_metadata(&self, repo: &RepoRef) -> HostFuture<'_, RepoMetadata> {
            let meta = RepoMetadata {
                name: repo.repo.clone(),
                full_name: repo.to_string(),
                default_branch: "main".into(),
                ..RepoMetadata::default()
            };
            Box::pin(async move { Ok(meta) })
        }

        fn fetch_tree(&self, _repo: &RepoRef, branch: &str) -> HostFuture<'_, Vec<TreeEntry>> {
            assert_eq!(branch, "main");
            let tree = self.tree.clone();
            Box::pin(async move { Ok(tree) })
        }

        fn fetch_file(&self, _repo: &RepoRef, path: &str) -> HostFuture<'_, Option<String>> {
            self.requested.lock().unwrap().push(path.to_string());
            let result = self
                .files
                .get(path)
                .cloned()
                .unwrap_or_else(|| Ok(Some(format!("content of {path}"))));
            Box::pin(async move { result })
        }
    }

    fn repo() -> RepoRef {
        RepoRef { owner: "me".into(), repo: "proj".into() }
    }

    #[test]
    fn source_selection_applies_size_extension_and_exclusions() {
        let tree = vec![
            TreeEntry::file("node_modules/x/index.js", 10),
            TreeEntry::file("dist/bundle.js", 10),
            TreeEntry::file("lib/app.min.js", 10),
            TreeEntry::file("vendor/dep.go", 10),
            TreeEntry::file("big.py", 50_000),
            TreeEntry::file("README.md", 10),
            TreeEntry::dir("src.js"),
            TreeEntry::file("a.js", 1),
            TreeEntry::file("b.ts", 1),
            TreeEntry::file("c.py", 1),
            TreeEntry::file("d.go", 1),
            TreeEntry::file("e.rs", 1),
            TreeEntry::file("f.rb", 1),
        ];
        let picked: Vec<&str> = select_source_files(&tree).iter().map(|e| e.path.as_str()).collect();
        assert_eq!(picked, vec!["a.js", "b.ts", "c.py", "d.go", "e.rs"]);
    }

    #[test]
    fn key_files_must_be_root_level_files() {
        let tree = vec![
            TreeEntry::file("Makefile", 1),
            TreeEntry::file("sub/package.json", 1),
            TreeEntry::dir("LICENSE"),
            TreeEntry::file("package.json", 1),
        ];
        assert_eq!(present_key_files(&tree), vec!["package.json", "Makefile"]);
    }

    #[tokio::test]
    async fn gathers_key_files_then_sources_in_order() {
        let host = FakeHost::new(vec![
            TreeEntry::dir("src"),
            TreeEntry::file("src/index.js", 100),
            TreeEntry::file("README.md", 10),
            TreeEntry::file("Dockerfile", 10),
            TreeEntry::file("package.json", 10),
        ])
        .with_file("Dockerfile", Ok(None));

        let data = gather_repo_data(&host, &repo()).await.unwrap();

        assert_eq!(data.metadata.name, "proj");
        assert_eq!(data.tree.len(), 5);
        let paths: Vec<&str> = data.files.iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["package.json", "src/index.js"]);
        assert!(!data.files.contains("Dockerfile"));
        assert_eq!(
            *host.requested.lock().unwrap(),
            vec!["package.json", "Dockerfile", "src/index.js"]
        );
    }

    #[tokio::test]
    async fn file_failure_aborts_the_gather() {
        let host = FakeHost::new(vec![TreeEntry::file("go.mod", 10), TreeEntry::file("main.go", 10)])
            .with_file("main.go", Err(HostError::Status { status: 500, message: "boom".into() }));

        let err = gather_repo_data(&host, &repo()).await.unwrap_err();
        assert!(matches!(err, HostError::Status { status: 500, .. }));
    }
}
