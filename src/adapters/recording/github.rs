//! Recording adapter for the `RepoHost` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::model::{RepoMetadata, RepoRef, TreeEntry};
use crate::ports::repo_host::{HostFuture, RepoHost};

/// Port name used for host interactions in cassettes.
pub const PORT: &str = "github";

/// Records host interactions while delegating to an inner implementation.
pub struct RecordingRepoHost {
    inner: Box<dyn RepoHost>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingRepoHost {
    /// Creates a new recording host wrapping the given implementation.
    pub fn new(inner: Box<dyn RepoHost>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct RepoInput<'a> {
    owner: &'a str,
    repo: &'a str,
}

#[derive(Serialize)]
struct TreeInput<'a> {
    owner: &'a str,
    repo: &'a str,
    branch: &'a str,
}

#[derive(Serialize)]
struct FileInput<'a> {
    owner: &'a str,
    repo: &'a str,
    path: &'a str,
}

impl RepoHost for RecordingRepoHost {
    fn fetch_metadata(&self, repo: &RepoRef) -> HostFuture<'_, RepoMetadata> {
        let repo = repo.clone();
        Box::pin(async move {
            let result = self.inner.fetch_metadata(&repo).await;
            let input = RepoInput { owner: &repo.owner, repo: &repo.repo };
            record_result(&self.recorder, PORT, "fetch_metadata", &input, &result);
            result
        })
    }

    fn fetch_tree(&self, repo: &RepoRef, branch: &str) -> HostFuture<'_, Vec<TreeEntry>> {
        let repo = repo.clone();
        let branch = branch.to_string();
        Box::pin(async move {
            let result = self.inner.fetch_tree(&repo, &branch).await;
            let input = TreeInput { owner: &repo.owner, repo: &repo.repo, branch: &branch };
            record_result(&self.recorder, PORT, "fetch_tree", &input, &result);
            result
        })
    }

    fn fetch_file(&self, repo: &RepoRef, path: &str) -> HostFuture<'_, Option<String>> {
        let repo = repo.clone();
        let path = path.to_string();
        Box::pin(async move {
            let result = self.inner.fetch_file(&repo, &path).await;
            let input = FileInput { owner: &repo.owner, repo: &repo.repo, path: &path };
            record_result(&self.recorder, PORT, "fetch_file", &input, &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Cassette;
    use crate::ports::repo_host::HostError;

    /// Host that finds nothing and refuses metadata.
    struct EmptyHost;

    impl RepoHost for EmptyHost {
        fn fetch_metadata(&self, repo: &RepoRef) -> HostFuture<'_, RepoMetadata> {
            let resource = format!("repository {repo}");
            Box::pin(async move { Err(HostError::NotFound { resource }) })
        }

        fn fetch_tree(&self, _repo: &RepoRef, _branch: &str) -> HostFuture<'_, Vec<TreeEntry>> {
            Box::pin(async { Ok(vec![TreeEntry::file("go.mod", 12)]) })
        }

        fn fetch_file(&self, _repo: &RepoRef, _path: &str) -> HostFuture<'_, Option<String>> {
            Box::pin(async { Ok(None) })
        }
    }

    #[tokio::test]
    async fn records_results_and_errors() {
        let dir = std::env::temp_dir().join("readmegen_rec_github_test");
        std::fs::create_dir_all(&dir).unwrap();
        let cassette_path = dir.join("github.cassette.yaml");

        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&cassette_path, "test", "a/b")));
        let host = RecordingRepoHost::new(Box::new(EmptyHost), Arc::clone(&recorder));
        let repo = RepoRef { owner: "a".into(), repo: "b".into() };

        assert!(host.fetch_metadata(&repo).await.is_err());
        assert_eq!(host.fetch_tree(&repo, "main").await.unwrap().len(), 1);
        assert_eq!(host.fetch_file(&repo, "go.mod").await.unwrap(), None);

        recorder.lock().unwrap().finish().unwrap();
        let cassette = Cassette::load(&cassette_path).unwrap();
        assert_eq!(cassette.interactions.len(), 3);
        assert_eq!(cassette.interactions[0].output["Err"]["kind"], "not_found");
        assert_eq!(cassette.interactions[1].input["branch"], "main");
        assert_eq!(cassette.interactions[2].input["path"], "go.mod");
        assert!(cassette.interactions[2].output["Ok"].is_null());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
