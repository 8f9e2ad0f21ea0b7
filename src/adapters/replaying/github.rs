//! Replaying adapter for the `RepoHost` port.

use std::sync::Mutex;

use super::replay_result;
use crate::adapters::recording::github::PORT;
use crate::cassette::replayer::CassetteReplayer;
use crate::model::{RepoMetadata, RepoRef, TreeEntry};
use crate::ports::repo_host::{HostError, HostFuture, RepoHost};

/// Serves recorded host responses from a cassette.
///
/// Metadata and tree calls are served in recorded order. File calls are
/// matched by path, since concurrent fetches may be recorded in any order.
pub struct ReplayingRepoHost {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingRepoHost {
    /// Creates a replaying host from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn next_output(
        &self,
        method: &str,
        matches: impl Fn(&serde_json::Value) -> bool,
    ) -> Result<serde_json::Value, HostError> {
        let mut replayer = self.replayer.lock().map_err(|_| HostError::Decode {
            message: "cassette replayer is unavailable".into(),
        })?;
        replayer
            .next_matching(PORT, method, matches)
            .map(|interaction| interaction.output)
            .map_err(|message| HostError::Decode { message })
    }
}

impl RepoHost for ReplayingRepoHost {
    fn fetch_metadata(&self, _repo: &RepoRef) -> HostFuture<'_, RepoMetadata> {
        let output = self.next_output("fetch_metadata", |_| true);
        Box::pin(async move { replay_result(&output?, "github::fetch_metadata") })
    }

    fn fetch_tree(&self, _repo: &RepoRef, _branch: &str) -> HostFuture<'_, Vec<TreeEntry>> {
        let output = self.next_output("fetch_tree", |_| true);
        Box::pin(async move { replay_result(&output?, "github::fetch_tree") })
    }

    fn fetch_file(&self, _repo: &RepoRef, path: &str) -> HostFuture<'_, Option<String>> {
        let output = self.next_output("fetch_file", |input| input["path"] == path);
        Box::pin(async move { replay_result(&output?, "github::fetch_file") })
    }
}
