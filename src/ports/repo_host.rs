//! Repository host port: metadata, tree listing, and file contents.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::model::{RepoMetadata, RepoRef, TreeEntry};

/// Boxed future type alias used by [`RepoHost`] to keep the trait dyn-compatible.
pub type HostFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, HostError>> + Send + 'a>>;

/// Failure talking to the repository host.
///
/// Serializable so recorded sessions can replay the exact failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostError {
    /// Bad credentials, missing permission, or an exhausted rate limit.
    #[error("access denied ({status}): {message}")]
    Unauthorized {
        /// HTTP status returned by the host.
        status: u16,
        /// Message returned by the host.
        message: String,
    },

    /// The repository or branch does not exist or is not visible.
    #[error("not found: {resource}")]
    NotFound {
        /// What was requested.
        resource: String,
    },

    /// Any other unsuccessful HTTP status.
    #[error("request failed ({status}): {message}")]
    Status {
        /// HTTP status returned by the host.
        status: u16,
        /// Message returned by the host.
        message: String,
    },

    /// The request never produced a response.
    #[error("request failed: {message}")]
    Transport {
        /// Underlying client error.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("invalid response: {message}")]
    Decode {
        /// What went wrong while decoding.
        message: String,
    },
}

impl HostError {
    /// Remediation hint shown next to fatal errors, when one applies.
    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Unauthorized { .. } => {
                Some("Rate limit exceeded or access denied. Set GITHUB_TOKEN for higher limits.")
            }
            Self::NotFound { .. } => Some(
                "Repository not found. Check the URL and ensure it is public or that GITHUB_TOKEN is set.",
            ),
            Self::Status { .. } | Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }
}

/// Reads repository data from a hosted version-control API.
pub trait RepoHost: Send + Sync {
    /// Fetches repository metadata.
    ///
    /// # Errors
    ///
    /// Returns an error on auth, visibility, transport, or decode failures.
    fn fetch_metadata(&self, repo: &RepoRef) -> HostFuture<'_, RepoMetadata>;

    /// Fetches the recursive file and directory listing of `branch`.
    ///
    /// # Errors
    ///
    /// Returns an error on auth, visibility, transport, or decode failures.
    fn fetch_tree(&self, repo: &RepoRef, branch: &str) -> HostFuture<'_, Vec<TreeEntry>>;

    /// Fetches one file's decoded text.
    ///
    /// Returns `Ok(None)` when the path does not exist or is not a file.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than "not found".
    fn fetch_file(&self, repo: &RepoRef, path: &str) -> HostFuture<'_, Option<String>>;
}
