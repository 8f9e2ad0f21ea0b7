//! Live adapter for the `RepoHost` port using the GitHub REST API.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;

use crate::model::{EntryKind, RepoMetadata, RepoRef, TreeEntry};
use crate::ports::repo_host::{HostError, HostFuture, RepoHost};

/// Default GitHub REST API root.
pub const GITHUB_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("readmegen/", env!("CARGO_PKG_VERSION"));

/// Live repository host that calls the GitHub REST API.
pub struct LiveGitHub {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl LiveGitHub {
    /// Creates a client against `api_url`, authenticating when `token` is set.
    #[must_use]
    pub fn new(api_url: impl Into<String>, token: Option<String>) -> Self {
        Self { client: Client::new(), api_url: api_url.into(), token }
    }

    /// Builds `<api_url>/<segments...>` with each segment percent-encoded.
    fn endpoint<'s>(&self, segments: impl IntoIterator<Item = &'s str>) -> Result<Url, HostError> {
        let mut url = Url::parse(&self.api_url).map_err(|e| HostError::Transport {
            message: format!("invalid API URL {}: {e}", self.api_url),
        })?;
        url.path_segments_mut()
            .map_err(|()| HostError::Transport {
                message: format!("API URL cannot be a base: {}", self.api_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a GET and returns the status and raw body.
    async fn get(&self, url: Url) -> Result<(StatusCode, String), HostError> {
        tracing::debug!(%url, "GET");
        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| HostError::Transport { message: e.to_string() })?;
        let status = response.status();
        let body = response.text().await.map_err(|e| HostError::Transport {
            message: format!("failed to read response body: {e}"),
        })?;
        Ok((status, body))
    }
}

/// Repository payload of `GET /repos/{owner}/{repo}`.
#[derive(Deserialize)]
struct ApiRepo {
    name: String,
    full_name: String,
    description: Option<String>,
    language: Option<String>,
    default_branch: String,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
    license: Option<ApiLicense>,
    #[serde(default)]
    topics: Vec<String>,
    homepage: Option<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    open_issues_count: u64,
    #[serde(default)]
    archived: bool,
    #[serde(default)]
    html_url: String,
}

#[derive(Deserialize)]
struct ApiLicense {
    spdx_id: Option<String>,
}

/// Payload of `GET /repos/{owner}/{repo}/git/trees/{sha}?recursive=1`.
#[derive(Deserialize)]
struct ApiTree {
    tree: Vec<ApiTreeItem>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Deserialize)]
struct ApiTreeItem {
    path: String,
    #[serde(rename = "type")]
    kind: String,
    size: Option<u64>,
}

/// Error body returned by GitHub on unsuccessful requests.
#[derive(Deserialize)]
struct ApiError {
    message: String,
}

impl From<ApiRepo> for RepoMetadata {
    fn from(repo: ApiRepo) -> Self {
        Self {
            name: repo.name,
            full_name: repo.full_name,
            description: repo.description.unwrap_or_default(),
            language: repo.language.unwrap_or_else(|| "Unknown".to_string()),
            default_branch: repo.default_branch,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            license: repo.license.and_then(|l| l.spdx_id),
            topics: repo.topics,
            homepage: repo.homepage.filter(|h| !h.is_empty()),
            created_at: repo.created_at,
            updated_at: repo.updated_at,
            open_issues: repo.open_issues_count,
            archived: repo.archived,
            html_url: repo.html_url,
        }
    }
}

/// Maps an unsuccessful status to the host error taxonomy.
fn status_error(status: StatusCode, body: &str, resource: &str) -> HostError {
    let message = serde_json::from_str::<ApiError>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.trim().to_string());
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            HostError::Unauthorized { status: status.as_u16(), message }
        }
        StatusCode::NOT_FOUND => HostError::NotFound { resource: resource.to_string() },
        _ => HostError::Status { status: status.as_u16(), message },
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: &str, what: &str) -> Result<T, HostError> {
    serde_json::from_str(body)
        .map_err(|e| HostError::Decode { message: format!("failed to parse {what}: {e}") })
}

/// Keeps blobs and trees, dropping submodule commits.
fn convert_tree(tree: ApiTree) -> Vec<TreeEntry> {
    if tree.truncated {
        tracing::warn!("repository tree was truncated by the host; analysis may be incomplete");
    }
    tree.tree
        .into_iter()
        .filter_map(|item| {
            let kind = match item.kind.as_str() {
                "blob" => EntryKind::File,
                "tree" => EntryKind::Directory,
                _ => return None,
            };
            Some(TreeEntry { path: item.path, kind, size: item.size.unwrap_or(0) })
        })
        .collect()
}

/// Extracts the text of a contents payload.
///
/// Directory listings, symlinks, and submodules yield `None`. An empty file
/// yields `Some("")`.
fn decode_content(payload: &Value, path: &str) -> Result<Option<String>, HostError> {
    if payload.get("type").and_then(Value::as_str) != Some("file") {
        return Ok(None);
    }
    let encoded = payload.get("content").and_then(Value::as_str).unwrap_or_default();
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(compact).map_err(|e| HostError::Decode {
        message: format!("invalid base64 content for {path}: {e}"),
    })?;
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}

impl RepoHost for LiveGitHub {
    fn fetch_metadata(&self, repo: &RepoRef) -> HostFuture<'_, RepoMetadata> {
        let repo = repo.clone();
        Box::pin(async move {
            let url = self.endpoint(["repos", repo.owner.as_str(), repo.repo.as_str()])?;
            let (status, body) = self.get(url).await?;
            if !status.is_success() {
                return Err(status_error(status, &body, &format!("repository {repo}")));
            }
            let api: ApiRepo = decode(&body, "repository metadata")?;
            Ok(api.into())
        })
    }

    fn fetch_tree(&self, repo: &RepoRef, branch: &str) -> HostFuture<'_, Vec<TreeEntry>> {
        let repo = repo.clone();
        let branch = branch.to_string();
        Box::pin(async move {
            let mut url = self.endpoint([
                "repos",
                repo.owner.as_str(),
                repo.repo.as_str(),
                "git",
                "trees",
                branch.as_str(),
            ])?;
            url.query_pairs_mut().append_pair("recursive", "1");
            let (status, body) = self.get(url).await?;
            if !status.is_success() {
                return Err(status_error(status, &body, &format!("tree {branch} of {repo}")));
            }
            Ok(convert_tree(decode(&body, "repository tree")?))
        })
    }

    fn fetch_file(&self, repo: &RepoRef, path: &str) -> HostFuture<'_, Option<String>> {
        let repo = repo.clone();
        let path = path.to_string();
        Box::pin(async move {
            let segments = ["repos", repo.owner.as_str(), repo.repo.as_str(), "contents"]
                .into_iter()
                .chain(path.split('/'));
            let url = self.endpoint(segments)?;
            let (status, body) = self.get(url).await?;
            if status == StatusCode::NOT_FOUND {
                return Ok(None);
            }
            if !status.is_success() {
                return Err(status_error(status, &body, &path));
            }
            let payload: Value = decode(&body, &format!("contents of {path}"))?;
            decode_content(&payload, &path)
        })
    }
}
