//! Request-scoped values gathered from the repository host.
//!
//! Everything here is built once per run and only read afterwards.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};

static SHORTHAND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^/\s]+)/([^/\s]+)$").expect("valid shorthand regex"));

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com/([^/]+)/([^/\s#?]+)").expect("valid url regex"));

/// A parsed `owner/repo` reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    /// Account or organization that owns the repository.
    pub owner: String,
    /// Repository name without any `.git` suffix.
    pub repo: String,
}

impl RepoRef {
    /// Parses a full GitHub URL or an `owner/repo` shorthand.
    ///
    /// Accepts `https://github.com/<owner>/<repo>[.git][/...]` and
    /// `<owner>/<repo>[.git]`.
    ///
    /// # Errors
    ///
    /// Returns an error message naming the input when it matches neither form.
    pub fn parse(input: &str) -> Result<Self, String> {
        let caps = SHORTHAND_RE
            .captures(input)
            .or_else(|| URL_RE.captures(input))
            .ok_or_else(|| format!("Invalid GitHub repository URL: {input}"))?;
        let repo = caps[2].strip_suffix(".git").unwrap_or(&caps[2]);
        if repo.is_empty() {
            return Err(format!("Invalid GitHub repository URL: {input}"));
        }
        Ok(Self { owner: caps[1].to_string(), repo: repo.to_string() })
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Repository-level metadata reported by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoMetadata {
    /// Short repository name, used as the README title.
    pub name: String,
    /// `owner/repo`.
    pub full_name: String,
    /// Free-form description; empty when the host has none.
    pub description: String,
    /// Primary language tag; `"Unknown"` when the host has none.
    pub language: String,
    /// Branch the tree is read from.
    pub default_branch: String,
    /// Star count.
    pub stars: u64,
    /// Fork count.
    pub forks: u64,
    /// SPDX identifier of the detected license.
    pub license: Option<String>,
    /// Topic tags in host order.
    pub topics: Vec<String>,
    /// Project homepage.
    pub homepage: Option<String>,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    /// Open issue count.
    pub open_issues: u64,
    /// Whether the repository is archived.
    pub archived: bool,
    /// Canonical web URL.
    pub html_url: String,
}

impl RepoMetadata {
    /// Returns the language tag unless it is empty or `"Unknown"`.
    #[must_use]
    pub fn known_language(&self) -> Option<&str> {
        match self.language.as_str() {
            "" | "Unknown" => None,
            lang => Some(lang),
        }
    }
}

/// Whether a tree entry is a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A regular file (git blob).
    File,
    /// A directory (git tree).
    #[serde(rename = "dir")]
    Directory,
}

/// One path in the flattened repository tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Slash-separated path relative to the repository root.
    pub path: String,
    /// File or directory.
    pub kind: EntryKind,
    /// Size in bytes; zero for directories or when unknown.
    #[serde(default)]
    pub size: u64,
}

impl TreeEntry {
    /// Creates a file entry.
    pub fn file(path: impl Into<String>, size: u64) -> Self {
        Self { path: path.into(), kind: EntryKind::File, size }
    }

    /// Creates a directory entry.
    pub fn dir(path: impl Into<String>) -> Self {
        Self { path: path.into(), kind: EntryKind::Directory, size: 0 }
    }

    /// Returns `true` for file entries.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Returns `true` for directory entries.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Fetched file contents keyed by path, in fetch order.
///
/// A path that is absent was not fetched; a path mapped to an empty string
/// was fetched and is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContents {
    entries: Vec<(String, String)>,
}

impl FileContents {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the content for `path`, keeping first-insert order.
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        let path = path.into();
        let content = content.into();
        if let Some(slot) = self.entries.iter_mut().find(|(p, _)| *p == path) {
            slot.1 = content;
        } else {
            self.entries.push((path, content));
        }
    }

    /// Returns the content for `path` if it was fetched.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.iter().find(|(p, _)| p == path).map(|(_, c)| c.as_str())
    }

    /// Returns `true` if `path` was fetched.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Iterates `(path, content)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    /// Number of fetched files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing was fetched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FileContents {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut contents = Self::new();
        for (path, content) in iter {
            contents.insert(path, content);
        }
        contents
    }
}

/// Everything the gatherer produces for one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoData {
    /// Repository metadata.
    pub metadata: RepoMetadata,
    /// Flattened tree of the default branch.
    pub tree: Vec<TreeEntry>,
    /// Key manifests and sampled source files.
    pub files: FileContents,
}

/// Build and packaging ecosystem of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// npm / Node.js.
    Nodejs,
    /// pip / Python.
    Python,
    /// Go modules.
    Go,
    /// Cargo / Rust.
    Rust,
    /// Maven or Gradle / Java.
    Java,
    /// Bundler / Ruby.
    Ruby,
    /// No recognized ecosystem.
    Unknown,
}

impl ProjectType {
    /// Maps a host language tag to a project type.
    #[must_use]
    pub fn from_language(language: &str) -> Self {
        match language {
            "JavaScript" | "TypeScript" => Self::Nodejs,
            "Python" => Self::Python,
            "Go" => Self::Go,
            "Rust" => Self::Rust,
            "Java" => Self::Java,
            "Ruby" => Self::Ruby,
            _ => Self::Unknown,
        }
    }

    /// Lowercase tag, as accepted by `--template`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nodejs => "nodejs",
            Self::Python => "python",
            Self::Go => "go",
            Self::Rust => "rust",
            Self::Java => "java",
            Self::Ruby => "ruby",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
