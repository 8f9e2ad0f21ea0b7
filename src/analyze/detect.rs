//! Ecosystem detection.

use crate::model::{ProjectType, RepoMetadata, TreeEntry};

/// Python manifests, any of which marks a Python project.
const PYTHON_MANIFESTS: [&str; 3] = ["requirements.txt", "setup.py", "pyproject.toml"];

/// Detects the project type from manifest files, falling back to the host language.
///
/// Manifests are checked in a fixed priority order and the first match wins:
/// `package.json`, a Python manifest, `go.mod`, `Cargo.toml`, any Java signal
/// (a `.java` file, `pom.xml`, `build.gradle`), then `Gemfile`. Only when none
/// match is the reported language consulted.
#[must_use]
pub fn detect_project_type(metadata: &RepoMetadata, tree: &[TreeEntry]) -> ProjectType {
    let files: Vec<&str> =
        tree.iter().filter(|e| e.is_file()).map(|e| e.path.as_str()).collect();
    let has = |name: &str| files.contains(&name);

    if has("package.json") {
        ProjectType::Nodejs
    } else if PYTHON_MANIFESTS.iter().any(|m| has(*m)) {
        ProjectType::Python
    } else if has("go.mod") {
        ProjectType::Go
    } else if has("Cargo.toml") {
        ProjectType::Rust
    } else if files
        .iter()
        .any(|f| f.ends_with(".java") || *f == "pom.xml" || *f == "build.gradle")
    {
        ProjectType::Java
    } else if has("Gemfile") {
        ProjectType::Ruby
    } else {
        ProjectType::from_language(&metadata.language)
    }
}
