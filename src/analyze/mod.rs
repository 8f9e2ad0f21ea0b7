//! Repository analysis.
//!
//! A set of pure functions over gathered [`RepoData`]: ecosystem detection,
//! install instructions, dependency and script extraction, a lexical API
//! surface scan, and a directory layout summary.

pub mod api;
pub mod deps;
pub mod detect;
pub mod install;
pub mod manifest;
pub mod scripts;
pub mod structure;

use serde::{Deserialize, Serialize};

use crate::model::{FileContents, ProjectType, RepoData, RepoMetadata, TreeEntry};

pub use api::extract_api_surface;
pub use deps::extract_dependencies;
pub use detect::detect_project_type;
pub use install::extract_install_instructions;
pub use scripts::extract_scripts;
pub use structure::analyze_directory_structure;

/// A declared package dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Package name.
    pub name: String,
    /// Version constraint, or `"*"` when none was given.
    pub version: String,
    /// Declared for development only.
    pub dev: bool,
}

/// A runnable project script or build target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptEntry {
    /// Script or target name.
    pub name: String,
    /// Underlying command.
    pub command: String,
    /// What a user types to run it.
    pub run: String,
}

/// Kind of an extracted API item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKind {
    /// A function declaration.
    Function,
    /// A class declaration.
    Class,
    /// A member of a module's export object.
    Export,
}

/// One named item found in a sampled source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEntry {
    /// Source file path.
    pub file: String,
    /// Item kind.
    pub kind: ApiKind,
    /// Item name.
    pub name: String,
    /// Raw parameter list; empty when not applicable.
    pub params: String,
}

/// Summary of the repository layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryStructure {
    /// A `src` directory exists.
    pub has_src: bool,
    /// A test directory exists.
    pub has_tests: bool,
    /// A `docs` directory exists.
    pub has_docs: bool,
    /// A Dockerfile or compose file exists at the root.
    pub has_docker: bool,
    /// A `.github` directory exists.
    pub has_ci: bool,
    /// A root-level dotfile config exists.
    pub has_config: bool,
    /// Sorted names of root-level directories.
    pub top_level_dirs: Vec<String>,
    /// Number of files in the tree.
    pub total_files: usize,
    /// Number of directories in the tree.
    pub total_dirs: usize,
}

/// Everything the generator needs, derived from one [`RepoData`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Detected or forced ecosystem.
    pub project_type: ProjectType,
    /// Repository metadata.
    pub metadata: RepoMetadata,
    /// Pre-rendered setup block.
    pub install_instructions: String,
    /// Declared dependencies.
    pub dependencies: Vec<Dependency>,
    /// Runnable scripts and build targets.
    pub scripts: Vec<ScriptEntry>,
    /// Lexically extracted API items.
    pub api_surface: Vec<ApiEntry>,
    /// Layout summary.
    pub structure: DirectoryStructure,
    /// The raw tree.
    pub tree: Vec<TreeEntry>,
    /// The fetched files.
    pub files: FileContents,
}

/// Runs every analysis step over gathered data.
#[must_use]
pub fn analyze_repo(data: &RepoData) -> Analysis {
    analyze_repo_as(data, None)
}

/// Runs every analysis step, optionally forcing the project type.
///
/// A forced type replaces detection, and every type-dependent step
/// (install instructions, dependencies, scripts, API surface) runs under it.
#[must_use]
pub fn analyze_repo_as(data: &RepoData, forced: Option<ProjectType>) -> Analysis {
    let project_type =
        forced.unwrap_or_else(|| detect_project_type(&data.metadata, &data.tree));
    tracing::debug!(%project_type, forced = forced.is_some(), "project type");

    let analysis = Analysis {
        project_type,
        metadata: data.metadata.clone(),
        install_instructions: extract_install_instructions(project_type, &data.files),
        dependencies: extract_dependencies(project_type, &data.files),
        scripts: extract_scripts(project_type, &data.files),
        api_surface: extract_api_surface(&data.files, project_type),
        structure: analyze_directory_structure(&data.tree),
        tree: data.tree.clone(),
        files: data.files.clone(),
    };
    tracing::debug!(
        dependencies = analysis.dependencies.len(),
        scripts = analysis.scripts.len(),
        api_items = analysis.api_surface.len(),
        "analysis complete"
    );
    analysis
}
