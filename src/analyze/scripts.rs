//! Script extraction from `package.json` and `Makefile`.

use std::sync::LazyLock;

use regex::Regex;

use crate::analyze::manifest::{PackageManifest, PACKAGE_JSON};
use crate::analyze::ScriptEntry;
use crate::model::{FileContents, ProjectType};

static MAKE_TARGET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-zA-Z_][a-zA-Z0-9_-]*):").expect("valid target regex"));

/// Extracts runnable scripts.
///
/// Node projects contribute their `scripts` mapping as `npm run <name>`.
/// A fetched `Makefile` contributes its targets for any project type.
/// Manifest scripts come first, then targets in file order.
#[must_use]
pub fn extract_scripts(project_type: ProjectType, files: &FileContents) -> Vec<ScriptEntry> {
    let mut scripts = Vec::new();

    if project_type == ProjectType::Nodejs {
        if let Some(text) = files.get(PACKAGE_JSON) {
            match PackageManifest::parse(text) {
                Ok(pkg) => scripts.extend(pkg.scripts.into_iter().map(|(name, command)| {
                    ScriptEntry { run: format!("npm run {name}"), name, command }
                })),
                Err(e) => tracing::debug!("no npm scripts read: {e}"),
            }
        }
    }

    if let Some(makefile) = files.get("Makefile") {
        scripts.extend(make_targets(makefile));
    }

    scripts
}

/// Extracts `Makefile` targets, skipping special targets such as `.PHONY`.
#[must_use]
pub fn make_targets(makefile: &str) -> Vec<ScriptEntry> {
    makefile
        .lines()
        .filter_map(|line| MAKE_TARGET_RE.captures(line))
        .map(|caps| caps[1].to_string())
        .filter(|name| !name.starts_with('.'))
        .map(|name| {
            let command = format!("make {name}");
            ScriptEntry { name, run: command.clone(), command }
        })
        .collect()
}
