//! Dependency extraction from `package.json` and `requirements.txt`.

use std::sync::LazyLock;

use regex::Regex;

use crate::analyze::manifest::{PackageManifest, PACKAGE_JSON};
use crate::analyze::Dependency;
use crate::model::{FileContents, ProjectType};

static REQUIREMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9_-]+)([>=<~!]+.*)?$").expect("valid requirement regex")
});

/// Extracts declared dependencies for `project_type`.
///
/// Node projects read `dependencies` then `devDependencies`; an unreadable
/// manifest yields no dependencies. Python projects read `requirements.txt`
/// line by line, skipping blanks, comments, and lines that are not a plain
/// name with an optional constraint. Other types yield nothing.
#[must_use]
pub fn extract_dependencies(project_type: ProjectType, files: &FileContents) -> Vec<Dependency> {
    match project_type {
        ProjectType::Nodejs => files.get(PACKAGE_JSON).map_or_else(Vec::new, from_package_json),
        ProjectType::Python => {
            files.get("requirements.txt").map_or_else(Vec::new, parse_requirements)
        }
        _ => Vec::new(),
    }
}

fn from_package_json(text: &str) -> Vec<Dependency> {
    let pkg = match PackageManifest::parse(text) {
        Ok(pkg) => pkg,
        Err(e) => {
            tracing::debug!("no dependencies read: {e}");
            return Vec::new();
        }
    };
    let prod = pkg.dependencies.into_iter().map(|(name, version)| (name, version, false));
    let dev = pkg.dev_dependencies.into_iter().map(|(name, version)| (name, version, true));
    prod.chain(dev).map(|(name, version, dev)| Dependency { name, version, dev }).collect()
}

/// Parses a pip requirements listing.
#[must_use]
pub fn parse_requirements(text: &str) -> Vec<Dependency> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| REQUIREMENT_RE.captures(line))
        .map(|caps| Dependency {
            name: caps[1].to_string(),
            version: caps.get(2).map_or_else(|| "*".to_string(), |m| m.as_str().to_string()),
            dev: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requirements_skip_comments_and_blanks() {
        let deps = parse_requirements("flask==2.0.1\nrequests>=2.28.0\n# comment\n\nnumpy");
        let names: Vec<&str> = deps.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["flask", "requests", "numpy"]);
        assert_eq!(deps[0].version, "==2.0.1");
        assert_eq!(deps[1].version, ">=2.28.0");
        assert_eq!(deps[2].version, "*");
        assert!(deps.iter().all(|d| !d.dev));
    }

    #[test]
    fn requirements_drop_unrecognized_lines() {
        let deps = parse_requirements("-r base.txt\nrequests[security]>=2\ngit+https://x/y.git\nattrs\n");
        let names: Vec<&str> = deps.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["attrs"]);
    }

    #[test]
    fn package_json_lists_production_then_development() {
        let files: FileContents = [(
            "package.json",
            r#"{"devDependencies":{"jest":"^29.0.0"},"dependencies":{"express":"^4.18.0"}}"#,
        )]
        .into_iter()
        .collect();
        let deps = extract_dependencies(ProjectType::Nodejs, &files);
        assert_eq!(
            deps,
            vec![
                Dependency { name: "express".into(), version: "^4.18.0".into(), dev: false },
                Dependency { name: "jest".into(), version: "^29.0.0".into(), dev: true },
            ]
        );
    }

    #[test]
    fn invalid_package_json_yields_nothing() {
        let files: FileContents = [("package.json", "not json")].into_iter().collect();
        assert!(extract_dependencies(ProjectType::Nodejs, &files).is_empty());
    }

    #[test]
    fn other_types_yield_nothing() {
        let files: FileContents =
            [("requirements.txt", "flask"), ("package.json", r#"{"dependencies":{"a":"1"}}"#)]
                .into_iter()
                .collect();
        assert!(extract_dependencies(ProjectType::Go, &files).is_empty());
        assert!(extract_dependencies(ProjectType::Unknown, &files).is_empty());
    }
}
