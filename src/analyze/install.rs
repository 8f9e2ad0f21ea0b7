//! Setup instructions rendered as a fenced shell block.

use crate::analyze::manifest::{PackageManifest, PACKAGE_JSON};
use crate::model::{FileContents, ProjectType};

const CLONE: [&str; 3] =
    ["# Clone the repository", "git clone <repository-url>", "cd <project-directory>"];

/// Renders setup instructions for `project_type`.
///
/// The text depends only on the type and on which manifests were fetched.
/// An unreadable `package.json` degrades to plain `npm install` steps.
#[must_use]
pub fn extract_install_instructions(project_type: ProjectType, files: &FileContents) -> String {
    let mut lines: Vec<String> = vec!["```bash".into()];

    match project_type {
        ProjectType::Nodejs if files.contains(PACKAGE_JSON) => {
            let pkg = files
                .get(PACKAGE_JSON)
                .map(PackageManifest::parse)
                .and_then(|parsed| {
                    parsed
                        .inspect_err(|e| tracing::debug!("install steps use defaults: {e}"))
                        .ok()
                });
            if let Some(name) = pkg.as_ref().and_then(|p| p.name.as_deref()) {
                lines.push(CLONE[0].into());
                lines.push(CLONE[1].into());
                lines.push(format!("cd {name}"));
            }
            lines.push(String::new());
            lines.push("# Install dependencies".into());
            lines.push("npm install".into());
            if pkg.as_ref().is_some_and(|p| p.has_script("build")) {
                lines.push(String::new());
                lines.push("# Build the project".into());
                lines.push("npm run build".into());
            }
            lines.push("```".into());
        }
        ProjectType::Python => {
            push_clone(&mut lines);
            lines.push(String::new());
            lines.push("# Create and activate virtual environment".into());
            lines.push("python -m venv venv".into());
            lines.push("source venv/bin/activate  # On Windows: venv\\Scripts\\activate".into());
            lines.push(String::new());
            if files.contains("requirements.txt") {
                lines.push("# Install dependencies".into());
                lines.push("pip install -r requirements.txt".into());
            } else if files.contains("setup.py") || files.contains("pyproject.toml") {
                lines.push("# Install the package".into());
                lines.push("pip install -e .".into());
            }
            lines.push("```".into());
        }
        ProjectType::Go => {
            push_clone(&mut lines);
            lines.push(String::new());
            lines.push("# Download dependencies".into());
            lines.push("go mod download".into());
            lines.push(String::new());
            lines.push("# Build".into());
            lines.push("go build ./...".into());
            lines.push("```".into());
        }
        ProjectType::Rust => {
            push_clone(&mut lines);
            lines.push(String::new());
            lines.push("# Build".into());
            lines.push("cargo build --release".into());
            lines.push("```".into());
        }
        _ => {
            push_clone(&mut lines);
            lines.push("```".into());
            lines.push(String::new());
            lines.push(
                "Please refer to the project documentation for specific installation instructions."
                    .into(),
            );
        }
    }

    lines.join("\n")
}

fn push_clone(lines: &mut Vec<String>) {
    lines.extend(CLONE.iter().map(|l| (*l).to_string()));
}
