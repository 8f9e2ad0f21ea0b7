//! Body sections, from installation through license.
//!
//! Each function returns an empty string when its section does not apply.

use std::fmt::Write as _;

use crate::analyze::manifest::{PackageManifest, PACKAGE_JSON};
use crate::analyze::{Analysis, ApiEntry, ApiKind, Dependency};
use crate::model::ProjectType;

const ENV_EXAMPLE: &str = ".env.example";
const CONTRIBUTING: &str = "CONTRIBUTING.md";

/// Renders prerequisites and the pre-rendered setup block.
#[must_use]
pub fn generate_installation(analysis: &Analysis) -> String {
    let mut prereqs: Vec<&str> = match analysis.project_type {
        ProjectType::Nodejs => vec!["Node.js (v14 or higher)", "npm or yarn"],
        ProjectType::Python => vec!["Python 3.7+", "pip"],
        ProjectType::Go => vec!["Go 1.16+"],
        ProjectType::Rust => vec!["Rust (stable)", "Cargo"],
        _ => Vec::new(),
    };
    if analysis.structure.has_docker {
        prereqs.push("Docker (optional)");
    }

    let mut blocks = vec!["## Installation\n".to_string()];
    if !prereqs.is_empty() {
        blocks.push("### Prerequisites\n".into());
        blocks.push(prereqs.iter().map(|p| format!("- {p}\n")).collect());
    }
    blocks.push("### Setup\n".into());
    blocks.push(format!("{}\n", analysis.install_instructions));
    blocks.join("\n")
}

/// Renders the run command and, when `.env.example` was fetched, its variables.
#[must_use]
pub fn generate_usage(analysis: &Analysis) -> String {
    let run = match analysis.project_type {
        ProjectType::Nodejs => Some(node_run_command(analysis)),
        ProjectType::Python => Some("python main.py".to_string()),
        ProjectType::Go => Some("go run .".to_string()),
        ProjectType::Rust => Some("cargo run".to_string()),
        _ => None,
    };
    let mut blocks = vec![
        "## Usage\n".to_string(),
        run.map_or_else(
            || "Refer to the project documentation for usage instructions.\n".to_string(),
            |run| format!("```bash\n{run}\n```\n"),
        ),
    ];

    if let Some(env) = analysis.files.get(ENV_EXAMPLE) {
        blocks.push("### Environment Variables\n".into());
        blocks.push("Copy `.env.example` to `.env` and configure the required variables:\n".into());
        blocks.push("```bash\ncp .env.example .env\n```\n".into());

        let vars = env_variables(env);
        if !vars.is_empty() {
            let mut table = String::from("| Variable | Description |\n|----------|-------------|\n");
            for var in vars {
                let _ = writeln!(table, "| `{var}` | Configure as needed |");
            }
            blocks.push(table);
        }
    }
    blocks.join("\n")
}

fn node_run_command(analysis: &Analysis) -> String {
    if analysis.scripts.iter().any(|s| s.run == "npm run start") {
        return "npm start".to_string();
    }
    let main = analysis
        .files
        .get(PACKAGE_JSON)
        .and_then(|text| PackageManifest::parse(text).ok())
        .and_then(|pkg| pkg.main);
    match main {
        Some(main) => format!("node {main}"),
        None => "# Run the project\nnode index.js".to_string(),
    }
}

/// Left-hand sides of the `KEY=value` lines, skipping blanks and comments.
fn env_variables(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|l| l.split('=').next().unwrap_or(l).trim())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Renders the API surface grouped by file in order of first appearance.
#[must_use]
pub fn generate_api_docs(analysis: &Analysis) -> String {
    if analysis.api_surface.is_empty() {
        return String::new();
    }

    let mut groups: Vec<(&str, Vec<&ApiEntry>)> = Vec::new();
    for api in &analysis.api_surface {
        match groups.iter_mut().find(|(file, _)| *file == api.file) {
            Some((_, apis)) => apis.push(api),
            None => groups.push((api.file.as_str(), vec![api])),
        }
    }

    let mut blocks = vec!["## API Documentation\n".to_string()];
    for (file, apis) in groups {
        blocks.push(format!("### `{file}`\n"));
        let of_kind = |kind| apis.iter().filter(move |a| a.kind == kind).peekable();

        let mut classes = of_kind(ApiKind::Class);
        if classes.peek().is_some() {
            blocks.push("**Classes:**\n".into());
            blocks.push(classes.map(|c| format!("- `{}`\n", c.name)).collect());
        }

        let mut functions = of_kind(ApiKind::Function);
        if functions.peek().is_some() {
            let mut table = String::from("| Function | Parameters |\n|----------|-----------|\n");
            for function in functions {
                let params = if function.params.is_empty() { "none" } else { &function.params };
                let _ = writeln!(table, "| `{}` | `{params}` |", function.name);
            }
            blocks.push("**Functions:**\n".into());
            blocks.push(table);
        }

        let mut exports = of_kind(ApiKind::Export);
        if exports.peek().is_some() {
            blocks.push("**Exports:**\n".into());
            blocks.push(exports.map(|e| format!("- `{}`\n", e.name)).collect());
        }
    }
    blocks.join("\n")
}

/// Renders the script table.
#[must_use]
pub fn generate_scripts(analysis: &Analysis) -> String {
    if analysis.scripts.is_empty() {
        return String::new();
    }
    let mut out = String::from("## Available Scripts\n\n");
    out.push_str("| Command | Description |\n|---------|-------------|\n");
    for script in &analysis.scripts {
        let _ = writeln!(out, "| `{}` | {} |", script.run, script.command);
    }
    out
}

/// Renders top-level directories and files as an ASCII tree.
#[must_use]
pub fn generate_project_structure(analysis: &Analysis) -> String {
    let dirs = &analysis.structure.top_level_dirs;
    if dirs.is_empty() {
        return String::new();
    }

    let mut out = String::from("## Project Structure\n\n```\n");
    let _ = writeln!(out, "{}/", analysis.metadata.name);
    for (i, dir) in dirs.iter().enumerate() {
        let _ = writeln!(out, "{}{dir}/", connector(i, dirs.len()));
    }

    let mut files: Vec<&str> = analysis
        .tree
        .iter()
        .filter(|e| e.is_file() && !e.path.contains('/'))
        .map(|e| e.path.as_str())
        .collect();
    files.sort_unstable();
    for (i, file) in files.iter().enumerate() {
        let _ = writeln!(out, "{}{file}", connector(i, files.len()));
    }

    out.push_str("```\n");
    out
}

fn connector(index: usize, len: usize) -> &'static str {
    if index + 1 == len {
        "└── "
    } else {
        "├── "
    }
}

/// Renders production and development dependency tables.
#[must_use]
pub fn generate_dependencies(analysis: &Analysis) -> String {
    if analysis.dependencies.is_empty() {
        return String::new();
    }
    let (dev, prod): (Vec<&Dependency>, Vec<&Dependency>) =
        analysis.dependencies.iter().partition(|d| d.dev);

    let mut blocks = vec!["## Dependencies\n".to_string()];
    for (title, deps) in [("Production", prod), ("Development", dev)] {
        if deps.is_empty() {
            continue;
        }
        let mut table = String::from("| Package | Version |\n|---------|---------|\n");
        for dep in deps {
            let _ = writeln!(table, "| {} | {} |", dep.name, dep.version);
        }
        blocks.push(format!("### {title}\n"));
        blocks.push(table);
    }
    blocks.join("\n")
}

/// Renders container build and compose instructions.
#[must_use]
pub fn generate_docker(analysis: &Analysis) -> String {
    if !analysis.structure.has_docker {
        return String::new();
    }
    let fetched = |path: &str| analysis.files.contains(path);
    let name = &analysis.metadata.name;

    let mut blocks = vec!["## Docker\n".to_string()];
    if fetched("Dockerfile") {
        blocks.push("### Build\n".into());
        blocks.push(format!("```bash\ndocker build -t {name} .\n```\n"));
        blocks.push("### Run\n".into());
        blocks.push(format!("```bash\ndocker run -p 3000:3000 {name}\n```\n"));
    }
    if fetched("docker-compose.yml") || fetched("docker-compose.yaml") {
        blocks.push("### Docker Compose\n".into());
        blocks.push("```bash\ndocker-compose up -d\n```\n".into());
    }
    blocks.join("\n")
}

/// Renders the contributing section.
#[must_use]
pub fn generate_contributing(analysis: &Analysis) -> String {
    if analysis.files.contains(CONTRIBUTING) {
        return "## Contributing\n\n\
                Please read [CONTRIBUTING.md](CONTRIBUTING.md) for details on our code of \
                conduct and the process for submitting pull requests.\n"
            .to_string();
    }
    "## Contributing\n\n\
     Contributions are welcome! Please feel free to submit a Pull Request.\n\n\
     1. Fork the repository\n\
     2. Create your feature branch (`git checkout -b feature/amazing-feature`)\n\
     3. Commit your changes (`git commit -m 'Add some amazing feature'`)\n\
     4. Push to the branch (`git push origin feature/amazing-feature`)\n\
     5. Open a Pull Request\n"
        .to_string()
}

/// Renders the license section.
#[must_use]
pub fn generate_license(analysis: &Analysis) -> String {
    match analysis.metadata.license.as_deref() {
        Some(license) => format!(
            "## License\n\nThis project is licensed under the {license} License - \
             see the [LICENSE](LICENSE) file for details.\n"
        ),
        None => "## License\n\nSee the [LICENSE](LICENSE) file for details.\n".to_string(),
    }
}
