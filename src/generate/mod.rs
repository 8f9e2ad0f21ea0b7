//! README generation.
//!
//! Every section renderer is a total function of an [`Analysis`] and returns
//! an empty string when it does not apply. [`generate_readme`] concatenates
//! the non-empty sections in a fixed order, separated by one blank line.

pub mod header;
pub mod sections;

use crate::analyze::Analysis;

pub use header::{generate_header, generate_toc};
pub use sections::{
    generate_api_docs, generate_contributing, generate_dependencies, generate_docker,
    generate_installation, generate_license, generate_project_structure, generate_scripts,
    generate_usage,
};

type Section = fn(&Analysis) -> String;

const SECTIONS: [Section; 11] = [
    generate_header,
    generate_toc,
    generate_installation,
    generate_usage,
    generate_api_docs,
    generate_scripts,
    generate_project_structure,
    generate_dependencies,
    generate_docker,
    generate_contributing,
    generate_license,
];

/// Renders the complete README for `analysis`.
#[must_use]
pub fn generate_readme(analysis: &Analysis) -> String {
    let sections: Vec<String> = SECTIONS
        .iter()
        .map(|render| render(analysis))
        .filter(|section| !section.trim().is_empty())
        .collect();
    tracing::debug!(sections = sections.len(), "readme assembled");
    sections.join("\n")
}
