//! Title block and table of contents.

use std::fmt::Write as _;

use crate::analyze::Analysis;

/// Renders the title, badge line, description, homepage, and topics.
#[must_use]
pub fn generate_header(analysis: &Analysis) -> String {
    let meta = &analysis.metadata;

    let mut badges = Vec::new();
    if let Some(license) = meta.license.as_deref() {
        badges.push(format!(
            "![License](https://img.shields.io/badge/license-{}-blue.svg)",
            encode_component(license)
        ));
    }
    badges.push(format!("![Stars](https://img.shields.io/github/stars/{}.svg)", meta.full_name));
    badges.push(format!("![Forks](https://img.shields.io/github/forks/{}.svg)", meta.full_name));
    if let Some(language) = meta.known_language() {
        badges.push(format!(
            "![Language](https://img.shields.io/badge/language-{}-brightgreen.svg)",
            encode_component(language)
        ));
    }

    let mut blocks = vec![format!("# {}\n", meta.name), format!("{}\n", badges.join(" "))];
    if !meta.description.is_empty() {
        blocks.push(format!("{}\n", meta.description));
    }
    if let Some(homepage) = meta.homepage.as_deref().filter(|h| !h.is_empty()) {
        blocks.push(format!("**Homepage:** {homepage}\n"));
    }
    if !meta.topics.is_empty() {
        blocks.push(format!("**Topics:** {}\n", meta.topics.join(", ")));
    }
    blocks.join("\n")
}

/// Renders the table of contents.
///
/// Optional entries use the same presence checks as their sections, so
/// every link resolves to a heading in the assembled document.
#[must_use]
pub fn generate_toc(analysis: &Analysis) -> String {
    let mut titles = vec!["Installation", "Usage"];
    if !analysis.api_surface.is_empty() {
        titles.push("API Documentation");
    }
    if !analysis.scripts.is_empty() {
        titles.push("Available Scripts");
    }
    if !analysis.structure.top_level_dirs.is_empty() {
        titles.push("Project Structure");
    }
    if !analysis.dependencies.is_empty() {
        titles.push("Dependencies");
    }
    if analysis.structure.has_docker {
        titles.push("Docker");
    }
    titles.extend(["Contributing", "License"]);

    let mut out = String::from("## Table of Contents\n\n");
    for title in titles {
        let _ = writeln!(out, "- [{title}](#{})", anchor(title));
    }
    out
}

/// Heading anchor: lowercased, whitespace runs replaced by `-`.
fn anchor(title: &str) -> String {
    title.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}

/// Percent-encodes `s` for use inside a URL path segment.
///
/// ASCII letters, digits, and `-_.!~*'()` pass through; every other byte of
/// the UTF-8 encoding becomes `%XX`.
pub(crate) fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        if byte.is_ascii_alphanumeric() || b"-_.!~*'()".contains(&byte) {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}
