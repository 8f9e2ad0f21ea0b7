//! Best-effort API surface extraction.
//!
//! This is a lexical scan, not a parser: constructs inside strings or
//! comments can match, and unusual declarations are missed.

use std::sync::LazyLock;

use regex::Regex;

use crate::analyze::{ApiEntry, ApiKind};
use crate::model::{FileContents, ProjectType};

static JS_FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:export\s+(?:default\s+)?)?(?:async\s+)?function\s+([0-9A-Za-z_]+)\s*\(([^)]*)\)",
    )
    .expect("valid js function regex")
});

static JS_EXPORTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"module\.exports\s*=\s*\{([^}]+)\}").expect("valid js exports regex")
});

static JS_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:export\s+)?class\s+([0-9A-Za-z_]+)").expect("valid js class regex")
});

static IDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][0-9A-Za-z_$]*").expect("valid identifier regex"));

static PY_DEF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"def\s+([0-9A-Za-z_]+)\s*\(([^)]*)\):").expect("valid python def regex")
});

static PY_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"class\s+([0-9A-Za-z_]+)(?:\([^)]*\))?:").expect("valid python class regex")
});

/// Extracts functions, classes, and exports from sampled source files.
///
/// Node projects scan `.js`/`.ts` files; Python projects scan `.py` files.
/// Files are visited in mapping order and entries keep scan order.
#[must_use]
pub fn extract_api_surface(files: &FileContents, project_type: ProjectType) -> Vec<ApiEntry> {
    let mut apis = Vec::new();
    for (path, content) in files.iter() {
        match project_type {
            ProjectType::Nodejs if path.ends_with(".js") || path.ends_with(".ts") => {
                scan_javascript(path, content, &mut apis);
            }
            ProjectType::Python if path.ends_with(".py") => {
                scan_python(path, content, &mut apis);
            }
            _ => {}
        }
    }
    apis
}

fn entry(file: &str, kind: ApiKind, name: &str, params: &str) -> ApiEntry {
    ApiEntry { file: file.to_string(), kind, name: name.to_string(), params: params.to_string() }
}

fn scan_javascript(path: &str, content: &str, apis: &mut Vec<ApiEntry>) {
    let start = apis.len();

    for caps in JS_FUNCTION_RE.captures_iter(content) {
        apis.push(entry(path, ApiKind::Function, &caps[1], caps[2].trim()));
    }

    // Only the first `module.exports = { ... }` object is read.
    if let Some(caps) = JS_EXPORTS_RE.captures(content) {
        for member in caps[1].split(',') {
            let Some(name) = IDENT_RE.find(member.trim()).map(|m| m.as_str()) else {
                continue;
            };
            if !apis[start..].iter().any(|a| a.name == name) {
                apis.push(entry(path, ApiKind::Export, name, ""));
            }
        }
    }

    for caps in JS_CLASS_RE.captures_iter(content) {
        apis.push(entry(path, ApiKind::Class, &caps[1], ""));
    }
}

fn scan_python(path: &str, content: &str, apis: &mut Vec<ApiEntry>) {
    for caps in PY_DEF_RE.captures_iter(content) {
        if !caps[1].starts_with('_') {
            apis.push(entry(path, ApiKind::Function, &caps[1], caps[2].trim()));
        }
    }
    for caps in PY_CLASS_RE.captures_iter(content) {
        apis.push(entry(path, ApiKind::Class, &caps[1], ""));
    }
}
