//! `package.json` parsing.
//!
//! Parse failures are returned as [`ManifestError`]; every caller maps the
//! error to its own fallback instead of propagating it.

use serde_json::{Map, Value};

/// File name of the npm package manifest.
pub const PACKAGE_JSON: &str = "package.json";

/// Why a package manifest could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// The document is not valid JSON.
    #[error("invalid package.json: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is valid JSON but not an object.
    #[error("package.json is not a JSON object")]
    NotAnObject,
}

/// The parts of `package.json` the analyzer and generator read.
///
/// Mapping order is preserved from the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageManifest {
    /// `name` field.
    pub name: Option<String>,
    /// `main` entry point.
    pub main: Option<String>,
    /// `scripts` mapping, name to command.
    pub scripts: Vec<(String, String)>,
    /// `dependencies` mapping, name to version constraint.
    pub dependencies: Vec<(String, String)>,
    /// `devDependencies` mapping, name to version constraint.
    pub dev_dependencies: Vec<(String, String)>,
}

impl PackageManifest {
    /// Parses a manifest document.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON object.
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Object(doc) = value else {
            return Err(ManifestError::NotAnObject);
        };
        Ok(Self {
            name: string_field(&doc, "name"),
            main: string_field(&doc, "main"),
            scripts: string_map(&doc, "scripts"),
            dependencies: string_map(&doc, "dependencies"),
            dev_dependencies: string_map(&doc, "devDependencies"),
        })
    }

    /// Returns `true` if a script with this name is declared.
    #[must_use]
    pub fn has_script(&self, name: &str) -> bool {
        self.scripts.iter().any(|(n, _)| n == name)
    }
}

fn string_field(doc: &Map<String, Value>, key: &str) -> Option<String> {
    doc.get(key).and_then(Value::as_str).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Reads an object-valued field as ordered string pairs.
///
/// Non-string values are kept in their JSON form.
fn string_map(doc: &Map<String, Value>, key: &str) -> Vec<(String, String)> {
    let Some(Value::Object(map)) = doc.get(key) else {
        return Vec::new();
    };
    map.iter()
        .map(|(k, v)| {
            let v = v.as_str().map_or_else(|| v.to_string(), str::to_string);
            (k.clone(), v)
        })
        .collect()
}
