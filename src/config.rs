//! Environment-derived settings.

use std::path::PathBuf;

use crate::adapters::live::github::GITHUB_API_URL;

/// Environment variable holding the optional GitHub access token.
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";
/// Environment variable overriding the API root (GitHub Enterprise, proxies).
pub const API_URL_VAR: &str = "GITHUB_API_URL";
/// Environment variable naming a cassette file to record host calls into.
pub const RECORD_VAR: &str = "READMEGEN_RECORD";
/// Environment variable naming a cassette file to replay host calls from.
pub const REPLAY_VAR: &str = "READMEGEN_REPLAY";

/// Settings read once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Access token; unauthenticated requests are used when absent.
    pub token: Option<String>,
    /// REST API root.
    pub api_url: String,
    /// Cassette to record host interactions into.
    pub record: Option<PathBuf>,
    /// Cassette to serve host interactions from, bypassing the network.
    pub replay: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self { token: None, api_url: GITHUB_API_URL.to_string(), record: None, replay: None }
    }
}

impl Config {
    /// Reads settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            token: get(TOKEN_VAR),
            api_url: get(API_URL_VAR).unwrap_or_else(|| GITHUB_API_URL.to_string()),
            record: get(RECORD_VAR).map(PathBuf::from),
            replay: get(REPLAY_VAR).map(PathBuf::from),
        }
    }

    /// Replaces the token when one was given explicitly.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.token = Some(token);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config, Config::default());
        assert_eq!(config.api_url, "https://api.github.com");
    }

    #[test]
    fn reads_all_variables() {
        let config = Config::from_lookup(lookup(&[
            ("GITHUB_TOKEN", "ghp_x"),
            ("GITHUB_API_URL", "https://ghe.local/api/v3"),
            ("READMEGEN_RECORD", "/tmp/rec.yaml"),
            ("READMEGEN_REPLAY", "/tmp/rep.yaml"),
        ]));
        assert_eq!(config.token.as_deref(), Some("ghp_x"));
        assert_eq!(config.api_url, "https://ghe.local/api/v3");
        assert_eq!(config.record, Some(PathBuf::from("/tmp/rec.yaml")));
        assert_eq!(config.replay, Some(PathBuf::from("/tmp/rep.yaml")));
    }

    #[test]
    fn blank_values_are_unset() {
        let config = Config::from_lookup(lookup(&[("GITHUB_TOKEN", "  "), ("GITHUB_API_URL", "")]));
        assert_eq!(config.token, None);
        assert_eq!(config.api_url, GITHUB_API_URL);
    }

    #[test]
    fn explicit_token_wins() {
        let config = Config::from_lookup(lookup(&[("GITHUB_TOKEN", "env")]))
            .with_token(Some("flag".into()));
        assert_eq!(config.token.as_deref(), Some("flag"));
        let config = Config::default().with_token(None);
        assert_eq!(config.token, None);
    }
}
