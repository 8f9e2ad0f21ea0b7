//! Replays recorded interactions from a cassette.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Key for indexing interactions by port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

/// Replays interactions from a loaded cassette.
///
/// Calls are served per port/method pair: the first remaining interaction
/// whose input matches wins, so a match-all predicate replays in recorded
/// order.
pub struct CassetteReplayer {
    queues: HashMap<PortMethodKey, VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethodKey, VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = PortMethodKey {
                port: interaction.port.clone(),
                method: interaction.method.clone(),
            };
            queues.entry(key).or_default().push_back(interaction.clone());
        }
        Self { queues }
    }

    /// Return the first remaining interaction for the port and method whose
    /// input satisfies `matches`.
    ///
    /// # Errors
    ///
    /// Returns a description of what was requested when no remaining
    /// interaction matches.
    pub fn next_matching(
        &mut self,
        port: &str,
        method: &str,
        matches: impl Fn(&serde_json::Value) -> bool,
    ) -> Result<Interaction, String> {
        let key = PortMethodKey { port: port.to_string(), method: method.to_string() };

        let Some(queue) = self.queues.get_mut(&key) else {
            let mut available: Vec<String> =
                self.queues.keys().map(|k| format!("{}::{}", k.port, k.method)).collect();
            available.sort();
            return Err(format!(
                "cassette exhausted: no interactions recorded for {port}::{method} \
                 (available: [{}])",
                available.join(", ")
            ));
        };

        let position = queue.iter().position(|i| matches(&i.input));
        let remaining = queue.len();
        position.and_then(|idx| queue.remove(idx)).ok_or_else(|| {
            format!(
                "cassette exhausted: {remaining} interactions remain for {port}::{method} \
                 but none match the requested input"
            )
        })
    }
}
