//! Replaying adapters that serve recorded interactions.

pub mod github;

use serde::de::DeserializeOwned;

use crate::ports::repo_host::HostError;

pub use github::ReplayingRepoHost;

/// Decode a recorded `{"Ok": v}` / `{"Err": e}` output back into a `Result`.
///
/// Mirror of `recording::record_result`. An output that does not follow the
/// convention, or does not fit the expected types, replays as
/// [`HostError::Decode`].
pub(crate) fn replay_result<T>(output: &serde_json::Value, context: &str) -> Result<T, HostError>
where
    T: DeserializeOwned,
{
    let malformed = |what: String| HostError::Decode { message: format!("{context}: {what}") };

    if let Some(err) = output.get("Err") {
        let err: HostError = serde_json::from_value(err.clone())
            .map_err(|e| malformed(format!("cannot decode recorded error: {e}")))?;
        return Err(err);
    }
    let value = output
        .get("Ok")
        .ok_or_else(|| malformed("recorded output has neither Ok nor Err".into()))?;
    serde_json::from_value(value.clone())
        .map_err(|e| malformed(format!("cannot decode recorded value: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_and_err_outputs_round_trip() {
        let ok: Result<u32, _> = replay_result(&json!({"Ok": 7}), "t");
        assert_eq!(ok, Ok(7));
        let err: Result<u32, _> =
            replay_result(&json!({"Err": {"kind": "not_found", "resource": "x"}}), "t");
        assert_eq!(err, Err(HostError::NotFound { resource: "x".into() }));
    }

    #[test]
    fn malformed_outputs_are_decode_errors() {
        for output in [json!({}), json!({"Ok": "seven"}), json!({"Err": {"kind": "nope"}})] {
            let result: Result<u32, _> = replay_result(&output, "github::fetch_tree");
            match result {
                Err(HostError::Decode { message }) => {
                    assert!(message.starts_with("github::fetch_tree: "), "{message}");
                }
                other => panic!("expected decode error, got {other:?}"),
            }
        }
    }
}
