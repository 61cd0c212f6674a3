//! Wire types for the Bitbucket commit build-status endpoint.
//!
//! See <https://developer.atlassian.com/cloud/bitbucket/rest/api-group-commit-statuses/>.
//! `name` and `description` are left out of the JSON when empty.

use serde::{Deserialize, Serialize};

/// Bitbucket's build state. `STOPPED` exists on the Bitbucket side but is
/// never reported by this tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BuildState {
    Successful,
    Failed,
    InProgress,
}

/// Request body for `POST .../commit/{revision}/statuses/build`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPayload {
    pub state: BuildState,
    /// Identifies the CI system; Bitbucket keeps one status per key per commit.
    pub key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Link to the build logs.
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn build_state_serializes_to_bitbucket_codes() {
        assert_eq!(serde_json::to_value(BuildState::Successful).unwrap(), "SUCCESSFUL");
        assert_eq!(serde_json::to_value(BuildState::Failed).unwrap(), "FAILED");
        assert_eq!(serde_json::to_value(BuildState::InProgress).unwrap(), "INPROGRESS");
    }

    #[test]
    fn payload_matches_wire_format() {
        let payload = StatusPayload {
            state: BuildState::InProgress,
            key: "ziplinee".into(),
            name: "Ziplinee".into(),
            url: "https://ci.example.com/pipelines/bitbucket.org/acme/api/builds/7/logs".into(),
            description: "Build version 1.0.0 pending.".into(),
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "state": "INPROGRESS",
                "key": "ziplinee",
                "name": "Ziplinee",
                "url": "https://ci.example.com/pipelines/bitbucket.org/acme/api/builds/7/logs",
                "description": "Build version 1.0.0 pending."
            })
        );
    }

    #[test]
    fn empty_optional_fields_are_omitted() {
        let payload = StatusPayload {
            state: BuildState::Failed,
            key: "ziplinee".into(),
            name: String::new(),
            url: "https://ci.example.com/logs".into(),
            description: String::new(),
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(!json.contains("name"));
        assert!(!json.contains("description"));
        assert!(json.contains(r#""state":"FAILED""#));
    }
}
