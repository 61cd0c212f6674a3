//! Translation from Ziplinee build vocabulary to a Bitbucket build status.
//!
//! Everything here is pure: [`translate`] turns a [`StatusConfig`] into the
//! [`StatusPayload`] that gets posted to Bitbucket.

use crate::bitbucket::{BuildState, StatusPayload};
use crate::config::StatusConfig;

/// Key that identifies Ziplinee among the build statuses of a commit.
pub const STATUS_KEY: &str = "ziplinee";
/// Human-readable name shown next to the status in Bitbucket.
pub const STATUS_NAME: &str = "Ziplinee";

/// Ziplinee build status: succeeded, failed or pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Succeeded,
    Failed,
    Pending,
}

impl StatusKind {
    /// Parse a status leniently. Anything unrecognized counts as `Succeeded`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "failed" => StatusKind::Failed,
            "pending" => StatusKind::Pending,
            _ => StatusKind::Succeeded,
        }
    }

    pub fn state(self) -> BuildState {
        match self {
            StatusKind::Succeeded => BuildState::Successful,
            StatusKind::Failed => BuildState::Failed,
            StatusKind::Pending => BuildState::InProgress,
        }
    }
}

/// The status to report: a non-empty override wins over the pipeline status.
pub fn effective_status<'a>(build_status: &'a str, status_override: Option<&'a str>) -> &'a str {
    match status_override {
        Some(s) if !s.is_empty() => s,
        _ => build_status,
    }
}

/// Ensure the CI base url ends with exactly one trailing slash.
pub fn normalize_base_url(base_url: &str) -> String {
    if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{base_url}/")
    }
}

/// Link to the build logs in the Ziplinee web UI.
pub fn logs_url(base_url: &str, git_source: &str, repo_fullname: &str, build_id: &str) -> String {
    format!(
        "{}pipelines/{git_source}/{repo_fullname}/builds/{build_id}/logs",
        normalize_base_url(base_url)
    )
}

/// Sentence shown as the status description.
///
/// A release action is only mentioned when a release name is present.
pub fn describe(
    build_version: &str,
    status: &str,
    release_name: Option<&str>,
    release_action: Option<&str>,
) -> String {
    let release_name = release_name.filter(|s| !s.is_empty());
    let release_action = release_action.filter(|s| !s.is_empty());

    match (release_name, release_action) {
        (None, _) => format!("Build version {build_version} {status}."),
        (Some(name), None) => format!("Release {build_version} to {name} {status}."),
        (Some(name), Some(action)) => {
            format!("Release {build_version} to {name} with {action} {status}.")
        }
    }
}

/// Build the payload for the configured build.
pub fn translate(config: &StatusConfig) -> StatusPayload {
    let status = effective_status(&config.build_status, config.status_override.as_deref());

    StatusPayload {
        state: StatusKind::parse(status).state(),
        key: STATUS_KEY.to_string(),
        name: STATUS_NAME.to_string(),
        url: logs_url(
            &config.ci_base_url,
            &config.git_source,
            &config.repo_fullname,
            &config.build_id,
        ),
        description: describe(
            &config.build_version,
            status,
            config.release_name.as_deref(),
            config.release_action.as_deref(),
        ),
    }
}
