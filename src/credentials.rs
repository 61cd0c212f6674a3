//! Bitbucket api token credentials injected into the extension by the CI server.
//!
//! The file holds a JSON array; only the first record is used.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::CredentialsError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTokenCredentials {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    pub additional_properties: ApiTokenProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiTokenProperties {
    pub token: String,
}

/// Credentials are mounted on the system drive on Windows runners.
pub fn resolve_path(path: &Path) -> PathBuf {
    if cfg!(windows) {
        let mut prefixed = std::ffi::OsString::from("C:");
        prefixed.push(path.as_os_str());
        PathBuf::from(prefixed)
    } else {
        path.to_path_buf()
    }
}

/// Parse the credential list and select the first record's token.
pub fn select_token(contents: &str, path: &Path) -> Result<String, CredentialsError> {
    let credentials: Vec<ApiTokenCredentials> = serde_json::from_str(contents)?;
    debug!(count = credentials.len(), "read credentials");

    let Some(first) = credentials.into_iter().next() else {
        warn!(path = %path.display(), data = contents, "found 0 credentials in file");
        return Err(CredentialsError::Empty(path.to_path_buf()));
    };

    debug!(name = %first.name, kind = %first.kind, "using first credential");
    if first.additional_properties.token.is_empty() {
        return Err(CredentialsError::EmptyToken(first.name));
    }
    Ok(first.additional_properties.token)
}

/// Read the bearer token from the credentials file at `path`.
pub fn load_token(path: &Path) -> Result<String, CredentialsError> {
    if !path.exists() {
        return Err(CredentialsError::NotInjected(path.to_path_buf()));
    }

    info!(path = %path.display(), "reading credentials from file");
    let contents = std::fs::read_to_string(path).map_err(|source| CredentialsError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    select_token(&contents, path)
}
