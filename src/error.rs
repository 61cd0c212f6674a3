use std::path::PathBuf;

use thiserror::Error;

/// Problems with the injected credentials. All of them are detected before
/// any request is made and end the run.
#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("No credentials have been injected (no file at {0})")]
    NotInjected(PathBuf),

    #[error("Failed reading credential file at path {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed unmarshalling injected credentials: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Found 0 credentials in file {0}")]
    Empty(PathBuf),

    #[error("Credential {0:?} has an empty token")]
    EmptyToken(String),
}
