//! Error types for delivering a build status to Bitbucket.

use thiserror::Error;

use crate::retry::Transient;

/// Errors that can occur while posting a build status.
///
/// Only [`Transport`](DeliveryError::Transport) and
/// [`ServerError`](DeliveryError::ServerError) are retried. A `ServerError`
/// left over after the last attempt is re-checked as an ordinary response.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Connection refused, DNS failure, timeout, or a body that could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// Bitbucket answered with a 5xx status.
    #[error("server error (status {status}): {body}")]
    ServerError { status: u16, body: String },

    /// The response body is not well-formed JSON.
    #[error("malformed response (status {status}): {reason}; body: {body}")]
    MalformedResponse {
        status: u16,
        body: String,
        reason: String,
    },

    /// The request could not be built (bad url, client setup).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for DeliveryError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest's Display omits the underlying cause (e.g. "connection refused").
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        if err.is_builder() {
            DeliveryError::InvalidRequest(message)
        } else {
            DeliveryError::Transport(message)
        }
    }
}

impl Transient for DeliveryError {
    fn is_transient(&self) -> bool {
        matches!(
            self,
            DeliveryError::Transport(_) | DeliveryError::ServerError { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_response_display() {
        let err = DeliveryError::MalformedResponse {
            status: 200,
            body: "<html>".into(),
            reason: "expected value at line 1 column 1".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed response (status 200): expected value at line 1 column 1; body: <html>"
        );
    }

    #[test]
    fn only_transport_and_server_errors_are_transient() {
        assert!(DeliveryError::Transport("connection refused".into()).is_transient());
        assert!(
            DeliveryError::ServerError {
                status: 503,
                body: String::new()
            }
            .is_transient()
        );
        assert!(
            !DeliveryError::MalformedResponse {
                status: 200,
                body: String::new(),
                reason: String::new()
            }
            .is_transient()
        );
        assert!(!DeliveryError::InvalidRequest("bad url".into()).is_transient());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DeliveryError>();
    }
}
