use std::time::Duration;

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, info, warn};

use super::error::DeliveryError;
use super::types::StatusPayload;
use crate::retry::RetryPolicy;

const API_URL: &str = "https://api.bitbucket.org";

/// Performs a single attempt at posting a build status.
///
/// Returns the HTTP status code of an accepted, well-formed response.
#[allow(async_fn_in_trait)]
pub trait StatusSender {
    async fn send_status(
        &self,
        token: &str,
        repo_fullname: &str,
        revision: &str,
        payload: &StatusPayload,
    ) -> Result<u16, DeliveryError>;
}

pub struct BitbucketClient {
    client: Client,
    base_url: String,
}

impl BitbucketClient {
    pub fn new() -> Result<Self, DeliveryError> {
        Self::with_base_url(API_URL)
    }

    /// Create a client pointing at a custom base URL (useful for testing).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn status_url(&self, repo_fullname: &str, revision: &str) -> String {
        format!(
            "{}/2.0/repositories/{repo_fullname}/commit/{revision}/statuses/build",
            self.base_url.trim_end_matches('/')
        )
    }
}

impl StatusSender for BitbucketClient {
    async fn send_status(
        &self,
        token: &str,
        repo_fullname: &str,
        revision: &str,
        payload: &StatusPayload,
    ) -> Result<u16, DeliveryError> {
        let url = self.status_url(repo_fullname, revision);

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        // Reading the whole body releases the connection on every path below.
        let body = response.text().await?;

        if status.is_server_error() {
            return Err(DeliveryError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        check_body(&url, status.as_u16(), body)
    }
}

/// Accept any well-formed JSON body, whatever the status code. Bitbucket's
/// answer is not inspected beyond that.
fn check_body(target: &str, status: u16, body: String) -> Result<u16, DeliveryError> {
    if let Err(err) = serde_json::from_str::<serde_json::Value>(&body) {
        warn!(
            endpoint = target,
            status,
            body = %body,
            error = %err,
            "deserializing bitbucket response failed"
        );
        return Err(DeliveryError::MalformedResponse {
            status,
            body,
            reason: err.to_string(),
        });
    }

    if !(200..300).contains(&status) {
        warn!(endpoint = target, status, body = %body, "bitbucket answered with a non-success status");
    }
    Ok(status)
}

/// Delivers a build status through a [`StatusSender`], retrying transient
/// failures according to a [`RetryPolicy`].
pub struct ResilientDelivery<S> {
    sender: S,
    policy: RetryPolicy,
}

impl<S: StatusSender> ResilientDelivery<S> {
    pub fn new(sender: S, policy: RetryPolicy) -> Self {
        Self { sender, policy }
    }

    pub async fn deliver(
        &self,
        token: &str,
        repo_fullname: &str,
        revision: &str,
        payload: &StatusPayload,
    ) -> Result<(), DeliveryError> {
        info!(url = %payload.url, "setting logs url");

        let sender = &self.sender;
        let outcome = self
            .policy
            .run(move |attempt| {
                debug!(attempt, repo = repo_fullname, revision, "posting build status");
                sender.send_status(token, repo_fullname, revision, payload)
            })
            .await;

        // The last 5xx answer is judged like any other response once retries run out.
        let status = match outcome {
            Ok(status) => status,
            Err(DeliveryError::ServerError { status, body }) => {
                check_body(&format!("{repo_fullname}@{revision}"), status, body)?
            }
            Err(err) => return Err(err),
        };

        info!(status, repo = repo_fullname, revision, "received response from bitbucket");
        Ok(())
    }
}
