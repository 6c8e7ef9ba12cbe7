//! Client for the upstream shout endpoint.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::shout::error::{RelayError, RelayResult};
use crate::shout::types::{ShoutRequest, UpstreamReply};

/// Content type sent upstream, spelled the way the upstream service expects.
pub const UPSTREAM_CONTENT_TYPE: &str = "APPLICATION/JSON";

/// Handle to the upstream shout endpoint. Cheap to clone; clones share the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    url: String,
    timeout: Option<Duration>,
}

impl UpstreamClient {
    pub fn new(client: reqwest::Client, config: &UpstreamConfig) -> Self {
        Self {
            client,
            url: config.url.clone(),
            timeout: config.timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Forward `shout` upstream and return the upstream's `OUTPUT`.
    ///
    /// Any status other than 200 fails with the upstream body embedded in
    /// the message.
    pub async fn shout(&self, shout: &ShoutRequest) -> RelayResult<String> {
        let body = serde_json::to_vec(shout)?;

        let response = match self.post(body).await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(url = %self.url, error = %e, "Upstream request failed");
                metrics::record_upstream("transport_error");
                return Err(RelayError::upstream(e));
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            metrics::record_upstream("bad_status");
            let text = response
                .text()
                .await
                .map_err(|e| RelayError::Internal(e.to_string()))?;
            tracing::warn!(url = %self.url, status = %status, body = %text, "Upstream returned error status");
            return Err(RelayError::upstream(text));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RelayError::Internal(e.to_string()))?;
        let reply: UpstreamReply = serde_json::from_slice(&bytes).map_err(|e| {
            metrics::record_upstream("bad_json");
            tracing::warn!(url = %self.url, error = %e, "Upstream returned undecodable JSON");
            RelayError::from(e)
        })?;

        metrics::record_upstream("ok");
        Ok(reply.output)
    }

    /// Send a minimal shout and report the status, without decoding the body.
    pub async fn ping(&self, input: &str) -> RelayResult<StatusCode> {
        let body = serde_json::to_vec(&ShoutRequest::new(input))?;
        self.post(body)
            .await
            .map(|r| r.status())
            .map_err(RelayError::upstream)
    }

    async fn post(&self, body: Vec<u8>) -> Result<reqwest::Response, reqwest::Error> {
        let mut request = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, UPSTREAM_CONTENT_TYPE)
            .body(body);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        request.send().await
    }
}
