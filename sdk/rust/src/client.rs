use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ShoutRequest {
    #[serde(rename = "INPUT")]
    pub input: String,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct ShoutResponse {
    #[serde(rename = "INPUT")]
    pub input: String,
    #[serde(rename = "OUTPUT")]
    pub output: String,
}

/// A non-success reply from the relay: status plus its plain-text body.
#[derive(Debug)]
pub struct RelayError {
    pub status: StatusCode,
    pub message: String,
}

impl std::fmt::Display for RelayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "relay returned {}: {}", self.status, self.message)
    }
}

impl std::error::Error for RelayError {}

pub struct ShoutClient {
    client: Client,
    relay_url: String,
    license_key: Option<String>,
}

impl ShoutClient {
    pub fn new(relay_url: &str) -> Self {
        Self {
            client: Client::builder()
                .no_proxy()
                .build()
                .unwrap_or_else(|_| Client::new()),
            relay_url: relay_url.trim_end_matches('/').to_string(),
            license_key: None,
        }
    }

    /// Send `key` in `X-Authorization` on every shout.
    pub fn with_license_key(mut self, key: &str) -> Self {
        self.license_key = Some(key.to_string());
        self
    }

    /// Shout `input` through the relay.
    pub async fn shout(&self, input: &str) -> Result<ShoutResponse, Box<dyn std::error::Error>> {
        let mut req = self
            .client
            .post(format!("{}/V1/SHOUT", self.relay_url))
            .header("content-type", "application/json")
            .body(serde_json::to_vec(&ShoutRequest {
                input: input.to_string(),
            })?);
        if let Some(key) = &self.license_key {
            req = req.header("x-authorization", key);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(Box::new(RelayError {
                status,
                message: text,
            }));
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Hit the health endpoint and return its body.
    pub async fn ping(&self) -> Result<String, reqwest::Error> {
        self.client
            .get(format!("{}/PING", self.relay_url))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}
