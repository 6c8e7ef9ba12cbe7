use axum::http::HeaderMap;
use reqwest::StatusCode;

use crate::config::LicenseConfig;
use crate::observability::metrics;
use crate::shout::error::{RelayError, RelayResult};

/// Read the license key from `header`. Absent, empty or non-UTF-8 values are
/// all treated as missing.
pub fn extract_license_key<'a>(headers: &'a HeaderMap, header: &str) -> RelayResult<&'a str> {
    headers
        .get(header)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| RelayError::missing_license(header))
}

#[derive(Debug, Clone)]
pub struct LicenseVerifier {
    client: reqwest::Client,
    verify_url: String,
    product_permalink: String,
    header: String,
}

impl LicenseVerifier {
    pub fn new(client: reqwest::Client, config: &LicenseConfig) -> Self {
        Self {
            client,
            verify_url: config.verify_url.clone(),
            product_permalink: config.product_permalink.clone(),
            header: config.header.clone(),
        }
    }

    /// Request header the key is read from.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Extract the key from `headers` and verify it.
    pub async fn authorize(&self, headers: &HeaderMap) -> RelayResult<()> {
        let key = extract_license_key(headers, &self.header).inspect_err(|_| {
            tracing::warn!(header = %self.header, "License header missing");
            metrics::record_license_check("missing");
        })?;
        self.verify(key).await
    }

    pub async fn verify(&self, license_key: &str) -> RelayResult<()> {
        let form = [
            ("product_permalink", self.product_permalink.as_str()),
            ("license_key", license_key),
        ];

        match self.client.post(&self.verify_url).form(&form).send().await {
            Ok(response) if response.status() == StatusCode::NOT_FOUND => {
                tracing::warn!("License key not found");
                metrics::record_license_check("not_found");
                Err(RelayError::bad_license())
            }
            Ok(response) => {
                tracing::debug!(status = %response.status(), "License key accepted");
                metrics::record_license_check("ok");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(url = %self.verify_url, error = %e, "License verification failed");
                metrics::record_license_check("transport_error");
                Err(RelayError::bad_license())
            }
        }
    }
}
