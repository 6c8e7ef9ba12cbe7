//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the shout relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind host, port, body limit).
    pub listener: ListenerConfig,

    /// Upstream transformation endpoint.
    pub upstream: UpstreamConfig,

    /// License verification settings.
    pub license: LicenseConfig,

    /// Keep-alive pinger settings.
    pub keepalive: KeepAliveConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// Listening port. Overridden by the `PORT` environment variable.
    pub port: u16,

    /// Maximum accepted request body in bytes.
    pub max_body_size: usize,
}

impl ListenerConfig {
    /// The `host:port` string handed to the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

/// Upstream shout endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Full URL of the upstream `/V1/SHOUT` endpoint.
    pub url: String,

    /// Overall timeout for a single upstream call. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: "http://api.shoutcloud.io/V1/SHOUT".to_string(),
            timeout_secs: None,
        }
    }
}

/// License verification configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LicenseConfig {
    /// Require a verified license key on every shout request.
    pub enabled: bool,

    /// Licensing service verify endpoint (form-encoded POST).
    pub verify_url: String,

    /// Product identifier sent alongside the key.
    pub product_permalink: String,

    /// Request header carrying the license key.
    pub header: String,
}

impl Default for LicenseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            verify_url: "https://api.gumroad.com/v2/licenses/verify".to_string(),
            product_permalink: "SHOUTCLOUD_PRO".to_string(),
            header: "X-Authorization".to_string(),
        }
    }
}

/// Keep-alive pinger configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeepAliveConfig {
    /// Spawn the pinger alongside the server.
    pub enabled: bool,

    /// Seconds between pings.
    pub interval_secs: u64,

    /// `INPUT` text sent with each ping.
    pub input: String,
}

impl Default for KeepAliveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 77,
            input: "ping".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format: "pretty" or "json".
    pub log_format: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
