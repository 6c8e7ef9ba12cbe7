use std::time::Duration;

use reqwest::StatusCode;
use tokio::sync::broadcast;
use tokio::time;

use crate::config::KeepAliveConfig;
use crate::observability::metrics;
use crate::shout::UpstreamClient;

pub struct KeepAlive {
    upstream: UpstreamClient,
    config: KeepAliveConfig,
}

impl KeepAlive {
    pub fn new(upstream: UpstreamClient, config: KeepAliveConfig) -> Self {
        Self { upstream, config }
    }

    /// Ping until `shutdown` fires. The first ping goes out immediately and
    /// each following one `interval_secs` after the previous one finished.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        if !self.config.enabled {
            tracing::info!("Keep-alive pinger disabled");
            return;
        }

        tracing::info!(
            interval = self.config.interval_secs,
            url = %self.upstream.url(),
            "Keep-alive pinger starting"
        );

        let interval = Duration::from_secs(self.config.interval_secs);

        loop {
            tokio::select! {
                _ = self.ping_once() => {}
                _ = shutdown.recv() => break,
            }
            tokio::select! {
                _ = time::sleep(interval) => {}
                _ = shutdown.recv() => break,
            }
        }

        tracing::info!("Keep-alive pinger received shutdown signal, exiting loop");
    }

    async fn ping_once(&self) {
        match self.upstream.ping(&self.config.input).await {
            Ok(StatusCode::OK) => {
                tracing::debug!("Keep-alive ping ok");
                metrics::record_keepalive("ok");
            }
            Ok(status) => {
                tracing::warn!(status = %status, "Error pinging upstream with status");
                metrics::record_keepalive("bad_status");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error pinging upstream");
                metrics::record_keepalive("transport_error");
            }
        }
    }
}
