//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, body limit)
//! - Bind server to listener
//! - Spawn the keep-alive pinger alongside the server

use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::handlers::{ping_handler, shout_handler};
use crate::http::request::{MakeRequestUuid, RequestIdSpan};
use crate::keepalive::KeepAlive;
use crate::license::LicenseVerifier;
use crate::shout::UpstreamClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    /// `None` when license checking is disabled.
    pub license: Option<LicenseVerifier>,
}

/// HTTP server for the shout relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
    upstream: UpstreamClient,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Self {
        // One client, shared by the upstream, licensing and keep-alive calls
        let client = reqwest::Client::new();

        let upstream = UpstreamClient::new(client.clone(), &config.upstream);
        let license = config
            .license
            .enabled
            .then(|| LicenseVerifier::new(client, &config.license));

        let state = AppState {
            upstream: upstream.clone(),
            license,
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            upstream,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        Router::new()
            .route("/V1/SHOUT", post(shout_handler))
            .route("/PING", get(ping_handler))
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.listener.max_body_size))
            .layer(TraceLayer::new_for_http().make_span_with(RequestIdSpan))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            license_checks = self.config.license.enabled,
            upstream = %self.upstream.url(),
            "HTTP server starting"
        );

        if self.config.keepalive.enabled {
            let pinger = KeepAlive::new(self.upstream.clone(), self.config.keepalive.clone());
            tokio::spawn(pinger.run(shutdown.resubscribe()));
        }

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}
