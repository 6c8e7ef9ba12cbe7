//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::http::{header::CONTENT_TYPE, HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use shout_relay::{HttpServer, RelayConfig, Shutdown};
use tokio::net::TcpListener;

/// A request captured by a mock service.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub content_type: Option<String>,
    pub body: String,
    pub received_at: Instant,
}

/// Counts and keeps every request a mock service receives.
#[derive(Clone, Default)]
pub struct Recorder {
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl Recorder {
    /// Record a request and return its zero-based arrival index.
    fn record(&self, headers: &HeaderMap, body: &str) -> usize {
        let index = self.hits.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(RecordedRequest {
            content_type: headers
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body: body.to_string(),
            received_at: Instant::now(),
        });
        index
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub fn arrivals(&self) -> Vec<Instant> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.received_at)
            .collect()
    }

    #[allow(dead_code)]
    pub fn last(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

/// Start a programmable mock service answering POSTs on `path`.
///
/// `respond` maps the raw request body to a status code and response body.
pub async fn start_programmable_backend<F>(path: &'static str, respond: F) -> (SocketAddr, Recorder)
where
    F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
{
    start_delayed_backend(path, move |_, body| {
        let (status, reply) = respond(body);
        (Duration::ZERO, status, reply)
    })
    .await
}

/// Like `start_programmable_backend`, but `respond` also sees the arrival
/// index and returns how long to hold the reply.
pub async fn start_delayed_backend<F>(path: &'static str, respond: F) -> (SocketAddr, Recorder)
where
    F: Fn(usize, &str) -> (Duration, u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let recorder = Recorder::default();
    let respond = Arc::new(respond);

    let rec = recorder.clone();
    let app = Router::new().route(
        path,
        post(move |headers: HeaderMap, body: String| {
            let rec = rec.clone();
            let respond = respond.clone();
            async move {
                let index = rec.record(&headers, &body);
                let (delay, status, reply) = respond(index, &body);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                (StatusCode::from_u16(status).unwrap(), reply)
            }
        }),
    );

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, recorder)
}

/// Mock upstream that upper-cases `INPUT` into `OUTPUT`, like the real service.
pub async fn start_uppercasing_upstream() -> (SocketAddr, Recorder) {
    start_programmable_backend("/V1/SHOUT", |body| {
        let request: serde_json::Value = serde_json::from_str(body).unwrap();
        let input = request["INPUT"].as_str().unwrap_or_default().to_uppercase();
        (200, serde_json::json!({ "INPUT": input, "OUTPUT": input }).to_string())
    })
    .await
}

/// Mock licensing service: keys containing "BAD" are unknown (404).
#[allow(dead_code)]
pub async fn start_licensing_service() -> (SocketAddr, Recorder) {
    start_programmable_backend("/v2/licenses/verify", |body| {
        if body.contains("license_key=BAD") {
            (404, r#"{"success":false,"message":"That license does not exist for the provided product."}"#.into())
        } else {
            (200, r#"{"success":true,"uses":1}"#.into())
        }
    })
    .await
}

/// Relay config pointing at local mocks, with license checks and keep-alive off.
pub fn relay_config(upstream: SocketAddr) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;
    config.upstream.url = format!("http://{}/V1/SHOUT", upstream);
    config.license.enabled = false;
    config.keepalive.enabled = false;
    config
}

/// Start the relay on an ephemeral port.
pub async fn start_relay(config: RelayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind(config.listener.bind_address()).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Plain HTTP client that never goes through a system proxy.
#[allow(dead_code)]
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Poll `check` until it holds or `timeout` passes.
#[allow(dead_code)]
pub async fn wait_for<F>(timeout: Duration, check: F) -> bool
where
    F: Fn() -> bool,
{
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    check()
}
