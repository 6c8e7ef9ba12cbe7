//! Route handlers.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::{ConnectInfo, FromRequest, State},
    http::{HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::request::{has_json_content_type, request_id};
use crate::http::response::shout_response;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::shout::{self, RelayError, RelayResult, ShoutRequest};

/// `POST /V1/SHOUT`
pub async fn shout_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let (parts, body) = request.into_parts();
    let request_id = request_id(&parts.headers).to_string();
    let remote = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    tracing::info!(request_id = %request_id, remote = %remote, "POST /V1/SHOUT");

    let response = match relay(&state, &parts.headers, body).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(
                request_id = %request_id,
                status = %e.status(),
                error = %e,
                "Shout request failed"
            );
            e.into_response()
        }
    };

    metrics::record_request(response.status().as_u16(), start_time);
    response
}

async fn relay(state: &AppState, headers: &HeaderMap, body: Body) -> RelayResult<Response> {
    if !has_json_content_type(headers) {
        return Err(RelayError::bad_content_type());
    }

    // The body limit layer surfaces as a 413 rejection whether or not the
    // client sent a Content-Length.
    let bytes = Bytes::from_request(Request::new(body), state)
        .await
        .map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                RelayError::body_too_large()
            } else {
                RelayError::bad_json()
            }
        })?;
    let request: ShoutRequest = serde_json::from_slice(&bytes).map_err(|e| {
        tracing::warn!(error = %e, "Error JSON decoding");
        RelayError::bad_json()
    })?;

    if let Some(license) = &state.license {
        license.authorize(headers).await?;
    }

    let shouted = shout::process(request, &state.upstream).await?;
    shout_response(&shouted)
}

/// `GET /PING`
pub async fn ping_handler() -> &'static str {
    "PONG"
}
