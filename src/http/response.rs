//! Response rendering.
//!
//! Successful shouts are JSON with the upstream-style content type; failures
//! are the error message as plain text with the mapped status.

use axum::{
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
};

use crate::shout::upstream::UPSTREAM_CONTENT_TYPE;
use crate::shout::{RelayError, RelayResult, ShoutRequest};

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

pub fn shout_response(shout: &ShoutRequest) -> RelayResult<Response> {
    let body = serde_json::to_vec(shout)?;
    Ok((StatusCode::OK, [(CONTENT_TYPE, UPSTREAM_CONTENT_TYPE)], body).into_response())
}
