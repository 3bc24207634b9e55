//! HTTP server for the review-relay.
//!
//! A single `POST /event` route accepts review-request events; any other
//! method on the route yields 405 via axum's method routing. A `GET
//! /health` route answers liveness probes.
//!
//! # Responses
//!
//! - 201 Created: notification dispatched, record inserted
//! - 200 OK: already processed (idempotent no-op)
//! - 400 Bad Request: malformed JSON, shape violation, or no recipients
//! - 403 Forbidden: missing or mismatching credential header
//! - 405 Method Not Allowed: any non-POST method on the event route
//! - 500 Internal Server Error: store read/write or dispatch failure

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::{
    base::types::Void,
    interaction::review_request::{RelayError, RelayOutcome, handle_review_request},
    runtime::Runtime,
};

/// Header carrying the inbound credential.
const HEADER_TOKEN: &str = "x-relay-token";

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = match &self {
            RelayError::InvalidInput(_) | RelayError::NoRecipients => StatusCode::BAD_REQUEST,
            RelayError::StoreRead(_) | RelayError::Dispatch(_) | RelayError::StoreWrite(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}

/// Builds the application router.
pub fn router(runtime: Runtime) -> Router {
    Router::new()
        .route("/event", post(event_handler))
        .route("/health", get(health_handler))
        .with_state(runtime)
}

/// Binds the listener and serves until ctrl-c.
pub async fn serve(runtime: Runtime) -> Void {
    let bind_addr = runtime.config.bind_addr.clone();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("Listening on {}.", bind_addr);

    axum::serve(listener, router(runtime))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}

/// Liveness probe.
async fn health_handler() -> StatusCode {
    StatusCode::OK
}

/// Accepts one review-request event.
///
/// The credential check happens before the body is even parsed; no side
/// effect occurs on the rejection path.
#[instrument(skip_all)]
async fn event_handler(State(runtime): State<Runtime>, headers: HeaderMap, body: Bytes) -> Response {
    if !credential_matches(&headers, &runtime.config.relay_secret) {
        warn!("Rejected request with missing or invalid credential.");

        return (StatusCode::FORBIDDEN, "invalid credential").into_response();
    }

    let body: Value = match serde_json::from_slice(&body) {
        Ok(body) => body,
        Err(err) => return (StatusCode::BAD_REQUEST, format!("invalid input: {err}")).into_response(),
    };

    match handle_review_request(body, &runtime.store, &runtime.chat).await {
        Ok(RelayOutcome::Created) => (StatusCode::CREATED, "created").into_response(),
        Ok(RelayOutcome::AlreadyProcessed) => (StatusCode::OK, "already processed").into_response(),
        Err(err) => err.into_response(),
    }
}

/// Byte-for-byte comparison of the credential header against the secret.
fn credential_matches(headers: &HeaderMap, secret: &str) -> bool {
    headers
        .get(HEADER_TOKEN)
        .map(|value| value.as_bytes() == secret.as_bytes())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue};

    use super::*;

    #[test]
    fn credential_requires_exact_match() {
        let mut headers = HeaderMap::new();

        assert!(!credential_matches(&headers, "s3cret"));

        headers.insert(HEADER_TOKEN, HeaderValue::from_static("s3cret "));
        assert!(!credential_matches(&headers, "s3cret"));

        headers.insert(HEADER_TOKEN, HeaderValue::from_static("s3cret"));
        assert!(credential_matches(&headers, "s3cret"));
    }
}
