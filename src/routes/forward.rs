//! Forwarding pipeline handler
//!
//! Everything not served locally lands here. The request has already been
//! authenticated and whitelist-checked by the middleware chain; this handler
//! mints the bearer token, rewrites the body, relays the request to the
//! target host, and returns the filtered response.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    response::Response,
};
use tracing::info;

use crate::{
    error::AppError,
    proxy::secret,
    routes::metrics::record_request,
    AppState,
};

/// Header consulted for the outbound scheme.
const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Scheme used when the inbound request carries no X-Forwarded-Proto.
const DEFAULT_SCHEME: &str = "https";

/// Fallback handler forwarding any method and path to the target host
pub async fn forward_handler(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Response, AppError> {
    let start_time = Instant::now();

    let (parts, body) = request.into_parts();
    let method = parts.method;
    let uri = parts.uri;
    let mut headers = parts.headers;

    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to read request body: {}", e)))?;

    // Renew-if-expired; a cache hit costs no network call.
    let token = state.token_issuer.current_token().await?;

    let secret_value = headers
        .get(state.config.secret_header.as_str())
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let body = secret::inject(&body, &secret_value, state.config.secret_key.as_deref())?;

    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(DEFAULT_SCHEME)
        .to_string();

    // The upstream names itself; the inbound Host must not leak through,
    // and the original Content-Length no longer matches a rewritten body.
    headers.remove(header::HOST);
    headers.remove(header::CONTENT_LENGTH);

    let bearer = HeaderValue::from_str(&format!("Bearer {}", token.as_str())).map_err(|e| {
        AppError::Internal(anyhow::anyhow!("Token is not a valid header value: {}", e))
    })?;
    headers.insert(header::AUTHORIZATION, bearer);

    let response = state
        .upstream
        .forward(method.clone(), &uri, &scheme, headers, body)
        .await?;

    let duration = start_time.elapsed().as_secs_f64();
    let status_label = if response.status().is_success() {
        "success"
    } else {
        "error"
    };
    record_request(status_label, duration);

    info!(
        method = %method,
        path = %uri.path(),
        status = %response.status(),
        duration_ms = %format!("{:.2}", duration * 1000.0),
        "Forwarded request completed"
    );

    Ok(response)
}
