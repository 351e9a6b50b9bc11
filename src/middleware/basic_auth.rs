//! Basic authentication gate
//!
//! When credentials are configured, inbound requests must present a
//! matching `Authorization: Basic` header before anything is forwarded.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::{error::AppError, AppState};

/// Validates an optional username/password pair against configured values.
#[derive(Debug, Clone, Default)]
pub struct BasicAuthGate {
    username: Option<String>,
    password: Option<String>,
}

impl BasicAuthGate {
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        Self { username, password }
    }

    /// True when both a username and a password are configured.
    pub fn enabled(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    /// Validate a supplied username/password pair.
    pub fn check(&self, username: &str, password: &str) -> bool {
        match (&self.username, &self.password) {
            (Some(expected_user), Some(expected_pass)) => {
                fixed_eq(username, expected_user) && fixed_eq(password, expected_pass)
            }
            _ => false,
        }
    }
}

/// Compare digests rather than the strings themselves, so the comparison
/// cost does not depend on the position of the first mismatch.
fn fixed_eq(supplied: &str, expected: &str) -> bool {
    Sha256::digest(supplied.as_bytes()) == Sha256::digest(expected.as_bytes())
}

/// Parse an `Authorization: Basic` header into its username/password pair.
fn parse_basic_credentials(header_value: &str) -> Option<(String, String)> {
    let encoded = header_value.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Authentication middleware
///
/// Runs before the whitelist check; terminates with 401 and a Basic
/// challenge when the gate is enabled and the credentials do not match.
pub async fn basic_auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if state.auth_gate.enabled() {
        let credentials = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(parse_basic_credentials);

        let allowed = match &credentials {
            Some((username, password)) => state.auth_gate.check(username, password),
            None => false,
        };

        if !allowed {
            warn!(
                method = %request.method(),
                path = %request.uri().path(),
                "Rejected request with missing or invalid credentials"
            );
            return Err(AppError::Unauthorized);
        }
    }

    Ok(next.run(request).await)
}
