//! Error types for hookgate
//!
//! This module defines custom error types used throughout the application.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Could not verify your access level for that URL.\nYou have to login with proper credentials.")]
    Unauthorized,

    #[error("Requested path {0} not in whitelist")]
    PathRejected(String),

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Failed to decode webhook body")]
    BodyRewrite(String),

    #[error("Upstream request failed: {0}")]
    Forward(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::PathRejected(_) => (StatusCode::FORBIDDEN, self.to_string()),
            // Exchange details are logged where they happen; callers get a
            // stable message.
            AppError::TokenExchange(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to renew identity token".to_string(),
            ),
            AppError::BodyRewrite(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            AppError::Forward(_) => (
                StatusCode::BAD_GATEWAY,
                "Upstream request failed".to_string(),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let mut response = (status, message).into_response();
        if matches!(self, AppError::Unauthorized) {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Basic realm=\"Login Required\""),
            );
        }
        response
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
