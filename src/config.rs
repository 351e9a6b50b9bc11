//! Configuration management for hookgate
//!
//! Configuration is loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Default token endpoint for the assertion exchange.
pub const DEFAULT_TOKEN_URI: &str = "https://www.googleapis.com/oauth2/v4/token";

/// Default name of the header whose value is injected into the body.
const DEFAULT_SECRET_HEADER: &str = "X-Gitlab-Token";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Upstream host every request is forwarded to
    pub target_host: String,
    /// OAuth token endpoint used for the assertion exchange
    pub token_uri: String,
    /// Audience (`target_audience` claim) the minted token is bound to
    pub client_id: String,
    /// Path of the service account JSON key file
    pub service_account_file: PathBuf,

    /// Header whose value is injected into the webhook body
    pub secret_header: String,
    /// JSON key to inject the secret under; unset disables injection
    pub secret_key: Option<String>,

    /// Glob patterns of forwardable paths; an empty list rejects everything
    pub whitelist: Vec<String>,

    /// Basic auth credentials; both must be set to enable the gate
    pub auth_username: Option<String>,
    pub auth_password: Option<String>,

    /// Timeout for the token exchange and the upstream leg (in seconds)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("HOOKGATE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("HOOKGATE_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid HOOKGATE_PORT")?,

            target_host: env::var("TARGET_HOST").context("TARGET_HOST must be set")?,
            token_uri: env::var("TOKEN_URI").unwrap_or_else(|_| DEFAULT_TOKEN_URI.to_string()),
            client_id: env::var("CLIENT_ID").context("CLIENT_ID must be set")?,
            service_account_file: env::var("SERVICE_ACCOUNT_FILE")
                .context("SERVICE_ACCOUNT_FILE must be set")?
                .into(),

            secret_header: env::var("SECRET_HEADER")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_SECRET_HEADER.to_string()),
            secret_key: env::var("SECRET_KEY").ok().filter(|v| !v.is_empty()),

            whitelist: env::var("WHITELIST")
                .map(|raw| {
                    raw.split(',')
                        .map(|entry| entry.trim().to_string())
                        .filter(|entry| !entry.is_empty())
                        .collect()
                })
                .unwrap_or_default(),

            auth_username: env::var("AUTH_USERNAME").ok().filter(|v| !v.is_empty()),
            auth_password: env::var("AUTH_PASSWORD").ok().filter(|v| !v.is_empty()),

            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("Invalid REQUEST_TIMEOUT_SECONDS")?,
        })
    }
}
