//! Hookgate - authenticating webhook forwarder
//!
//! This library provides the core functionality for the hookgate service.
//! It relays webhook calls to a fixed upstream host, gating them on basic
//! credentials and a path whitelist, minting a short-lived identity token
//! as the bearer credential, and injecting a header-carried secret into the
//! JSON body.

pub mod config;
pub mod error;
pub mod middleware;
pub mod proxy;
pub mod routes;
pub mod token;

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};

pub use crate::config::Config;
pub use crate::middleware::basic_auth::BasicAuthGate;
pub use crate::middleware::whitelist::Whitelist;
pub use crate::proxy::UpstreamClient;
pub use crate::token::{IdentityToken, KeySigner, ServiceAccountKey, Signer, TokenIssuer};

/// Application state shared across all request handlers
pub struct AppState {
    pub config: Config,
    pub http_client: reqwest::Client,
    pub start_time: Instant,
    pub token_issuer: Arc<TokenIssuer>,
    pub whitelist: Whitelist,
    pub auth_gate: BasicAuthGate,
    pub upstream: UpstreamClient,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Result<Self> {
        let account = ServiceAccountKey::from_file(&config.service_account_file)?;
        let signer: Arc<dyn Signer> = Arc::new(KeySigner::new(&account)?);
        Self::with_signer(config, signer)
    }

    /// Create application state with an injected signing capability
    ///
    /// Used by tests to substitute a fake signer; production wiring goes
    /// through [`AppState::new`].
    #[cfg(any(test, feature = "test-utils"))]
    pub fn new_for_testing(config: Config, signer: Arc<dyn Signer>) -> Result<Self> {
        Self::with_signer(config, signer)
    }

    fn with_signer(config: Config, signer: Arc<dyn Signer>) -> Result<Self> {
        // One pooled client shared by the token exchange and the upstream leg
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(100)
            .timeout(std::time::Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        let token_issuer = Arc::new(TokenIssuer::new(http_client.clone(), signer, &config));
        let whitelist =
            Whitelist::from_entries(&config.whitelist).context("Invalid whitelist pattern")?;
        let auth_gate =
            BasicAuthGate::new(config.auth_username.clone(), config.auth_password.clone());
        let upstream = UpstreamClient::new(http_client.clone(), &config);

        Ok(Self {
            config,
            http_client,
            start_time: Instant::now(),
            token_issuer,
            whitelist,
            auth_gate,
            upstream,
        })
    }
}
