//! Identity token issuance and caching.
//!
//! Performs the signed-assertion exchange against the configured token
//! endpoint and caches the minted token until its expiry.

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::routes::metrics::record_token_renewal;
use crate::token::identity::IdentityToken;
use crate::token::signer::Signer;

/// Grant type presented at the token endpoint.
const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for the assertion itself.
const ASSERTION_LIFETIME_SECS: i64 = 3600;

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    sub: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
    target_audience: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenEndpointResponse {
    id_token: String,
}

/// Mints identity tokens through the signed-assertion exchange and caches
/// the current one until it expires.
pub struct TokenIssuer {
    client: reqwest::Client,
    signer: Arc<dyn Signer>,
    token_uri: String,
    target_audience: String,
    cached: Mutex<Option<IdentityToken>>,
}

impl TokenIssuer {
    /// Create a new token issuer
    pub fn new(client: reqwest::Client, signer: Arc<dyn Signer>, config: &Config) -> Self {
        Self {
            client,
            signer,
            token_uri: config.token_uri.clone(),
            target_audience: config.client_id.clone(),
            cached: Mutex::new(None),
        }
    }

    /// Return the cached token, renewing it first if missing or expired.
    ///
    /// The lock is held across the renewal, so concurrent callers trigger
    /// at most one exchange per expiry window.
    #[instrument(skip(self))]
    pub async fn current_token(&self) -> AppResult<IdentityToken> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                debug!("Identity token cache hit");
                return Ok(token.clone());
            }
        }

        let token = self.exchange().await?;
        info!(
            account = %self.signer.identity(),
            expires_at = token.expires_at(),
            "Renewed identity token"
        );
        record_token_renewal();

        *cached = Some(token.clone());
        Ok(token)
    }

    /// Perform one assertion exchange at the token endpoint.
    async fn exchange(&self) -> AppResult<IdentityToken> {
        let assertion = self.build_assertion().await?;

        debug!(token_uri = %self.token_uri, "Exchanging assertion for identity token");

        let response = self
            .client
            .post(&self.token_uri)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT_TYPE),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                error!(token_uri = %self.token_uri, error = %e, "Token endpoint request failed");
                AppError::TokenExchange(format!("token endpoint unreachable: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(status = %status, body = %text, "Token endpoint returned an error");
            return Err(AppError::TokenExchange(format!(
                "token endpoint error {}: {}",
                status, text
            )));
        }

        let body: TokenEndpointResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Token endpoint response lacked an id_token");
            AppError::TokenExchange(format!("malformed token response: {}", e))
        })?;

        IdentityToken::from_raw(body.id_token)
    }

    /// Build the signed assertion naming the target audience.
    async fn build_assertion(&self) -> AppResult<String> {
        let iat = chrono::Utc::now().timestamp();
        let header = serde_json::json!({"alg": "RS256", "typ": "JWT"});
        let claims = AssertionClaims {
            iss: self.signer.identity(),
            sub: self.signer.identity(),
            aud: &self.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
            target_audience: &self.target_audience,
        };

        let header = serde_json::to_vec(&header).map_err(anyhow::Error::from)?;
        let claims = serde_json::to_vec(&claims).map_err(anyhow::Error::from)?;
        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(claims)
        );

        let signature = self.signer.sign(signing_input.as_bytes()).await?;
        Ok(format!("{}.{}", signing_input, signature))
    }
}
