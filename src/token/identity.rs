//! Minted identity token representation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// The claims read back from a minted token. Only the expiry matters here.
#[derive(Debug, Deserialize)]
struct TokenClaims {
    exp: i64,
}

/// A short-lived identity token presented upstream as a bearer credential.
#[derive(Debug, Clone)]
pub struct IdentityToken {
    raw: String,
    expires_at: i64,
}

impl IdentityToken {
    /// Parse a token returned by the exchange endpoint.
    ///
    /// The signature is not verified: the token arrives over TLS directly
    /// from the issuing endpoint. Only the `exp` claim is extracted.
    pub fn from_raw(raw: String) -> AppResult<Self> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;

        let data =
            jsonwebtoken::decode::<TokenClaims>(&raw, &DecodingKey::from_secret(&[]), &validation)
                .map_err(|e| AppError::TokenExchange(format!("malformed id_token: {}", e)))?;

        Ok(Self {
            raw,
            expires_at: data.claims.exp,
        })
    }

    /// The encoded token, used verbatim in the Authorization header.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Expiry as Unix epoch seconds.
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    /// True once the current time has reached the token's expiry.
    pub fn is_expired(&self) -> bool {
        chrono::Utc::now().timestamp() >= self.expires_at
    }
}
