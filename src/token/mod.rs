//! Identity token lifecycle
//!
//! Builds signed assertions, exchanges them for identity tokens, and caches
//! the current token until it expires.

pub mod identity;
pub mod issuer;
pub mod signer;

pub use identity::IdentityToken;
pub use issuer::TokenIssuer;
pub use signer::{KeySigner, ServiceAccountKey, Signer};
