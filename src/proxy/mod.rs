//! Proxy module
//!
//! Handles the request/response transformation and the upstream forward.

pub mod headers;
pub mod secret;
pub mod upstream;

pub use upstream::UpstreamClient;
