//! Header hygiene for relayed responses
//!
//! Hop-by-hop headers are meaningful for a single transport connection only
//! and must never cross the proxy.

use axum::http::header::{self, HeaderMap, HeaderName};

/// HTTP/1.1 hop-by-hop headers that must never be forwarded
const HOP_BY_HOP_HEADERS: &[HeaderName] = &[
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    HeaderName::from_static("trailers"),
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Check if a header is a hop-by-hop header that should not be forwarded
pub fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP_HEADERS.contains(name)
}

/// Remove hop-by-hop headers from a header collection
pub fn strip_hop_by_hop(headers: &HeaderMap) -> HeaderMap {
    let mut filtered = HeaderMap::new();

    for (name, value) in headers {
        if !is_hop_by_hop(name) {
            filtered.append(name.clone(), value.clone());
        }
    }

    filtered
}

/// Filter the headers of an upstream response for relaying.
///
/// Strips hop-by-hop headers plus the entity headers the transport leg
/// invalidated: the outbound client already decoded the body, so
/// `Content-Encoding` and the original `Content-Length` no longer describe
/// the bytes being relayed.
pub fn filter_response_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut headers = strip_hop_by_hop(upstream);
    headers.remove(header::CONTENT_ENCODING);
    headers.remove(header::CONTENT_LENGTH);
    headers
}
