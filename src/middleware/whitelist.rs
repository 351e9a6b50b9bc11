//! Path whitelist enforcement
//!
//! Only paths matching a configured glob pattern may be forwarded.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use glob::Pattern;
use tracing::warn;

use crate::{error::AppError, AppState};

/// Glob-pattern path matcher deciding which paths may be forwarded.
///
/// Entries use shell-glob semantics (`*` any characters including `/`,
/// `?` a single character, `[...]` a character class). A literal `*`
/// entry admits every path; an empty entry set admits nothing.
#[derive(Debug, Clone)]
pub struct Whitelist {
    patterns: Vec<Pattern>,
    allow_all: bool,
}

impl Whitelist {
    /// Compile a whitelist from configured entries.
    pub fn from_entries(entries: &[String]) -> Result<Self, glob::PatternError> {
        let allow_all = entries.iter().any(|entry| entry == "*");
        let patterns = entries
            .iter()
            .filter(|entry| entry.as_str() != "*")
            .map(|entry| Pattern::new(normalize(entry)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            patterns,
            allow_all,
        })
    }

    /// Whether `path` is permitted to be forwarded.
    ///
    /// An empty path is treated as `/`. The leading slash is not
    /// significant, so the entry `gate/webhooks/*` admits
    /// `/gate/webhooks/push`.
    pub fn is_allowed(&self, path: &str) -> bool {
        if self.allow_all {
            return true;
        }
        let path = if path.is_empty() { "/" } else { path };
        let path = normalize(path);
        self.patterns.iter().any(|pattern| pattern.matches(path))
    }
}

fn normalize(value: &str) -> &str {
    value.strip_prefix('/').unwrap_or(value)
}

/// Whitelist middleware
///
/// Terminates with 403 when the request path matches no configured entry.
pub async fn whitelist_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path();
    if !state.whitelist.is_allowed(path) {
        warn!(
            method = %request.method(),
            path = %path,
            "Rejected request, path not in whitelist"
        );
        return Err(AppError::PathRejected(path.to_string()));
    }

    Ok(next.run(request).await)
}
