//! Upstream forwarder
//!
//! Sends the transformed request to the fixed target host and converts the
//! response for relaying. Single best-effort attempt, no retries.

use axum::body::Body;
use axum::http::{HeaderMap, Method, Response, Uri};
use bytes::Bytes;
use tracing::{debug, error, info, instrument};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::proxy::headers::filter_response_headers;

/// Client forwarding requests to the configured target host.
pub struct UpstreamClient {
    client: reqwest::Client,
    target_host: String,
}

impl UpstreamClient {
    /// Create a new upstream client
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            target_host: config.target_host.clone(),
        }
    }

    /// Forward a transformed request and return the filtered relay response.
    #[instrument(skip(self, headers, body), fields(method = %method, path = %uri.path()))]
    pub async fn forward(
        &self,
        method: Method,
        uri: &Uri,
        scheme: &str,
        headers: HeaderMap,
        body: Bytes,
    ) -> AppResult<Response<Body>> {
        let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
        let url = format!("{}://{}{}", scheme, self.target_host, path_and_query);

        info!(url = %url, "Forwarding request upstream");

        let response = self
            .client
            .request(method, &url)
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                error!(url = %url, error = %e, "Upstream request failed");
                AppError::Forward(e)
            })?;

        self.convert_response(response).await
    }

    /// Convert the reqwest response into a relayable axum response.
    async fn convert_response(&self, response: reqwest::Response) -> AppResult<Response<Body>> {
        let status = response.status();
        let headers = filter_response_headers(response.headers());
        let body = response.bytes().await.map_err(AppError::Forward)?;

        debug!(status = %status, body_len = body.len(), "Received upstream response");

        let mut builder = Response::builder().status(status);
        if let Some(response_headers) = builder.headers_mut() {
            *response_headers = headers;
        }
        builder
            .body(Body::from(body))
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build relay response: {}", e)))
    }
}
