// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! JSON-over-HTTP transport shared by the service adapters

use std::time::Duration;

use api_client::ApiError;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Errors raised by the HTTP adapters before conversion into [`ApiError`]
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum RpcError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Service returned an unexpected status
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited { retry_after_seconds: u64 },

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Timeout error
    #[error("Request timeout")]
    Timeout { seconds: u64 },
}

impl From<RpcError> for ApiError {
    fn from(value: RpcError) -> Self {
        match value {
            RpcError::Http(error) => ApiError::Http {
                message: error.to_string(),
            },
            RpcError::Json(error) => ApiError::InvalidResponse {
                message: error.to_string(),
            },
            RpcError::Status { status, message } => ApiError::Http {
                message: format!("{status}: {message}"),
            },
            RpcError::RateLimited {
                retry_after_seconds,
            } => ApiError::RateLimitExceeded {
                retry_after_seconds,
            },
            RpcError::Unauthorized => ApiError::Authentication {
                message: "Authentication failed".to_string(),
            },
            RpcError::Config(message) => ApiError::Configuration { message },
            RpcError::Timeout { seconds } => ApiError::Timeout {
                timeout_seconds: seconds,
            },
        }
    }
}

const DEFAULT_RETRY_AFTER_SECONDS: u64 = 3;

/// Thin wrapper over a `reqwest` client with a per-request deadline
#[derive(Debug, Clone)]
pub(crate) struct JsonTransport {
    client: Client,
    timeout_seconds: u64,
    service: &'static str,
}

impl JsonTransport {
    pub(crate) fn new(service: &'static str, timeout_seconds: u64) -> Result<Self, RpcError> {
        if timeout_seconds == 0 {
            return Err(RpcError::Config(format!(
                "{service} timeout must be greater than 0"
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(concat!("nft-inventory/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            timeout_seconds,
            service,
        })
    }

    pub(crate) fn post<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> RequestBuilder {
        self.client
            .post(url)
            .header("accept", "application/json")
            .json(body)
    }

    pub(crate) fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url).header("accept", "application/json")
    }

    /// Send a request and decode a JSON body from a 200 response
    pub(crate) async fn send<R: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<R, RpcError> {
        let response = timeout(
            Duration::from_secs(self.timeout_seconds),
            request.send(),
        )
        .await
        .map_err(|_| RpcError::Timeout {
            seconds: self.timeout_seconds,
        })?
        .map_err(|error| {
            if error.is_timeout() {
                RpcError::Timeout {
                    seconds: self.timeout_seconds,
                }
            } else {
                RpcError::Http(error)
            }
        })?;

        let status = response.status();
        debug!(service = self.service, status = status.as_u16(), "received response");

        match status {
            StatusCode::OK => {
                let body = response.text().await?;
                Ok(serde_json::from_str(&body)?)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(RpcError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after_seconds = response
                    .headers()
                    .get("retry-after")
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.parse().ok())
                    .unwrap_or(DEFAULT_RETRY_AFTER_SECONDS);
                Err(RpcError::RateLimited {
                    retry_after_seconds,
                })
            }
            status => {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                warn!(
                    service = self.service,
                    status = status.as_u16(),
                    error = %error_text,
                    "upstream returned an error status"
                );
                Err(RpcError::Status {
                    status: status.as_u16(),
                    message: error_text,
                })
            }
        }
    }
}

/// Join a base URL and a path without doubling slashes
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_normalizes_slashes() {
        assert_eq!(join_url("http://a/", "/b/c"), "http://a/b/c");
        assert_eq!(join_url("http://a", "b"), "http://a/b");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = JsonTransport::new("indexer", 0);
        assert!(matches!(result, Err(RpcError::Config(_))));
    }

    #[test]
    fn rpc_errors_map_to_api_errors() {
        let error: ApiError = RpcError::RateLimited {
            retry_after_seconds: 7,
        }
        .into();
        assert!(matches!(
            error,
            ApiError::RateLimitExceeded {
                retry_after_seconds: 7
            }
        ));

        let error: ApiError = RpcError::Unauthorized.into();
        assert!(matches!(error, ApiError::Authentication { .. }));

        let error: ApiError = RpcError::Status {
            status: 500,
            message: "boom".to_string(),
        }
        .into();
        assert_eq!(error.to_string(), "HTTP request failed: 500: boom");
    }
}
