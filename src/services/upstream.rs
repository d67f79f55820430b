// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared plumbing for calling third-party APIs.
//!
//! Every proxy route funnels its outbound call through here so that the
//! failure modes collapse into the same three cases:
//! - the upstream could not be reached,
//! - it answered with a non-success status,
//! - it answered 2xx with a body we could not parse.

use crate::error::AppError;
use anyhow::Context;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

const USER_AGENT: &str = concat!("personal-hub/", env!("CARGO_PKG_VERSION"));

/// Give up on an upstream that does not accept a connection in this long.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bound on how much of an upstream error body we echo back.
const MAX_ERROR_BODY: usize = 512;

/// Failure talking to an upstream service.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    #[error("upstream returned {status}")]
    Status { status: StatusCode, body: String },

    #[error("invalid upstream response: {0}")]
    Malformed(String),
}

impl UpstreamError {
    /// Map to the caller-facing error. `unavailable` is the message used when
    /// the upstream could not be reached at all.
    pub fn into_app_error(self, unavailable: &str) -> AppError {
        match self {
            UpstreamError::Unreachable(reason) => {
                tracing::warn!(reason = %reason, "Upstream unreachable");
                AppError::BadGateway(unavailable.to_string())
            }
            UpstreamError::Status { status, body } => AppError::Upstream {
                status,
                message: error_message(status, &body),
            },
            UpstreamError::Malformed(reason) => {
                tracing::warn!(reason = %reason, "Upstream sent malformed JSON");
                AppError::BadGateway("Invalid upstream response".to_string())
            }
        }
    }

    /// Like [`into_app_error`](Self::into_app_error), but an upstream 404 on a
    /// single-entity lookup becomes a plain `Not found`.
    pub fn into_lookup_error(self, unavailable: &str) -> AppError {
        match self {
            UpstreamError::Status { status, .. } if status == StatusCode::NOT_FOUND => {
                AppError::NotFound
            }
            other => other.into_app_error(unavailable),
        }
    }
}

/// Build the shared outbound HTTP client.
pub fn build_http_client() -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .context("failed building upstream HTTP client")
}

/// Send a request, mapping transport failures and non-2xx statuses.
pub async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response, UpstreamError> {
    let response = request
        .send()
        .await
        .map_err(|e| UpstreamError::Unreachable(e.to_string()))?;

    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(UpstreamError::Status { status, body })
}

/// Parse a successful response body as JSON.
pub async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, UpstreamError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| UpstreamError::Unreachable(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Malformed(e.to_string()))
}

/// Send a request and parse the JSON body.
pub async fn fetch_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, UpstreamError> {
    read_json(send(request).await?).await
}

/// Pick a human-readable message out of an upstream error body.
///
/// JSON bodies with an `error`/`message`/`detail` string use that field;
/// other non-empty bodies are echoed (truncated); empty bodies fall back to
/// the status reason.
pub fn error_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();

    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(body) {
        for key in ["error", "message", "detail"] {
            if let Some(serde_json::Value::String(msg)) = map.get(key) {
                return msg.clone();
            }
        }
    }

    if body.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Upstream error")
            .to_string();
    }

    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => body[..cut].to_string(),
        None => body.to_string(),
    }
}
