// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pass-through client for the public Pokémon GraphQL API.

use crate::services::upstream::UpstreamError;
use axum::body::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;

/// Message returned when the GraphQL endpoint cannot be reached.
pub const GRAPHQL_UNAVAILABLE: &str = "GraphQL upstream unavailable";

#[derive(Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
}

/// Raw upstream answer: status plus body bytes, whatever the status.
#[derive(Debug)]
pub struct GraphqlReply {
    pub status: StatusCode,
    pub body: Bytes,
}

impl GraphqlClient {
    pub fn new(http: reqwest::Client, endpoint: String) -> Self {
        Self { http, endpoint }
    }

    /// Forward a GraphQL request body unchanged.
    ///
    /// Non-success statuses are not errors here; the route mirrors them.
    pub async fn forward(&self, body: Bytes) -> Result<GraphqlReply, UpstreamError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| UpstreamError::Unreachable(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Unreachable(e.to_string()))?;

        Ok(GraphqlReply { status, body })
    }
}
