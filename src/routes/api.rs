// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session read-out and the GraphQL pass-through.

use crate::error::{AppError, Result};
use crate::middleware::CurrentSession;
use crate::models::Session;
use crate::services::graphql::GRAPHQL_UNAVAILABLE;
use crate::services::upstream::{error_message, UpstreamError};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use std::sync::Arc;

/// Largest GraphQL request body forwarded upstream.
const MAX_GRAPHQL_BODY: usize = 64 * 1024;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/graphql", post(graphql))
}

// ─── Session ─────────────────────────────────────────────────

/// Current user, or `{"name":null,"email":null}` when logged out.
async fn get_me(Extension(session): Extension<CurrentSession>) -> Json<Session> {
    Json(session.0.unwrap_or_default())
}

// ─── GraphQL ─────────────────────────────────────────────────

/// Forward a GraphQL request; the upstream status is mirrored.
async fn graphql(State(state): State<Arc<AppState>>, body: Bytes) -> Result<Response> {
    if body.len() > MAX_GRAPHQL_BODY {
        return Err(AppError::PayloadTooLarge);
    }
    if serde_json::from_slice::<serde_json::Value>(&body).is_err() {
        return Err(AppError::BadRequest("Request body must be JSON".to_string()));
    }

    let reply = state
        .graphql
        .forward(body)
        .await
        .map_err(|e| e.into_app_error(GRAPHQL_UNAVAILABLE))?;

    match serde_json::from_slice::<serde_json::Value>(&reply.body) {
        Ok(json) => Ok((reply.status, Json(json)).into_response()),
        Err(e) if reply.status.is_success() => {
            Err(UpstreamError::Malformed(e.to_string()).into_app_error(GRAPHQL_UNAVAILABLE))
        }
        Err(_) => Err(AppError::Upstream {
            status: reply.status,
            message: error_message(reply.status, &String::from_utf8_lossy(&reply.body)),
        }),
    }
}
