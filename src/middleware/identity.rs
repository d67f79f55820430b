// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity layer: decodes the session once per request and keeps it rolling.

use crate::models::Session;
use crate::services::identity::SESSION_COOKIE;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Session of the current request, inserted into request extensions.
#[derive(Debug, Clone, Default)]
pub struct CurrentSession(pub Option<Session>);

/// Decode the session cookie into [`CurrentSession`] and, on the way out,
/// re-issue the cookie when a rolling refresh is due.
///
/// Responses that already set the session cookie (login, logout) are left alone.
pub async fn identity_layer(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let claims = state.identity.session_claims(request.headers());
    request
        .extensions_mut()
        .insert(CurrentSession(claims.as_ref().map(Session::from)));

    let mut response = next.run(request).await;

    let Some(claims) = claims else {
        return response;
    };

    if sets_session_cookie(&response) {
        return response;
    }

    if let Some(cookie) = state.identity.refresh_session(&claims) {
        match HeaderValue::from_str(&cookie.to_string()) {
            Ok(value) => {
                tracing::debug!(sub = %claims.sub, "Rolling session refresh");
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::warn!(error = %e, "Refreshed session cookie is not a valid header"),
        }
    }

    response
}

fn sets_session_cookie(response: &Response) -> bool {
    let prefix = format!("{SESSION_COOKIE}=");
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with(&prefix))
}
