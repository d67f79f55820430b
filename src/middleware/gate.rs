// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session gate: decides public vs. session-required access per request.
//!
//! The decision itself is [`decide`], a pure function of method, path, and
//! whether a session is present. [`session_gate`] wires it into the router
//! and must run after the identity layer has decoded the session.

use crate::config::LOGIN_PATH;
use crate::middleware::identity::CurrentSession;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

/// Prefix owned by the identity provider (login, logout, callback).
const AUTH_PREFIX: &str = "/auth";

/// Session read-out and liveness probe; public whatever `PUBLIC_PATHS` says.
const ALWAYS_PUBLIC: [&str; 2] = ["/api/me", "/health"];

/// Path prefixes that never reach the gate.
const STATIC_PREFIXES: [&str; 4] = ["/_next/static/", "/_next/image", "/static/", "/assets/"];

/// Exact paths that never reach the gate.
const BYPASS_PATHS: [&str; 3] = ["/favicon.ico", "/sitemap.xml", "/robots.txt"];

/// Outcome of the gate for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Public path; the session was not consulted.
    PublicPassthrough,
    /// Protected path with a session.
    AuthenticatedPassthrough,
    /// Protected path without a session.
    RedirectToLogin,
}

/// Whether the gate runs for this path at all. Static assets, the favicon,
/// and SEO files are excluded.
pub fn gate_applies(path: &str) -> bool {
    !(BYPASS_PATHS.contains(&path) || STATIC_PREFIXES.iter().any(|p| path.starts_with(p)))
}

/// `/`, anything under `/auth`, `/api/me`, `/health`, or an allow-listed path.
pub fn is_public(path: &str, allow_list: &[String]) -> bool {
    if path == "/" || ALWAYS_PUBLIC.contains(&path.trim_end_matches('/')) {
        return true;
    }

    if path == AUTH_PREFIX
        || path
            .strip_prefix(AUTH_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'))
    {
        return true;
    }

    let trimmed = path.trim_end_matches('/');
    allow_list
        .iter()
        .any(|p| p == path || p.trim_end_matches('/') == trimmed)
}

/// Decide the fate of a request.
///
/// CORS preflight (`OPTIONS`) is always public so browsers can ask before
/// they have a session cookie.
pub fn decide(method: &Method, path: &str, has_session: bool, allow_list: &[String]) -> GateDecision {
    if method == Method::OPTIONS || is_public(path, allow_list) {
        return GateDecision::PublicPassthrough;
    }

    if has_session {
        GateDecision::AuthenticatedPassthrough
    } else {
        GateDecision::RedirectToLogin
    }
}

/// Middleware applying [`decide`]. Redirects carry no query state.
pub async fn session_gate(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    if !gate_applies(&path) {
        return next.run(request).await;
    }

    let has_session = request
        .extensions()
        .get::<CurrentSession>()
        .is_some_and(|s| s.0.is_some());

    let decision = decide(
        request.method(),
        &path,
        has_session,
        &state.config.public_paths,
    );

    match decision {
        GateDecision::PublicPassthrough | GateDecision::AuthenticatedPassthrough => {
            next.run(request).await
        }
        GateDecision::RedirectToLogin => {
            tracing::debug!(path = %path, "No session, redirecting to login");
            Redirect::temporary(LOGIN_PATH).into_response()
        }
    }
}
