// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::{to_bytes, Body};
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use personal_hub::config::Config;
use personal_hub::routes::create_router;
use personal_hub::services::identity::UserProfile;
use personal_hub::AppState;
use std::sync::Arc;

/// Create a test app with offline upstreams.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    create_test_app_with(Config::test_default())
}

/// Create a test app from a customized config.
#[allow(dead_code)]
pub fn create_test_app_with(config: Config) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config).expect("Failed to build app state"));
    (create_router(state.clone()), state)
}

/// Serve a fake upstream on an ephemeral local port; returns its base URL.
#[allow(dead_code)]
pub async fn spawn_upstream(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake upstream");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// `Cookie` header value for a freshly issued session.
#[allow(dead_code)]
pub fn session_cookie(state: &AppState, name: Option<&str>, email: Option<&str>) -> String {
    let profile = UserProfile {
        sub: "auth0|test-user".to_string(),
        name: name.map(str::to_string),
        email: email.map(str::to_string),
    };
    let cookie = state
        .identity
        .issue_session(&profile)
        .expect("Failed to issue session");
    format!("{}={}", cookie.name(), cookie.value())
}

/// GET a path, optionally with a session cookie.
#[allow(dead_code)]
pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}

/// Read a response body as text.
#[allow(dead_code)]
pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
