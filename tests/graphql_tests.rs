// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GraphQL pass-through tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    routing::post,
    Json, Router,
};
use personal_hub::config::Config;
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

fn graphql_request(body: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/graphql")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn app_with_graphql(upstream: Router) -> (Router, String) {
    let mut config = Config::test_default();
    config.pokeapi_graphql_url = format!("{}/graphql", common::spawn_upstream(upstream).await);
    let (app, state) = common::create_test_app_with(config);
    let cookie = common::session_cookie(&state, None, None);
    (app, cookie)
}

#[tokio::test]
async fn test_graphql_forwards_body_and_returns_data() {
    let upstream = Router::new().route(
        "/graphql",
        post(|Json(body): Json<Value>| async move {
            Json(json!({ "data": { "echo": body["query"] } }))
        }),
    );
    let (app, cookie) = app_with_graphql(upstream).await;

    let response = app
        .oneshot(graphql_request(r#"{"query":"{ pokemon_v2_pokemon(limit: 1) { name } }"}"#, &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        common::body_json(response).await,
        json!({ "data": { "echo": "{ pokemon_v2_pokemon(limit: 1) { name } }" } })
    );
}

#[tokio::test]
async fn test_graphql_mirrors_upstream_status() {
    let upstream = Router::new().route(
        "/graphql",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "errors": [{ "message": "field 'nope' not found" }] })),
            )
        }),
    );
    let (app, cookie) = app_with_graphql(upstream).await;

    let response = app
        .oneshot(graphql_request(r#"{"query":"{ nope }"}"#, &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["errors"][0]["message"], "field 'nope' not found");
}

#[tokio::test]
async fn test_graphql_wraps_non_json_errors() {
    let upstream = Router::new().route(
        "/graphql",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
    );
    let (app, cookie) = app_with_graphql(upstream).await;

    let response = app
        .oneshot(graphql_request(r#"{"query":"{ a }"}"#, &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(common::body_json(response).await, json!({ "error": "maintenance" }));
}

#[tokio::test]
async fn test_graphql_rejects_non_json_body() {
    let (app, state) = common::create_test_app();
    let cookie = common::session_cookie(&state, None, None);

    let response = app
        .oneshot(graphql_request("query { a }", &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_graphql_rejects_oversized_body() {
    let (app, state) = common::create_test_app();
    let cookie = common::session_cookie(&state, None, None);
    let body = json!({ "query": "x".repeat(70 * 1024) }).to_string();

    let response = app
        .oneshot(graphql_request(&body, &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        common::body_json(response).await,
        json!({ "error": "Request body too large" })
    );
}

#[tokio::test]
async fn test_graphql_unreachable_returns_502() {
    let (app, state) = common::create_test_app();
    let cookie = common::session_cookie(&state, None, None);

    let response = app
        .oneshot(graphql_request(r#"{"query":"{ a }"}"#, &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        common::body_json(response).await,
        json!({ "error": "GraphQL upstream unavailable" })
    );
}
