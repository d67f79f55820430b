// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trading card catalog proxy tests against a local fake TCGdex.

use axum::{
    extract::{Path, Query},
    http::{header, StatusCode},
    routing::get,
    Json, Router,
};
use personal_hub::config::Config;
use serde_json::{json, Value};
use std::collections::HashMap;
use tower::ServiceExt;

mod common;

const CATALOG_POLICY: &str = "public, s-maxage=3600, stale-while-revalidate=86400";

fn furret() -> Value {
    json!({
        "id": "swsh3-136",
        "localId": "136",
        "name": "Furret",
        "category": "Pokemon",
        "hp": 110,
        "types": ["Colorless"],
        "set": { "id": "swsh3", "name": "Darkness Ablaze", "cardCount": { "official": 189, "total": 201 } },
        "variants": { "normal": true, "holo": false }
    })
}

fn fake_tcgdex() -> Router {
    Router::new()
        .route(
            "/cards",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                // Echo the filters back in the card names so the test can see them
                let cards: Vec<Value> = (0..20)
                    .map(|i| {
                        json!({
                            "id": format!("card-{i}"),
                            "localId": i.to_string(),
                            "name": format!(
                                "{}|{}|{}|{}",
                                params.get("name").cloned().unwrap_or_default(),
                                params.get("types").cloned().unwrap_or_default(),
                                params.get("set.id").cloned().unwrap_or_default(),
                                params.get("pagination:page").cloned().unwrap_or_default(),
                            ),
                        })
                    })
                    .collect();
                Json(cards)
            }),
        )
        .route(
            "/cards/{id}",
            get(|Path(id): Path<String>| async move {
                match id.as_str() {
                    "swsh3-136" => (StatusCode::OK, Json(furret())),
                    "null-card" => (StatusCode::OK, Json(Value::Null)),
                    _ => (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))),
                }
            }),
        )
        .route(
            "/sets",
            get(|| async { Json(json!([{ "id": "base1", "name": "Base Set", "cardCount": { "total": 102, "official": 102 } }])) }),
        )
        .route(
            "/sets/{id}",
            get(|Path(id): Path<String>| async move {
                if id == "base1" {
                    (StatusCode::OK, Json(json!({ "id": "base1", "name": "Base Set", "releaseDate": "1999-01-09" })))
                } else {
                    (StatusCode::NOT_FOUND, Json(json!({})))
                }
            }),
        )
        .route(
            "/series",
            get(|| async {
                Json(json!([
                    { "id": "base", "name": "Base" },
                    { "id": "broken", "name": "Broken" },
                    { "id": "sv", "name": "Scarlet & Violet" }
                ]))
            }),
        )
        .route(
            "/series/{id}",
            get(|Path(id): Path<String>| async move {
                match id.as_str() {
                    "broken" => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "boom" }))),
                    "base" => (StatusCode::OK, Json(json!({
                        "id": "base", "name": "Base",
                        "sets": [{ "id": "base1", "name": "Base Set" }, { "id": "base2", "name": "Jungle" }]
                    }))),
                    _ => (StatusCode::OK, Json(json!({
                        "id": "sv", "name": "Scarlet & Violet",
                        "releaseDate": "2023-03-31",
                        "sets": [{ "id": "sv01", "name": "Scarlet & Violet" }]
                    }))),
                }
            }),
        )
}

async fn app_with_tcgdex() -> (Router, String) {
    let mut config = Config::test_default();
    config.tcgdex_base_url = common::spawn_upstream(fake_tcgdex()).await;
    let (app, state) = common::create_test_app_with(config);
    let cookie = common::session_cookie(&state, Some("Collector"), None);
    (app, cookie)
}

#[tokio::test]
async fn test_unknown_card_returns_404() {
    let (app, cookie) = app_with_tcgdex().await;

    let response = app
        .oneshot(common::get("/api/tcg/cards/unknown-id", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(common::body_json(response).await, json!({ "error": "Not found" }));
}

#[tokio::test]
async fn test_null_card_returns_404() {
    let (app, cookie) = app_with_tcgdex().await;

    let response = app
        .oneshot(common::get("/api/tcg/cards/null-card", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(common::body_json(response).await, json!({ "error": "Not found" }));
}

#[tokio::test]
async fn test_card_detail_keeps_upstream_fields_and_is_uncached() {
    let (app, cookie) = app_with_tcgdex().await;

    let response = app
        .oneshot(common::get("/api/tcg/cards/swsh3-136", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::CACHE_CONTROL).is_none());
    assert_eq!(common::body_json(response).await, furret());
}

#[tokio::test]
async fn test_card_list_forwards_filters_and_paginates() {
    let (app, cookie) = app_with_tcgdex().await;

    let response = app
        .oneshot(common::get(
            "/api/tcg/cards?q=pika&type=Lightning&setId=base1&page=2",
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        CATALOG_POLICY
    );

    let body = common::body_json(response).await;
    assert_eq!(body["page"], 2);
    assert_eq!(body["per_page"], 20);
    assert_eq!(body["has_more"], true);
    assert_eq!(body["cards"].as_array().unwrap().len(), 20);
    assert_eq!(body["cards"][0]["name"], "like:pika|Lightning|eq:base1|2");
}

#[tokio::test]
async fn test_card_list_rejects_zero_page() {
    let (app, cookie) = app_with_tcgdex().await;

    let response = app
        .oneshot(common::get("/api/tcg/cards?page=0", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_series_drops_failed_details() {
    let (app, cookie) = app_with_tcgdex().await;

    let response = app
        .oneshot(common::get("/api/tcg/series", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        CATALOG_POLICY
    );

    let body = common::body_json(response).await;
    let series = body.as_array().unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series[0]["id"], "base");
    assert_eq!(series[0]["sets"].as_array().unwrap().len(), 2);
    assert_eq!(series[1]["id"], "sv");
    assert_eq!(series[1]["releaseDate"], "2023-03-31");
}

#[tokio::test]
async fn test_sets_list_and_lookup() {
    let (app, cookie) = app_with_tcgdex().await;

    let response = app
        .clone()
        .oneshot(common::get("/api/tcg/sets", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        CATALOG_POLICY
    );
    assert_eq!(common::body_json(response).await[0]["cardCount"]["total"], 102);

    let response = app
        .clone()
        .oneshot(common::get("/api/tcg/sets/base1", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await["releaseDate"], "1999-01-09");

    let response = app
        .oneshot(common::get("/api/tcg/sets/nope", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_catalog_unreachable_returns_502() {
    let (app, state) = common::create_test_app();
    let cookie = common::session_cookie(&state, None, None);

    let response = app
        .oneshot(common::get("/api/tcg/series", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        common::body_json(response).await,
        json!({ "error": "TCG API unavailable" })
    );
}
