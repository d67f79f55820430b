// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trading card catalog routes.

use super::require_id;
use crate::cache_control::{cached, CATALOG};
use crate::error::{AppError, Result};
use crate::models::{Card, CardBrief, Set};
use crate::services::tcg::{CardFilter, CARDS_PER_PAGE, TCG_UNAVAILABLE};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    response::Response,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Longest free-text search accepted.
const MAX_QUERY_LEN: usize = 100;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/tcg/cards", get(list_cards))
        .route("/api/tcg/cards/{card_id}", get(get_card))
        .route("/api/tcg/sets", get(list_sets))
        .route("/api/tcg/sets/{set_id}", get(get_set))
        .route("/api/tcg/series", get(list_series))
}

// ─── Cards ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct CardsQuery {
    /// Free-text name search
    q: Option<String>,
    /// Energy type filter
    #[serde(rename = "type")]
    card_type: Option<String>,
    #[serde(rename = "setId")]
    set_id: Option<String>,
    /// 1-indexed page number
    page: Option<String>,
}

#[derive(Serialize)]
pub struct CardsResponse {
    pub cards: Vec<CardBrief>,
    pub page: u32,
    pub per_page: u32,
    pub has_more: bool,
}

fn parse_page(raw: Option<&str>) -> Result<u32> {
    match raw.map(str::trim).filter(|p| !p.is_empty()) {
        None => Ok(1),
        Some(p) => p
            .parse::<u32>()
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| AppError::BadRequest("Page must be a positive integer".to_string())),
    }
}

/// One page of cards, cached an hour with a day of background revalidation.
async fn list_cards(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CardsQuery>,
) -> Result<Response> {
    let page = parse_page(params.page.as_deref())?;

    if params.q.as_deref().is_some_and(|q| q.len() > MAX_QUERY_LEN) {
        return Err(AppError::BadRequest("Search text too long".to_string()));
    }
    if let Some(set_id) = params.set_id.as_deref().filter(|s| !s.is_empty()) {
        require_id("set id", set_id)?;
    }

    let filter = CardFilter {
        name: params.q,
        card_type: params.card_type,
        set_id: params.set_id,
    };

    tracing::debug!(?filter, page, "Listing cards");

    let cards = state
        .tcg
        .cards(&filter, page)
        .await
        .map_err(|e| e.into_app_error(TCG_UNAVAILABLE))?;

    let has_more = cards.len() as u32 >= CARDS_PER_PAGE;
    Ok(cached(
        CATALOG,
        Json(CardsResponse {
            cards,
            page,
            per_page: CARDS_PER_PAGE,
            has_more,
        }),
    ))
}

/// Single card or 404.
async fn get_card(
    State(state): State<Arc<AppState>>,
    Path(card_id): Path<String>,
) -> Result<Json<Card>> {
    let card_id = require_id("card id", &card_id)?;
    state
        .tcg
        .card(card_id)
        .await
        .map_err(|e| e.into_lookup_error(TCG_UNAVAILABLE))?
        .map(Json)
        .ok_or(AppError::NotFound)
}

// ─── Sets & series ───────────────────────────────────────────

async fn list_sets(State(state): State<Arc<AppState>>) -> Result<Response> {
    let sets = state
        .tcg
        .sets()
        .await
        .map_err(|e| e.into_app_error(TCG_UNAVAILABLE))?;

    Ok(cached(CATALOG, Json(sets)))
}

/// Single set or 404.
async fn get_set(
    State(state): State<Arc<AppState>>,
    Path(set_id): Path<String>,
) -> Result<Json<Set>> {
    let set_id = require_id("set id", &set_id)?;
    state
        .tcg
        .set(set_id)
        .await
        .map_err(|e| e.into_lookup_error(TCG_UNAVAILABLE))?
        .map(Json)
        .ok_or(AppError::NotFound)
}

/// Every series with its sets. Series whose detail fetch fails are omitted.
async fn list_series(State(state): State<Arc<AppState>>) -> Result<Response> {
    let series = state
        .tcg
        .series_with_sets()
        .await
        .map_err(|e| e.into_app_error(TCG_UNAVAILABLE))?;

    Ok(cached(CATALOG, Json(series)))
}
