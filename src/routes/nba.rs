// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Basketball routes: ESPN fantasy league and the NBA stats backend.

use super::require_id;
use crate::cache_control::{cached, ROSTER, TEAMS};
use crate::error::{AppError, Result};
use crate::models::nba::sort_rows;
use crate::models::{PlayerRow, SortKey, SortOrder};
use crate::services::espn::ESPN_UNAVAILABLE;
use crate::services::nba::BACKEND_UNAVAILABLE;
use crate::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::Response,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Seasons ESPN has fantasy basketball data for, give or take.
const SEASON_RANGE: std::ops::RangeInclusive<u16> = 2000..=2100;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/nba/league/{season}", get(get_league))
        .route("/api/nba/teams", get(get_teams))
        .route("/api/nba/players/{team_id}", get(get_players))
        .route("/api/nba/stats/{player_id}", get(get_stats))
        .route("/api/nba/table/{team_id}", get(get_table))
}

fn parse_season(raw: &str) -> Result<u16> {
    raw.parse::<u16>()
        .ok()
        .filter(|s| raw.len() == 4 && SEASON_RANGE.contains(s))
        .ok_or_else(|| AppError::BadRequest("Invalid season".to_string()))
}

/// Fantasy league document for a season.
async fn get_league(
    State(state): State<Arc<AppState>>,
    Path(season): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let season = parse_season(&season)?;
    let league_id = state
        .espn
        .league_id()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("ESPN_LEAGUE_ID is not configured")))?;

    tracing::debug!(season, league_id, "Fetching fantasy league");

    let league = state
        .espn
        .league(league_id, season)
        .await
        .map_err(|e| e.into_app_error(ESPN_UNAVAILABLE))?;

    Ok(Json(league))
}

/// All teams, cached for an hour.
async fn get_teams(State(state): State<Arc<AppState>>) -> Result<Response> {
    let teams = state
        .nba
        .teams()
        .await
        .map_err(|e| e.into_app_error(BACKEND_UNAVAILABLE))?;

    Ok(cached(TEAMS, Json(teams)))
}

/// Team roster, cached for five minutes.
async fn get_players(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<String>,
) -> Result<Response> {
    let team_id = require_id("team id", &team_id)?;
    let roster = state
        .nba
        .roster_json(team_id)
        .await
        .map_err(|e| e.into_app_error(BACKEND_UNAVAILABLE))?;

    Ok(cached(ROSTER, Json(roster)))
}

/// Player stats. Point lookup, never cached.
async fn get_stats(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let player_id = require_id("player id", &player_id)?;
    let stats = state
        .nba
        .stats_json(player_id)
        .await
        .map_err(|e| e.into_app_error(BACKEND_UNAVAILABLE))?;

    Ok(Json(stats))
}

#[derive(Deserialize)]
struct TableQuery {
    #[serde(default)]
    sort: SortKey,
    #[serde(default)]
    order: SortOrder,
}

#[derive(Serialize)]
pub struct TableResponse {
    pub rows: Vec<PlayerRow>,
}

/// Roster joined with stats, sorted by one column.
async fn get_table(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<String>,
    query: std::result::Result<Query<TableQuery>, QueryRejection>,
) -> Result<Json<TableResponse>> {
    let team_id = require_id("team id", &team_id)?;
    let Query(params) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let mut rows = state
        .nba
        .player_rows(team_id)
        .await
        .map_err(|e| e.into_app_error(BACKEND_UNAVAILABLE))?;

    sort_rows(&mut rows, params.sort, params.order);

    Ok(Json(TableResponse { rows }))
}
