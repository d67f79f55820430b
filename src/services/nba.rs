// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client for the separately deployed NBA statistics backend.

use crate::models::{Player, PlayerRow, PlayerStats, Team};
use crate::services::upstream::{self, UpstreamError};
use futures_util::future::join_all;
use serde::de::DeserializeOwned;

/// Message returned when the backend cannot be reached.
pub const BACKEND_UNAVAILABLE: &str = "Backend unavailable";

/// NBA statistics backend client.
#[derive(Clone)]
pub struct NbaClient {
    http: reqwest::Client,
    base_url: String,
}

impl NbaClient {
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// All teams.
    pub async fn teams(&self) -> Result<Vec<Team>, UpstreamError> {
        self.get("/teams").await
    }

    /// Roster for a team, exactly as the backend returns it.
    pub async fn roster_json(&self, team_id: &str) -> Result<serde_json::Value, UpstreamError> {
        self.get(&format!("/players/{}", urlencoding::encode(team_id)))
            .await
    }

    /// Roster for a team, typed.
    pub async fn roster(&self, team_id: &str) -> Result<Vec<Player>, UpstreamError> {
        self.get(&format!("/players/{}", urlencoding::encode(team_id)))
            .await
    }

    /// Season stats for one player, exactly as the backend returns them.
    pub async fn stats_json(&self, player_id: &str) -> Result<serde_json::Value, UpstreamError> {
        self.get(&format!("/stats/{}", urlencoding::encode(player_id)))
            .await
    }

    /// Season stats for one player. `None` when the backend has none (404 or null).
    pub async fn stats(&self, player_id: &str) -> Result<Option<PlayerStats>, UpstreamError> {
        match self
            .get::<Option<PlayerStats>>(&format!("/stats/{}", urlencoding::encode(player_id)))
            .await
        {
            Err(UpstreamError::Status { status, .. }) if status == reqwest::StatusCode::NOT_FOUND => {
                Ok(None)
            }
            other => other,
        }
    }

    /// Join a roster with each player's stats, looked up concurrently.
    ///
    /// A failed stats lookup leaves that row without stats rather than
    /// failing the table.
    pub async fn player_rows(&self, team_id: &str) -> Result<Vec<PlayerRow>, UpstreamError> {
        let roster = self.roster(team_id).await?;

        let ids: Vec<String> = roster.iter().map(|p| p.id.to_string()).collect();
        let results = join_all(ids.iter().map(|id| self.stats(id))).await;

        Ok(roster
            .into_iter()
            .zip(results)
            .map(|(player, stats)| {
                let stats = stats.unwrap_or_else(|e| {
                    tracing::warn!(player_id = %player.id, error = %e, "Stats lookup failed");
                    None
                });
                PlayerRow { player, stats }
            })
            .collect())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        upstream::fetch_json(self.http.get(&url)).await
    }
}
