// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! NBA statistics records and the stat-table sorting helper.

use super::UpstreamId;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Projection used for players without recorded stats, so they group together.
pub const NO_STATS_SENTINEL: f64 = -1.0;

/// A team as listed by the stats backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: UpstreamId,
    #[serde(alias = "full_name")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A roster entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: UpstreamId,
    #[serde(alias = "full_name")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Season averages for one player.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerStats {
    #[serde(default, alias = "gp", deserialize_with = "zero_if_null")]
    pub games_played: f64,
    #[serde(default, alias = "pts", deserialize_with = "zero_if_null")]
    pub points: f64,
    #[serde(default, alias = "reb", deserialize_with = "zero_if_null")]
    pub rebounds: f64,
    #[serde(default, alias = "ast", deserialize_with = "zero_if_null")]
    pub assists: f64,
    #[serde(default, alias = "stl", deserialize_with = "zero_if_null")]
    pub steals: f64,
    #[serde(default, alias = "blk", deserialize_with = "zero_if_null")]
    pub blocks: f64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Stat columns the backend leaves unrecorded come back as `null`; count them as zero.
fn zero_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

/// A roster entry joined with its stats lookup, if one succeeded.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerRow {
    #[serde(flatten)]
    pub player: Player,
    pub stats: Option<PlayerStats>,
}

/// Columns the stat table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    #[serde(alias = "pos")]
    Position,
    #[serde(alias = "gp")]
    GamesPlayed,
    #[default]
    #[serde(alias = "pts")]
    Points,
    #[serde(alias = "reb")]
    Rebounds,
    #[serde(alias = "ast")]
    Assists,
    #[serde(alias = "stl")]
    Steals,
    #[serde(alias = "blk")]
    Blocks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Comparable projection of a row for one sort key.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Text(String),
    Number(f64),
}

impl SortValue {
    /// Total order: text compares lexically, numbers by `f64::total_cmp`.
    pub fn compare(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
            (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
        }
    }
}

impl PlayerRow {
    /// Project this row onto a sort key.
    ///
    /// Name and position compare case-insensitively. Numeric keys use the
    /// stat value, or [`NO_STATS_SENTINEL`] when the player has no stats.
    pub fn sort_value(&self, key: SortKey) -> SortValue {
        let stat = |pick: fn(&PlayerStats) -> f64| {
            SortValue::Number(self.stats.as_ref().map(pick).unwrap_or(NO_STATS_SENTINEL))
        };

        match key {
            SortKey::Name => SortValue::Text(self.player.name.to_lowercase()),
            SortKey::Position => SortValue::Text(
                self.player
                    .position
                    .as_deref()
                    .unwrap_or_default()
                    .to_lowercase(),
            ),
            SortKey::GamesPlayed => stat(|s| s.games_played),
            SortKey::Points => stat(|s| s.points),
            SortKey::Rebounds => stat(|s| s.rebounds),
            SortKey::Assists => stat(|s| s.assists),
            SortKey::Steals => stat(|s| s.steals),
            SortKey::Blocks => stat(|s| s.blocks),
        }
    }
}

/// Stable sort of table rows by one column.
pub fn sort_rows(rows: &mut [PlayerRow], key: SortKey, order: SortOrder) {
    rows.sort_by(|a, b| {
        let ord = a.sort_value(key).compare(&b.sort_value(key));
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}
