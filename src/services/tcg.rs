// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! TCGdex trading card catalog client.

use crate::models::{Card, CardBrief, Series, SeriesBrief, Set, SetBrief};
use crate::services::upstream::{self, UpstreamError};
use futures_util::future::join_all;
use serde::de::DeserializeOwned;

/// Message returned when the catalog cannot be reached.
pub const TCG_UNAVAILABLE: &str = "TCG API unavailable";

/// Cards per page on list endpoints.
pub const CARDS_PER_PAGE: u32 = 20;

/// Card list filters. Empty strings are treated as absent.
#[derive(Debug, Clone, Default)]
pub struct CardFilter {
    pub name: Option<String>,
    pub card_type: Option<String>,
    pub set_id: Option<String>,
}

#[derive(Clone)]
pub struct TcgClient {
    http: reqwest::Client,
    base_url: String,
}

impl TcgClient {
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// One page of cards matching the filter.
    pub async fn cards(
        &self,
        filter: &CardFilter,
        page: u32,
    ) -> Result<Vec<CardBrief>, UpstreamError> {
        let mut query: Vec<(&str, String)> = vec![
            ("pagination:page", page.to_string()),
            ("pagination:itemsPerPage", CARDS_PER_PAGE.to_string()),
        ];
        if let Some(name) = non_empty(&filter.name) {
            query.push(("name", format!("like:{}", name)));
        }
        if let Some(card_type) = non_empty(&filter.card_type) {
            query.push(("types", card_type.to_string()));
        }
        if let Some(set_id) = non_empty(&filter.set_id) {
            query.push(("set.id", format!("eq:{}", set_id)));
        }

        let url = format!("{}/cards", self.base_url);
        upstream::fetch_json(self.http.get(&url).query(&query)).await
    }

    /// Single card; `None` when the catalog has no such card.
    pub async fn card(&self, card_id: &str) -> Result<Option<Card>, UpstreamError> {
        self.lookup(&format!("/cards/{}", urlencoding::encode(card_id)))
            .await
    }

    pub async fn sets(&self) -> Result<Vec<SetBrief>, UpstreamError> {
        self.get("/sets").await
    }

    /// Single set; `None` when the catalog has no such set.
    pub async fn set(&self, set_id: &str) -> Result<Option<Set>, UpstreamError> {
        self.lookup(&format!("/sets/{}", urlencoding::encode(set_id)))
            .await
    }

    pub async fn series_list(&self) -> Result<Vec<SeriesBrief>, UpstreamError> {
        self.get("/series").await
    }

    pub async fn series(&self, series_id: &str) -> Result<Series, UpstreamError> {
        self.get(&format!("/series/{}", urlencoding::encode(series_id)))
            .await
    }

    /// Every series with its sets.
    ///
    /// Details are fetched concurrently. A series whose detail fetch fails is
    /// left out of the result; only the initial list fetch can fail the call.
    pub async fn series_with_sets(&self) -> Result<Vec<Series>, UpstreamError> {
        let list = self.series_list().await?;
        let details = join_all(list.iter().map(|s| self.series(&s.id))).await;

        let total = list.len();
        let series: Vec<Series> = list
            .iter()
            .zip(details)
            .filter_map(|(brief, detail)| match detail {
                Ok(series) => Some(series),
                Err(e) => {
                    tracing::warn!(series_id = %brief.id, error = %e, "Dropping series with failed detail fetch");
                    None
                }
            })
            .collect();

        if series.len() < total {
            tracing::warn!(
                requested = total,
                returned = series.len(),
                "Series listing is partial"
            );
        }

        Ok(series)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        upstream::fetch_json(self.http.get(&url)).await
    }

    /// Point lookup: upstream 404 and a `null` body both mean "no such entity".
    async fn lookup<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, UpstreamError> {
        match self.get::<Option<T>>(path).await {
            Err(UpstreamError::Status { status, .. }) if status == reqwest::StatusCode::NOT_FOUND => {
                Ok(None)
            }
            other => other,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
