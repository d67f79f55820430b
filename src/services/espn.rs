// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! ESPN fantasy basketball league client.
//!
//! Private leagues need the `SWID` and `espn_s2` cookies of a league member;
//! public leagues work without them.

use crate::config::Config;
use crate::services::upstream::{self, UpstreamError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE};

/// Message returned when ESPN cannot be reached.
pub const ESPN_UNAVAILABLE: &str = "ESPN unavailable";

/// League views requested on every fetch.
const LEAGUE_VIEWS: [&str; 3] = ["mTeam", "mRoster", "mSettings"];

#[derive(Clone)]
pub struct EspnClient {
    http: reqwest::Client,
    base_url: String,
    league_id: Option<u32>,
    headers: HeaderMap,
}

impl EspnClient {
    pub fn new(config: &Config, http: reqwest::Client) -> anyhow::Result<Self> {
        Ok(Self {
            http,
            base_url: config.espn_base_url.clone(),
            league_id: config.espn_league_id,
            headers: league_headers(config.espn_swid.as_deref(), config.espn_s2.as_deref())?,
        })
    }

    /// Whether a league is configured at all.
    pub fn league_id(&self) -> Option<u32> {
        self.league_id
    }

    /// League document for a season, as ESPN returns it.
    pub async fn league(
        &self,
        league_id: u32,
        season: u16,
    ) -> Result<serde_json::Value, UpstreamError> {
        let url = format!(
            "{}/seasons/{}/segments/0/leagues/{}",
            self.base_url, season, league_id
        );
        let views: Vec<(&str, &str)> = LEAGUE_VIEWS.iter().map(|v| ("view", *v)).collect();

        let request = self
            .http
            .get(&url)
            .headers(self.headers.clone())
            .query(&views);

        upstream::fetch_json(request).await
    }
}

/// Accept header plus league cookies when both `SWID` and `espn_s2` are set.
fn league_headers(swid: Option<&str>, s2: Option<&str>) -> anyhow::Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    if let (Some(swid), Some(s2)) = (swid, s2) {
        let cookie = format!("SWID={}; espn_s2={}", swid, s2);
        headers.insert(COOKIE, HeaderValue::from_str(&cookie)?);
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_league_headers_with_cookies() {
        let headers = league_headers(Some("{ABC}"), Some("s2value")).unwrap();
        assert_eq!(headers.get(COOKIE).unwrap(), "SWID={ABC}; espn_s2=s2value");
        assert!(headers.contains_key(ACCEPT));
    }

    #[test]
    fn test_league_headers_partial_cookies_are_ignored() {
        let headers = league_headers(Some("{ABC}"), None).unwrap();
        assert!(!headers.contains_key(COOKIE));
    }
}
