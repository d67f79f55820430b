// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Personal Hub: one gateway in front of a handful of data sources.
//!
//! Proxies a Pokémon GraphQL API, an ESPN fantasy basketball league, an NBA
//! statistics backend, and a trading card catalog behind public and
//! session-gated routes. Sessions come from an external identity provider.

pub mod cache_control;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::{upstream, EspnClient, GraphqlClient, IdentityClient, NbaClient, TcgClient};

/// Shared application state. Built once at startup and handed to every handler.
pub struct AppState {
    pub config: Config,
    pub identity: IdentityClient,
    pub nba: NbaClient,
    pub espn: EspnClient,
    pub tcg: TcgClient,
    pub graphql: GraphqlClient,
}

impl AppState {
    /// Construct every client from configuration, sharing one HTTP connection pool.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http = upstream::build_http_client()?;

        Ok(Self {
            identity: IdentityClient::new(&config, http.clone()),
            nba: NbaClient::new(http.clone(), config.nba_backend_url.clone()),
            espn: EspnClient::new(&config, http.clone())?,
            tcg: TcgClient::new(http.clone(), config.tcgdex_base_url.clone()),
            graphql: GraphqlClient::new(http, config.pokeapi_graphql_url.clone()),
            config,
        })
    }
}
