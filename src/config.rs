// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup and handed to the services that
//! need it; nothing re-reads the environment per request.

use std::env;

/// Default NBA statistics backend for local development.
pub const DEFAULT_NBA_BACKEND_URL: &str = "http://localhost:8000";
/// Public PokeAPI GraphQL endpoint.
pub const DEFAULT_POKEAPI_GRAPHQL_URL: &str = "https://beta.pokeapi.co/graphql/v1beta";
/// TCGdex REST API (English catalog).
pub const DEFAULT_TCGDEX_BASE_URL: &str = "https://api.tcgdex.net/v2/en";
/// ESPN fantasy basketball API root.
pub const DEFAULT_ESPN_BASE_URL: &str = "https://lm-api-reads.fantasy.espn.com/apis/v3/games/fba";

/// Where the gate sends unauthenticated visitors.
pub const LOGIN_PATH: &str = "/auth/login";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Service ---
    /// Server port
    pub port: u16,
    /// Externally visible base URL, used to build the OAuth callback URL
    pub app_base_url: String,
    /// Separate frontend origin allowed by CORS
    pub frontend_url: String,
    /// Extra paths reachable without a session (exact match)
    pub public_paths: Vec<String>,

    // --- Upstreams ---
    /// NBA statistics backend base URL
    pub nba_backend_url: String,
    /// GraphQL endpoint the `/api/graphql` proxy forwards to
    pub pokeapi_graphql_url: String,
    /// TCGdex API base URL
    pub tcgdex_base_url: String,
    /// ESPN fantasy basketball API base URL
    pub espn_base_url: String,
    /// ESPN fantasy league to mirror
    pub espn_league_id: Option<u32>,
    /// ESPN private league cookies (both required to be used)
    pub espn_swid: Option<String>,
    pub espn_s2: Option<String>,

    // --- Identity provider ---
    /// Tenant domain, e.g. `example.us.auth0.com`
    pub auth0_domain: String,
    pub auth0_client_id: String,
    pub auth0_client_secret: String,
    /// Optional API audience requested at login
    pub auth0_audience: Option<String>,
    /// Session cookie signing key (raw bytes)
    pub session_secret: Vec<u8>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            app_base_url: env::var("APP_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            public_paths: env::var("PUBLIC_PATHS")
                .map(|v| parse_path_list(&v))
                .unwrap_or_default(),

            nba_backend_url: env::var("NBA_BACKEND_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_NBA_BACKEND_URL.to_string()),
            pokeapi_graphql_url: env::var("POKEAPI_GRAPHQL_URL")
                .unwrap_or_else(|_| DEFAULT_POKEAPI_GRAPHQL_URL.to_string()),
            tcgdex_base_url: env::var("TCGDEX_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_TCGDEX_BASE_URL.to_string()),
            espn_base_url: env::var("ESPN_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_ESPN_BASE_URL.to_string()),
            espn_league_id: match env::var("ESPN_LEAGUE_ID") {
                Ok(raw) => Some(
                    raw.trim()
                        .parse()
                        .map_err(|_| ConfigError::Invalid("ESPN_LEAGUE_ID"))?,
                ),
                Err(_) => None,
            },
            espn_swid: env::var("ESPN_SWID").ok(),
            espn_s2: env::var("ESPN_S2").ok(),

            auth0_domain: env::var("AUTH0_DOMAIN")
                .map(|v| normalize_domain(&v))
                .map_err(|_| ConfigError::Missing("AUTH0_DOMAIN"))?,
            auth0_client_id: env::var("AUTH0_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("AUTH0_CLIENT_ID"))?,
            auth0_client_secret: env::var("AUTH0_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("AUTH0_CLIENT_SECRET"))?,
            auth0_audience: env::var("AUTH0_AUDIENCE").ok().filter(|v| !v.is_empty()),
            session_secret: env::var("AUTH0_SECRET")
                .map_err(|_| ConfigError::Missing("AUTH0_SECRET"))?
                .into_bytes(),
        })
    }

    /// Config for tests only. Upstreams point at unroutable local ports.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            app_base_url: "http://localhost:8080".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            public_paths: Vec::new(),
            nba_backend_url: "http://127.0.0.1:1".to_string(),
            pokeapi_graphql_url: "http://127.0.0.1:1/graphql".to_string(),
            tcgdex_base_url: "http://127.0.0.1:1".to_string(),
            espn_base_url: "http://127.0.0.1:1".to_string(),
            espn_league_id: Some(12345),
            espn_swid: None,
            espn_s2: None,
            auth0_domain: "example.auth0.test".to_string(),
            auth0_client_id: "test_client_id".to_string(),
            auth0_client_secret: "test_secret".to_string(),
            auth0_audience: None,
            session_secret: b"test_session_key_32_bytes_min!!!".to_vec(),
        }
    }
}

fn parse_path_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| p.starts_with('/'))
        .map(str::to_string)
        .collect()
}

/// Accept either a bare tenant domain or a full issuer URL.
fn normalize_domain(raw: &str) -> String {
    raw.trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/')
        .to_string()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
