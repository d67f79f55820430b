// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity provider client (Auth0-compatible OIDC) and session accessor.
//!
//! The provider owns login, logout, and the authorization code exchange.
//! Once a user is back from the provider we keep a signed `appSession`
//! cookie carrying their display name and email; every other part of the
//! service only ever *reads* that cookie through [`IdentityClient::session`].

use crate::config::Config;
use crate::models::Session;
use crate::services::upstream::{self, UpstreamError};
use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Session cookie name.
pub const SESSION_COOKIE: &str = "appSession";

/// Sessions live a day and roll forward while in use.
pub const SESSION_LIFETIME_SECS: i64 = 24 * 60 * 60;

/// Claims stored in the session cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Provider subject identifier
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl From<&SessionClaims> for Session {
    fn from(claims: &SessionClaims) -> Self {
        Session {
            name: claims.name.clone(),
            email: claims.email.clone(),
        }
    }
}

impl SessionClaims {
    /// Rolling refresh is due once less than half the lifetime remains.
    pub fn needs_refresh(&self, now: i64) -> bool {
        self.exp - now < SESSION_LIFETIME_SECS / 2
    }
}

/// Profile returned by the provider's `/userinfo` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Token endpoint response (only what we use).
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub id_token: Option<String>,
}

/// Identity provider client. Constructed once at startup and shared via `AppState`.
pub struct IdentityClient {
    http: reqwest::Client,
    domain: String,
    client_id: String,
    client_secret: String,
    audience: Option<String>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    secure_cookies: bool,
}

impl IdentityClient {
    pub fn new(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            domain: config.auth0_domain.clone(),
            client_id: config.auth0_client_id.clone(),
            client_secret: config.auth0_client_secret.clone(),
            audience: config.auth0_audience.clone(),
            encoding_key: EncodingKey::from_secret(&config.session_secret),
            decoding_key: DecodingKey::from_secret(&config.session_secret),
            secure_cookies: config.app_base_url.starts_with("https://"),
        }
    }

    fn provider_url(&self, path: &str) -> String {
        format!("https://{}{}", self.domain, path)
    }

    // ─── Session cookie ──────────────────────────────────────────

    /// Read the current session from request cookies. Never creates one.
    pub fn session(&self, headers: &HeaderMap) -> Option<Session> {
        self.session_claims(headers).as_ref().map(Session::from)
    }

    /// Decoded claims of a valid, unexpired session cookie.
    pub fn session_claims(&self, headers: &HeaderMap) -> Option<SessionClaims> {
        let jar = CookieJar::from_headers(headers);
        let token = jar.get(SESSION_COOKIE)?.value().to_string();
        self.decode_session(&token)
    }

    fn decode_session(&self, token: &str) -> Option<SessionClaims> {
        let validation = Validation::new(Algorithm::HS256);
        match decode::<SessionClaims>(token, &self.decoding_key, &validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid session cookie");
                None
            }
        }
    }

    /// Mint a fresh session cookie for a provider profile.
    pub fn issue_session(&self, profile: &UserProfile) -> anyhow::Result<Cookie<'static>> {
        let now = chrono::Utc::now().timestamp();
        let claims = SessionClaims {
            sub: profile.sub.clone(),
            name: profile.name.clone(),
            email: profile.email.clone(),
            iat: now,
            exp: now + SESSION_LIFETIME_SECS,
        };
        self.session_cookie(&claims)
    }

    /// Re-issue the cookie with a new expiry when a rolling refresh is due.
    pub fn refresh_session(&self, claims: &SessionClaims) -> Option<Cookie<'static>> {
        let now = chrono::Utc::now().timestamp();
        if !claims.needs_refresh(now) {
            return None;
        }

        let refreshed = SessionClaims {
            iat: now,
            exp: now + SESSION_LIFETIME_SECS,
            ..claims.clone()
        };

        match self.session_cookie(&refreshed) {
            Ok(cookie) => Some(cookie),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to refresh session cookie");
                None
            }
        }
    }

    fn session_cookie(&self, claims: &SessionClaims) -> anyhow::Result<Cookie<'static>> {
        let token = encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)?;
        Ok(Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookies)
            .max_age(time::Duration::seconds(SESSION_LIFETIME_SECS))
            .build())
    }

    /// Cookie that removes the session; attributes match the issued cookie.
    pub fn clear_session(&self) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookies)
            .max_age(time::Duration::ZERO)
            .build()
    }

    // ─── Provider endpoints ──────────────────────────────────────

    /// Authorization URL for the code flow.
    pub fn authorize_url(&self, state: &str, redirect_uri: &str) -> String {
        let mut url = format!(
            "{}?response_type=code&client_id={}&redirect_uri={}&scope={}&state={}",
            self.provider_url("/authorize"),
            urlencoding::encode(&self.client_id),
            urlencoding::encode(redirect_uri),
            urlencoding::encode("openid profile email"),
            urlencoding::encode(state),
        );
        if let Some(audience) = &self.audience {
            url.push_str("&audience=");
            url.push_str(&urlencoding::encode(audience));
        }
        url
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenResponse, UpstreamError> {
        let request = self.http.post(self.provider_url("/oauth/token")).form(&[
            ("grant_type", "authorization_code"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ]);

        upstream::fetch_json(request).await
    }

    /// Fetch the signed-in user's profile.
    pub async fn userinfo(&self, access_token: &str) -> Result<UserProfile, UpstreamError> {
        let request = self
            .http
            .get(self.provider_url("/userinfo"))
            .bearer_auth(access_token);

        upstream::fetch_json(request).await
    }

    /// Provider logout URL that lands back on `return_to`.
    pub fn logout_url(&self, return_to: &str) -> String {
        format!(
            "{}?client_id={}&returnTo={}",
            self.provider_url("/v2/logout"),
            urlencoding::encode(&self.client_id),
            urlencoding::encode(return_to),
        )
    }
}
