// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity provider login, callback, and logout routes.

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::get,
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use std::sync::Arc;
use subtle::ConstantTimeEq;

use crate::error::{AppError, Result};
use crate::AppState;

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

/// How long a login attempt may take before its state is rejected.
const STATE_MAX_AGE_MS: u128 = 10 * 60 * 1000;

/// Cookie holding the `state` this browser was sent off with.
pub const LOGIN_STATE_COOKIE: &str = "login_state";

/// Message returned when the identity provider cannot be reached.
const IDENTITY_UNAVAILABLE: &str = "Identity provider unavailable";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", get(login))
        .route("/auth/callback", get(callback))
        .route("/auth/logout", get(logout))
}

/// Query parameters for starting the login flow.
#[derive(Deserialize)]
pub struct LoginParams {
    /// Local path to land on after login.
    #[serde(default, rename = "returnTo")]
    return_to: Option<String>,
}

/// Only same-origin absolute paths are allowed as post-login targets.
fn safe_return_to(raw: Option<&str>) -> String {
    match raw {
        Some(p) if p.starts_with('/') && !p.starts_with("//") && !p.contains('\\') => {
            p.to_string()
        }
        _ => "/".to_string(),
    }
}

fn callback_url(state: &AppState) -> String {
    format!("{}/auth/callback", state.config.app_base_url)
}

/// `login_state` cookie scoped to `/auth`; an empty value with zero
/// max-age removes it.
fn login_state_cookie(state: &AppState, value: String, max_age: time::Duration) -> Cookie<'static> {
    Cookie::build((LOGIN_STATE_COOKIE, value))
        .path("/auth")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.app_base_url.starts_with("https://"))
        .max_age(max_age)
        .build()
}

/// The callback `state` must be the one this browser's login started with.
fn state_matches_cookie(jar: &CookieJar, state: Option<&str>) -> bool {
    match (jar.get(LOGIN_STATE_COOKIE), state) {
        (Some(cookie), Some(state)) => bool::from(cookie.value().as_bytes().ct_eq(state.as_bytes())),
        _ => false,
    }
}

fn now_millis() -> u128 {
    chrono::Utc::now().timestamp_millis().max(0) as u128
}

/// Start login - redirect to the provider's authorize endpoint.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<LoginParams>,
) -> Result<(CookieJar, Redirect)> {
    let return_to = safe_return_to(params.return_to.as_deref());
    let oauth_state = sign_state(&return_to, now_millis(), &state.config.session_secret)?;

    let url = state
        .identity
        .authorize_url(&oauth_state, &callback_url(&state));

    tracing::info!(return_to = %return_to, "Starting login, redirecting to identity provider");

    let max_age = time::Duration::milliseconds(STATE_MAX_AGE_MS as i64);
    let jar = jar.add(login_state_cookie(&state, oauth_state, max_age));
    Ok((jar, Redirect::temporary(&url)))
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Login callback - exchange the code, read the profile, set the session cookie.
async fn callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(CookieJar, Redirect)> {
    if let Some(error) = params.error {
        tracing::warn!(error = %error, "Login error from identity provider");
        let redirect = format!("/?error={}", urlencoding::encode(&error));
        return Ok((jar, Redirect::temporary(&redirect)));
    }

    let code = params
        .code
        .ok_or_else(|| AppError::BadRequest("Missing authorization code".to_string()))?;

    if !state_matches_cookie(&jar, params.state.as_deref()) {
        tracing::warn!("Login state does not match this browser's login");
        return Err(AppError::BadRequest("Invalid login state".to_string()));
    }
    let jar = jar.add(login_state_cookie(&state, String::new(), time::Duration::ZERO));

    let return_to = params
        .state
        .as_deref()
        .and_then(|s| verify_state(s, now_millis(), &state.config.session_secret))
        .unwrap_or_else(|| {
            tracing::warn!("Invalid or expired login state, falling back to home");
            "/".to_string()
        });

    let tokens = state
        .identity
        .exchange_code(&code, &callback_url(&state))
        .await
        .map_err(|e| e.into_app_error(IDENTITY_UNAVAILABLE))?;

    let profile = state
        .identity
        .userinfo(&tokens.access_token)
        .await
        .map_err(|e| e.into_app_error(IDENTITY_UNAVAILABLE))?;

    let cookie = state.identity.issue_session(&profile)?;

    tracing::info!(sub = %profile.sub, "Login successful, session issued");

    Ok((jar.add(cookie), Redirect::to(&return_to)))
}

/// Logout - drop the session cookie and end the provider session too.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Redirect) {
    let url = state.identity.logout_url(&state.config.app_base_url);
    (
        jar.add(state.identity.clear_session()),
        Redirect::temporary(&url),
    )
}

// ─── Signed OAuth state ──────────────────────────────────────

fn state_signature(payload: &str, secret: &[u8]) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init failed: {}", e)))?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Encode `return_to|timestamp_hex|signature_hex` as URL-safe base64.
fn sign_state(return_to: &str, now_ms: u128, secret: &[u8]) -> Result<String> {
    let payload = format!("{}|{:x}", return_to, now_ms);
    let signature = state_signature(&payload, secret)?;
    Ok(URL_SAFE_NO_PAD.encode(format!("{}|{}", payload, signature)))
}

/// Verify signature and age; returns the post-login path.
fn verify_state(state: &str, now_ms: u128, secret: &[u8]) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(state).ok()?;
    let state_str = String::from_utf8(bytes).ok()?;

    // Split from the right so a '|' inside the path survives.
    let mut parts = state_str.rsplitn(3, '|');
    let signature_hex = parts.next()?;
    let timestamp_hex = parts.next()?;
    let return_to = parts.next()?;

    let payload = format!("{}|{}", return_to, timestamp_hex);
    let expected = state_signature(&payload, secret).ok()?;

    if !bool::from(expected.as_bytes().ct_eq(signature_hex.as_bytes())) {
        tracing::error!("Login state signature mismatch");
        return None;
    }

    let issued = u128::from_str_radix(timestamp_hex, 16).ok()?;
    if now_ms.saturating_sub(issued) > STATE_MAX_AGE_MS {
        return None;
    }

    Some(safe_return_to(Some(return_to)))
}
