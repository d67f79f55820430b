// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cache-Control policies for proxied data, tuned to how often it changes.

use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};

/// Team rosters: five minutes at the edge.
pub const ROSTER: &str = "public, s-maxage=300";

/// Team list: changes a few times a season.
pub const TEAMS: &str = "public, s-maxage=3600";

/// Card catalog: an hour fresh, a day of background revalidation.
pub const CATALOG: &str = "public, s-maxage=3600, stale-while-revalidate=86400";

/// Attach a Cache-Control directive to any response.
pub fn cached(policy: &'static str, body: impl IntoResponse) -> Response {
    let mut response = body.into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static(policy));
    response
}
