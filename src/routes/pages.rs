// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Minimal server-rendered pages: public landing and the gated dashboard.
//!
//! The real UI lives in the frontend; these exist so a browser hitting the
//! service directly lands somewhere sensible on either side of the gate.

use crate::config::LOGIN_PATH;
use crate::middleware::CurrentSession;
use crate::AppState;
use axum::{response::Html, routing::get, Extension, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/dashboard", get(dashboard))
}

async fn home(Extension(session): Extension<CurrentSession>) -> Html<String> {
    let body = match session.0 {
        Some(s) => format!(
            "<p>Signed in as {}.</p><p><a href=\"/dashboard\">Dashboard</a> · <a href=\"/auth/logout\">Log out</a></p>",
            escape_html(s.display_name())
        ),
        None => format!("<p><a href=\"{LOGIN_PATH}?returnTo=/dashboard\">Log in</a></p>"),
    };
    Html(page("Personal Hub", &body))
}

/// Only reachable with a session; the gate redirects everyone else.
async fn dashboard(Extension(session): Extension<CurrentSession>) -> Html<String> {
    let session = session.0.unwrap_or_default();
    let body = format!(
        "<h2>Welcome, {}</h2>\
         <ul>\
         <li><a href=\"/api/nba/teams\">NBA teams</a></li>\
         <li><a href=\"/api/tcg/series\">Card series</a></li>\
         <li><a href=\"/api/tcg/cards\">Cards</a></li>\
         </ul>\
         <p><a href=\"/auth/logout\">Log out</a></p>",
        escape_html(session.display_name())
    );
    Html(page("Dashboard", &body))
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{title}</title></head><body><h1>{title}</h1>{body}</body></html>"
    )
}

/// Escape text for inclusion in HTML element content.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
