// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.
//!
//! Nothing here is persisted; these are upstream response shapes passed
//! through with light reshaping.

pub mod id;
pub mod nba;
pub mod session;
pub mod tcg;

pub use id::UpstreamId;
pub use nba::{Player, PlayerRow, PlayerStats, SortKey, SortOrder, SortValue, Team};
pub use session::Session;
pub use tcg::{Card, CardBrief, Series, SeriesBrief, Set, SetBrief};
