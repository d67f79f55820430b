// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - upstream clients and the identity provider.

pub mod espn;
pub mod graphql;
pub mod identity;
pub mod nba;
pub mod tcg;
pub mod upstream;

pub use espn::EspnClient;
pub use graphql::GraphqlClient;
pub use identity::IdentityClient;
pub use nba::NbaClient;
pub use tcg::TcgClient;
