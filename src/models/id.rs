// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Identifiers as upstreams send them: sometimes numbers, sometimes strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An upstream record identifier, kept in its original JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UpstreamId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UpstreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamId::Number(n) => write!(f, "{n}"),
            UpstreamId::Text(s) => f.write_str(s),
        }
    }
}
