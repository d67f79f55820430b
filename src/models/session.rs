// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! The caller's identity as seen by this service.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Current session, read from the identity provider's cookie.
///
/// Both fields are independently nullable; the provider may not share either.
/// The `Default` value is the logged-out shape returned by `/api/me`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Session {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Session {
    /// Best label for greeting the user.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("there")
    }
}
