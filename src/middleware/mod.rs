// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules, in the order a request meets them:
//! security headers, identity layer, session gate.

pub mod gate;
pub mod identity;
pub mod security;

pub use gate::session_gate;
pub use identity::{identity_layer, CurrentSession};
