// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Abuse protection for the handful of Hoist endpoints that accept writes
//! from the public: the contact form and uploads.
//!
//! - [`RateLimiter`] counts requests per `(client address, route)` in fixed
//!   windows. It is created once at startup and shared by `Arc`; a
//!   background [`SweepHandle`] task evicts expired windows until cancelled.
//! - [`BotFilter`] rejects empty and automation user agents.
//! - [`guard_route`] combines both as axum middleware for one named route.

mod bot;
mod client;
mod limiter;
mod middleware;
mod sweeper;

pub use bot::{BotFilter, DEFAULT_BOT_PATTERNS};
pub use client::client_address;
pub use limiter::{RateLimitDecision, RateLimiter, RouteLimit};
pub use middleware::{guard_route, RouteGuard};
pub use sweeper::SweepHandle;

/// Route name of the contact form.
pub const CONTACT_ROUTE: &str = "contact";

/// Route name of the upload endpoint.
pub const UPLOADS_ROUTE: &str = "uploads";
