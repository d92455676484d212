// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Axum middleware applying the bot filter and rate limiter to one route.
//!
//! ```ignore
//! let guard = RouteGuard::new(limiter, bots, CONTACT_ROUTE);
//! Router::new()
//!     .route("/api/contact", post(submit_contact))
//!     .route_layer(middleware::from_fn_with_state(guard, guard_route));
//! ```

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::{
	extract::{ConnectInfo, Request, State},
	http::{header, HeaderValue, StatusCode},
	middleware::Next,
	response::{IntoResponse, Response},
	Json,
};
use hoist_common_i18n::{negotiate, t, Locale};
use serde::Serialize;
use tracing::{info, warn};

use crate::bot::BotFilter;
use crate::client::client_address;
use crate::limiter::{RateLimitDecision, RateLimiter};

/// Middleware state: which route is guarded and by what.
#[derive(Debug, Clone)]
pub struct RouteGuard {
	limiter: Arc<RateLimiter>,
	bots: Arc<BotFilter>,
	route: Arc<str>,
	trusted_proxies: Arc<[IpAddr]>,
	enabled: bool,
}

impl RouteGuard {
	pub fn new(limiter: Arc<RateLimiter>, bots: Arc<BotFilter>, route: impl Into<Arc<str>>) -> Self {
		Self {
			limiter,
			bots,
			route: route.into(),
			trusted_proxies: Arc::from(Vec::new()),
			enabled: true,
		}
	}

	/// A disabled guard lets every request through.
	pub fn enabled(mut self, enabled: bool) -> Self {
		self.enabled = enabled;
		self
	}

	/// Peers whose forwarding headers are believed when keying clients.
	pub fn trusted_proxies(mut self, proxies: impl Into<Arc<[IpAddr]>>) -> Self {
		self.trusted_proxies = proxies.into();
		self
	}

	pub fn route(&self) -> &str {
		&self.route
	}
}

#[derive(Debug, Serialize)]
struct GuardRejection {
	error: &'static str,
	message: String,
}

pub async fn guard_route(State(guard): State<RouteGuard>, request: Request, next: Next) -> Response {
	if !guard.enabled {
		return next.run(request).await;
	}

	let headers = request.headers();
	let locale = negotiate(
		headers
			.get(header::ACCEPT_LANGUAGE)
			.and_then(|v| v.to_str().ok()),
		Locale::default(),
	);
	let peer = request
		.extensions()
		.get::<ConnectInfo<SocketAddr>>()
		.map(|ConnectInfo(addr)| *addr);
	let address = client_address(headers, peer, &guard.trusted_proxies);
	let user_agent = headers.get(header::USER_AGENT).and_then(|v| v.to_str().ok());

	if guard.bots.is_blocked(user_agent) {
		info!(
			route = %guard.route,
			address = %address,
			user_agent = user_agent.unwrap_or_default(),
			"blocked automated request"
		);
		return rejection(
			StatusCode::FORBIDDEN,
			"bot_blocked",
			t(locale, "api.bot_blocked"),
		);
	}

	match guard.limiter.check(&address, &guard.route) {
		RateLimitDecision::Allowed { .. } => next.run(request).await,
		RateLimitDecision::Limited { retry_after } => {
			warn!(route = %guard.route, address = %address, "rejected rate limited request");
			let mut response = rejection(
				StatusCode::TOO_MANY_REQUESTS,
				"rate_limited",
				t(locale, "api.rate_limited"),
			);
			// Round up so clients never retry inside the window.
			let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
			response
				.headers_mut()
				.insert(header::RETRY_AFTER, HeaderValue::from(secs.max(1)));
			response
		}
	}
}

fn rejection(status: StatusCode, error: &'static str, message: String) -> Response {
	(status, Json(GuardRejection { error, message })).into_response()
}
