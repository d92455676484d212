// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::HashMap;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::{debug, warn};

use crate::{CONTACT_ROUTE, UPLOADS_ROUTE};

/// Allowed requests per window for one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteLimit {
	pub max_requests: u32,
	pub window: Duration,
}

impl RouteLimit {
	pub fn new(max_requests: u32, window: Duration) -> Self {
		Self {
			max_requests,
			window,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
	Allowed { remaining: u32 },
	Limited { retry_after: Duration },
}

impl RateLimitDecision {
	pub fn is_allowed(&self) -> bool {
		matches!(self, RateLimitDecision::Allowed { .. })
	}
}

#[derive(Debug, Clone, Copy)]
struct Window {
	started: Instant,
	count: u32,
	length: Duration,
}

impl Window {
	fn expires_at(&self) -> Instant {
		self.started + self.length
	}
}

/// Fixed-window request counter keyed by client address and route name.
///
/// Routes without a configured [`RouteLimit`] are unlimited and leave no
/// state behind.
#[derive(Debug, Default)]
pub struct RateLimiter {
	windows: DashMap<(String, String), Window>,
	limits: HashMap<String, RouteLimit>,
}

impl RateLimiter {
	pub fn new(limits: HashMap<String, RouteLimit>) -> Self {
		Self {
			windows: DashMap::new(),
			limits,
		}
	}

	/// Five contact submissions per ten minutes and thirty uploads per minute.
	pub fn with_defaults() -> Self {
		Self::new(Self::default_limits())
	}

	pub fn default_limits() -> HashMap<String, RouteLimit> {
		HashMap::from([
			(
				CONTACT_ROUTE.to_string(),
				RouteLimit::new(5, Duration::from_secs(600)),
			),
			(
				UPLOADS_ROUTE.to_string(),
				RouteLimit::new(30, Duration::from_secs(60)),
			),
		])
	}

	pub fn limit_for(&self, route: &str) -> Option<RouteLimit> {
		self.limits.get(route).copied()
	}

	pub fn check(&self, address: &str, route: &str) -> RateLimitDecision {
		self.check_at(address, route, Instant::now())
	}

	/// Count one request at `now`.
	pub fn check_at(&self, address: &str, route: &str, now: Instant) -> RateLimitDecision {
		let Some(limit) = self.limit_for(route) else {
			return RateLimitDecision::Allowed {
				remaining: u32::MAX,
			};
		};

		let mut window = self
			.windows
			.entry((address.to_string(), route.to_string()))
			.or_insert(Window {
				started: now,
				count: 0,
				length: limit.window,
			});

		if now >= window.expires_at() {
			*window = Window {
				started: now,
				count: 0,
				length: limit.window,
			};
		}

		if window.count < limit.max_requests {
			window.count += 1;
			let remaining = limit.max_requests - window.count;
			debug!(address, route, remaining, "rate limit check passed");
			RateLimitDecision::Allowed { remaining }
		} else {
			let retry_after = window.expires_at().saturating_duration_since(now);
			warn!(address, route, retry_after_secs = retry_after.as_secs(), "rate limit exceeded");
			RateLimitDecision::Limited { retry_after }
		}
	}

	/// Remove every expired window. Returns how many were removed.
	pub fn sweep(&self) -> usize {
		self.sweep_at(Instant::now())
	}

	pub fn sweep_at(&self, now: Instant) -> usize {
		let before = self.windows.len();
		self.windows.retain(|_, window| now < window.expires_at());
		before.saturating_sub(self.windows.len())
	}

	/// Number of tracked windows.
	pub fn len(&self) -> usize {
		self.windows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.windows.is_empty()
	}
}
