// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rate limiting and bot filtering configuration.

use std::collections::BTreeMap;
use std::net::IpAddr;
use std::time::Duration;

use serde::Deserialize;

const DEFAULT_BOT_PATTERNS: &[&str] = &[
	"bot",
	"crawl",
	"spider",
	"scrape",
	"curl",
	"wget",
	"python-requests",
	"httpclient",
	"headless",
];

fn default_routes() -> BTreeMap<String, RouteLimitConfig> {
	BTreeMap::from([
		(
			"contact".to_string(),
			RouteLimitConfig {
				max_requests: 5,
				window_secs: 600,
			},
		),
		(
			"uploads".to_string(),
			RouteLimitConfig {
				max_requests: 30,
				window_secs: 60,
			},
		),
	])
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct RouteLimitConfigLayer {
	#[serde(default)]
	pub max_requests: Option<u32>,
	#[serde(default)]
	pub window_secs: Option<u64>,
}

impl RouteLimitConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.max_requests.is_some() {
			self.max_requests = other.max_requests;
		}
		if other.window_secs.is_some() {
			self.window_secs = other.window_secs;
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RateLimitConfigLayer {
	#[serde(default)]
	pub enabled: Option<bool>,
	#[serde(default)]
	pub sweep_interval_secs: Option<u64>,
	#[serde(default)]
	pub routes: Option<BTreeMap<String, RouteLimitConfigLayer>>,
	#[serde(default)]
	pub bot_patterns: Option<Vec<String>>,
	#[serde(default)]
	pub trusted_proxies: Option<Vec<IpAddr>>,
}

impl RateLimitConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.enabled.is_some() {
			self.enabled = other.enabled;
		}
		if other.sweep_interval_secs.is_some() {
			self.sweep_interval_secs = other.sweep_interval_secs;
		}
		if let Some(routes) = other.routes {
			let target = self.routes.get_or_insert_with(BTreeMap::new);
			for (name, layer) in routes {
				target.entry(name).or_default().merge(layer);
			}
		}
		if other.bot_patterns.is_some() {
			self.bot_patterns = other.bot_patterns;
		}
		if other.trusted_proxies.is_some() {
			self.trusted_proxies = other.trusted_proxies;
		}
	}

	/// Route settings override the built-in defaults field by field; a route
	/// with no default needs both fields (a missing one falls back to the
	/// `contact` limits).
	pub fn finalize(self) -> RateLimitConfig {
		let mut routes = default_routes();
		for (name, layer) in self.routes.unwrap_or_default() {
			let base = routes
				.get(&name)
				.or_else(|| routes.get("contact"))
				.copied()
				.unwrap_or(RouteLimitConfig {
					max_requests: 5,
					window_secs: 600,
				});
			routes.insert(
				name,
				RouteLimitConfig {
					max_requests: layer.max_requests.unwrap_or(base.max_requests),
					window_secs: layer.window_secs.unwrap_or(base.window_secs),
				},
			);
		}

		RateLimitConfig {
			enabled: self.enabled.unwrap_or(true),
			sweep_interval_secs: self.sweep_interval_secs.unwrap_or(60),
			routes,
			bot_patterns: self.bot_patterns.unwrap_or_else(|| {
				DEFAULT_BOT_PATTERNS.iter().map(|p| p.to_string()).collect()
			}),
			trusted_proxies: self.trusted_proxies.unwrap_or_default(),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteLimitConfig {
	pub max_requests: u32,
	pub window_secs: u64,
}

impl RouteLimitConfig {
	pub fn window(&self) -> Duration {
		Duration::from_secs(self.window_secs)
	}
}

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
	pub enabled: bool,
	pub sweep_interval_secs: u64,
	pub routes: BTreeMap<String, RouteLimitConfig>,
	pub bot_patterns: Vec<String>,
	/// Peers allowed to set `X-Forwarded-For`; empty means clients are keyed
	/// by socket address only.
	pub trusted_proxies: Vec<IpAddr>,
}

impl RateLimitConfig {
	pub fn sweep_interval(&self) -> Duration {
		Duration::from_secs(self.sweep_interval_secs)
	}
}

impl Default for RateLimitConfig {
	fn default() -> Self {
		RateLimitConfigLayer::default().finalize()
	}
}
