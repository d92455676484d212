// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Redirect permanence policies.

use std::str::FromStr;

use serde::Deserialize;

/// Whether a redirect is issued as temporary (307) or permanent (308).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedirectPolicy {
	Temporary,
	Permanent,
}

impl FromStr for RedirectPolicy {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"temporary" | "307" => Ok(RedirectPolicy::Temporary),
			"permanent" | "308" => Ok(RedirectPolicy::Permanent),
			other => Err(format!(
				"unknown redirect policy '{other}' (expected temporary or permanent)"
			)),
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedirectsConfigLayer {
	pub legacy_slug: Option<RedirectPolicy>,
}

impl RedirectsConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.legacy_slug.is_some() {
			self.legacy_slug = other.legacy_slug;
		}
	}

	pub fn finalize(self) -> RedirectsConfig {
		RedirectsConfig {
			legacy_slug: self.legacy_slug.unwrap_or(RedirectPolicy::Permanent),
		}
	}
}

/// Redirects from renamed crane slugs to their current slug.
#[derive(Debug, Clone)]
pub struct RedirectsConfig {
	pub legacy_slug: RedirectPolicy,
}

impl Default for RedirectsConfig {
	fn default() -> Self {
		RedirectsConfigLayer::default().finalize()
	}
}
