// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration layer for merging from multiple sources.

use serde::Deserialize;

use crate::sections::{
	DatabaseConfigLayer, HttpConfigLayer, LocaleConfigLayer, LoggingConfigLayer, PathsConfigLayer,
	RateLimitConfigLayer, RedirectsConfigLayer, UploadsConfigLayer,
};

/// Server configuration layer - all fields are Option for merging.
///
/// The admin token is not part of any layer; it is only read from the
/// environment when the configuration is finalized.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfigLayer {
	#[serde(default)]
	pub http: Option<HttpConfigLayer>,
	#[serde(default)]
	pub database: Option<DatabaseConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
	#[serde(default)]
	pub locale: Option<LocaleConfigLayer>,
	#[serde(default)]
	pub redirects: Option<RedirectsConfigLayer>,
	#[serde(default)]
	pub rate_limit: Option<RateLimitConfigLayer>,
	#[serde(default)]
	pub uploads: Option<UploadsConfigLayer>,
	#[serde(default)]
	pub paths: Option<PathsConfigLayer>,
}

impl ServerConfigLayer {
	/// Merge another layer into this one. Other layer takes precedence.
	pub fn merge(&mut self, other: ServerConfigLayer) {
		merge_option(&mut self.http, other.http, HttpConfigLayer::merge);
		merge_option(
			&mut self.database,
			other.database,
			DatabaseConfigLayer::merge,
		);
		merge_option(&mut self.logging, other.logging, LoggingConfigLayer::merge);
		merge_option(&mut self.locale, other.locale, LocaleConfigLayer::merge);
		merge_option(
			&mut self.redirects,
			other.redirects,
			RedirectsConfigLayer::merge,
		);
		merge_option(
			&mut self.rate_limit,
			other.rate_limit,
			RateLimitConfigLayer::merge,
		);
		merge_option(&mut self.uploads, other.uploads, UploadsConfigLayer::merge);
		merge_option(&mut self.paths, other.paths, PathsConfigLayer::merge);
	}
}

fn merge_option<T, F>(target: &mut Option<T>, source: Option<T>, merge_fn: F)
where
	F: FnOnce(&mut T, T),
{
	match (target.as_mut(), source) {
		(Some(t), Some(s)) => merge_fn(t, s),
		(None, Some(s)) => *target = Some(s),
		_ => {}
	}
}
