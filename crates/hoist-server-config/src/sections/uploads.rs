// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Upload storage configuration.

use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

fn default_allowed_types() -> Vec<String> {
	["image/jpeg", "image/png", "image/webp", "application/pdf"]
		.iter()
		.map(|s| s.to_string())
		.collect()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadsConfigLayer {
	#[serde(default)]
	pub dir: Option<String>,
	#[serde(default)]
	pub max_bytes: Option<u64>,
	#[serde(default)]
	pub allowed_types: Option<Vec<String>>,
}

impl UploadsConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.dir.is_some() {
			self.dir = other.dir;
		}
		if other.max_bytes.is_some() {
			self.max_bytes = other.max_bytes;
		}
		if other.allowed_types.is_some() {
			self.allowed_types = other.allowed_types;
		}
	}

	pub fn finalize(self) -> UploadsConfig {
		UploadsConfig {
			dir: PathBuf::from(self.dir.unwrap_or_else(|| "./data/uploads".to_string())),
			max_bytes: self.max_bytes.unwrap_or(DEFAULT_MAX_BYTES),
			allowed_types: self
				.allowed_types
				.map(|types| {
					types
						.into_iter()
						.map(|t| t.trim().to_ascii_lowercase())
						.filter(|t| !t.is_empty())
						.collect()
				})
				.unwrap_or_else(default_allowed_types),
		}
	}
}

#[derive(Debug, Clone)]
pub struct UploadsConfig {
	/// Directory holding stored files, served under `/uploads`.
	pub dir: PathBuf,
	pub max_bytes: u64,
	/// Accepted `Content-Type` values, lowercase.
	pub allowed_types: Vec<String>,
}

impl Default for UploadsConfig {
	fn default() -> Self {
		UploadsConfigLayer::default().finalize()
	}
}

impl UploadsConfig {
	pub fn is_allowed(&self, content_type: &str) -> bool {
		let essence = content_type
			.split(';')
			.next()
			.unwrap_or_default()
			.trim()
			.to_ascii_lowercase();
		self.allowed_types.iter().any(|t| *t == essence)
	}
}
