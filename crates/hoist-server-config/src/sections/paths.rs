// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfigLayer {
	pub static_dir: Option<String>,
}

impl PathsConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.static_dir.is_some() {
			self.static_dir = other.static_dir;
		}
	}

	pub fn finalize(self) -> PathsConfig {
		PathsConfig {
			static_dir: PathBuf::from(self.static_dir.unwrap_or_else(|| "./static".to_string())),
		}
	}
}

/// Filesystem locations served as-is.
#[derive(Debug, Clone)]
pub struct PathsConfig {
	/// Served under `/static`.
	pub static_dir: PathBuf,
}

impl Default for PathsConfig {
	fn default() -> Self {
		PathsConfigLayer::default().finalize()
	}
}
