// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Paths excluded from locale routing.

use crate::path::normalize_path;

const DEFAULT_PREFIXES: &[&str] = &[
	"/api",
	"/static",
	"/assets",
	"/uploads",
	"/images",
	"/icons",
	"/health",
];

const DEFAULT_FILES: &[&str] = &[
	"/favicon.ico",
	"/robots.txt",
	"/sitemap.xml",
	"/manifest.json",
	"/site.webmanifest",
	"/apple-touch-icon.png",
];

/// Allow-list of paths that never receive a locale prefix.
///
/// A path is bypassed when it
/// - equals or is below a prefix (segment-aware: `/api` covers `/api/x`
///   but not `/apix`),
/// - equals a well-known root file,
/// - has a first segment starting with `_`,
/// - or has a last segment containing a `.`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BypassRules {
	prefixes: Vec<String>,
	files: Vec<String>,
}

impl Default for BypassRules {
	fn default() -> Self {
		Self {
			prefixes: DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect(),
			files: DEFAULT_FILES.iter().map(|f| f.to_string()).collect(),
		}
	}
}

impl BypassRules {
	/// Rules with no prefixes or files. The `_` and file-extension
	/// conventions still apply.
	pub fn empty() -> Self {
		Self {
			prefixes: Vec::new(),
			files: Vec::new(),
		}
	}

	pub fn with_prefix(mut self, prefix: impl AsRef<str>) -> Self {
		let prefix = normalize_path(prefix.as_ref());
		if prefix != "/" && !self.prefixes.contains(&prefix) {
			self.prefixes.push(prefix);
		}
		self
	}

	pub fn with_file(mut self, file: impl AsRef<str>) -> Self {
		let file = normalize_path(file.as_ref());
		if file != "/" && !self.files.contains(&file) {
			self.files.push(file);
		}
		self
	}

	pub fn prefixes(&self) -> &[String] {
		&self.prefixes
	}

	pub fn files(&self) -> &[String] {
		&self.files
	}

	pub fn matches(&self, path: &str) -> bool {
		let path = normalize_path(path);

		if self.files.iter().any(|f| *f == path) {
			return true;
		}

		if self.prefixes.iter().any(|p| {
			path.strip_prefix(p.as_str())
				.is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
		}) {
			return true;
		}

		let mut segments = path.split('/').filter(|s| !s.is_empty());
		if segments.clone().next().is_some_and(|first| first.starts_with('_')) {
			return true;
		}

		segments.next_back().is_some_and(|last| last.contains('.'))
	}
}
