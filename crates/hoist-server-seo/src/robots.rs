// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::alternates::BaseUrl;

/// `robots.txt` contents: everything is crawlable except the listed
/// prefixes, and the sitemap location is advertised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotsTxt {
	disallow: Vec<String>,
	sitemap_url: String,
}

impl RobotsTxt {
	/// Disallows `/api/` and points at `<base>/sitemap.xml`.
	pub fn new(base: &BaseUrl) -> Self {
		Self {
			disallow: vec!["/api/".to_string()],
			sitemap_url: base.join("/sitemap.xml"),
		}
	}

	pub fn disallow(mut self, prefix: impl Into<String>) -> Self {
		let prefix = prefix.into();
		if !self.disallow.contains(&prefix) {
			self.disallow.push(prefix);
		}
		self
	}

	pub fn render(&self) -> String {
		let mut out = String::from("User-agent: *\nAllow: /\n");
		for prefix in &self.disallow {
			out.push_str("Disallow: ");
			out.push_str(prefix);
			out.push('\n');
		}
		out.push('\n');
		out.push_str("Sitemap: ");
		out.push_str(&self.sitemap_url);
		out.push('\n');
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn renders_defaults() {
		let base = BaseUrl::parse("https://hoist.example").unwrap();
		assert_eq!(
			RobotsTxt::new(&base).render(),
			"User-agent: *\nAllow: /\nDisallow: /api/\n\nSitemap: https://hoist.example/sitemap.xml\n"
		);
	}

	#[test]
	fn extra_disallows_are_deduplicated() {
		let base = BaseUrl::parse("https://hoist.example").unwrap();
		let robots = RobotsTxt::new(&base).disallow("/_internal/").disallow("/api/");
		let text = robots.render();
		assert_eq!(text.matches("Disallow:").count(), 2);
		assert!(text.contains("Disallow: /_internal/\n"));
	}
}
