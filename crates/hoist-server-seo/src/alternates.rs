// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Canonical and hreflang alternate URLs for locale-prefixed pages.

use hoist_common_i18n::{Locale, LOCALES};
use hoist_server_locale::prefix_path;

use crate::error::{Result, SeoError};

/// The `hreflang` value pointing search engines at the fallback variant.
pub const X_DEFAULT: &str = "x-default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternateLink {
	pub hreflang: String,
	pub href: String,
}

/// Absolute site origin without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
	pub fn parse(raw: &str) -> Result<Self> {
		let trimmed = raw.trim().trim_end_matches('/');
		let has_host = trimmed
			.strip_prefix("https://")
			.or_else(|| trimmed.strip_prefix("http://"))
			.is_some_and(|host| !host.is_empty());
		if !has_host {
			return Err(SeoError::InvalidBaseUrl(raw.to_string()));
		}
		Ok(Self(trimmed.to_string()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Absolute URL for a site path such as `/robots.txt`.
	pub fn join(&self, path: &str) -> String {
		if path.starts_with('/') {
			format!("{}{path}", self.0)
		} else {
			format!("{}/{path}", self.0)
		}
	}

	/// Absolute URL for `rest` under the `locale` prefix.
	pub fn page_url(&self, locale: Locale, rest: &str) -> String {
		self.join(&prefix_path(locale, rest))
	}
}

/// The canonical URL of a page is its own locale variant.
pub fn canonical_url(base: &BaseUrl, locale: Locale, rest: &str) -> String {
	base.page_url(locale, rest)
}

/// One alternate per supported locale plus `x-default`, which points at the
/// `default_locale` variant.
pub fn alternate_links(base: &BaseUrl, rest: &str, default_locale: Locale) -> Vec<AlternateLink> {
	let mut links: Vec<AlternateLink> = LOCALES
		.iter()
		.map(|locale| AlternateLink {
			hreflang: locale.code().to_string(),
			href: base.page_url(*locale, rest),
		})
		.collect();

	links.push(AlternateLink {
		hreflang: X_DEFAULT.to_string(),
		href: base.page_url(default_locale, rest),
	});
	links
}
