// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The locale preference cookie.

use hoist_common_i18n::Locale;
use http::header::COOKIE;
use http::HeaderMap;

pub const DEFAULT_COOKIE_NAME: &str = "NEXT_LOCALE";

/// Thirty days.
pub const DEFAULT_COOKIE_MAX_AGE_SECS: u64 = 30 * 24 * 60 * 60;

/// Reads and writes the site-wide locale preference cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleCookie {
	name: String,
	max_age_secs: u64,
	secure: bool,
}

impl Default for LocaleCookie {
	fn default() -> Self {
		Self::new(DEFAULT_COOKIE_NAME)
	}
}

impl LocaleCookie {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			max_age_secs: DEFAULT_COOKIE_MAX_AGE_SECS,
			secure: false,
		}
	}

	pub fn with_max_age(mut self, secs: u64) -> Self {
		self.max_age_secs = secs;
		self
	}

	pub fn with_secure(mut self, secure: bool) -> Self {
		self.secure = secure;
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Read the preference from `Cookie` headers.
	///
	/// The first cookie with our name wins. A value that is not a supported
	/// code is treated as if the cookie were absent.
	pub fn read(&self, headers: &HeaderMap) -> Option<Locale> {
		headers
			.get_all(COOKIE)
			.iter()
			.filter_map(|value| value.to_str().ok())
			.flat_map(|value| value.split(';'))
			.filter_map(|pair| pair.trim().split_once('='))
			.find(|(name, _)| name.trim() == self.name)
			.and_then(|(_, value)| Locale::parse(value.trim().trim_matches('"')))
	}

	/// The `Set-Cookie` value storing `locale`.
	pub fn header_value(&self, locale: Locale) -> String {
		let mut value = format!(
			"{}={}; Path=/; Max-Age={}; SameSite=Lax",
			self.name,
			locale.code(),
			self.max_age_secs
		);
		if self.secure {
			value.push_str("; Secure");
		}
		value
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use http::HeaderValue;

	fn headers(cookies: &[&str]) -> HeaderMap {
		let mut map = HeaderMap::new();
		for cookie in cookies {
			map.append(COOKIE, HeaderValue::from_str(cookie).unwrap());
		}
		map
	}

	#[test]
	fn reads_supported_value() {
		let cookie = LocaleCookie::default();
		assert_eq!(cookie.read(&headers(&["NEXT_LOCALE=nl"])), Some(Locale::Nl));
		assert_eq!(
			cookie.read(&headers(&["session=abc; NEXT_LOCALE=de; theme=dark"])),
			Some(Locale::De)
		);
	}

	#[test]
	fn reads_across_multiple_cookie_headers() {
		let cookie = LocaleCookie::default();
		assert_eq!(
			cookie.read(&headers(&["session=abc", "NEXT_LOCALE=de"])),
			Some(Locale::De)
		);
	}

	#[test]
	fn unsupported_or_missing_is_absent() {
		let cookie = LocaleCookie::default();
		assert_eq!(cookie.read(&HeaderMap::new()), None);
		assert_eq!(cookie.read(&headers(&["NEXT_LOCALE=fr"])), None);
		assert_eq!(cookie.read(&headers(&["NEXT_LOCALE=EN"])), None);
		assert_eq!(cookie.read(&headers(&["NEXT_LOCALE="])), None);
		assert_eq!(cookie.read(&headers(&["OTHER_LOCALE=nl"])), None);
	}

	#[test]
	fn quoted_values_are_accepted() {
		let cookie = LocaleCookie::default();
		assert_eq!(cookie.read(&headers(&["NEXT_LOCALE=\"nl\""])), Some(Locale::Nl));
	}

	#[test]
	fn header_value_format() {
		let cookie = LocaleCookie::default();
		assert_eq!(
			cookie.header_value(Locale::De),
			"NEXT_LOCALE=de; Path=/; Max-Age=2592000; SameSite=Lax"
		);
	}

	#[test]
	fn header_value_with_custom_settings() {
		let cookie = LocaleCookie::new("lang").with_max_age(60).with_secure(true);
		assert_eq!(
			cookie.header_value(Locale::Nl),
			"lang=nl; Path=/; Max-Age=60; SameSite=Lax; Secure"
		);
		assert_eq!(cookie.name(), "lang");
	}
}
