// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale routing configuration.

use hoist_common_i18n::Locale;
use serde::Deserialize;

use super::redirects::RedirectPolicy;
use crate::error::ConfigError;

const DEFAULT_COOKIE_NAME: &str = "NEXT_LOCALE";
const DEFAULT_COOKIE_MAX_AGE_SECS: u64 = 30 * 24 * 60 * 60;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocaleConfigLayer {
	#[serde(default)]
	pub default_locale: Option<String>,
	#[serde(default)]
	pub cookie_name: Option<String>,
	#[serde(default)]
	pub cookie_max_age_secs: Option<u64>,
	#[serde(default)]
	pub cookie_secure: Option<bool>,
	#[serde(default)]
	pub refresh_cookie: Option<bool>,
	#[serde(default)]
	pub redirect: Option<RedirectPolicy>,
	#[serde(default)]
	pub extra_bypass_prefixes: Option<Vec<String>>,
}

impl LocaleConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.default_locale.is_some() {
			self.default_locale = other.default_locale;
		}
		if other.cookie_name.is_some() {
			self.cookie_name = other.cookie_name;
		}
		if other.cookie_max_age_secs.is_some() {
			self.cookie_max_age_secs = other.cookie_max_age_secs;
		}
		if other.cookie_secure.is_some() {
			self.cookie_secure = other.cookie_secure;
		}
		if other.refresh_cookie.is_some() {
			self.refresh_cookie = other.refresh_cookie;
		}
		if other.redirect.is_some() {
			self.redirect = other.redirect;
		}
		if other.extra_bypass_prefixes.is_some() {
			self.extra_bypass_prefixes = other.extra_bypass_prefixes;
		}
	}

	pub fn finalize(self) -> Result<LocaleConfig, ConfigError> {
		let default_locale = match self.default_locale {
			Some(code) => code.parse().map_err(|_| ConfigError::InvalidValue {
				key: "locale.default_locale".to_string(),
				message: format!("'{code}' is not a supported locale"),
			})?,
			None => Locale::default(),
		};

		let cookie_name = self
			.cookie_name
			.unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string());
		if cookie_name.is_empty()
			|| !cookie_name
				.chars()
				.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
		{
			return Err(ConfigError::InvalidValue {
				key: "locale.cookie_name".to_string(),
				message: format!("'{cookie_name}' is not a valid cookie name"),
			});
		}

		Ok(LocaleConfig {
			default_locale,
			cookie_name,
			cookie_max_age_secs: self
				.cookie_max_age_secs
				.unwrap_or(DEFAULT_COOKIE_MAX_AGE_SECS),
			cookie_secure: self.cookie_secure.unwrap_or(false),
			refresh_cookie: self.refresh_cookie.unwrap_or(true),
			redirect: self.redirect.unwrap_or(RedirectPolicy::Temporary),
			extra_bypass_prefixes: self.extra_bypass_prefixes.unwrap_or_default(),
		})
	}
}

#[derive(Debug, Clone)]
pub struct LocaleConfig {
	pub default_locale: Locale,
	pub cookie_name: String,
	pub cookie_max_age_secs: u64,
	pub cookie_secure: bool,
	/// Re-send the preference cookie on every pass-through.
	pub refresh_cookie: bool,
	/// Status of locale redirects.
	pub redirect: RedirectPolicy,
	pub extra_bypass_prefixes: Vec<String>,
}

impl Default for LocaleConfig {
	fn default() -> Self {
		Self {
			default_locale: Locale::default(),
			cookie_name: DEFAULT_COOKIE_NAME.to_string(),
			cookie_max_age_secs: DEFAULT_COOKIE_MAX_AGE_SECS,
			cookie_secure: false,
			refresh_cookie: true,
			redirect: RedirectPolicy::Temporary,
			extra_bypass_prefixes: Vec::new(),
		}
	}
}
