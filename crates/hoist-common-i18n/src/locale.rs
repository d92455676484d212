// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The fixed set of supported locales.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A locale the site is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Locale {
	#[default]
	En,
	Nl,
	De,
}

/// Every supported locale, default first.
pub const LOCALES: [Locale; 3] = [Locale::En, Locale::Nl, Locale::De];

/// The locale used when nothing else applies.
pub const DEFAULT_LOCALE: Locale = Locale::En;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported locale: {0}")]
pub struct UnsupportedLocale(pub String);

impl Locale {
	/// The lowercase code used in URLs, cookies and `<html lang>`.
	pub fn code(self) -> &'static str {
		match self {
			Locale::En => "en",
			Locale::Nl => "nl",
			Locale::De => "de",
		}
	}

	/// Exact, case-sensitive match against a supported code.
	///
	/// URL segments and cookie values must already be canonical; `EN` or
	/// `en-US` are not locales.
	pub fn parse(code: &str) -> Option<Locale> {
		match code {
			"en" => Some(Locale::En),
			"nl" => Some(Locale::Nl),
			"de" => Some(Locale::De),
			_ => None,
		}
	}

	/// The name of the language in that language, for the language switcher.
	pub fn native_name(self) -> &'static str {
		match self {
			Locale::En => "English",
			Locale::Nl => "Nederlands",
			Locale::De => "Deutsch",
		}
	}
}

impl FromStr for Locale {
	type Err = UnsupportedLocale;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Locale::parse(s).ok_or_else(|| UnsupportedLocale(s.to_string()))
	}
}

impl TryFrom<String> for Locale {
	type Error = UnsupportedLocale;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<Locale> for &'static str {
	fn from(locale: Locale) -> Self {
		locale.code()
	}
}

impl fmt::Display for Locale {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.code())
	}
}

/// Check whether a code names a supported locale.
pub fn is_supported(code: &str) -> bool {
	Locale::parse(code).is_some()
}

/// Codes of every supported locale, default first.
pub fn available_locales() -> Vec<&'static str> {
	LOCALES.iter().map(|l| l.code()).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_is_exact() {
		assert_eq!(Locale::parse("en"), Some(Locale::En));
		assert_eq!(Locale::parse("nl"), Some(Locale::Nl));
		assert_eq!(Locale::parse("de"), Some(Locale::De));
		assert_eq!(Locale::parse("EN"), None);
		assert_eq!(Locale::parse("de-DE"), None);
		assert_eq!(Locale::parse("fr"), None);
		assert_eq!(Locale::parse(""), None);
	}

	#[test]
	fn code_round_trips_for_every_locale() {
		for locale in LOCALES {
			assert_eq!(Locale::parse(locale.code()), Some(locale));
			assert_eq!(locale.to_string(), locale.code());
		}
	}

	#[test]
	fn from_str_reports_the_rejected_code() {
		let err = "fr".parse::<Locale>().unwrap_err();
		assert_eq!(err, UnsupportedLocale("fr".to_string()));
		assert_eq!(err.to_string(), "unsupported locale: fr");
	}

	#[test]
	fn default_is_english() {
		assert_eq!(Locale::default(), Locale::En);
		assert_eq!(DEFAULT_LOCALE, Locale::En);
	}

	#[test]
	fn available_locales_lists_default_first() {
		assert_eq!(available_locales(), vec!["en", "nl", "de"]);
		assert!(is_supported("nl"));
		assert!(!is_supported("es"));
	}

	#[test]
	fn serde_uses_codes() {
		assert_eq!(serde_json::to_string(&Locale::Nl).unwrap(), "\"nl\"");
		let parsed: Locale = serde_json::from_str("\"de\"").unwrap();
		assert_eq!(parsed, Locale::De);
		assert!(serde_json::from_str::<Locale>("\"fr\"").is_err());
	}
}
