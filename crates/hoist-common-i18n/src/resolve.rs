// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale negotiation.

use crate::locale::Locale;

/// Extract the primary language tag of an `Accept-Language` header.
///
/// Only the first listed tag is considered: the substring before the first
/// `-`, `_`, `;` or `,`, trimmed and lowercased. Quality values and later
/// tags are ignored.
///
/// ```
/// use hoist_common_i18n::primary_language_tag;
///
/// assert_eq!(primary_language_tag("de-DE,de;q=0.9"), Some("de".to_string()));
/// assert_eq!(primary_language_tag(" NL "), Some("nl".to_string()));
/// assert_eq!(primary_language_tag(""), None);
/// ```
pub fn primary_language_tag(accept_language: &str) -> Option<String> {
	let tag = accept_language
		.split(['-', '_', ';', ','])
		.next()
		.unwrap_or_default()
		.trim()
		.to_ascii_lowercase();

	if tag.is_empty() {
		None
	} else {
		Some(tag)
	}
}

/// Pick a supported locale from an `Accept-Language` header, or `fallback`.
pub fn negotiate(accept_language: Option<&str>, fallback: Locale) -> Locale {
	accept_language
		.and_then(primary_language_tag)
		.and_then(|tag| Locale::parse(&tag))
		.unwrap_or(fallback)
}

/// Resolve the effective locale from an explicit preference and the server default.
///
/// Resolution order:
/// 1. the preference, if it names a supported locale
/// 2. the server default, if supported
/// 3. English
pub fn resolve_locale(preference: Option<&str>, server_default: &str) -> Locale {
	preference
		.and_then(Locale::parse)
		.or_else(|| Locale::parse(server_default))
		.unwrap_or_default()
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn primary_tag_of_region_qualified_list() {
		assert_eq!(primary_language_tag("de-DE,de;q=0.9,en;q=0.8").as_deref(), Some("de"));
		assert_eq!(primary_language_tag("nl_NL").as_deref(), Some("nl"));
		assert_eq!(primary_language_tag("en;q=0.5").as_deref(), Some("en"));
	}

	#[test]
	fn primary_tag_ignores_later_tags() {
		// The first tag is unsupported; later supported tags are not consulted.
		assert_eq!(negotiate(Some("fr-FR,de;q=0.9"), Locale::En), Locale::En);
	}

	#[test]
	fn primary_tag_is_lowercased_and_trimmed() {
		assert_eq!(primary_language_tag("  DE-at").as_deref(), Some("de"));
		assert_eq!(negotiate(Some("NL"), Locale::En), Locale::Nl);
	}

	#[test]
	fn blank_headers_yield_nothing() {
		assert_eq!(primary_language_tag(""), None);
		assert_eq!(primary_language_tag("  ,de"), None);
		assert_eq!(primary_language_tag("-DE"), None);
	}

	#[test]
	fn negotiate_falls_back() {
		assert_eq!(negotiate(None, Locale::Nl), Locale::Nl);
		assert_eq!(negotiate(Some("*"), Locale::En), Locale::En);
		assert_eq!(negotiate(Some("de-CH"), Locale::En), Locale::De);
	}

	#[test]
	fn resolve_locale_prefers_user_then_server_then_english() {
		assert_eq!(resolve_locale(Some("nl"), "de"), Locale::Nl);
		assert_eq!(resolve_locale(None, "de"), Locale::De);
		assert_eq!(resolve_locale(Some("fr"), "de"), Locale::De);
		assert_eq!(resolve_locale(Some("fr"), "xx"), Locale::En);
		assert_eq!(resolve_locale(Some(""), ""), Locale::En);
	}

	proptest! {
		#[test]
		fn negotiate_never_panics(header in ".*") {
			let _ = negotiate(Some(&header), Locale::En);
		}

		#[test]
		fn primary_tag_has_no_separators(header in ".*") {
			if let Some(tag) = primary_language_tag(&header) {
				prop_assert!(!tag.contains(['-', '_', ';', ',']));
				prop_assert_eq!(tag.trim(), tag.as_str());
			}
		}
	}
}
