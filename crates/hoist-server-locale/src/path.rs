// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Path helpers shared by the resolver and page link generation.

use hoist_common_i18n::Locale;

/// Collapse repeated separators and strip the trailing separator.
///
/// The result always starts with `/`; the root stays `/`.
///
/// ```
/// use hoist_server_locale::normalize_path;
///
/// assert_eq!(normalize_path("//nl///cranes/"), "/nl/cranes");
/// assert_eq!(normalize_path(""), "/");
/// assert_eq!(normalize_path("///"), "/");
/// ```
pub fn normalize_path(path: &str) -> String {
	let mut normalized = String::with_capacity(path.len() + 1);
	for segment in path.split('/').filter(|s| !s.is_empty()) {
		normalized.push('/');
		normalized.push_str(segment);
	}
	if normalized.is_empty() {
		normalized.push('/');
	}
	normalized
}

/// Split a path into its locale prefix, if any, and the normalized remainder.
///
/// Only an exact, case-sensitive match of a supported code counts as a
/// prefix. Anything else (`fr`, `EN`, `en-us`) is left as a literal segment.
///
/// ```
/// use hoist_common_i18n::Locale;
/// use hoist_server_locale::split_locale_prefix;
///
/// assert_eq!(split_locale_prefix("/nl/cranes"), (Some(Locale::Nl), "/cranes".to_string()));
/// assert_eq!(split_locale_prefix("/de"), (Some(Locale::De), "/".to_string()));
/// assert_eq!(split_locale_prefix("/fr/page"), (None, "/fr/page".to_string()));
/// ```
pub fn split_locale_prefix(path: &str) -> (Option<Locale>, String) {
	let normalized = normalize_path(path);
	let mut segments = normalized[1..].splitn(2, '/');

	match segments.next().and_then(Locale::parse) {
		Some(locale) => {
			let rest = segments.next().map(|r| format!("/{r}")).unwrap_or_else(|| "/".to_string());
			(Some(locale), rest)
		}
		None => (None, normalized),
	}
}

/// Build the normalized path for `rest` under `locale`. `/` becomes `/{locale}`.
pub fn prefix_path(locale: Locale, rest: &str) -> String {
	normalize_path(&format!("/{}/{}", locale.code(), rest))
}
