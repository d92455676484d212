// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Message catalog and translation functions.

use std::collections::HashMap;

use gettext::Catalog;
use once_cell::sync::Lazy;

use crate::locale::{Locale, DEFAULT_LOCALE};

const EN_MO: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/en.mo"));
const NL_MO: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/nl.mo"));
const DE_MO: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/de.mo"));

static CATALOGS: Lazy<HashMap<Locale, Catalog>> = Lazy::new(|| {
	let mut map = HashMap::new();
	for (locale, mo) in [(Locale::En, EN_MO), (Locale::Nl, NL_MO), (Locale::De, DE_MO)] {
		match Catalog::parse(mo) {
			Ok(catalog) => {
				map.insert(locale, catalog);
			}
			Err(e) => tracing::error!(locale = %locale, error = %e, "failed to parse translation catalog"),
		}
	}
	map
});

/// gettext hands the msgid back when it has no entry.
fn lookup(locale: Locale, msgid: &str) -> Option<String> {
	let catalog = CATALOGS.get(&locale)?;
	let translated = catalog.gettext(msgid);
	(translated != msgid).then(|| translated.to_string())
}

/// Translate a message for the given locale.
///
/// Falls back to English if the translation is missing, then to the msgid itself.
///
/// ```
/// use hoist_common_i18n::{t, Locale};
///
/// assert_eq!(t(Locale::Nl, "nav.cranes"), "Kranen");
/// assert_eq!(t(Locale::De, "no.such.key"), "no.such.key");
/// ```
pub fn t(locale: Locale, msgid: &str) -> String {
	if let Some(translated) = lookup(locale, msgid) {
		return translated;
	}

	if locale != DEFAULT_LOCALE {
		if let Some(translated) = lookup(DEFAULT_LOCALE, msgid) {
			tracing::debug!(locale = %locale, msgid, "missing translation, using default locale");
			return translated;
		}
	}

	msgid.to_string()
}

/// Translate a message with `{name}` placeholders substituted from `args`.
pub fn t_fmt(locale: Locale, msgid: &str, args: &[(&str, &str)]) -> String {
	let mut result = t(locale, msgid);
	for (name, value) in args {
		result = result.replace(&format!("{{{name}}}"), value);
	}
	result
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	const SOURCES: [(Locale, &str); 3] = [
		(Locale::En, include_str!("../locales/en/messages.po")),
		(Locale::Nl, include_str!("../locales/nl/messages.po")),
		(Locale::De, include_str!("../locales/de/messages.po")),
	];

	fn msgids(po: &str) -> Vec<&str> {
		po.lines()
			.filter_map(|line| line.strip_prefix("msgid \""))
			.filter_map(|rest| rest.strip_suffix('"'))
			.filter(|id| !id.is_empty())
			.collect()
	}

	#[test]
	fn every_catalog_loads() {
		for (locale, _) in SOURCES {
			assert!(CATALOGS.contains_key(&locale), "no catalog for {locale}");
		}
	}

	#[test]
	fn every_locale_has_the_same_keys() {
		let en: HashSet<_> = msgids(SOURCES[0].1).into_iter().collect();
		for (locale, po) in &SOURCES[1..] {
			let other: HashSet<_> = msgids(po).into_iter().collect();
			assert_eq!(en, other, "catalog {locale} is out of sync with en");
		}
	}

	#[test]
	fn every_key_is_translated() {
		for (locale, po) in SOURCES {
			let ids = msgids(po);
			let unique: HashSet<_> = ids.iter().collect();
			assert_eq!(unique.len(), ids.len(), "duplicate msgid in {locale}");
			for id in ids {
				assert!(lookup(locale, id).is_some(), "{locale} has no entry for {id}");
			}
		}
	}

	#[test]
	fn translates_per_locale() {
		assert_eq!(t(Locale::En, "nav.about"), "About us");
		assert_eq!(t(Locale::Nl, "nav.about"), "Over ons");
		assert_eq!(t(Locale::De, "nav.about"), "Über uns");
	}

	#[test]
	fn unknown_key_returns_msgid() {
		assert_eq!(t(Locale::Nl, "page.missing"), "page.missing");
	}

	#[test]
	fn t_fmt_substitutes_named_args() {
		assert_eq!(
			t_fmt(Locale::En, "api.crane.slug_conflict", &[("slug", "liebherr-132-ec-h")]),
			"A crane with slug 'liebherr-132-ec-h' already exists"
		);
		assert_eq!(
			t_fmt(Locale::De, "page.crane.title", &[("name", "Potain MDT 219")]),
			"Potain MDT 219 zu verkaufen"
		);
	}

	#[test]
	fn t_fmt_leaves_unknown_placeholders() {
		assert_eq!(
			t_fmt(Locale::En, "api.invalid_field", &[("other", "x")]),
			"Invalid value for field '{field}'"
		);
	}
}
