// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The locale routing decision.

use hoist_common_i18n::{primary_language_tag, Locale};
use http::StatusCode;

use crate::bypass::BypassRules;
use crate::path::{prefix_path, split_locale_prefix};

/// HTTP status used for locale redirects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedirectKind {
	/// `307 Temporary Redirect`.
	#[default]
	Temporary,
	/// `308 Permanent Redirect`.
	Permanent,
}

impl RedirectKind {
	pub fn status(self) -> StatusCode {
		match self {
			RedirectKind::Temporary => StatusCode::TEMPORARY_REDIRECT,
			RedirectKind::Permanent => StatusCode::PERMANENT_REDIRECT,
		}
	}
}

/// Where the preferred locale came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleSource {
	Cookie,
	Url,
	Header,
	Default,
}

impl LocaleSource {
	pub fn as_str(self) -> &'static str {
		match self {
			LocaleSource::Cookie => "cookie",
			LocaleSource::Url => "url",
			LocaleSource::Header => "header",
			LocaleSource::Default => "default",
		}
	}
}

#[derive(Debug, Clone)]
pub struct LocaleResolverConfig {
	pub default_locale: Locale,
	pub bypass: BypassRules,
	/// Re-send the cookie on pass-through even when it already matches.
	pub refresh_cookie: bool,
	pub redirect: RedirectKind,
}

impl Default for LocaleResolverConfig {
	fn default() -> Self {
		Self {
			default_locale: Locale::default(),
			bypass: BypassRules::default(),
			refresh_cookie: true,
			redirect: RedirectKind::default(),
		}
	}
}

/// The parts of an inbound request the resolver looks at.
///
/// `cookie` is the already-validated preference cookie; unsupported values
/// must be passed as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleRequest<'a> {
	pub path: &'a str,
	pub query: Option<&'a str>,
	pub cookie: Option<Locale>,
	pub accept_language: Option<&'a str>,
}

impl<'a> LocaleRequest<'a> {
	pub fn new(path: &'a str) -> Self {
		Self {
			path,
			query: None,
			cookie: None,
			accept_language: None,
		}
	}

	pub fn with_query(mut self, query: Option<&'a str>) -> Self {
		self.query = query;
		self
	}

	pub fn with_cookie(mut self, cookie: Option<Locale>) -> Self {
		self.cookie = cookie;
		self
	}

	pub fn with_accept_language(mut self, accept_language: Option<&'a str>) -> Self {
		self.accept_language = accept_language;
		self
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
	/// Excluded path: no locale handling and no cookie.
	Bypass,
	/// The URL already carries the preferred locale.
	PassThrough {
		locale: Locale,
		source: LocaleSource,
		set_cookie: Option<Locale>,
	},
	/// The URL must move under the preferred locale.
	Redirect {
		location: String,
		kind: RedirectKind,
		locale: Locale,
		source: LocaleSource,
		set_cookie: Option<Locale>,
	},
}

impl Resolution {
	/// The locale to store in the preference cookie, if any.
	pub fn set_cookie(&self) -> Option<Locale> {
		match self {
			Resolution::Bypass => None,
			Resolution::PassThrough { set_cookie, .. } | Resolution::Redirect { set_cookie, .. } => {
				*set_cookie
			}
		}
	}

	pub fn locale(&self) -> Option<Locale> {
		match self {
			Resolution::Bypass => None,
			Resolution::PassThrough { locale, .. } | Resolution::Redirect { locale, .. } => {
				Some(*locale)
			}
		}
	}

	pub fn is_redirect(&self) -> bool {
		matches!(self, Resolution::Redirect { .. })
	}
}

/// Decides, per request, between bypass, pass-through and redirect.
///
/// Precedence for the preferred locale is cookie, then URL prefix, then the
/// primary `Accept-Language` tag, then the configured default. Every
/// redirect target resolves to a pass-through on the next request, with or
/// without the cookie it set.
#[derive(Debug, Clone, Default)]
pub struct LocaleResolver {
	config: LocaleResolverConfig,
}

impl LocaleResolver {
	pub fn new(config: LocaleResolverConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &LocaleResolverConfig {
		&self.config
	}

	pub fn resolve(&self, request: &LocaleRequest<'_>) -> Resolution {
		if self.config.bypass.matches(request.path) {
			return Resolution::Bypass;
		}

		let (url_locale, rest) = split_locale_prefix(request.path);
		let (locale, source) = self.preference(request, url_locale);

		let set_cookie = match source {
			LocaleSource::Cookie if !self.config.refresh_cookie => None,
			_ => Some(locale),
		};

		if url_locale == Some(locale) {
			return Resolution::PassThrough {
				locale,
				source,
				set_cookie,
			};
		}

		let mut location = prefix_path(locale, &rest);
		if let Some(query) = request.query.filter(|q| !q.is_empty()) {
			location.push('?');
			location.push_str(query);
		}

		Resolution::Redirect {
			location,
			kind: self.config.redirect,
			locale,
			source,
			set_cookie,
		}
	}

	fn preference(
		&self,
		request: &LocaleRequest<'_>,
		url_locale: Option<Locale>,
	) -> (Locale, LocaleSource) {
		if let Some(locale) = request.cookie {
			return (locale, LocaleSource::Cookie);
		}
		if let Some(locale) = url_locale {
			return (locale, LocaleSource::Url);
		}
		if let Some(locale) = request
			.accept_language
			.and_then(primary_language_tag)
			.and_then(|tag| Locale::parse(&tag))
		{
			return (locale, LocaleSource::Header);
		}
		(self.config.default_locale, LocaleSource::Default)
	}
}
