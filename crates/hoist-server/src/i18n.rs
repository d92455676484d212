// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Internationalization helpers for API responses.
//!
//! API routes bypass locale routing, so their messages are translated into
//! the primary language of `Accept-Language`, falling back to the server's
//! default locale.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use http::header::ACCEPT_LANGUAGE;
use http::request::Parts;
use hoist_common_i18n::{negotiate, Locale};

use crate::api::AppState;

// Re-export commonly used i18n functions for convenience
pub use hoist_common_i18n::{t, t_fmt};

/// Locale for API response messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiLocale(pub Locale);

/// Negotiate the response locale from request headers.
pub fn request_locale(headers: &http::HeaderMap, default_locale: Locale) -> Locale {
	negotiate(
		headers.get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok()),
		default_locale,
	)
}

impl FromRequestParts<AppState> for ApiLocale {
	type Rejection = Infallible;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		Ok(ApiLocale(request_locale(&parts.headers, state.default_locale)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use http::{HeaderMap, HeaderValue};

	#[test]
	fn primary_tag_decides() {
		let mut headers = HeaderMap::new();
		headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("nl-BE,nl;q=0.9,en;q=0.5"));
		assert_eq!(request_locale(&headers, Locale::En), Locale::Nl);
	}

	#[test]
	fn unsupported_or_missing_falls_back() {
		let mut headers = HeaderMap::new();
		assert_eq!(request_locale(&headers, Locale::De), Locale::De);
		headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("fr-FR"));
		assert_eq!(request_locale(&headers, Locale::En), Locale::En);
	}
}
