// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Language switcher and locale listing.

use axum::{
	extract::{rejection::QueryRejection, Query, State},
	http::{header, StatusCode},
	response::IntoResponse,
	Json,
};
use hoist_common_i18n::{Locale, LOCALES};
use hoist_server_locale::{prefix_path, split_locale_prefix};

pub use hoist_server_api::{LocaleInfo, LocaleSwitchQuery, LocalesResponse};

use crate::{
	api::AppState,
	api_response::bad_request,
	error::ErrorResponse,
	i18n::{t, t_fmt, ApiLocale},
};

/// Where the switcher sends the visitor for `lang`.
///
/// Only same-site absolute paths are honoured; anything else (including
/// protocol-relative `//host` URLs) goes to the home page, as does a path
/// that cannot be sent back in a `Location` header. The locale prefix of the
/// target is replaced and its query string kept.
pub fn switch_target(lang: Locale, redirect: Option<&str>) -> String {
	let raw = redirect
		.filter(|r| r.starts_with('/') && !r.starts_with("//") && !r.contains('\\'))
		.filter(|r| r.bytes().all(|b| b.is_ascii_graphic()))
		.unwrap_or("/");

	let (path, query) = match raw.split_once('?') {
		Some((path, query)) => (path, Some(query)),
		None => (raw, None),
	};
	let (_, rest) = split_locale_prefix(path);
	let target = prefix_path(lang, &rest);

	match query.filter(|q| !q.is_empty()) {
		Some(query) => format!("{target}?{query}"),
		None => target,
	}
}

#[utoipa::path(
    get,
    path = "/api/locale",
    params(LocaleSwitchQuery),
    responses(
        (status = 303, description = "Locale cookie set, redirecting to the page in the new locale"),
        (status = 400, description = "Unsupported locale", body = ErrorResponse)
    ),
    tag = "locale"
)]
/// GET /api/locale - Switch language: set the locale cookie and redirect.
#[tracing::instrument(skip(state, query))]
pub async fn switch_locale(
	ApiLocale(locale): ApiLocale,
	State(state): State<AppState>,
	query: Result<Query<LocaleSwitchQuery>, QueryRejection>,
) -> impl IntoResponse {
	let Query(query) = match query {
		Ok(q) => q,
		Err(e) => {
			tracing::debug!(error = %e, "rejected locale switch query");
			return bad_request::<ErrorResponse>("invalid_query", t(locale, "api.invalid_query"))
				.into_response();
		}
	};

	let Some(lang) = Locale::parse(&query.lang) else {
		return bad_request::<ErrorResponse>(
			"unsupported_locale",
			t_fmt(locale, "api.locale.unsupported", &[("lang", query.lang.as_str())]),
		)
		.into_response();
	};

	let target = switch_target(lang, query.redirect.as_deref());
	tracing::debug!(%lang, %target, "switching locale");

	(
		StatusCode::SEE_OTHER,
		[
			(header::LOCATION, target),
			(header::SET_COOKIE, state.locale_cookie.header_value(lang)),
		],
	)
		.into_response()
}

#[utoipa::path(
    get,
    path = "/api/locales",
    responses(
        (status = 200, description = "Supported locales", body = LocalesResponse)
    ),
    tag = "locale"
)]
/// GET /api/locales - Supported locales and the server default.
pub async fn list_locales(State(state): State<AppState>) -> impl IntoResponse {
	Json(LocalesResponse {
		locales: LOCALES
			.iter()
			.map(|l| LocaleInfo {
				code: l.code().to_string(),
				name: l.native_name().to_string(),
			})
			.collect(),
		default: state.default_locale.code().to_string(),
	})
}
