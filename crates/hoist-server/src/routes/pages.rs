// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Localized HTML page handlers.
//!
//! Page routes sit behind the locale routing layer, so by the time a
//! handler runs the first path segment is a supported locale. Anything that
//! still fails to parse (bypassed paths such as `/_internal`) gets the 404
//! page.

use axum::{
	extract::{Path, Request, State},
	http::{header, StatusCode},
	response::{Html, IntoResponse, Response},
};
use hoist_common_i18n::Locale;
use hoist_server_db::{CraneFilter, SlugMatch};
use hoist_server_locale::{split_locale_prefix, ResolvedLocale};

use crate::{
	api::AppState,
	error::ServerError,
	pages::{
		about_page, contact_page, crane_detail_page, crane_list_page, crane_path, home_page,
		not_found_page, render_document, Page, PageContext,
	},
	pagination::MAX_PAGE_SIZE,
};

const FEATURED_ON_HOME: u32 = 6;

fn render(state: &AppState, locale: Locale, rest: &str, page: Page, status: StatusCode) -> Response {
	let ctx = PageContext {
		base: &state.base_url,
		default_locale: state.default_locale,
		locale,
		rest,
	};
	(status, Html(render_document(&ctx, &page))).into_response()
}

fn not_found_response(state: &AppState, locale: Locale, rest: &str) -> Response {
	render(state, locale, rest, not_found_page(locale), StatusCode::NOT_FOUND)
}

/// Parse the locale path segment; `Err` carries the 404 page to return.
fn page_locale(state: &AppState, segment: &str) -> Result<Locale, Response> {
	Locale::parse(segment).ok_or_else(|| {
		tracing::debug!(%segment, "page requested under unsupported locale segment");
		not_found_response(state, state.default_locale, &format!("/{segment}"))
	})
}

/// GET /{locale} - Home page with featured cranes.
#[tracing::instrument(skip(state))]
pub async fn home(
	State(state): State<AppState>,
	Path(locale): Path<String>,
) -> Result<Response, ServerError> {
	let locale = match page_locale(&state, &locale) {
		Ok(l) => l,
		Err(resp) => return Ok(resp),
	};

	let filter = CraneFilter {
		featured: Some(true),
		limit: FEATURED_ON_HOME,
		..Default::default()
	};
	let (featured, _) = state.cranes.list_cranes(&filter).await?;

	Ok(render(&state, locale, "/", home_page(locale, &featured), StatusCode::OK))
}

/// GET /{locale}/cranes - Inventory.
#[tracing::instrument(skip(state))]
pub async fn crane_index(
	State(state): State<AppState>,
	Path(locale): Path<String>,
) -> Result<Response, ServerError> {
	let locale = match page_locale(&state, &locale) {
		Ok(l) => l,
		Err(resp) => return Ok(resp),
	};

	let filter = CraneFilter {
		limit: MAX_PAGE_SIZE as u32,
		..Default::default()
	};
	let (cranes, total) = state.cranes.list_cranes(&filter).await?;

	Ok(render(
		&state,
		locale,
		"/cranes",
		crane_list_page(locale, &cranes, total),
		StatusCode::OK,
	))
}

/// GET /{locale}/cranes/{slug} - Crane detail.
///
/// A former slug redirects to the crane's current URL using the configured
/// legacy redirect status.
#[tracing::instrument(skip(state))]
pub async fn crane_detail(
	State(state): State<AppState>,
	Path((locale, slug)): Path<(String, String)>,
) -> Result<Response, ServerError> {
	let locale = match page_locale(&state, &locale) {
		Ok(l) => l,
		Err(resp) => return Ok(resp),
	};
	let rest = format!("/cranes/{slug}");

	match state.cranes.find_by_slug_or_redirect(&slug).await? {
		Some(SlugMatch::Current(crane)) => Ok(render(
			&state,
			locale,
			&rest,
			crane_detail_page(locale, &crane),
			StatusCode::OK,
		)),
		Some(SlugMatch::Redirected { from, crane }) => {
			let target = crane_path(locale, &crane.slug);
			tracing::debug!(%from, to = %crane.slug, "legacy crane slug redirect");
			Ok((
				state.legacy_redirect.status(),
				[(header::LOCATION, target)],
			)
				.into_response())
		}
		None => Ok(not_found_response(&state, locale, &rest)),
	}
}

/// GET /{locale}/about
pub async fn about(State(state): State<AppState>, Path(locale): Path<String>) -> Response {
	match page_locale(&state, &locale) {
		Ok(locale) => render(&state, locale, "/about", about_page(locale), StatusCode::OK),
		Err(resp) => resp,
	}
}

/// GET /{locale}/contact
pub async fn contact(State(state): State<AppState>, Path(locale): Path<String>) -> Response {
	match page_locale(&state, &locale) {
		Ok(locale) => render(&state, locale, "/contact", contact_page(locale), StatusCode::OK),
		Err(resp) => resp,
	}
}

/// Fallback for every unmatched path: the localized 404 page.
pub async fn not_found(State(state): State<AppState>, request: Request) -> Response {
	let (prefix, rest) = split_locale_prefix(request.uri().path());
	let locale = prefix
		.or_else(|| {
			request
				.extensions()
				.get::<ResolvedLocale>()
				.map(|resolved| resolved.locale)
		})
		.unwrap_or(state.default_locale);

	tracing::debug!(path = %request.uri().path(), %locale, "no route matched");
	not_found_response(&state, locale, &rest)
}
