// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Sitemap and robots.txt.

use axum::{extract::State, http::header, response::IntoResponse};
use hoist_server_seo::{ChangeFreq, RobotsTxt, SitemapBuilder, SitemapEntry};

use crate::{api::AppState, error::ServerError, pages::STATIC_PAGES};

fn static_entry(path: &str) -> SitemapEntry {
	let (freq, priority) = match path {
		"/" => (ChangeFreq::Daily, 1.0),
		"/cranes" => (ChangeFreq::Daily, 0.9),
		_ => (ChangeFreq::Monthly, 0.5),
	};
	SitemapEntry::new(path).changefreq(freq).priority(priority)
}

#[utoipa::path(
    get,
    path = "/sitemap.xml",
    responses(
        (status = 200, description = "Sitemap with hreflang alternates", content_type = "application/xml")
    ),
    tag = "seo"
)]
/// GET /sitemap.xml - Every page in every locale.
#[tracing::instrument(skip(state))]
pub async fn sitemap_xml(State(state): State<AppState>) -> Result<impl IntoResponse, ServerError> {
	let cranes = state.cranes.list_sitemap_entries().await?;

	let mut builder = SitemapBuilder::new(state.base_url.clone(), state.default_locale);
	builder.extend(STATIC_PAGES.iter().map(|path| static_entry(path)));
	builder.extend(cranes.into_iter().map(|crane| {
		SitemapEntry::new(format!("/cranes/{}", crane.slug))
			.lastmod(crane.updated_at)
			.changefreq(ChangeFreq::Weekly)
			.priority(0.8)
	}));

	let xml = builder.render()?;
	tracing::debug!(urls = builder.url_count(), "sitemap rendered");

	Ok((
		[(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
		xml,
	))
}

#[utoipa::path(
    get,
    path = "/robots.txt",
    responses(
        (status = 200, description = "Crawler rules", content_type = "text/plain")
    ),
    tag = "seo"
)]
/// GET /robots.txt
pub async fn robots_txt(State(state): State<AppState>) -> impl IntoResponse {
	(
		[(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
		RobotsTxt::new(&state.base_url).render(),
	)
}
