// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application state and router assembly.

use std::collections::HashMap;
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
	extract::DefaultBodyLimit,
	middleware::from_fn_with_state,
	routing::{get, post},
	Router,
};
use hoist_common_i18n::Locale;
use hoist_common_secret::SecretString;
use hoist_server_config::{LocaleConfig, RedirectPolicy, ServerConfig, UploadsConfig};
use hoist_server_db::{
	CraneRepository, CraneStore, InquiryRepository, InquiryStore, UploadRepository, UploadStore,
};
use hoist_server_locale::{
	BypassRules, LocaleCookie, LocaleResolver, LocaleResolverConfig, LocaleRoutingLayer,
	RedirectKind,
};
use hoist_server_ratelimit::{
	guard_route, BotFilter, RateLimiter, RouteGuard, RouteLimit, CONTACT_ROUTE, UPLOADS_ROUTE,
};
use hoist_server_seo::BaseUrl;
use sqlx::SqlitePool;
use tower_http::services::ServeDir;

use crate::error::ServerError;
use crate::routes;

/// Room for multipart boundaries and the `crane_id` field on top of the file.
const MULTIPART_OVERHEAD_BYTES: u64 = 64 * 1024;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
	pub pool: SqlitePool,
	pub cranes: Arc<dyn CraneStore>,
	pub uploads: Arc<dyn UploadStore>,
	pub inquiries: Arc<dyn InquiryStore>,
	pub limiter: Arc<RateLimiter>,
	pub bots: Arc<BotFilter>,
	pub rate_limit_enabled: bool,
	pub trusted_proxies: Arc<[IpAddr]>,
	pub admin_token: Option<SecretString>,
	pub base_url: BaseUrl,
	pub default_locale: Locale,
	pub locale_cookie: Arc<LocaleCookie>,
	/// Status used when a former crane slug is requested.
	pub legacy_redirect: RedirectKind,
	pub uploads_config: Arc<UploadsConfig>,
	pub static_dir: PathBuf,
}

pub fn redirect_kind(policy: RedirectPolicy) -> RedirectKind {
	match policy {
		RedirectPolicy::Temporary => RedirectKind::Temporary,
		RedirectPolicy::Permanent => RedirectKind::Permanent,
	}
}

fn locale_cookie(locale: &LocaleConfig) -> LocaleCookie {
	LocaleCookie::new(locale.cookie_name.clone())
		.with_max_age(locale.cookie_max_age_secs)
		.with_secure(locale.cookie_secure)
}

/// The locale redirect/cookie middleware wrapped around the whole router.
pub fn locale_routing_layer(locale: &LocaleConfig) -> LocaleRoutingLayer {
	let bypass = locale
		.extra_bypass_prefixes
		.iter()
		.fold(BypassRules::default(), |rules, prefix| rules.with_prefix(prefix));
	let resolver = LocaleResolver::new(LocaleResolverConfig {
		default_locale: locale.default_locale,
		bypass,
		refresh_cookie: locale.refresh_cookie,
		redirect: redirect_kind(locale.redirect),
	});
	LocaleRoutingLayer::new(resolver, locale_cookie(locale))
}

/// Build the application state from configuration.
///
/// The rate limiter is created here, once per process; the caller owns
/// starting its sweeper.
pub fn create_app_state(pool: SqlitePool, config: &ServerConfig) -> Result<AppState, ServerError> {
	let base_url = BaseUrl::parse(&config.http.base_url)?;

	let limits: HashMap<String, RouteLimit> = config
		.rate_limit
		.routes
		.iter()
		.map(|(name, limit)| {
			(
				name.clone(),
				RouteLimit::new(limit.max_requests, limit.window()),
			)
		})
		.collect();
	let bots = BotFilter::new(&config.rate_limit.bot_patterns)
		.map_err(|e| ServerError::InvalidConfig(format!("invalid bot pattern: {e}")))?;

	let locale = &config.locale;

	tracing::debug!(
		base_url = %base_url.as_str(),
		default_locale = %locale.default_locale,
		rate_limited_routes = limits.len(),
		trusted_proxies = config.rate_limit.trusted_proxies.len(),
		admin_configured = config.admin.is_configured(),
		"building application state"
	);

	Ok(AppState {
		cranes: Arc::new(CraneRepository::new(pool.clone())),
		uploads: Arc::new(UploadRepository::new(pool.clone())),
		inquiries: Arc::new(InquiryRepository::new(pool.clone())),
		pool,
		limiter: Arc::new(RateLimiter::new(limits)),
		bots: Arc::new(bots),
		rate_limit_enabled: config.rate_limit.enabled,
		trusted_proxies: Arc::from(config.rate_limit.trusted_proxies.clone()),
		admin_token: config.admin.api_token.clone(),
		base_url,
		default_locale: locale.default_locale,
		locale_cookie: Arc::new(locale_cookie(locale)),
		legacy_redirect: redirect_kind(config.redirects.legacy_slug),
		uploads_config: Arc::new(config.uploads.clone()),
		static_dir: config.paths.static_dir.clone(),
	})
}

pub fn create_router(state: AppState, locale_routing: LocaleRoutingLayer) -> Router {
	let guard = |route: &'static str| {
		RouteGuard::new(state.limiter.clone(), state.bots.clone(), route)
			.trusted_proxies(state.trusted_proxies.clone())
			.enabled(state.rate_limit_enabled)
	};
	let contact_guard = guard(CONTACT_ROUTE);
	let uploads_guard = guard(UPLOADS_ROUTE);
	let upload_body_limit = usize::try_from(
		state
			.uploads_config
			.max_bytes
			.saturating_add(MULTIPART_OVERHEAD_BYTES),
	)
	.unwrap_or(usize::MAX);

	let api = Router::new()
		.route("/health", get(routes::health::health_check))
		.route(
			"/api/cranes",
			get(routes::cranes::list_cranes).post(routes::cranes::create_crane),
		)
		.route(
			"/api/cranes/by-slug/{slug}",
			get(routes::cranes::get_crane_by_slug),
		)
		.route(
			"/api/cranes/{id}",
			get(routes::cranes::get_crane)
				.patch(routes::cranes::update_crane)
				.delete(routes::cranes::delete_crane),
		)
		.route(
			"/api/cranes/{id}/uploads",
			get(routes::uploads::list_crane_uploads),
		)
		.route(
			"/api/uploads",
			post(routes::uploads::create_upload)
				.layer(DefaultBodyLimit::max(upload_body_limit))
				.route_layer(from_fn_with_state(uploads_guard, guard_route)),
		)
		.route(
			"/api/uploads/{id}",
			get(routes::uploads::get_upload).delete(routes::uploads::delete_upload),
		)
		.route(
			"/api/contact",
			post(routes::contact::submit_contact)
				.route_layer(from_fn_with_state(contact_guard, guard_route)),
		)
		.route("/api/locale", get(routes::locale::switch_locale))
		.route("/api/locales", get(routes::locale::list_locales))
		.route("/api/openapi.json", get(routes::docs::openapi_json));

	let seo = Router::new()
		.route("/sitemap.xml", get(routes::seo::sitemap_xml))
		.route("/robots.txt", get(routes::seo::robots_txt));

	let pages = Router::new()
		.route("/{locale}", get(routes::pages::home))
		.route("/{locale}/cranes", get(routes::pages::crane_index))
		.route("/{locale}/cranes/{slug}", get(routes::pages::crane_detail))
		.route("/{locale}/about", get(routes::pages::about))
		.route("/{locale}/contact", get(routes::pages::contact));

	let uploads_dir = ServeDir::new(&state.uploads_config.dir);
	let static_dir = ServeDir::new(&state.static_dir);

	Router::new()
		.merge(api)
		.merge(seo)
		.merge(pages)
		.nest_service("/uploads", uploads_dir)
		.nest_service("/static", static_dir)
		.fallback(routes::pages::not_found)
		.layer(locale_routing)
		.with_state(state)
}
