// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::http::{header, StatusCode};
use serde_json::json;

use super::support::{body_text, header_str, TestApp};

#[tokio::test]
async fn test_bare_paths_redirect_to_default_locale() {
	let app = TestApp::new().await;

	let response = app.get("/").await;
	assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
	assert_eq!(header_str(&response, header::LOCATION), Some("/en"));
	assert!(header_str(&response, header::SET_COOKIE)
		.unwrap()
		.starts_with("NEXT_LOCALE=en;"));

	let response = app.get("/cranes?crane_type=luffing_jib").await;
	assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
	assert_eq!(
		header_str(&response, header::LOCATION),
		Some("/en/cranes?crane_type=luffing_jib")
	);
}

#[tokio::test]
async fn test_accept_language_picks_redirect_target() {
	let app = TestApp::new().await;

	let response = app
		.get_with("/cranes", &[("accept-language", "nl-BE,nl;q=0.9,en;q=0.8")])
		.await;
	assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
	assert_eq!(header_str(&response, header::LOCATION), Some("/nl/cranes"));
}

#[tokio::test]
async fn test_cookie_overrides_url_locale() {
	let app = TestApp::new().await;

	let response = app
		.get_with("/en/about", &[("cookie", "theme=dark; NEXT_LOCALE=de")])
		.await;
	assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
	assert_eq!(header_str(&response, header::LOCATION), Some("/de/about"));

	let response = app
		.get_with("/de/about", &[("cookie", "NEXT_LOCALE=de")])
		.await;
	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unsupported_cookie_is_ignored() {
	let app = TestApp::new().await;

	let response = app
		.get_with("/nl/about", &[("cookie", "NEXT_LOCALE=fr")])
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	assert!(header_str(&response, header::SET_COOKIE)
		.unwrap()
		.starts_with("NEXT_LOCALE=nl;"));
}

#[tokio::test]
async fn test_unsupported_segment_is_kept_in_redirect() {
	let app = TestApp::new().await;

	let response = app.get("/fr/cranes").await;
	assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
	assert_eq!(header_str(&response, header::LOCATION), Some("/en/fr/cranes"));
}

#[tokio::test]
async fn test_crane_detail_page() {
	let app = TestApp::new().await;
	app.create_crane("potain-mdt-219").await;

	let response = app.get("/nl/cranes/potain-mdt-219").await;
	assert_eq!(response.status(), StatusCode::OK);
	assert!(header_str(&response, header::CONTENT_TYPE)
		.unwrap()
		.starts_with("text/html"));
	let html = body_text(response).await;
	assert!(html.contains("<html lang=\"nl\">"));
	assert!(html.contains("<title>Potain MDT 219 te koop | Hoist Torenkranen</title>"));
	assert!(html.contains(
		"<link rel=\"canonical\" href=\"https://cranes.example/nl/cranes/potain-mdt-219\">"
	));
	for code in ["en", "nl", "de"] {
		assert!(html.contains(&format!(
			"hreflang=\"{code}\" href=\"https://cranes.example/{code}/cranes/potain-mdt-219\""
		)));
	}
	assert!(html.contains("hreflang=\"x-default\""));
	assert!(!html.contains("noindex"));
}

#[tokio::test]
async fn test_legacy_slug_redirects_permanently() {
	let app = TestApp::new().await;
	let created = app.create_crane("liebherr-132-ec-h").await;
	let id = created["id"].as_str().unwrap();
	let response = app
		.patch_json(
			&format!("/api/cranes/{id}"),
			true,
			json!({ "slug": "liebherr-132-ec-h-8" }),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let response = app.get("/de/cranes/liebherr-132-ec-h").await;
	assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
	assert_eq!(
		header_str(&response, header::LOCATION),
		Some("/de/cranes/liebherr-132-ec-h-8")
	);
}

#[tokio::test]
async fn test_unknown_crane_renders_localized_404() {
	let app = TestApp::new().await;

	let response = app.get("/de/cranes/does-not-exist").await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
	let html = body_text(response).await;
	assert!(html.contains("<html lang=\"de\">"));
	assert!(html.contains("noindex"));
	assert!(!html.contains("rel=\"canonical\""));
}

#[tokio::test]
async fn test_unmatched_path_renders_404_page() {
	let app = TestApp::new().await;

	let response = app.get("/nl/does/not/exist").await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
	let html = body_text(response).await;
	assert!(html.contains("<html lang=\"nl\">"));
	assert!(html.contains("Pagina niet gevonden"));
}

#[tokio::test]
async fn test_home_lists_featured_cranes() {
	let app = TestApp::new().await;
	app.create_crane("potain-mdt-219").await;

	let response = app.get("/en").await;
	assert_eq!(response.status(), StatusCode::OK);
	let html = body_text(response).await;
	assert!(html.contains("/en/cranes/potain-mdt-219"));
}

#[tokio::test]
async fn test_static_assets_bypass_locale_routing() {
	let app = TestApp::new().await;

	let response = app.get("/static/site.css").await;
	assert_eq!(response.status(), StatusCode::OK);
	assert!(header_str(&response, header::SET_COOKIE).is_none());
	assert_eq!(body_text(response).await, "body { margin: 0; }\n");
}
