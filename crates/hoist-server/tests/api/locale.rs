// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::http::{header, StatusCode};

use super::support::{body_json, header_str, TestApp};

#[tokio::test]
async fn test_switch_sets_cookie_and_redirects() {
	let app = TestApp::new().await;

	let response = app
		.get("/api/locale?lang=nl&redirect=/en/cranes/potain-mdt-219")
		.await;
	assert_eq!(response.status(), StatusCode::SEE_OTHER);
	assert_eq!(
		header_str(&response, header::LOCATION),
		Some("/nl/cranes/potain-mdt-219")
	);
	let cookie = header_str(&response, header::SET_COOKIE).unwrap();
	assert!(cookie.starts_with("NEXT_LOCALE=nl;"));
	assert!(cookie.contains("Path=/"));
}

#[tokio::test]
async fn test_switch_ignores_offsite_redirect() {
	let app = TestApp::new().await;

	let response = app
		.get("/api/locale?lang=de&redirect=//evil.example/phish")
		.await;
	assert_eq!(response.status(), StatusCode::SEE_OTHER);
	assert_eq!(header_str(&response, header::LOCATION), Some("/de"));
}

#[tokio::test]
async fn test_switch_with_control_characters_goes_home() {
	let app = TestApp::new().await;

	for redirect in ["/x%0A", "/en/cranes%0D%0ASet-Cookie:%20admin=1"] {
		let response = app
			.get(&format!("/api/locale?lang=nl&redirect={redirect}"))
			.await;
		assert_eq!(response.status(), StatusCode::SEE_OTHER);
		assert_eq!(header_str(&response, header::LOCATION), Some("/nl"));
	}
}

#[tokio::test]
async fn test_switch_rejects_unsupported_locale() {
	let app = TestApp::new().await;

	let response = app.get("/api/locale?lang=fr").await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert!(header_str(&response, header::SET_COOKIE).is_none());
	assert_eq!(body_json(response).await["error"], "unsupported_locale");

	let response = app.get("/api/locale").await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(body_json(response).await["error"], "invalid_query");
}

#[tokio::test]
async fn test_list_locales() {
	let app = TestApp::new().await;

	let body = body_json(app.get("/api/locales").await).await;
	assert_eq!(body["default"], "en");
	let codes: Vec<&str> = body["locales"]
		.as_array()
		.unwrap()
		.iter()
		.map(|l| l["code"].as_str().unwrap())
		.collect();
	assert_eq!(codes, ["en", "nl", "de"]);
}

#[tokio::test]
async fn test_api_paths_get_no_locale_cookie() {
	let app = TestApp::new().await;

	let response = app
		.get_with("/api/cranes", &[("accept-language", "de-DE,de;q=0.9")])
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	assert!(header_str(&response, header::SET_COOKIE).is_none());
}
