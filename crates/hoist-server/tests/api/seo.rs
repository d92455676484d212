// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::http::{header, StatusCode};
use hoist_server::pages::STATIC_PAGES;

use super::support::{body_text, header_str, TestApp};

#[tokio::test]
async fn test_sitemap_lists_every_page_in_every_locale() {
	let app = TestApp::new().await;
	app.create_crane("potain-mdt-219").await;
	app.create_crane("wolff-7534-clear").await;

	let response = app.get("/sitemap.xml").await;
	assert_eq!(response.status(), StatusCode::OK);
	assert!(header_str(&response, header::CONTENT_TYPE)
		.unwrap()
		.starts_with("application/xml"));
	assert!(header_str(&response, header::SET_COOKIE).is_none());

	let xml = body_text(response).await;
	assert_eq!(xml.matches("<url>").count(), (STATIC_PAGES.len() + 2) * 3);
	for code in ["en", "nl", "de"] {
		assert!(xml.contains(&format!(
			"<loc>https://cranes.example/{code}/cranes/potain-mdt-219</loc>"
		)));
	}
	assert!(xml.contains("<loc>https://cranes.example/nl</loc>"));
	assert!(xml.contains("hreflang=\"x-default\""));
	assert!(xml.contains("<lastmod>"));
}

#[tokio::test]
async fn test_sitemap_follows_slug_changes() {
	let app = TestApp::new().await;
	let created = app.create_crane("potain-mdt-219").await;
	let id = created["id"].as_str().unwrap();
	app.patch_json(
		&format!("/api/cranes/{id}"),
		true,
		serde_json::json!({ "slug": "potain-mdt-219-j10" }),
	)
	.await;

	let xml = body_text(app.get("/sitemap.xml").await).await;
	assert!(xml.contains("/en/cranes/potain-mdt-219-j10</loc>"));
	assert!(!xml.contains("/en/cranes/potain-mdt-219</loc>"));
}

#[tokio::test]
async fn test_robots_txt() {
	let app = TestApp::new().await;

	let response = app.get("/robots.txt").await;
	assert_eq!(response.status(), StatusCode::OK);
	assert!(header_str(&response, header::CONTENT_TYPE)
		.unwrap()
		.starts_with("text/plain"));
	let text = body_text(response).await;
	assert!(text.contains("Disallow: /api/\n"));
	assert!(text.contains("Sitemap: https://cranes.example/sitemap.xml\n"));
}
