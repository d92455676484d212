// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::http::StatusCode;
use serde_json::json;

use super::support::{body_json, crane_body, TestApp};

#[tokio::test]
async fn test_create_requires_admin_token() {
	let app = TestApp::new().await;

	let response = app
		.post_json("/api/cranes", false, crane_body("potain-mdt-219"))
		.await;
	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
	let body = body_json(response).await;
	assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_writes_rejected_without_configured_token() {
	let app = TestApp::with_config(|config| config.admin.api_token = None).await;

	let response = app
		.post_json("/api/cranes", true, crane_body("potain-mdt-219"))
		.await;
	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_and_get_crane() {
	let app = TestApp::new().await;

	let created = app.create_crane("potain-mdt-219").await;
	assert_eq!(created["slug"], "potain-mdt-219");
	assert_eq!(created["status"], "available");
	let id = created["id"].as_str().unwrap().to_string();

	let response = app.get(&format!("/api/cranes/{id}")).await;
	assert_eq!(response.status(), StatusCode::OK);
	let body = body_json(response).await;
	assert_eq!(body["name"], "Potain MDT 219");
	assert_eq!(body["max_capacity_kg"], 10000);
}

#[tokio::test]
async fn test_duplicate_slug_conflicts() {
	let app = TestApp::new().await;
	app.create_crane("liebherr-132-ec-h").await;

	let response = app
		.post_json("/api/cranes", true, crane_body("liebherr-132-ec-h"))
		.await;
	assert_eq!(response.status(), StatusCode::CONFLICT);
	let body = body_json(response).await;
	assert_eq!(body["error"], "slug_conflict");
	assert!(body["message"].as_str().unwrap().contains("liebherr-132-ec-h"));
}

#[tokio::test]
async fn test_validation_errors_are_localized() {
	let app = TestApp::new().await;

	let body = crane_body("Bad Slug!");
	let request = axum::http::Request::builder()
		.method("POST")
		.uri("/api/cranes")
		.header("authorization", format!("Bearer {}", super::support::ADMIN_TOKEN))
		.header("content-type", "application/json")
		.header("accept-language", "nl-NL,nl;q=0.9")
		.body(axum::body::Body::from(body.to_string()))
		.unwrap();
	let response = app.send(request).await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	let body = body_json(response).await;
	assert_eq!(body["error"], "invalid_slug");
	let english = hoist_common_i18n::t(hoist_common_i18n::Locale::En, "api.crane.invalid_slug");
	assert_ne!(body["message"].as_str().unwrap(), english);
}

#[tokio::test]
async fn test_rejects_non_positive_capacity() {
	let app = TestApp::new().await;

	let mut body = crane_body("wolff-7534");
	body["max_capacity_kg"] = json!(0);
	let response = app.post_json("/api/cranes", true, body).await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(body_json(response).await["error"], "invalid_capacity");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
	let app = TestApp::new().await;

	let response = app
		.post_json("/api/cranes", true, json!({ "slug": "only-a-slug" }))
		.await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(body_json(response).await["error"], "invalid_body");
}

#[tokio::test]
async fn test_invalid_and_missing_ids() {
	let app = TestApp::new().await;

	let response = app.get("/api/cranes/not-a-uuid").await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(body_json(response).await["error"], "invalid_id");

	let response = app
		.get("/api/cranes/00000000-0000-0000-0000-000000000000")
		.await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_filters_and_paginates() {
	let app = TestApp::new().await;
	app.create_crane("potain-mdt-219").await;
	app.create_crane("potain-mct-85").await;
	let mut luffer = crane_body("liebherr-357-hc-l");
	luffer["crane_type"] = json!("luffing_jib");
	luffer["featured"] = json!(false);
	assert_eq!(
		app.post_json("/api/cranes", true, luffer).await.status(),
		StatusCode::CREATED
	);

	let body = body_json(app.get("/api/cranes").await).await;
	assert_eq!(body["total"], 3);
	assert_eq!(body["limit"], 20);

	let body = body_json(app.get("/api/cranes?crane_type=luffing_jib").await).await;
	assert_eq!(body["total"], 1);
	assert_eq!(body["cranes"][0]["slug"], "liebherr-357-hc-l");

	let body = body_json(app.get("/api/cranes?limit=1&offset=1").await).await;
	assert_eq!(body["total"], 3);
	assert_eq!(body["cranes"].as_array().unwrap().len(), 1);

	let body = body_json(app.get("/api/cranes?limit=5000").await).await;
	assert_eq!(body["limit"], 100);

	let response = app.get("/api/cranes?crane_type=gantry").await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_slug_change_keeps_old_slug_reachable() {
	let app = TestApp::new().await;
	let created = app.create_crane("potain-mdt-219").await;
	let id = created["id"].as_str().unwrap();

	let response = app
		.patch_json(
			&format!("/api/cranes/{id}"),
			true,
			json!({ "slug": "potain-mdt-219-j10", "status": "reserved" }),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let body = body_json(response).await;
	assert_eq!(body["slug"], "potain-mdt-219-j10");
	assert_eq!(body["status"], "reserved");

	let body = body_json(app.get("/api/cranes/by-slug/potain-mdt-219").await).await;
	assert_eq!(body["crane"]["slug"], "potain-mdt-219-j10");
	assert_eq!(body["redirected_from"], "potain-mdt-219");

	let body = body_json(app.get("/api/cranes/by-slug/potain-mdt-219-j10").await).await;
	assert!(body.get("redirected_from").is_none());

	let response = app.get("/api/cranes/by-slug/never-existed").await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_clears_nullable_field() {
	let app = TestApp::new().await;
	let created = app.create_crane("terex-ctt-202").await;
	let id = created["id"].as_str().unwrap();

	let response = app
		.patch_json(&format!("/api/cranes/{id}"), true, json!({ "price_eur": null }))
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let body = body_json(response).await;
	assert!(body["price_eur"].is_null());
	assert_eq!(body["location"], "Rotterdam");
}

#[tokio::test]
async fn test_patch_unknown_crane_is_not_found() {
	let app = TestApp::new().await;

	let response = app
		.patch_json(
			"/api/cranes/00000000-0000-0000-0000-000000000000",
			true,
			json!({ "name": "Ghost" }),
		)
		.await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_crane() {
	let app = TestApp::new().await;
	let created = app.create_crane("jaso-j560").await;
	let id = created["id"].as_str().unwrap();

	assert_eq!(
		app.delete(&format!("/api/cranes/{id}"), false).await.status(),
		StatusCode::UNAUTHORIZED
	);
	assert_eq!(
		app.delete(&format!("/api/cranes/{id}"), true).await.status(),
		StatusCode::NO_CONTENT
	);
	assert_eq!(
		app.delete(&format!("/api/cranes/{id}"), true).await.status(),
		StatusCode::NOT_FOUND
	);
	assert_eq!(
		app.get(&format!("/api/cranes/{id}")).await.status(),
		StatusCode::NOT_FOUND
	);
}
