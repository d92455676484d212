// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::http::StatusCode;

use super::support::{body_json, TestApp};

#[tokio::test]
async fn test_health_is_healthy() {
	let app = TestApp::new().await;

	let response = app.get("/health").await;
	assert_eq!(response.status(), StatusCode::OK);
	let body = body_json(response).await;
	assert_eq!(body["status"], "healthy");
	assert_eq!(body["components"]["database"]["status"], "healthy");
	assert_eq!(body["components"]["uploads_dir"]["file_count"], 0);
	assert_eq!(body["version"], hoist_server::version::VERSION);
}

#[tokio::test]
async fn test_missing_uploads_dir_degrades() {
	let app = TestApp::new().await;
	std::fs::remove_dir_all(&app.uploads_dir).unwrap();

	let response = app.get("/health").await;
	assert_eq!(response.status(), StatusCode::OK);
	let body = body_json(response).await;
	assert_eq!(body["status"], "degraded");
	assert_eq!(body["components"]["uploads_dir"]["exists"], false);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
	let app = TestApp::new().await;

	let response = app.get("/api/openapi.json").await;
	assert_eq!(response.status(), StatusCode::OK);
	let body = body_json(response).await;
	assert!(body["paths"]["/api/cranes"].is_object());
	assert!(body["paths"]["/sitemap.xml"].is_object());
}
