// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::http::StatusCode;

use super::support::{body_bytes, body_json, Part, TestApp, MAX_UPLOAD_BYTES};

const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

fn photo(data: &[u8]) -> Part<'_> {
	Part {
		name: "file",
		file: Some(("mdt-219 front.jpg", "image/jpeg")),
		data,
	}
}

#[tokio::test]
async fn test_upload_is_stored_and_served() {
	let app = TestApp::new().await;
	let crane = app.create_crane("potain-mdt-219").await;
	let crane_id = crane["id"].as_str().unwrap();

	let response = app
		.post_multipart(
			"/api/uploads",
			true,
			&[
				Part {
					name: "crane_id",
					file: None,
					data: crane_id.as_bytes(),
				},
				photo(JPEG),
			],
		)
		.await;
	assert_eq!(response.status(), StatusCode::CREATED);
	let body = body_json(response).await;
	assert_eq!(body["crane_id"], crane_id);
	assert_eq!(body["original_name"], "mdt-219 front.jpg");
	assert_eq!(body["content_type"], "image/jpeg");
	assert_eq!(body["size_bytes"], JPEG.len());

	let url = body["url"].as_str().unwrap();
	assert!(url.starts_with("/uploads/") && url.ends_with(".jpg"));
	let stored_name = url.trim_start_matches("/uploads/");
	assert_eq!(std::fs::read(app.uploads_dir.join(stored_name)).unwrap(), JPEG);

	let response = app.get(url).await;
	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(body_bytes(response).await, JPEG);

	let body = body_json(app.get(&format!("/api/cranes/{crane_id}/uploads")).await).await;
	assert_eq!(body["uploads"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_upload_requires_admin_token() {
	let app = TestApp::new().await;

	let response = app.post_multipart("/api/uploads", false, &[photo(JPEG)]).await;
	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
	assert_eq!(std::fs::read_dir(&app.uploads_dir).unwrap().count(), 0);
}

#[tokio::test]
async fn test_disallowed_content_type() {
	let app = TestApp::new().await;

	let response = app
		.post_multipart(
			"/api/uploads",
			true,
			&[Part {
				name: "file",
				file: Some(("install.sh", "application/x-sh")),
				data: b"#!/bin/sh\n",
			}],
		)
		.await;
	assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
	assert_eq!(body_json(response).await["error"], "unsupported_media_type");
}

#[tokio::test]
async fn test_oversized_file_is_rejected() {
	let app = TestApp::new().await;

	let data = vec![0u8; MAX_UPLOAD_BYTES as usize + 1];
	let response = app.post_multipart("/api/uploads", true, &[photo(&data)]).await;
	assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
	assert_eq!(std::fs::read_dir(&app.uploads_dir).unwrap().count(), 0);
}

#[tokio::test]
async fn test_missing_file_field() {
	let app = TestApp::new().await;

	let response = app
		.post_multipart(
			"/api/uploads",
			true,
			&[Part {
				name: "note",
				file: None,
				data: b"no file here",
			}],
		)
		.await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(body_json(response).await["error"], "missing_file");
}

#[tokio::test]
async fn test_unknown_crane_removes_stored_file() {
	let app = TestApp::new().await;

	let response = app
		.post_multipart(
			"/api/uploads",
			true,
			&[
				Part {
					name: "crane_id",
					file: None,
					data: b"00000000-0000-0000-0000-000000000000",
				},
				photo(JPEG),
			],
		)
		.await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
	assert_eq!(std::fs::read_dir(&app.uploads_dir).unwrap().count(), 0);
}

#[tokio::test]
async fn test_get_and_delete_upload() {
	let app = TestApp::new().await;

	let response = app.post_multipart("/api/uploads", true, &[photo(JPEG)]).await;
	assert_eq!(response.status(), StatusCode::CREATED);
	let body = body_json(response).await;
	let id = body["id"].as_str().unwrap().to_string();
	assert!(body["crane_id"].is_null());

	let response = app.get(&format!("/api/uploads/{id}")).await;
	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(body_json(response).await["id"], id.as_str());

	assert_eq!(
		app.delete(&format!("/api/uploads/{id}"), true).await.status(),
		StatusCode::NO_CONTENT
	);
	assert_eq!(std::fs::read_dir(&app.uploads_dir).unwrap().count(), 0);
	assert_eq!(
		app.get(&format!("/api/uploads/{id}")).await.status(),
		StatusCode::NOT_FOUND
	);
	assert_eq!(
		app.delete(&format!("/api/uploads/{id}"), true).await.status(),
		StatusCode::NOT_FOUND
	);
}

#[tokio::test]
async fn test_list_uploads_for_unknown_crane() {
	let app = TestApp::new().await;

	let response = app
		.get("/api/cranes/00000000-0000-0000-0000-000000000000/uploads")
		.await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
