// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use axum::{
	body::Body,
	http::{header, Method, Request},
	response::Response,
	Router,
};
use hoist_common_secret::SecretString;
use serde::Serialize;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use hoist_server::{
	create_app_state, create_router, locale_routing_layer, AppState, ServerConfig,
};

pub const ADMIN_TOKEN: &str = "test-admin-token";
pub const BROWSER_UA: &str =
	"Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";
pub const MAX_UPLOAD_BYTES: u64 = 4096;
const BOUNDARY: &str = "hoist-test-boundary";

pub struct TestApp {
	pub router: Router,
	pub state: AppState,
	pub uploads_dir: PathBuf,
	_temp_dir: TempDir,
}

/// One multipart field: name, optional (file name, content type), bytes.
pub struct Part<'a> {
	pub name: &'a str,
	pub file: Option<(&'a str, &'a str)>,
	pub data: &'a [u8],
}

impl TestApp {
	pub async fn new() -> Self {
		Self::with_config(|_| {}).await
	}

	pub async fn with_config(customize: impl FnOnce(&mut ServerConfig)) -> Self {
		let temp_dir = tempfile::tempdir().unwrap();
		let db_path = temp_dir.path().join("test_hoist.db");
		let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
		let pool = hoist_server::db::create_pool(&db_url).await.unwrap();
		hoist_server::db::run_migrations(&pool).await.unwrap();

		let uploads_dir = temp_dir.path().join("uploads");
		std::fs::create_dir_all(&uploads_dir).unwrap();
		let static_dir = temp_dir.path().join("static");
		std::fs::create_dir_all(&static_dir).unwrap();
		std::fs::write(static_dir.join("site.css"), "body { margin: 0; }\n").unwrap();

		let mut config = ServerConfig::default();
		config.http.base_url = "https://cranes.example".to_string();
		config.admin.api_token = Some(SecretString::new(ADMIN_TOKEN.to_string()));
		config.uploads.dir = uploads_dir.clone();
		config.uploads.max_bytes = MAX_UPLOAD_BYTES;
		config.paths.static_dir = static_dir;
		customize(&mut config);

		let state = create_app_state(pool, &config).unwrap();
		let router = create_router(state.clone(), locale_routing_layer(&config.locale));

		Self {
			router,
			state,
			uploads_dir,
			_temp_dir: temp_dir,
		}
	}

	pub async fn send(&self, request: Request<Body>) -> Response<Body> {
		self.router.clone().oneshot(request).await.unwrap()
	}

	fn builder(method: Method, path: &str, admin: bool) -> axum::http::request::Builder {
		let builder = Request::builder()
			.method(method)
			.uri(path)
			.header(header::USER_AGENT, BROWSER_UA);
		if admin {
			builder.header(header::AUTHORIZATION, format!("Bearer {ADMIN_TOKEN}"))
		} else {
			builder
		}
	}

	pub async fn get(&self, path: &str) -> Response<Body> {
		self.get_with(path, &[]).await
	}

	pub async fn get_with(&self, path: &str, headers: &[(&str, &str)]) -> Response<Body> {
		let mut builder = Self::builder(Method::GET, path, false);
		for (name, value) in headers {
			builder = builder.header(*name, *value);
		}
		self.send(builder.body(Body::empty()).unwrap()).await
	}

	pub async fn post_json(&self, path: &str, admin: bool, body: impl Serialize) -> Response<Body> {
		self.json_request(Method::POST, path, admin, body).await
	}

	pub async fn patch_json(&self, path: &str, admin: bool, body: impl Serialize) -> Response<Body> {
		self.json_request(Method::PATCH, path, admin, body).await
	}

	pub async fn delete(&self, path: &str, admin: bool) -> Response<Body> {
		let request = Self::builder(Method::DELETE, path, admin)
			.body(Body::empty())
			.unwrap();
		self.send(request).await
	}

	async fn json_request(
		&self,
		method: Method,
		path: &str,
		admin: bool,
		body: impl Serialize,
	) -> Response<Body> {
		let request = Self::builder(method, path, admin)
			.header(header::CONTENT_TYPE, "application/json")
			.body(Body::from(serde_json::to_string(&body).unwrap()))
			.unwrap();
		self.send(request).await
	}

	pub async fn post_multipart(&self, path: &str, admin: bool, parts: &[Part<'_>]) -> Response<Body> {
		let request = Self::builder(Method::POST, path, admin)
			.header(
				header::CONTENT_TYPE,
				format!("multipart/form-data; boundary={BOUNDARY}"),
			)
			.body(Body::from(multipart_body(parts)))
			.unwrap();
		self.send(request).await
	}

	/// Create a crane through the API and return its JSON.
	pub async fn create_crane(&self, slug: &str) -> Value {
		let response = self.post_json("/api/cranes", true, crane_body(slug)).await;
		assert_eq!(response.status(), 201, "creating crane {slug}");
		body_json(response).await
	}
}

pub fn crane_body(slug: &str) -> Value {
	json!({
		"slug": slug,
		"name": "Potain MDT 219",
		"manufacturer": "Potain",
		"model": "MDT 219",
		"crane_type": "flat_top",
		"condition": "used",
		"year_of_manufacture": 2012,
		"max_capacity_kg": 10000,
		"tip_capacity_kg": 2300,
		"max_jib_length_m": 65.0,
		"price_eur": 189000,
		"location": "Rotterdam",
		"featured": true
	})
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
	let mut body = Vec::new();
	for part in parts {
		body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
		match part.file {
			Some((file_name, content_type)) => {
				body.extend_from_slice(
					format!(
						"Content-Disposition: form-data; name=\"{}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n",
						part.name
					)
					.as_bytes(),
				);
			}
			None => {
				body.extend_from_slice(
					format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name).as_bytes(),
				);
			}
		}
		body.extend_from_slice(part.data);
		body.extend_from_slice(b"\r\n");
	}
	body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
	body
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
	axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap()
		.to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
	serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
	String::from_utf8(body_bytes(response).await).unwrap()
}

pub fn header_str<'a>(response: &'a Response<Body>, name: header::HeaderName) -> Option<&'a str> {
	response.headers().get(name).and_then(|v| v.to_str().ok())
}
