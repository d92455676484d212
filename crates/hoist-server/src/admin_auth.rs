// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Admin bearer-token authentication for inventory and upload writes.
//!
//! Use the [`RequireAdmin`] extractor in handlers that mutate data:
//!
//! ```ignore
//! async fn delete_crane(_admin: RequireAdmin, State(state): State<AppState>) -> impl IntoResponse {
//!     // only reached with `Authorization: Bearer <HOIST_SERVER_ADMIN_TOKEN>`
//! }
//! ```
//!
//! When no admin token is configured every write is rejected.

use axum::{
	extract::FromRequestParts,
	http::{header, request::Parts, HeaderMap},
	response::{IntoResponse, Response},
};
use hoist_common_secret::SecretString;
use tracing::instrument;

use crate::api::AppState;
use crate::api_response::unauthorized;
use crate::error::ErrorResponse;
use crate::i18n::{request_locale, t};

/// Marker extractor proving the request carried the admin token.
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

/// Extract the bearer token from the Authorization header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
	headers
		.get(header::AUTHORIZATION)
		.and_then(|v| v.to_str().ok())
		.and_then(|v| v.strip_prefix("Bearer "))
		.map(str::trim)
		.filter(|token| !token.is_empty())
}

/// Constant-time comparison against the configured token.
pub fn is_admin(headers: &HeaderMap, admin_token: Option<&SecretString>) -> bool {
	match (admin_token, extract_bearer_token(headers)) {
		(Some(expected), Some(provided)) => expected.matches(provided),
		_ => false,
	}
}

impl FromRequestParts<AppState> for RequireAdmin {
	type Rejection = Response;

	#[instrument(name = "RequireAdmin::from_request_parts", skip_all)]
	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		if is_admin(&parts.headers, state.admin_token.as_ref()) {
			tracing::debug!("admin token accepted");
			return Ok(RequireAdmin);
		}

		if state.admin_token.is_none() {
			tracing::warn!(path = %parts.uri.path(), "admin write rejected: no admin token configured");
		} else {
			tracing::debug!(path = %parts.uri.path(), "admin write rejected: missing or invalid token");
		}

		let locale = request_locale(&parts.headers, state.default_locale);
		Err(unauthorized::<ErrorResponse>(t(locale, "api.unauthorized")).into_response())
	}
}
