// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// Database error from hoist-server-db.
	#[error("Database error: {0}")]
	Db(#[from] hoist_server_db::DbError),

	/// Sitemap or robots.txt generation failed.
	#[error("SEO error: {0}")]
	Seo(#[from] hoist_server_seo::SeoError),

	/// Filesystem operation failed.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// Configuration could not be turned into application state.
	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),

	#[error("Not found: {0}")]
	NotFound(String),

	#[error("Invalid request: {0}")]
	BadRequest(String),

	#[error("Unauthorized: {0}")]
	Unauthorized(String),

	#[error("Internal error: {0}")]
	Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}

impl ErrorResponse {
	pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			error: error.into(),
			message: message.into(),
		}
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, body) = match &self {
			ServerError::Db(e) => {
				tracing::error!(error = %e, "database error");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					ErrorResponse::new("database_error", "A database error occurred"),
				)
			}
			ServerError::Seo(e) => {
				tracing::error!(error = %e, "seo generation error");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					ErrorResponse::new("internal_error", "An internal error occurred"),
				)
			}
			ServerError::Io(e) => {
				tracing::error!(error = %e, "i/o error");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					ErrorResponse::new("internal_error", "An internal error occurred"),
				)
			}
			ServerError::InvalidConfig(msg) | ServerError::Internal(msg) => {
				tracing::error!(error = %msg, "internal error");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					ErrorResponse::new("internal_error", "An internal error occurred"),
				)
			}
			ServerError::NotFound(msg) => (
				StatusCode::NOT_FOUND,
				ErrorResponse::new("not_found", msg.clone()),
			),
			ServerError::BadRequest(msg) => (
				StatusCode::BAD_REQUEST,
				ErrorResponse::new("bad_request", msg.clone()),
			),
			ServerError::Unauthorized(msg) => {
				tracing::warn!(error = %msg, "unauthorized");
				(
					StatusCode::UNAUTHORIZED,
					ErrorResponse::new("unauthorized", msg.clone()),
				)
			}
		};

		(status, Json(body)).into_response()
	}
}
