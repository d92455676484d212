// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! API response helpers and macros.
//!
//! This module provides common response patterns for HTTP handlers:
//! - Error response helpers (bad_request, conflict, not_found, internal_error, ...)
//! - Macros for early-return error handling (parse_id!, validate_or_error!)
//! - Trait implementations for error response types (impl_api_error_response!)

use axum::{http::StatusCode, Json};
use hoist_server_api::{ContactErrorResponse, CraneErrorResponse, UploadErrorResponse};
use serde::Serialize;

use crate::error::ErrorResponse;
use crate::validation::{IdParseError, ValidationError};

/// Trait for API error response types that have `error` and `message` fields.
pub trait ApiErrorResponse: Serialize + Send {
	fn new(error: impl Into<String>, message: impl Into<String>) -> Self;
}

/// Implement `ApiErrorResponse` for a struct with `error` and `message` fields.
///
/// # Example
///
/// ```ignore
/// impl_api_error_response!(CraneErrorResponse);
/// ```
#[macro_export]
macro_rules! impl_api_error_response {
	($ty:ty) => {
		impl $crate::api_response::ApiErrorResponse for $ty {
			fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
				Self {
					error: error.into(),
					message: message.into(),
				}
			}
		}
	};
}

impl_api_error_response!(ErrorResponse);
impl_api_error_response!(CraneErrorResponse);
impl_api_error_response!(UploadErrorResponse);
impl_api_error_response!(ContactErrorResponse);

/// Parse an ID and return early with an error response if parsing fails.
///
/// # Example
///
/// ```ignore
/// let id = parse_id!(
///     CraneErrorResponse,
///     parse_uuid(&id, &t(locale, "api.crane.invalid_id"))
/// );
/// ```
#[macro_export]
macro_rules! parse_id {
	($error_ty:ty, $parse_expr:expr) => {
		match $parse_expr {
			Ok(id) => id,
			Err(e) => {
				return $crate::api_response::id_parse_error::<$error_ty>(e).into_response();
			}
		}
	};
}

/// Run a validator and return early with a 400 response if it fails.
///
/// # Example
///
/// ```ignore
/// validate_or_error!(CraneErrorResponse, validate_create_crane(locale, &payload));
/// ```
#[macro_export]
macro_rules! validate_or_error {
	($error_ty:ty, $validate_expr:expr) => {
		if let Err(e) = $validate_expr {
			return $crate::api_response::validation_error::<$error_ty>(e).into_response();
		}
	};
}

/// Create a 400 Bad Request response from an IdParseError.
pub fn id_parse_error<T: ApiErrorResponse>(e: IdParseError) -> (StatusCode, Json<T>) {
	(StatusCode::BAD_REQUEST, Json(T::new(e.error, e.message)))
}

/// Create a 400 Bad Request response from a ValidationError.
pub fn validation_error<T: ApiErrorResponse>(e: ValidationError) -> (StatusCode, Json<T>) {
	(StatusCode::BAD_REQUEST, Json(T::new(e.error, e.message)))
}

/// Create a 400 Bad Request response.
pub fn bad_request<T: ApiErrorResponse>(
	error: impl Into<String>,
	message: impl Into<String>,
) -> (StatusCode, Json<T>) {
	(StatusCode::BAD_REQUEST, Json(T::new(error, message)))
}

/// Create a 401 Unauthorized response.
pub fn unauthorized<T: ApiErrorResponse>(message: impl Into<String>) -> (StatusCode, Json<T>) {
	(StatusCode::UNAUTHORIZED, Json(T::new("unauthorized", message)))
}

/// Create a 404 Not Found response.
pub fn not_found<T: ApiErrorResponse>(message: impl Into<String>) -> (StatusCode, Json<T>) {
	(StatusCode::NOT_FOUND, Json(T::new("not_found", message)))
}

/// Create a 409 Conflict response.
pub fn conflict<T: ApiErrorResponse>(
	error: impl Into<String>,
	message: impl Into<String>,
) -> (StatusCode, Json<T>) {
	(StatusCode::CONFLICT, Json(T::new(error, message)))
}

/// Create a 413 Payload Too Large response.
pub fn payload_too_large<T: ApiErrorResponse>(message: impl Into<String>) -> (StatusCode, Json<T>) {
	(
		StatusCode::PAYLOAD_TOO_LARGE,
		Json(T::new("payload_too_large", message)),
	)
}

/// Create a 415 Unsupported Media Type response.
pub fn unsupported_media_type<T: ApiErrorResponse>(
	message: impl Into<String>,
) -> (StatusCode, Json<T>) {
	(
		StatusCode::UNSUPPORTED_MEDIA_TYPE,
		Json(T::new("unsupported_media_type", message)),
	)
}

/// Create a 500 Internal Server Error response.
pub fn internal_error<T: ApiErrorResponse>(message: impl Into<String>) -> (StatusCode, Json<T>) {
	(
		StatusCode::INTERNAL_SERVER_ERROR,
		Json(T::new("internal_error", message)),
	)
}
