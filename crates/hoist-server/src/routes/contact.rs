// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Contact and quote request handler.

use axum::{
	extract::{rejection::JsonRejection, State},
	http::StatusCode,
	response::IntoResponse,
	Json,
};
use hoist_common_i18n::Locale;
use hoist_server_db::NewInquiry;

pub use hoist_server_api::{ContactErrorResponse, ContactRequest, ContactResponse};

use crate::{
	api::AppState,
	api_response::{bad_request, internal_error},
	i18n::{t, ApiLocale},
	validate_or_error,
	validation::{sanitize_email, validate_contact},
};

fn trimmed(value: Option<String>) -> Option<String> {
	value
		.map(|v| v.trim().to_string())
		.filter(|v| !v.is_empty())
}

fn received(locale: Locale) -> (StatusCode, Json<ContactResponse>) {
	(
		StatusCode::ACCEPTED,
		Json(ContactResponse {
			status: "received".to_string(),
			message: t(locale, "api.contact.received"),
		}),
	)
}

#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 202, description = "Request received", body = ContactResponse),
        (status = 400, description = "Invalid request", body = ContactErrorResponse),
        (status = 403, description = "Blocked user agent"),
        (status = 429, description = "Rate limited")
    ),
    tag = "contact"
)]
/// POST /api/contact - Submit a contact or quote request.
///
/// Messages are answered in the locale of the page they came from, falling
/// back to `Accept-Language`.
#[tracing::instrument(skip(state, payload))]
pub async fn submit_contact(
	ApiLocale(header_locale): ApiLocale,
	State(state): State<AppState>,
	payload: Result<Json<ContactRequest>, JsonRejection>,
) -> impl IntoResponse {
	let Json(payload) = match payload {
		Ok(p) => p,
		Err(e) => {
			tracing::debug!(error = %e, "rejected contact body");
			return bad_request::<ContactErrorResponse>(
				"invalid_body",
				t(header_locale, "api.invalid_body"),
			)
			.into_response();
		}
	};

	let locale = payload
		.locale
		.as_deref()
		.and_then(Locale::parse)
		.unwrap_or(header_locale);

	// Bots get the same answer as people, so they cannot tell they were caught.
	if payload.is_honeypot_filled() {
		tracing::info!("contact honeypot filled, discarding request");
		return received(locale).into_response();
	}

	validate_or_error!(ContactErrorResponse, validate_contact(locale, &payload));

	let inquiry = NewInquiry {
		name: payload.name.trim().to_string(),
		email: sanitize_email(&payload.email),
		phone: trimmed(payload.phone),
		company: trimmed(payload.company),
		message: payload.message.trim().to_string(),
		crane_id: payload.crane_id,
		locale: locale.code().to_string(),
	};

	match state.inquiries.create_inquiry(&inquiry).await {
		Ok(stored) => {
			tracing::info!(
				inquiry_id = %stored.id,
				crane_id = ?stored.crane_id,
				locale = %stored.locale,
				"contact request stored"
			);
			received(locale).into_response()
		}
		Err(e) => {
			tracing::error!(error = %e, "failed to store contact request");
			internal_error::<ContactErrorResponse>(t(locale, "api.internal")).into_response()
		}
	}
}
