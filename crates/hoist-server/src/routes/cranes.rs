// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Crane inventory HTTP handlers.
//!
//! Reads are public. Writes require the admin bearer token.

use axum::{
	extract::{
		rejection::{JsonRejection, QueryRejection},
		Path, Query, State,
	},
	http::StatusCode,
	response::IntoResponse,
	Json,
};
use hoist_server_db::{CraneFilter, CraneUpdate, DbError, NewCrane};

pub use hoist_server_api::{
	CraneErrorResponse, CraneLookupResponse, CraneResponse, CreateCraneRequest, ListCranesQuery,
	ListCranesResponse, UpdateCraneRequest,
};

use crate::{
	admin_auth::RequireAdmin,
	api::AppState,
	api_response::{bad_request, conflict, internal_error, not_found},
	i18n::{t, t_fmt, ApiLocale},
	pagination::{PaginationParams, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
	parse_id,
	validate_or_error,
	validation::{parse_uuid, validate_create_crane, validate_update_crane},
};

#[utoipa::path(
    get,
    path = "/api/cranes",
    params(ListCranesQuery),
    responses(
        (status = 200, description = "Cranes matching the filters", body = ListCranesResponse),
        (status = 400, description = "Invalid query", body = CraneErrorResponse),
        (status = 500, description = "Internal server error", body = CraneErrorResponse)
    ),
    tag = "cranes"
)]
/// GET /api/cranes - List cranes with optional filters.
#[tracing::instrument(skip(state, query))]
pub async fn list_cranes(
	ApiLocale(locale): ApiLocale,
	State(state): State<AppState>,
	query: Result<Query<ListCranesQuery>, QueryRejection>,
) -> impl IntoResponse {
	let Query(query) = match query {
		Ok(q) => q,
		Err(e) => {
			tracing::debug!(error = %e, "rejected crane list query");
			return bad_request::<CraneErrorResponse>("invalid_query", t(locale, "api.invalid_query"))
				.into_response();
		}
	};

	let pagination = PaginationParams::new(query.limit, query.offset);
	let limit = pagination.limit_clamped(DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
	let offset = pagination.offset_or_default();

	let filter = CraneFilter {
		status: query.status,
		crane_type: query.crane_type,
		condition: query.condition,
		featured: query.featured,
		limit: limit as u32,
		offset: offset as u32,
	};

	match state.cranes.list_cranes(&filter).await {
		Ok((cranes, total)) => Json(ListCranesResponse {
			cranes: cranes.into_iter().map(CraneResponse::from).collect(),
			total,
			limit,
			offset,
		})
		.into_response(),
		Err(e) => {
			tracing::error!(error = %e, "failed to list cranes");
			internal_error::<CraneErrorResponse>(t(locale, "api.internal")).into_response()
		}
	}
}

#[utoipa::path(
    get,
    path = "/api/cranes/{id}",
    params(("id" = String, Path, description = "Crane ID")),
    responses(
        (status = 200, description = "Crane found", body = CraneResponse),
        (status = 400, description = "Invalid crane ID", body = CraneErrorResponse),
        (status = 404, description = "Crane not found", body = CraneErrorResponse)
    ),
    tag = "cranes"
)]
/// GET /api/cranes/{id} - Get a crane by ID.
#[tracing::instrument(skip(state))]
pub async fn get_crane(
	ApiLocale(locale): ApiLocale,
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> impl IntoResponse {
	let id = parse_id!(
		CraneErrorResponse,
		parse_uuid(&id, &t(locale, "api.crane.invalid_id"))
	);

	match state.cranes.get_crane(id).await {
		Ok(Some(crane)) => Json(CraneResponse::from(crane)).into_response(),
		Ok(None) => {
			not_found::<CraneErrorResponse>(t(locale, "api.crane.not_found")).into_response()
		}
		Err(e) => {
			tracing::error!(error = %e, crane_id = %id, "failed to get crane");
			internal_error::<CraneErrorResponse>(t(locale, "api.internal")).into_response()
		}
	}
}

#[utoipa::path(
    get,
    path = "/api/cranes/by-slug/{slug}",
    params(("slug" = String, Path, description = "Current or former crane slug")),
    responses(
        (status = 200, description = "Crane found, possibly through a former slug", body = CraneLookupResponse),
        (status = 404, description = "No crane has used this slug", body = CraneErrorResponse)
    ),
    tag = "cranes"
)]
/// GET /api/cranes/by-slug/{slug} - Look a crane up by slug, following
/// former slugs to the crane's current one.
#[tracing::instrument(skip(state))]
pub async fn get_crane_by_slug(
	ApiLocale(locale): ApiLocale,
	State(state): State<AppState>,
	Path(slug): Path<String>,
) -> impl IntoResponse {
	match state.cranes.find_by_slug_or_redirect(&slug).await {
		Ok(Some(found)) => Json(CraneLookupResponse::from(found)).into_response(),
		Ok(None) => {
			not_found::<CraneErrorResponse>(t(locale, "api.crane.not_found")).into_response()
		}
		Err(e) => {
			tracing::error!(error = %e, %slug, "failed to look up crane by slug");
			internal_error::<CraneErrorResponse>(t(locale, "api.internal")).into_response()
		}
	}
}

#[utoipa::path(
    post,
    path = "/api/cranes",
    request_body = CreateCraneRequest,
    responses(
        (status = 201, description = "Crane created", body = CraneResponse),
        (status = 400, description = "Invalid request", body = CraneErrorResponse),
        (status = 401, description = "Missing or invalid admin token", body = CraneErrorResponse),
        (status = 409, description = "Slug already in use", body = CraneErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "cranes"
)]
/// POST /api/cranes - Create a crane.
#[tracing::instrument(skip(state, payload))]
pub async fn create_crane(
	_admin: RequireAdmin,
	ApiLocale(locale): ApiLocale,
	State(state): State<AppState>,
	payload: Result<Json<CreateCraneRequest>, JsonRejection>,
) -> impl IntoResponse {
	let Json(payload) = match payload {
		Ok(p) => p,
		Err(e) => {
			tracing::debug!(error = %e, "rejected crane body");
			return bad_request::<CraneErrorResponse>("invalid_body", t(locale, "api.invalid_body"))
				.into_response();
		}
	};

	validate_or_error!(CraneErrorResponse, validate_create_crane(locale, &payload));

	let new_crane = NewCrane::from(payload);
	match state.cranes.create_crane(&new_crane).await {
		Ok(crane) => {
			tracing::info!(crane_id = %crane.id, slug = %crane.slug, "crane created");
			(StatusCode::CREATED, Json(CraneResponse::from(crane))).into_response()
		}
		Err(DbError::Conflict(_)) => conflict::<CraneErrorResponse>(
			"slug_conflict",
			t_fmt(locale, "api.crane.slug_conflict", &[("slug", new_crane.slug.as_str())]),
		)
		.into_response(),
		Err(e) => {
			tracing::error!(error = %e, "failed to create crane");
			internal_error::<CraneErrorResponse>(t(locale, "api.internal")).into_response()
		}
	}
}

#[utoipa::path(
    patch,
    path = "/api/cranes/{id}",
    params(("id" = String, Path, description = "Crane ID")),
    request_body = UpdateCraneRequest,
    responses(
        (status = 200, description = "Crane updated", body = CraneResponse),
        (status = 400, description = "Invalid request", body = CraneErrorResponse),
        (status = 401, description = "Missing or invalid admin token", body = CraneErrorResponse),
        (status = 404, description = "Crane not found", body = CraneErrorResponse),
        (status = 409, description = "Slug already in use", body = CraneErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "cranes"
)]
/// PATCH /api/cranes/{id} - Partially update a crane.
///
/// A slug change leaves the former slug redirecting to the new one.
#[tracing::instrument(skip(state, payload))]
pub async fn update_crane(
	_admin: RequireAdmin,
	ApiLocale(locale): ApiLocale,
	State(state): State<AppState>,
	Path(id): Path<String>,
	payload: Result<Json<UpdateCraneRequest>, JsonRejection>,
) -> impl IntoResponse {
	let id = parse_id!(
		CraneErrorResponse,
		parse_uuid(&id, &t(locale, "api.crane.invalid_id"))
	);
	let Json(payload) = match payload {
		Ok(p) => p,
		Err(e) => {
			tracing::debug!(error = %e, "rejected crane update body");
			return bad_request::<CraneErrorResponse>("invalid_body", t(locale, "api.invalid_body"))
				.into_response();
		}
	};

	validate_or_error!(CraneErrorResponse, validate_update_crane(locale, &payload));

	let update = CraneUpdate::from(payload);
	let new_slug = update.slug.clone();
	match state.cranes.update_crane(id, update).await {
		Ok(crane) => {
			tracing::info!(crane_id = %crane.id, slug = %crane.slug, "crane updated");
			Json(CraneResponse::from(crane)).into_response()
		}
		Err(DbError::NotFound(_)) => {
			not_found::<CraneErrorResponse>(t(locale, "api.crane.not_found")).into_response()
		}
		Err(DbError::Conflict(_)) => conflict::<CraneErrorResponse>(
			"slug_conflict",
			t_fmt(
				locale,
				"api.crane.slug_conflict",
				&[("slug", new_slug.as_deref().unwrap_or_default())],
			),
		)
		.into_response(),
		Err(e) => {
			tracing::error!(error = %e, crane_id = %id, "failed to update crane");
			internal_error::<CraneErrorResponse>(t(locale, "api.internal")).into_response()
		}
	}
}

#[utoipa::path(
    delete,
    path = "/api/cranes/{id}",
    params(("id" = String, Path, description = "Crane ID")),
    responses(
        (status = 204, description = "Crane deleted"),
        (status = 400, description = "Invalid crane ID", body = CraneErrorResponse),
        (status = 401, description = "Missing or invalid admin token", body = CraneErrorResponse),
        (status = 404, description = "Crane not found", body = CraneErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "cranes"
)]
/// DELETE /api/cranes/{id} - Delete a crane. Its uploads stay, detached.
#[tracing::instrument(skip(state))]
pub async fn delete_crane(
	_admin: RequireAdmin,
	ApiLocale(locale): ApiLocale,
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> impl IntoResponse {
	let id = parse_id!(
		CraneErrorResponse,
		parse_uuid(&id, &t(locale, "api.crane.invalid_id"))
	);

	match state.cranes.delete_crane(id).await {
		Ok(true) => {
			tracing::info!(crane_id = %id, "crane deleted");
			StatusCode::NO_CONTENT.into_response()
		}
		Ok(false) => {
			not_found::<CraneErrorResponse>(t(locale, "api.crane.not_found")).into_response()
		}
		Err(e) => {
			tracing::error!(error = %e, crane_id = %id, "failed to delete crane");
			internal_error::<CraneErrorResponse>(t(locale, "api.internal")).into_response()
		}
	}
}
