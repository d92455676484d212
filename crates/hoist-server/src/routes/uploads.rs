// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Upload HTTP handlers.
//!
//! Files are stored flat in the uploads directory as `<uuid>.<ext>` and
//! served from `/uploads/`. The database row is the source of truth; a file
//! without a row is never linked from the API.

use std::path::Path as FsPath;

use axum::{
	extract::{multipart::MultipartRejection, Multipart, Path, State},
	http::StatusCode,
	response::IntoResponse,
	Json,
};
use hoist_server_db::{DbError, NewUpload};
use uuid::Uuid;

pub use hoist_server_api::{ListUploadsResponse, UploadErrorResponse, UploadResponse};

use crate::{
	admin_auth::RequireAdmin,
	api::AppState,
	api_response::{
		bad_request, internal_error, not_found, payload_too_large, unsupported_media_type,
	},
	i18n::{t, t_fmt, ApiLocale},
	parse_id,
	validation::parse_uuid,
};

const FILE_FIELD: &str = "file";
const CRANE_ID_FIELD: &str = "crane_id";

/// File extension for an accepted content type.
pub fn extension_for(content_type: &str) -> &'static str {
	let essence = content_type.split(';').next().unwrap_or_default().trim();
	match essence.to_ascii_lowercase().as_str() {
		"image/jpeg" | "image/jpg" => "jpg",
		"image/png" => "png",
		"image/webp" => "webp",
		"image/gif" => "gif",
		"application/pdf" => "pdf",
		_ => "bin",
	}
}

/// Keep only the final path component of a client-supplied file name.
fn clean_file_name(raw: Option<&str>) -> String {
	raw.and_then(|name| name.rsplit(['/', '\\']).next())
		.map(str::trim)
		.filter(|name| !name.is_empty())
		.unwrap_or("upload")
		.chars()
		.take(255)
		.collect()
}

struct ReceivedFile {
	original_name: String,
	content_type: String,
	data: Vec<u8>,
}

fn max_size_label(max_bytes: u64) -> String {
	if max_bytes >= 1024 * 1024 && max_bytes % (1024 * 1024) == 0 {
		format!("{} MiB", max_bytes / (1024 * 1024))
	} else {
		format!("{max_bytes} bytes")
	}
}

#[utoipa::path(
    post,
    path = "/api/uploads",
    request_body(content_type = "multipart/form-data", description = "`file` plus optional `crane_id`"),
    responses(
        (status = 201, description = "File stored", body = UploadResponse),
        (status = 400, description = "Malformed multipart body or missing file", body = UploadErrorResponse),
        (status = 401, description = "Missing or invalid admin token", body = UploadErrorResponse),
        (status = 404, description = "Crane not found", body = UploadErrorResponse),
        (status = 413, description = "File too large", body = UploadErrorResponse),
        (status = 415, description = "Content type not allowed", body = UploadErrorResponse),
        (status = 429, description = "Rate limited")
    ),
    security(("bearer" = [])),
    tag = "uploads"
)]
/// POST /api/uploads - Store an image or document, optionally attached to a crane.
#[tracing::instrument(skip(state, multipart))]
pub async fn create_upload(
	_admin: RequireAdmin,
	ApiLocale(locale): ApiLocale,
	State(state): State<AppState>,
	multipart: Result<Multipart, MultipartRejection>,
) -> impl IntoResponse {
	let mut multipart = match multipart {
		Ok(m) => m,
		Err(e) => {
			tracing::debug!(error = %e, "rejected upload body");
			return bad_request::<UploadErrorResponse>(
				"invalid_multipart",
				t(locale, "api.upload.invalid_multipart"),
			)
			.into_response();
		}
	};

	let config = state.uploads_config.clone();
	let too_large = || {
		payload_too_large::<UploadErrorResponse>(t_fmt(
			locale,
			"api.upload.too_large",
			&[("max", max_size_label(config.max_bytes).as_str())],
		))
		.into_response()
	};

	let mut crane_id: Option<Uuid> = None;
	let mut file: Option<ReceivedFile> = None;

	loop {
		let mut field = match multipart.next_field().await {
			Ok(Some(field)) => field,
			Ok(None) => break,
			Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => return too_large(),
			Err(e) => {
				tracing::debug!(error = %e, "malformed multipart field");
				return bad_request::<UploadErrorResponse>(
					"invalid_multipart",
					t(locale, "api.upload.invalid_multipart"),
				)
				.into_response();
			}
		};

		let name = field.name().map(str::to_owned);
		match name.as_deref() {
			Some(CRANE_ID_FIELD) => {
				let raw = match field.text().await {
					Ok(raw) => raw,
					Err(_) => {
						return bad_request::<UploadErrorResponse>(
							"invalid_multipart",
							t(locale, "api.upload.invalid_multipart"),
						)
						.into_response();
					}
				};
				let raw = raw.trim();
				if !raw.is_empty() {
					crane_id = Some(parse_id!(
						UploadErrorResponse,
						parse_uuid(raw, &t(locale, "api.crane.invalid_id"))
					));
				}
			}
			Some(FILE_FIELD) => {
				let content_type = field
					.content_type()
					.unwrap_or("application/octet-stream")
					.to_ascii_lowercase();
				if !config.is_allowed(&content_type) {
					tracing::debug!(%content_type, "rejected upload content type");
					return unsupported_media_type::<UploadErrorResponse>(t_fmt(
						locale,
						"api.upload.unsupported_type",
						&[("content_type", content_type.as_str())],
					))
					.into_response();
				}
				let original_name = clean_file_name(field.file_name());

				let mut data = Vec::new();
				loop {
					match field.chunk().await {
						Ok(Some(chunk)) => {
							if (data.len() + chunk.len()) as u64 > config.max_bytes {
								tracing::debug!(max_bytes = config.max_bytes, "upload exceeds size limit");
								return too_large();
							}
							data.extend_from_slice(&chunk);
						}
						Ok(None) => break,
						Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => return too_large(),
						Err(e) => {
							tracing::debug!(error = %e, "failed reading upload chunk");
							return bad_request::<UploadErrorResponse>(
								"invalid_multipart",
								t(locale, "api.upload.invalid_multipart"),
							)
							.into_response();
						}
					}
				}

				file = Some(ReceivedFile {
					original_name,
					content_type,
					data,
				});
			}
			_ => {}
		}
	}

	let Some(file) = file else {
		return bad_request::<UploadErrorResponse>("missing_file", t(locale, "api.upload.missing_file"))
			.into_response();
	};

	let id = Uuid::new_v4();
	let stored_name = format!("{id}.{}", extension_for(&file.content_type));
	let stored_path = config.dir.join(&stored_name);

	if let Err(e) = tokio::fs::write(&stored_path, &file.data).await {
		tracing::error!(error = %e, path = %stored_path.display(), "failed to write upload");
		return internal_error::<UploadErrorResponse>(t(locale, "api.internal")).into_response();
	}

	let new_upload = NewUpload {
		id,
		crane_id,
		original_name: file.original_name,
		stored_name,
		content_type: file.content_type,
		size_bytes: file.data.len() as i64,
	};

	match state.uploads.create_upload(&new_upload).await {
		Ok(upload) => {
			tracing::info!(
				upload_id = %upload.id,
				crane_id = ?upload.crane_id,
				size_bytes = upload.size_bytes,
				"upload stored"
			);
			(StatusCode::CREATED, Json(UploadResponse::from(upload))).into_response()
		}
		Err(e) => {
			remove_stored_file(&stored_path).await;
			match e {
				DbError::NotFound(_) => {
					not_found::<UploadErrorResponse>(t(locale, "api.crane.not_found")).into_response()
				}
				e => {
					tracing::error!(error = %e, "failed to record upload");
					internal_error::<UploadErrorResponse>(t(locale, "api.internal")).into_response()
				}
			}
		}
	}
}

async fn remove_stored_file(path: &FsPath) {
	match tokio::fs::remove_file(path).await {
		Ok(()) => {}
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
		Err(e) => tracing::warn!(error = %e, path = %path.display(), "failed to remove stored upload"),
	}
}

#[utoipa::path(
    get,
    path = "/api/uploads/{id}",
    params(("id" = String, Path, description = "Upload ID")),
    responses(
        (status = 200, description = "Upload metadata", body = UploadResponse),
        (status = 400, description = "Invalid upload ID", body = UploadErrorResponse),
        (status = 404, description = "Upload not found", body = UploadErrorResponse)
    ),
    tag = "uploads"
)]
/// GET /api/uploads/{id} - Upload metadata.
#[tracing::instrument(skip(state))]
pub async fn get_upload(
	ApiLocale(locale): ApiLocale,
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> impl IntoResponse {
	let id = parse_id!(
		UploadErrorResponse,
		parse_uuid(&id, &t(locale, "api.upload.not_found"))
	);

	match state.uploads.get_upload(id).await {
		Ok(Some(upload)) => Json(UploadResponse::from(upload)).into_response(),
		Ok(None) => {
			not_found::<UploadErrorResponse>(t(locale, "api.upload.not_found")).into_response()
		}
		Err(e) => {
			tracing::error!(error = %e, upload_id = %id, "failed to get upload");
			internal_error::<UploadErrorResponse>(t(locale, "api.internal")).into_response()
		}
	}
}

#[utoipa::path(
    delete,
    path = "/api/uploads/{id}",
    params(("id" = String, Path, description = "Upload ID")),
    responses(
        (status = 204, description = "Upload and file removed"),
        (status = 400, description = "Invalid upload ID", body = UploadErrorResponse),
        (status = 401, description = "Missing or invalid admin token", body = UploadErrorResponse),
        (status = 404, description = "Upload not found", body = UploadErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "uploads"
)]
/// DELETE /api/uploads/{id} - Remove the row, then the stored file.
#[tracing::instrument(skip(state))]
pub async fn delete_upload(
	_admin: RequireAdmin,
	ApiLocale(locale): ApiLocale,
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> impl IntoResponse {
	let id = parse_id!(
		UploadErrorResponse,
		parse_uuid(&id, &t(locale, "api.upload.not_found"))
	);

	match state.uploads.delete_upload(id).await {
		Ok(Some(upload)) => {
			remove_stored_file(&state.uploads_config.dir.join(&upload.stored_name)).await;
			tracing::info!(upload_id = %id, "upload deleted");
			StatusCode::NO_CONTENT.into_response()
		}
		Ok(None) => {
			not_found::<UploadErrorResponse>(t(locale, "api.upload.not_found")).into_response()
		}
		Err(e) => {
			tracing::error!(error = %e, upload_id = %id, "failed to delete upload");
			internal_error::<UploadErrorResponse>(t(locale, "api.internal")).into_response()
		}
	}
}

#[utoipa::path(
    get,
    path = "/api/cranes/{id}/uploads",
    params(("id" = String, Path, description = "Crane ID")),
    responses(
        (status = 200, description = "Uploads attached to the crane", body = ListUploadsResponse),
        (status = 400, description = "Invalid crane ID", body = UploadErrorResponse),
        (status = 404, description = "Crane not found", body = UploadErrorResponse)
    ),
    tag = "uploads"
)]
/// GET /api/cranes/{id}/uploads - Uploads attached to a crane.
#[tracing::instrument(skip(state))]
pub async fn list_crane_uploads(
	ApiLocale(locale): ApiLocale,
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> impl IntoResponse {
	let id = parse_id!(
		UploadErrorResponse,
		parse_uuid(&id, &t(locale, "api.crane.invalid_id"))
	);

	match state.cranes.get_crane(id).await {
		Ok(Some(_)) => {}
		Ok(None) => {
			return not_found::<UploadErrorResponse>(t(locale, "api.crane.not_found"))
				.into_response();
		}
		Err(e) => {
			tracing::error!(error = %e, crane_id = %id, "failed to get crane");
			return internal_error::<UploadErrorResponse>(t(locale, "api.internal")).into_response();
		}
	}

	match state.uploads.list_uploads_for_crane(id).await {
		Ok(uploads) => Json(ListUploadsResponse {
			uploads: uploads.into_iter().map(UploadResponse::from).collect(),
		})
		.into_response(),
		Err(e) => {
			tracing::error!(error = %e, crane_id = %id, "failed to list uploads");
			internal_error::<UploadErrorResponse>(t(locale, "api.internal")).into_response()
		}
	}
}
