// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use hoist_server_db::Upload;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Upload metadata in API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UploadResponse {
	pub id: Uuid,
	pub crane_id: Option<Uuid>,
	pub original_name: String,
	pub content_type: String,
	pub size_bytes: i64,
	/// Public path the file is served from, e.g. `/uploads/<id>.jpg`.
	pub url: String,
	pub created_at: DateTime<Utc>,
}

/// `url` is rooted at `/uploads/`, where the stored files are served.
impl From<Upload> for UploadResponse {
	fn from(upload: Upload) -> Self {
		Self {
			url: format!("/uploads/{}", upload.stored_name),
			id: upload.id,
			crane_id: upload.crane_id,
			original_name: upload.original_name,
			content_type: upload.content_type,
			size_bytes: upload.size_bytes,
			created_at: upload.created_at,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ListUploadsResponse {
	pub uploads: Vec<UploadResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UploadErrorResponse {
	pub error: String,
	pub message: String,
}
