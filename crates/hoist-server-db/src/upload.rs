// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Upload metadata. File bytes live on disk under the uploads directory;
//! this table only tracks where they are and what they belong to.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePool, Row};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{DbError, Result};
use crate::row::{now_rfc3339, parse_optional_uuid, parse_timestamp, parse_uuid};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Upload {
	pub id: Uuid,
	pub crane_id: Option<Uuid>,
	pub original_name: String,
	pub stored_name: String,
	pub content_type: String,
	pub size_bytes: i64,
	pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUpload {
	pub id: Uuid,
	pub crane_id: Option<Uuid>,
	pub original_name: String,
	pub stored_name: String,
	pub content_type: String,
	pub size_bytes: i64,
}

#[async_trait]
pub trait UploadStore: Send + Sync {
	async fn create_upload(&self, upload: &NewUpload) -> Result<Upload>;
	async fn get_upload(&self, id: Uuid) -> Result<Option<Upload>>;
	async fn list_uploads_for_crane(&self, crane_id: Uuid) -> Result<Vec<Upload>>;
	async fn delete_upload(&self, id: Uuid) -> Result<Option<Upload>>;
}

#[derive(Clone)]
pub struct UploadRepository {
	pool: SqlitePool,
}

impl UploadRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// # Errors
	/// `DbError::NotFound` when `crane_id` names a crane that does not exist.
	#[tracing::instrument(skip(self, upload), fields(upload_id = %upload.id))]
	pub async fn create_upload(&self, upload: &NewUpload) -> Result<Upload> {
		let now = now_rfc3339();
		sqlx::query(
			r#"
			INSERT INTO uploads (id, crane_id, original_name, stored_name, content_type, size_bytes, created_at)
			VALUES (?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(upload.id.to_string())
		.bind(upload.crane_id.map(|id| id.to_string()))
		.bind(&upload.original_name)
		.bind(&upload.stored_name)
		.bind(&upload.content_type)
		.bind(upload.size_bytes)
		.bind(&now)
		.execute(&self.pool)
		.await
		.map_err(|e| match e {
			sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
				DbError::NotFound(format!("crane {}", upload.crane_id.unwrap_or_default()))
			}
			other => DbError::from_insert(other, || format!("upload {} already exists", upload.id)),
		})?;

		self
			.get_upload(upload.id)
			.await?
			.ok_or_else(|| DbError::Internal(format!("upload {} vanished after insert", upload.id)))
	}

	#[tracing::instrument(skip(self), fields(upload_id = %id))]
	pub async fn get_upload(&self, id: Uuid) -> Result<Option<Upload>> {
		let row = sqlx::query(
			r#"
			SELECT id, crane_id, original_name, stored_name, content_type, size_bytes, created_at
			FROM uploads
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.as_ref().map(parse_upload_row).transpose()
	}

	#[tracing::instrument(skip(self), fields(crane_id = %crane_id))]
	pub async fn list_uploads_for_crane(&self, crane_id: Uuid) -> Result<Vec<Upload>> {
		let rows = sqlx::query(
			r#"
			SELECT id, crane_id, original_name, stored_name, content_type, size_bytes, created_at
			FROM uploads
			WHERE crane_id = ?
			ORDER BY created_at, id
			"#,
		)
		.bind(crane_id.to_string())
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(parse_upload_row).collect()
	}

	/// Deletes the row and hands it back so the caller can remove the file.
	#[tracing::instrument(skip(self), fields(upload_id = %id))]
	pub async fn delete_upload(&self, id: Uuid) -> Result<Option<Upload>> {
		let Some(upload) = self.get_upload(id).await? else {
			return Ok(None);
		};

		let result = sqlx::query("DELETE FROM uploads WHERE id = ?")
			.bind(id.to_string())
			.execute(&self.pool)
			.await?;

		Ok((result.rows_affected() > 0).then_some(upload))
	}
}

#[async_trait]
impl UploadStore for UploadRepository {
	async fn create_upload(&self, upload: &NewUpload) -> Result<Upload> {
		self.create_upload(upload).await
	}

	async fn get_upload(&self, id: Uuid) -> Result<Option<Upload>> {
		self.get_upload(id).await
	}

	async fn list_uploads_for_crane(&self, crane_id: Uuid) -> Result<Vec<Upload>> {
		self.list_uploads_for_crane(crane_id).await
	}

	async fn delete_upload(&self, id: Uuid) -> Result<Option<Upload>> {
		self.delete_upload(id).await
	}
}

fn parse_upload_row(row: &sqlx::sqlite::SqliteRow) -> Result<Upload> {
	let id: String = row.get("id");
	let crane_id: Option<String> = row.get("crane_id");
	let created_at: String = row.get("created_at");

	Ok(Upload {
		id: parse_uuid(&id, "upload id")?,
		crane_id: parse_optional_uuid(crane_id, "crane_id")?,
		original_name: row.get("original_name"),
		stored_name: row.get("stored_name"),
		content_type: row.get("content_type"),
		size_bytes: row.get("size_bytes"),
		created_at: parse_timestamp(&created_at, "created_at")?,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::crane::{CraneCondition, CraneRepository, CraneStatus, CraneType, NewCrane};
	use crate::testing::create_test_pool;

	fn new_upload(crane_id: Option<Uuid>) -> NewUpload {
		let id = Uuid::new_v4();
		NewUpload {
			id,
			crane_id,
			original_name: "front.jpg".to_string(),
			stored_name: format!("{id}.jpg"),
			content_type: "image/jpeg".to_string(),
			size_bytes: 1024,
		}
	}

	async fn seed_crane(pool: &SqlitePool) -> Uuid {
		CraneRepository::new(pool.clone())
			.create_crane(&NewCrane {
				slug: "potain-mc-85".to_string(),
				name: "Potain MC 85".to_string(),
				manufacturer: "Potain".to_string(),
				model: "MC 85".to_string(),
				crane_type: CraneType::Hammerhead,
				condition: CraneCondition::Refurbished,
				status: CraneStatus::Available,
				year_of_manufacture: None,
				max_capacity_kg: 5000,
				tip_capacity_kg: None,
				max_jib_length_m: None,
				max_hook_height_m: None,
				price_eur: None,
				location: None,
				description: String::new(),
				featured: false,
			})
			.await
			.unwrap()
			.id
	}

	#[tokio::test]
	async fn test_create_get_and_list() {
		let pool = create_test_pool().await;
		let crane_id = seed_crane(&pool).await;
		let repo = UploadRepository::new(pool);

		let created = repo.create_upload(&new_upload(Some(crane_id))).await.unwrap();
		repo.create_upload(&new_upload(None)).await.unwrap();

		assert_eq!(repo.get_upload(created.id).await.unwrap().unwrap(), created);
		let listed = repo.list_uploads_for_crane(crane_id).await.unwrap();
		assert_eq!(listed, vec![created]);
	}

	#[tokio::test]
	async fn test_unknown_crane_is_not_found() {
		let repo = UploadRepository::new(create_test_pool().await);
		let err = repo
			.create_upload(&new_upload(Some(Uuid::new_v4())))
			.await
			.unwrap_err();
		assert!(matches!(err, DbError::NotFound(_)));
	}

	#[tokio::test]
	async fn test_delete_returns_row_once() {
		let repo = UploadRepository::new(create_test_pool().await);
		let created = repo.create_upload(&new_upload(None)).await.unwrap();

		let deleted = repo.delete_upload(created.id).await.unwrap();
		assert_eq!(deleted.map(|u| u.stored_name), Some(created.stored_name));
		assert!(repo.delete_upload(created.id).await.unwrap().is_none());
	}

	#[tokio::test]
	async fn test_deleting_crane_detaches_uploads() {
		let pool = create_test_pool().await;
		let crane_id = seed_crane(&pool).await;
		let repo = UploadRepository::new(pool.clone());
		let created = repo.create_upload(&new_upload(Some(crane_id))).await.unwrap();

		CraneRepository::new(pool).delete_crane(crane_id).await.unwrap();

		let orphan = repo.get_upload(created.id).await.unwrap().unwrap();
		assert_eq!(orphan.crane_id, None);
	}
}
