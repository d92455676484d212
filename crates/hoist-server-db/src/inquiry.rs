// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePool, Row};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{DbError, Result};
use crate::row::{now_rfc3339, parse_optional_uuid, parse_timestamp, parse_uuid};

/// A contact or quote request submitted through the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Inquiry {
	pub id: Uuid,
	pub name: String,
	pub email: String,
	pub phone: Option<String>,
	pub company: Option<String>,
	pub message: String,
	pub crane_id: Option<Uuid>,
	pub locale: String,
	pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInquiry {
	pub name: String,
	pub email: String,
	pub phone: Option<String>,
	pub company: Option<String>,
	pub message: String,
	pub crane_id: Option<Uuid>,
	pub locale: String,
}

#[async_trait]
pub trait InquiryStore: Send + Sync {
	async fn create_inquiry(&self, inquiry: &NewInquiry) -> Result<Inquiry>;
	async fn get_inquiry(&self, id: Uuid) -> Result<Option<Inquiry>>;
	async fn list_inquiries(&self, limit: u32, offset: u32) -> Result<(Vec<Inquiry>, i64)>;
}

#[derive(Clone)]
pub struct InquiryRepository {
	pool: SqlitePool,
}

impl InquiryRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// A `crane_id` that no longer exists is stored as NULL rather than
	/// rejecting the visitor's message.
	#[tracing::instrument(skip(self, inquiry), fields(locale = %inquiry.locale))]
	pub async fn create_inquiry(&self, inquiry: &NewInquiry) -> Result<Inquiry> {
		let id = Uuid::new_v4();
		let now = now_rfc3339();

		sqlx::query(
			r#"
			INSERT INTO inquiries (id, name, email, phone, company, message, crane_id, locale, created_at)
			VALUES (?, ?, ?, ?, ?, ?, (SELECT id FROM cranes WHERE id = ?), ?, ?)
			"#,
		)
		.bind(id.to_string())
		.bind(&inquiry.name)
		.bind(&inquiry.email)
		.bind(&inquiry.phone)
		.bind(&inquiry.company)
		.bind(&inquiry.message)
		.bind(inquiry.crane_id.map(|id| id.to_string()))
		.bind(&inquiry.locale)
		.bind(&now)
		.execute(&self.pool)
		.await?;

		tracing::info!(inquiry_id = %id, "inquiry stored");

		self
			.get_inquiry(id)
			.await?
			.ok_or_else(|| DbError::Internal(format!("inquiry {id} vanished after insert")))
	}

	#[tracing::instrument(skip(self), fields(inquiry_id = %id))]
	pub async fn get_inquiry(&self, id: Uuid) -> Result<Option<Inquiry>> {
		let row = sqlx::query(
			r#"
			SELECT id, name, email, phone, company, message, crane_id, locale, created_at
			FROM inquiries
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.as_ref().map(parse_inquiry_row).transpose()
	}

	#[tracing::instrument(skip(self))]
	pub async fn list_inquiries(&self, limit: u32, offset: u32) -> Result<(Vec<Inquiry>, i64)> {
		let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inquiries")
			.fetch_one(&self.pool)
			.await?;

		let rows = sqlx::query(
			r#"
			SELECT id, name, email, phone, company, message, crane_id, locale, created_at
			FROM inquiries
			ORDER BY created_at DESC, id
			LIMIT ? OFFSET ?
			"#,
		)
		.bind(i64::from(limit))
		.bind(i64::from(offset))
		.fetch_all(&self.pool)
		.await?;

		let inquiries = rows.iter().map(parse_inquiry_row).collect::<Result<Vec<_>>>()?;
		Ok((inquiries, total))
	}
}

#[async_trait]
impl InquiryStore for InquiryRepository {
	async fn create_inquiry(&self, inquiry: &NewInquiry) -> Result<Inquiry> {
		self.create_inquiry(inquiry).await
	}

	async fn get_inquiry(&self, id: Uuid) -> Result<Option<Inquiry>> {
		self.get_inquiry(id).await
	}

	async fn list_inquiries(&self, limit: u32, offset: u32) -> Result<(Vec<Inquiry>, i64)> {
		self.list_inquiries(limit, offset).await
	}
}

fn parse_inquiry_row(row: &sqlx::sqlite::SqliteRow) -> Result<Inquiry> {
	let id: String = row.get("id");
	let crane_id: Option<String> = row.get("crane_id");
	let created_at: String = row.get("created_at");

	Ok(Inquiry {
		id: parse_uuid(&id, "inquiry id")?,
		name: row.get("name"),
		email: row.get("email"),
		phone: row.get("phone"),
		company: row.get("company"),
		message: row.get("message"),
		crane_id: parse_optional_uuid(crane_id, "crane_id")?,
		locale: row.get("locale"),
		created_at: parse_timestamp(&created_at, "created_at")?,
	})
}
