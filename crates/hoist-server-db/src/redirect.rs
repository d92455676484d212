// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Read access to legacy slug redirects. Writes happen in
//! [`crate::CraneRepository`] alongside the slug change itself.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePool, Row};
use utoipa::ToSchema;

use crate::error::Result;
use crate::row::parse_timestamp;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SlugRedirect {
	pub old_slug: String,
	pub new_slug: String,
	pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait SlugRedirectStore: Send + Sync {
	async fn find_redirect(&self, old_slug: &str) -> Result<Option<SlugRedirect>>;
	async fn list_redirects(&self) -> Result<Vec<SlugRedirect>>;
}

#[derive(Clone)]
pub struct SlugRedirectRepository {
	pool: SqlitePool,
}

impl SlugRedirectRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self))]
	pub async fn find_redirect(&self, old_slug: &str) -> Result<Option<SlugRedirect>> {
		let row = sqlx::query(
			"SELECT old_slug, new_slug, created_at FROM slug_redirects WHERE old_slug = ?",
		)
		.bind(old_slug)
		.fetch_optional(&self.pool)
		.await?;

		row.as_ref().map(parse_redirect_row).transpose()
	}

	#[tracing::instrument(skip(self))]
	pub async fn list_redirects(&self) -> Result<Vec<SlugRedirect>> {
		let rows = sqlx::query(
			"SELECT old_slug, new_slug, created_at FROM slug_redirects ORDER BY old_slug",
		)
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(parse_redirect_row).collect()
	}
}

#[async_trait]
impl SlugRedirectStore for SlugRedirectRepository {
	async fn find_redirect(&self, old_slug: &str) -> Result<Option<SlugRedirect>> {
		self.find_redirect(old_slug).await
	}

	async fn list_redirects(&self) -> Result<Vec<SlugRedirect>> {
		self.list_redirects().await
	}
}

fn parse_redirect_row(row: &sqlx::sqlite::SqliteRow) -> Result<SlugRedirect> {
	let created_at: String = row.get("created_at");
	Ok(SlugRedirect {
		old_slug: row.get("old_slug"),
		new_slug: row.get("new_slug"),
		created_at: parse_timestamp(&created_at, "created_at")?,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::create_test_pool;

	#[tokio::test]
	async fn find_redirect_reads_inserted_row() {
		let pool = create_test_pool().await;
		sqlx::query(
			"INSERT INTO slug_redirects (old_slug, new_slug, created_at) VALUES ('old', 'new', '2025-01-01T00:00:00Z')",
		)
		.execute(&pool)
		.await
		.unwrap();

		let repo = SlugRedirectRepository::new(pool);
		let redirect = repo.find_redirect("old").await.unwrap().unwrap();
		assert_eq!(redirect.new_slug, "new");
		assert!(repo.find_redirect("new").await.unwrap().is_none());
	}
}
