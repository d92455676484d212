// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use sqlx::sqlite::SqlitePool;

use crate::error::DbError;

const MIGRATIONS: &[(&str, &str)] = &[
	(
		"001_create_cranes",
		include_str!("../migrations/001_create_cranes.sql"),
	),
	(
		"002_create_slug_redirects",
		include_str!("../migrations/002_create_slug_redirects.sql"),
	),
	(
		"003_create_uploads",
		include_str!("../migrations/003_create_uploads.sql"),
	),
	(
		"004_create_inquiries",
		include_str!("../migrations/004_create_inquiries.sql"),
	),
];

/// Run all database migrations.
///
/// # Errors
/// Returns `DbError::Sqlx` if a statement fails for any reason other than the
/// object already existing.
///
/// # Note
/// Migrations are idempotent - safe to run multiple times.
#[tracing::instrument(skip(pool))]
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DbError> {
	for (name, sql) in MIGRATIONS {
		for stmt in sql.split(';').filter(|s| !s.trim().is_empty()) {
			if let Err(e) = sqlx::query(stmt).execute(pool).await {
				if !e.to_string().contains("already exists") {
					tracing::error!(migration = %name, error = %e, "migration failed");
					return Err(e.into());
				}
			}
		}
		tracing::debug!(migration = %name, "migration applied");
	}

	tracing::info!(count = MIGRATIONS.len(), "database migrations complete");
	Ok(())
}
