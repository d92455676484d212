// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Health check types and component checking logic.

use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use sqlx::SqlitePool;
use tokio::time::{timeout, Instant};
use utoipa::ToSchema;

const DB_CHECK_TIMEOUT: Duration = Duration::from_millis(500);

/// Health status for components and overall system.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
	Healthy,
	Degraded,
	Unhealthy,
}

/// Database component health.
#[derive(Debug, Serialize, ToSchema)]
pub struct DatabaseHealth {
	pub status: HealthStatus,
	pub latency_ms: u64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

/// Uploads directory component health.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadsDirHealth {
	pub status: HealthStatus,
	pub latency_ms: u64,
	pub path: String,
	pub exists: bool,
	pub is_dir: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub file_count: Option<usize>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthComponents {
	pub database: DatabaseHealth,
	pub uploads_dir: UploadsDirHealth,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
	pub status: HealthStatus,
	pub timestamp: String,
	pub version: String,
	pub components: HealthComponents,
}

/// Check database connectivity with a bounded wait.
pub async fn check_database(pool: &SqlitePool) -> DatabaseHealth {
	let start = Instant::now();

	let result = timeout(DB_CHECK_TIMEOUT, hoist_server_db::ping(pool)).await;
	let latency_ms = start.elapsed().as_millis() as u64;

	match result {
		Ok(Ok(())) => DatabaseHealth {
			status: HealthStatus::Healthy,
			latency_ms,
			error: None,
		},
		Ok(Err(e)) => DatabaseHealth {
			status: HealthStatus::Unhealthy,
			latency_ms,
			error: Some(e.to_string()),
		},
		Err(_) => DatabaseHealth {
			status: HealthStatus::Unhealthy,
			latency_ms,
			error: Some("database health check timed out".to_string()),
		},
	}
}

/// Check the uploads directory. A missing directory only degrades the
/// service: pages and the API keep working, uploads do not.
pub fn check_uploads_dir(dir: &Path) -> UploadsDirHealth {
	let start = Instant::now();

	let (exists, is_dir, file_count, status, error) = if !dir.exists() {
		(
			false,
			false,
			None,
			HealthStatus::Degraded,
			Some("uploads directory does not exist".to_string()),
		)
	} else if !dir.is_dir() {
		(
			true,
			false,
			None,
			HealthStatus::Degraded,
			Some("uploads path is not a directory".to_string()),
		)
	} else {
		match std::fs::read_dir(dir) {
			Ok(entries) => {
				let count = entries
					.filter_map(Result::ok)
					.filter(|e| !e.file_name().to_string_lossy().starts_with('.'))
					.count();
				(true, true, Some(count), HealthStatus::Healthy, None)
			}
			Err(e) => (
				true,
				true,
				None,
				HealthStatus::Degraded,
				Some(format!("failed to read uploads directory: {e}")),
			),
		}
	};

	UploadsDirHealth {
		status,
		latency_ms: start.elapsed().as_millis() as u64,
		path: dir.display().to_string(),
		exists,
		is_dir,
		file_count,
		error,
	}
}

pub fn aggregate_status(components: &HealthComponents) -> HealthStatus {
	let statuses = [components.database.status, components.uploads_dir.status];

	if statuses
		.iter()
		.any(|s| matches!(s, HealthStatus::Unhealthy))
	{
		HealthStatus::Unhealthy
	} else if statuses.iter().any(|s| matches!(s, HealthStatus::Degraded)) {
		HealthStatus::Degraded
	} else {
		HealthStatus::Healthy
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn components(database: HealthStatus, uploads: HealthStatus) -> HealthComponents {
		HealthComponents {
			database: DatabaseHealth {
				status: database,
				latency_ms: 0,
				error: None,
			},
			uploads_dir: UploadsDirHealth {
				status: uploads,
				latency_ms: 0,
				path: "/tmp".to_string(),
				exists: true,
				is_dir: true,
				file_count: Some(0),
				error: None,
			},
		}
	}

	#[test]
	fn test_aggregate_status() {
		use HealthStatus::*;
		assert_eq!(aggregate_status(&components(Healthy, Healthy)), Healthy);
		assert_eq!(aggregate_status(&components(Healthy, Degraded)), Degraded);
		assert_eq!(aggregate_status(&components(Unhealthy, Degraded)), Unhealthy);
	}

	#[test]
	fn test_uploads_dir_states() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join("a.jpg"), b"x").unwrap();
		std::fs::write(dir.path().join(".keep"), b"").unwrap();

		let health = check_uploads_dir(dir.path());
		assert_eq!(health.status, HealthStatus::Healthy);
		assert_eq!(health.file_count, Some(1));

		let missing = check_uploads_dir(&dir.path().join("nope"));
		assert_eq!(missing.status, HealthStatus::Degraded);
		assert!(!missing.exists);

		let file = check_uploads_dir(&dir.path().join("a.jpg"));
		assert_eq!(file.status, HealthStatus::Degraded);
		assert!(!file.is_dir);
	}

	#[tokio::test]
	async fn test_check_database() {
		let pool = hoist_server_db::testing::create_test_pool().await;
		let health = check_database(&pool).await;
		assert_eq!(health.status, HealthStatus::Healthy);

		pool.close().await;
		let health = check_database(&pool).await;
		assert_eq!(health.status, HealthStatus::Unhealthy);
		assert!(health.error.is_some());
	}
}
