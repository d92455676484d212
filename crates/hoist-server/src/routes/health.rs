// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Health HTTP handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
	api::AppState,
	health::{self, HealthComponents, HealthResponse, HealthStatus},
	version::VERSION,
};

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy or degraded", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    ),
    tag = "health"
)]
/// GET /health - Database and uploads directory checks.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
	let uploads_dir = state.uploads_config.dir.clone();
	let (database, uploads_dir) = tokio::join!(
		health::check_database(&state.pool),
		async move { health::check_uploads_dir(&uploads_dir) }
	);

	let components = HealthComponents {
		database,
		uploads_dir,
	};
	let status = health::aggregate_status(&components);

	if status != HealthStatus::Healthy {
		tracing::warn!(?status, "health check not healthy");
	}

	let response = HealthResponse {
		status,
		timestamp: chrono::Utc::now().to_rfc3339(),
		version: VERSION.to_string(),
		components,
	};

	let http_status = match status {
		HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
		HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
	};

	(http_status, Json(response))
}
