// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Contact or quote request body for `POST /api/contact`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ContactRequest {
	pub name: String,
	pub email: String,
	#[serde(default)]
	pub phone: Option<String>,
	#[serde(default)]
	pub company: Option<String>,
	pub message: String,
	/// Crane the visitor is asking about.
	#[serde(default)]
	pub crane_id: Option<Uuid>,
	/// Locale of the page the form was submitted from.
	#[serde(default)]
	pub locale: Option<String>,
	/// Honeypot. Humans never see this field, so anything in it came from a bot.
	#[serde(default)]
	pub website: Option<String>,
}

impl ContactRequest {
	pub fn is_honeypot_filled(&self) -> bool {
		self
			.website
			.as_deref()
			.is_some_and(|v| !v.trim().is_empty())
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ContactResponse {
	pub status: String,
	pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ContactErrorResponse {
	pub error: String,
	pub message: String,
}
