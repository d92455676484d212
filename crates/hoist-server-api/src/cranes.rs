// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use hoist_server_db::{
	Crane, CraneCondition, CraneStatus, CraneType, CraneUpdate, NewCrane, SlugMatch,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::{IntoParams, ToSchema};

use crate::serde_helpers::double_option;

/// A crane in API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CraneResponse {
	pub id: Uuid,
	/// Current URL slug.
	pub slug: String,
	pub name: String,
	pub manufacturer: String,
	pub model: String,
	pub crane_type: CraneType,
	pub condition: CraneCondition,
	pub status: CraneStatus,
	pub year_of_manufacture: Option<i32>,
	pub max_capacity_kg: i64,
	pub tip_capacity_kg: Option<i64>,
	pub max_jib_length_m: Option<f64>,
	pub max_hook_height_m: Option<f64>,
	/// Whole euros; absent means price on request.
	pub price_eur: Option<i64>,
	pub location: Option<String>,
	pub description: String,
	pub featured: bool,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl From<Crane> for CraneResponse {
	fn from(c: Crane) -> Self {
		Self {
			id: c.id,
			slug: c.slug,
			name: c.name,
			manufacturer: c.manufacturer,
			model: c.model,
			crane_type: c.crane_type,
			condition: c.condition,
			status: c.status,
			year_of_manufacture: c.year_of_manufacture,
			max_capacity_kg: c.max_capacity_kg,
			tip_capacity_kg: c.tip_capacity_kg,
			max_jib_length_m: c.max_jib_length_m,
			max_hook_height_m: c.max_hook_height_m,
			price_eur: c.price_eur,
			location: c.location,
			description: c.description,
			featured: c.featured,
			created_at: c.created_at,
			updated_at: c.updated_at,
		}
	}
}

/// Result of `GET /api/cranes/by-slug/{slug}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CraneLookupResponse {
	pub crane: CraneResponse,
	/// The legacy slug that was requested, when the lookup followed a redirect.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub redirected_from: Option<String>,
}

impl From<SlugMatch> for CraneLookupResponse {
	fn from(found: SlugMatch) -> Self {
		match found {
			SlugMatch::Current(crane) => Self {
				crane: crane.into(),
				redirected_from: None,
			},
			SlugMatch::Redirected { from, crane } => Self {
				crane: crane.into(),
				redirected_from: Some(from),
			},
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateCraneRequest {
	pub slug: String,
	pub name: String,
	pub manufacturer: String,
	pub model: String,
	pub crane_type: CraneType,
	pub condition: CraneCondition,
	#[serde(default)]
	pub status: CraneStatus,
	#[serde(default)]
	pub year_of_manufacture: Option<i32>,
	pub max_capacity_kg: i64,
	#[serde(default)]
	pub tip_capacity_kg: Option<i64>,
	#[serde(default)]
	pub max_jib_length_m: Option<f64>,
	#[serde(default)]
	pub max_hook_height_m: Option<f64>,
	#[serde(default)]
	pub price_eur: Option<i64>,
	#[serde(default)]
	pub location: Option<String>,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub featured: bool,
}

impl From<CreateCraneRequest> for NewCrane {
	fn from(r: CreateCraneRequest) -> Self {
		Self {
			slug: r.slug,
			name: r.name,
			manufacturer: r.manufacturer,
			model: r.model,
			crane_type: r.crane_type,
			condition: r.condition,
			status: r.status,
			year_of_manufacture: r.year_of_manufacture,
			max_capacity_kg: r.max_capacity_kg,
			tip_capacity_kg: r.tip_capacity_kg,
			max_jib_length_m: r.max_jib_length_m,
			max_hook_height_m: r.max_hook_height_m,
			price_eur: r.price_eur,
			location: r.location,
			description: r.description,
			featured: r.featured,
		}
	}
}

/// Partial update. Omitted fields are untouched; `null` clears a nullable
/// field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UpdateCraneRequest {
	#[serde(default)]
	pub slug: Option<String>,
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub manufacturer: Option<String>,
	#[serde(default)]
	pub model: Option<String>,
	#[serde(default)]
	pub crane_type: Option<CraneType>,
	#[serde(default)]
	pub condition: Option<CraneCondition>,
	#[serde(default)]
	pub status: Option<CraneStatus>,
	#[serde(default, deserialize_with = "double_option")]
	#[cfg_attr(feature = "openapi", schema(value_type = Option<i32>))]
	pub year_of_manufacture: Option<Option<i32>>,
	#[serde(default)]
	pub max_capacity_kg: Option<i64>,
	#[serde(default, deserialize_with = "double_option")]
	#[cfg_attr(feature = "openapi", schema(value_type = Option<i64>))]
	pub tip_capacity_kg: Option<Option<i64>>,
	#[serde(default, deserialize_with = "double_option")]
	#[cfg_attr(feature = "openapi", schema(value_type = Option<f64>))]
	pub max_jib_length_m: Option<Option<f64>>,
	#[serde(default, deserialize_with = "double_option")]
	#[cfg_attr(feature = "openapi", schema(value_type = Option<f64>))]
	pub max_hook_height_m: Option<Option<f64>>,
	#[serde(default, deserialize_with = "double_option")]
	#[cfg_attr(feature = "openapi", schema(value_type = Option<i64>))]
	pub price_eur: Option<Option<i64>>,
	#[serde(default, deserialize_with = "double_option")]
	#[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
	pub location: Option<Option<String>>,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub featured: Option<bool>,
}

impl From<UpdateCraneRequest> for CraneUpdate {
	fn from(r: UpdateCraneRequest) -> Self {
		Self {
			slug: r.slug,
			name: r.name,
			manufacturer: r.manufacturer,
			model: r.model,
			crane_type: r.crane_type,
			condition: r.condition,
			status: r.status,
			year_of_manufacture: r.year_of_manufacture,
			max_capacity_kg: r.max_capacity_kg,
			tip_capacity_kg: r.tip_capacity_kg,
			max_jib_length_m: r.max_jib_length_m,
			max_hook_height_m: r.max_hook_height_m,
			price_eur: r.price_eur,
			location: r.location,
			description: r.description,
			featured: r.featured,
		}
	}
}

/// Query parameters for `GET /api/cranes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema, IntoParams))]
pub struct ListCranesQuery {
	pub status: Option<CraneStatus>,
	pub crane_type: Option<CraneType>,
	pub condition: Option<CraneCondition>,
	pub featured: Option<bool>,
	/// Defaults to 20, capped at 100.
	pub limit: Option<i32>,
	pub offset: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ListCranesResponse {
	pub cranes: Vec<CraneResponse>,
	pub total: i64,
	pub limit: i32,
	pub offset: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CraneErrorResponse {
	pub error: String,
	pub message: String,
}
