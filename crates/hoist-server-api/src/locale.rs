// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::{IntoParams, ToSchema};

/// Query for the language switcher, `GET /api/locale`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema, IntoParams))]
pub struct LocaleSwitchQuery {
	/// Target locale code.
	pub lang: String,
	/// Path to return to. Its locale prefix is replaced by `lang`.
	#[serde(default)]
	pub redirect: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LocaleInfo {
	pub code: String,
	pub name: String,
}

/// Response for `GET /api/locales`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LocalesResponse {
	pub locales: Vec<LocaleInfo>,
	pub default: String,
}
