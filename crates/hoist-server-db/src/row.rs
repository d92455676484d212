// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use crate::error::DbError;

pub(crate) fn now_rfc3339() -> String {
	Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn to_rfc3339(ts: &DateTime<Utc>) -> String {
	ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn parse_uuid(value: &str, field: &str) -> Result<Uuid, DbError> {
	Uuid::parse_str(value).map_err(|e| DbError::Internal(format!("Invalid {field} UUID: {e}")))
}

pub(crate) fn parse_optional_uuid(value: Option<String>, field: &str) -> Result<Option<Uuid>, DbError> {
	value.map(|s| parse_uuid(&s, field)).transpose()
}

pub(crate) fn parse_timestamp(value: &str, field: &str) -> Result<DateTime<Utc>, DbError> {
	DateTime::parse_from_rfc3339(value)
		.map(|dt| dt.with_timezone(&Utc))
		.map_err(|e| DbError::Internal(format!("Invalid {field}: {e}")))
}
