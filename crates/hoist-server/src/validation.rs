// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared validation utilities for API handlers.
//!
//! Validators take the request locale so the error they return already
//! carries a translated message ready for the response body.

use std::sync::LazyLock;

use chrono::Datelike;
use hoist_common_i18n::{t, t_fmt, Locale};
use hoist_server_api::{ContactRequest, CreateCraneRequest, UpdateCraneRequest};
use regex::Regex;
use uuid::Uuid;

pub const SLUG_MIN_LEN: usize = 2;
pub const SLUG_MAX_LEN: usize = 100;
pub const MIN_YEAR_OF_MANUFACTURE: i32 = 1950;
pub const MAX_CONTACT_MESSAGE_CHARS: usize = 5000;

static SLUG_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*[a-z0-9]$|^[a-z0-9]$").unwrap());

static EMAIL_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@.]+$").unwrap());

/// Validate a slug against format and length constraints.
///
/// Slugs must:
/// - Be between `min_len` and `max_len` characters
/// - Start and end with alphanumeric characters
/// - Contain only lowercase letters, numbers, and hyphens
pub fn validate_slug(slug: &str, min_len: usize, max_len: usize) -> bool {
	slug.len() >= min_len && slug.len() <= max_len && SLUG_REGEX.is_match(slug)
}

/// Loose shape check; deliverability is not our problem.
pub fn is_plausible_email(email: &str) -> bool {
	email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

/// Sanitize an email address by trimming whitespace and lowercasing.
pub fn sanitize_email(email: &str) -> String {
	email.trim().to_lowercase()
}

/// Latest accepted year of manufacture: next year's models are sold ahead.
pub fn max_year_of_manufacture() -> i32 {
	chrono::Utc::now().year() + 1
}

/// Error type for ID parsing failures.
#[derive(Debug, Clone)]
pub struct IdParseError {
	pub error: String,
	pub message: String,
}

/// Parse a string as a raw UUID.
///
/// Returns an error with a localized message if parsing fails.
pub fn parse_uuid(id_str: &str, error_message: &str) -> Result<Uuid, IdParseError> {
	Uuid::parse_str(id_str).map_err(|_| IdParseError {
		error: "invalid_id".to_string(),
		message: error_message.to_string(),
	})
}

/// A rejected field, with a localized message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
	pub error: String,
	pub message: String,
}

impl ValidationError {
	fn new(error: &str, message: String) -> Self {
		Self {
			error: error.to_string(),
			message,
		}
	}
}

type Validation = Result<(), ValidationError>;

fn check_slug(locale: Locale, slug: &str) -> Validation {
	if validate_slug(slug, SLUG_MIN_LEN, SLUG_MAX_LEN) {
		Ok(())
	} else {
		Err(ValidationError::new(
			"invalid_slug",
			t(locale, "api.crane.invalid_slug"),
		))
	}
}

fn check_required(locale: Locale, field: &str, value: &str) -> Validation {
	if value.trim().is_empty() {
		Err(ValidationError::new(
			"missing_field",
			t_fmt(locale, "api.required_field", &[("field", field)]),
		))
	} else {
		Ok(())
	}
}

fn check_capacity(locale: Locale, capacity: i64) -> Validation {
	if capacity > 0 {
		Ok(())
	} else {
		Err(ValidationError::new(
			"invalid_capacity",
			t(locale, "api.crane.invalid_capacity"),
		))
	}
}

fn check_year(locale: Locale, year: Option<i32>) -> Validation {
	let Some(year) = year else {
		return Ok(());
	};
	let max = max_year_of_manufacture();
	if (MIN_YEAR_OF_MANUFACTURE..=max).contains(&year) {
		Ok(())
	} else {
		Err(ValidationError::new(
			"invalid_year",
			t_fmt(
				locale,
				"api.crane.invalid_year",
				&[
					("min", MIN_YEAR_OF_MANUFACTURE.to_string().as_str()),
					("max", max.to_string().as_str()),
				],
			),
		))
	}
}

fn negative(locale: Locale, field: &str) -> ValidationError {
	ValidationError::new(
		"negative_value",
		t_fmt(locale, "api.negative_field", &[("field", field)]),
	)
}

fn check_non_negative_int(locale: Locale, field: &str, value: Option<i64>) -> Validation {
	match value {
		Some(v) if v < 0 => Err(negative(locale, field)),
		_ => Ok(()),
	}
}

fn check_non_negative_float(locale: Locale, field: &str, value: Option<f64>) -> Validation {
	match value {
		Some(v) if !v.is_finite() || v < 0.0 => Err(negative(locale, field)),
		_ => Ok(()),
	}
}

pub fn validate_create_crane(locale: Locale, req: &CreateCraneRequest) -> Validation {
	check_slug(locale, &req.slug)?;
	check_required(locale, "name", &req.name)?;
	check_required(locale, "manufacturer", &req.manufacturer)?;
	check_required(locale, "model", &req.model)?;
	check_capacity(locale, req.max_capacity_kg)?;
	check_year(locale, req.year_of_manufacture)?;
	check_non_negative_int(locale, "tip_capacity_kg", req.tip_capacity_kg)?;
	check_non_negative_float(locale, "max_jib_length_m", req.max_jib_length_m)?;
	check_non_negative_float(locale, "max_hook_height_m", req.max_hook_height_m)?;
	check_non_negative_int(locale, "price_eur", req.price_eur)?;
	Ok(())
}

/// Only fields present in the patch are checked.
pub fn validate_update_crane(locale: Locale, req: &UpdateCraneRequest) -> Validation {
	if let Some(slug) = &req.slug {
		check_slug(locale, slug)?;
	}
	for (field, value) in [
		("name", &req.name),
		("manufacturer", &req.manufacturer),
		("model", &req.model),
	] {
		if let Some(value) = value {
			check_required(locale, field, value)?;
		}
	}
	if let Some(capacity) = req.max_capacity_kg {
		check_capacity(locale, capacity)?;
	}
	check_year(locale, req.year_of_manufacture.flatten())?;
	check_non_negative_int(locale, "tip_capacity_kg", req.tip_capacity_kg.flatten())?;
	check_non_negative_float(locale, "max_jib_length_m", req.max_jib_length_m.flatten())?;
	check_non_negative_float(locale, "max_hook_height_m", req.max_hook_height_m.flatten())?;
	check_non_negative_int(locale, "price_eur", req.price_eur.flatten())?;
	Ok(())
}

pub fn validate_contact(locale: Locale, req: &ContactRequest) -> Validation {
	check_required(locale, "name", &req.name)?;
	if !is_plausible_email(req.email.trim()) {
		return Err(ValidationError::new(
			"invalid_email",
			t(locale, "api.contact.invalid_email"),
		));
	}
	check_required(locale, "message", &req.message)?;
	if req.message.chars().count() > MAX_CONTACT_MESSAGE_CHARS {
		return Err(ValidationError::new(
			"message_too_long",
			t_fmt(
				locale,
				"api.contact.message_too_long",
				&[("max", MAX_CONTACT_MESSAGE_CHARS.to_string().as_str())],
			),
		));
	}
	Ok(())
}
