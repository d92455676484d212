// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared pagination utilities for API handlers.

pub const DEFAULT_PAGE_SIZE: i32 = 20;
pub const MAX_PAGE_SIZE: i32 = 100;

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct PaginationParams {
	pub limit: Option<i32>,
	pub offset: Option<i32>,
}

impl PaginationParams {
	pub fn new(limit: Option<i32>, offset: Option<i32>) -> Self {
		Self { limit, offset }
	}

	pub fn limit_clamped(&self, default: i32, max: i32) -> i32 {
		self.limit.unwrap_or(default).min(max).max(1)
	}

	pub fn offset_or_default(&self) -> i32 {
		self.offset.unwrap_or(0).max(0)
	}
}
