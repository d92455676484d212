// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

#[derive(Debug, thiserror::Error)]
pub enum SeoError {
	#[error("invalid base URL {0:?}: must start with http:// or https://")]
	InvalidBaseUrl(String),

	#[error("failed to write XML: {0}")]
	Write(#[from] std::io::Error),

	#[error("generated XML is not UTF-8: {0}")]
	Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, SeoError>;
