// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Admin API credentials.

use hoist_common_secret::SecretString;

/// Admin configuration. Only populated from the environment
/// (`HOIST_SERVER_ADMIN_TOKEN` or `HOIST_SERVER_ADMIN_TOKEN_FILE`).
#[derive(Debug, Clone, Default)]
pub struct AdminConfig {
	/// Bearer token required for inventory and upload writes. When unset,
	/// every write is rejected.
	pub api_token: Option<SecretString>,
}

impl AdminConfig {
	pub fn new(api_token: Option<SecretString>) -> Self {
		Self { api_token }
	}

	pub fn is_configured(&self) -> bool {
		self.api_token.is_some()
	}
}
