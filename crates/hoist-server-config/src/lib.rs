// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Centralized configuration management for the Hoist server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`HOIST_SERVER_*`)
//!
//! # Usage
//!
//! ```ignore
//! use hoist_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("Server listening on {}", config.socket_addr());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use hoist_common_secret::load_secret_env;
use tracing::{debug, info};

const ADMIN_TOKEN_VAR: &str = "HOIST_SERVER_ADMIN_TOKEN";

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub database: DatabaseConfig,
	pub logging: LoggingConfig,
	pub locale: LocaleConfig,
	pub redirects: RedirectsConfig,
	pub rate_limit: RateLimitConfig,
	pub uploads: UploadsConfig,
	pub paths: PathsConfig,
	pub admin: AdminConfig,
}

impl ServerConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}

	/// Resolve a merged layer without touching the environment.
	pub fn from_layer(layer: ServerConfigLayer, admin: AdminConfig) -> Result<Self, ConfigError> {
		let config = ServerConfig {
			http: layer.http.unwrap_or_default().finalize(),
			database: layer.database.unwrap_or_default().finalize(),
			logging: layer.logging.unwrap_or_default().finalize(),
			locale: layer.locale.unwrap_or_default().finalize()?,
			redirects: layer.redirects.unwrap_or_default().finalize(),
			rate_limit: layer.rate_limit.unwrap_or_default().finalize(),
			uploads: layer.uploads.unwrap_or_default().finalize(),
			paths: layer.paths.unwrap_or_default().finalize(),
			admin,
		};

		validate_config(&config)?;
		Ok(config)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`HOIST_SERVER_*`)
/// 2. Config file (`/etc/hoist/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

/// Load configuration from environment only (for testing or simple deployments).
pub fn load_config_from_env() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![Box::new(EnvSource)])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let api_token =
		load_secret_env(ADMIN_TOKEN_VAR).map_err(|e| ConfigError::Secret(e.to_string()))?;
	let config = ServerConfig::from_layer(layer, AdminConfig::new(api_token))?;

	info!(
		host = %config.http.host,
		port = config.http.port,
		base_url = %config.http.base_url,
		database = %config.database.url,
		default_locale = %config.locale.default_locale,
		locale_redirect = ?config.locale.redirect,
		legacy_slug_redirect = ?config.redirects.legacy_slug,
		rate_limit_enabled = config.rate_limit.enabled,
		uploads_dir = %config.uploads.dir.display(),
		admin_configured = config.admin.is_configured(),
		"Server configuration loaded"
	);

	Ok(config)
}

/// Validate cross-field configuration rules.
fn validate_config(config: &ServerConfig) -> Result<(), ConfigError> {
	if config.locale.cookie_max_age_secs == 0 {
		return Err(ConfigError::Validation(
			"locale.cookie_max_age_secs must be greater than zero".to_string(),
		));
	}

	for (route, limit) in &config.rate_limit.routes {
		if limit.max_requests == 0 || limit.window_secs == 0 {
			return Err(ConfigError::Validation(format!(
				"rate_limit.routes.{route} needs max_requests > 0 and window_secs > 0"
			)));
		}
	}

	if config.rate_limit.sweep_interval_secs == 0 {
		return Err(ConfigError::Validation(
			"rate_limit.sweep_interval_secs must be greater than zero".to_string(),
		));
	}

	if config.uploads.max_bytes == 0 {
		return Err(ConfigError::Validation(
			"uploads.max_bytes must be greater than zero".to_string(),
		));
	}

	if !config.http.base_url.starts_with("http://") && !config.http.base_url.starts_with("https://")
	{
		return Err(ConfigError::Validation(format!(
			"http.base_url must be an absolute http(s) URL, got '{}'",
			config.http.base_url
		)));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use hoist_common_i18n::Locale;
	use proptest::prelude::*;
	use std::collections::BTreeMap;

	fn resolve(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
		ServerConfig::from_layer(layer, AdminConfig::default())
	}

	#[test]
	fn defaults_are_valid() {
		let config = resolve(ServerConfigLayer::default()).unwrap();
		assert_eq!(config.socket_addr(), "0.0.0.0:8080");
		assert_eq!(config.locale.default_locale, Locale::En);
		assert_eq!(config.locale.redirect, RedirectPolicy::Temporary);
		assert_eq!(config.redirects.legacy_slug, RedirectPolicy::Permanent);
		assert!(!config.admin.is_configured());
	}

	#[test]
	fn zero_cookie_max_age_is_rejected() {
		let layer = ServerConfigLayer {
			locale: Some(LocaleConfigLayer {
				cookie_max_age_secs: Some(0),
				..Default::default()
			}),
			..Default::default()
		};
		assert!(matches!(resolve(layer), Err(ConfigError::Validation(_))));
	}

	#[test]
	fn zero_route_limit_is_rejected() {
		let layer = ServerConfigLayer {
			rate_limit: Some(RateLimitConfigLayer {
				routes: Some(BTreeMap::from([(
					"contact".to_string(),
					RouteLimitConfigLayer {
						max_requests: Some(0),
						window_secs: None,
					},
				)])),
				..Default::default()
			}),
			..Default::default()
		};
		assert!(matches!(resolve(layer), Err(ConfigError::Validation(_))));
	}

	#[test]
	fn zero_upload_size_is_rejected() {
		let layer = ServerConfigLayer {
			uploads: Some(UploadsConfigLayer {
				max_bytes: Some(0),
				..Default::default()
			}),
			..Default::default()
		};
		assert!(resolve(layer).is_err());
	}

	#[test]
	fn relative_base_url_is_rejected() {
		let layer = ServerConfigLayer {
			http: Some(HttpConfigLayer {
				base_url: Some("www.hoist-cranes.eu".to_string()),
				..Default::default()
			}),
			..Default::default()
		};
		assert!(resolve(layer).is_err());
	}

	#[test]
	fn later_layers_win() {
		let mut merged = ServerConfigLayer::default();
		merged.merge(
			toml::from_str(
				r#"
				[locale]
				default_locale = "nl"
				cookie_secure = true
				"#,
			)
			.unwrap(),
		);
		merged.merge(ServerConfigLayer {
			locale: Some(LocaleConfigLayer {
				default_locale: Some("de".to_string()),
				..Default::default()
			}),
			..Default::default()
		});

		let config = resolve(merged).unwrap();
		assert_eq!(config.locale.default_locale, Locale::De);
		assert!(config.locale.cookie_secure);
	}

	proptest! {
		#[test]
		fn any_positive_port_resolves(port in 1u16..) {
			let layer = ServerConfigLayer {
				http: Some(HttpConfigLayer { port: Some(port), ..Default::default() }),
				..Default::default()
			};
			let config = resolve(layer).unwrap();
			prop_assert_eq!(config.http.port, port);
			prop_assert_eq!(config.http.base_url, format!("http://localhost:{port}"));
		}
	}
}
