// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::collections::BTreeMap;
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::sections::{
	DatabaseConfigLayer, HttpConfigLayer, LocaleConfigLayer, LogFormat, LoggingConfigLayer,
	PathsConfigLayer, RateLimitConfigLayer, RedirectPolicy, RedirectsConfigLayer,
	RouteLimitConfigLayer, UploadsConfigLayer,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ServerConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ServerConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file is skipped.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/hoist/server.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ServerConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ServerConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: HOIST_SERVER_<SECTION>_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(ServerConfigLayer {
			http: Some(load_http_from_env()?),
			database: Some(load_database_from_env()),
			logging: Some(load_logging_from_env()?),
			locale: Some(load_locale_from_env()?),
			redirects: Some(load_redirects_from_env()?),
			rate_limit: Some(load_rate_limit_from_env()?),
			uploads: Some(load_uploads_from_env()?),
			paths: Some(load_paths_from_env()),
		})
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_bool(name: &str) -> Option<bool> {
	env_var(name).map(|v| v.eq_ignore_ascii_case("true") || v == "1")
}

fn env_parse<T>(name: &str, kind: &str) -> Result<Option<T>, ConfigError>
where
	T: FromStr,
{
	match env_var(name) {
		Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid {kind} value '{v}'"),
		}),
		None => Ok(None),
	}
}

fn env_u16(name: &str) -> Result<Option<u16>, ConfigError> {
	env_parse(name, "u16")
}

fn env_u32(name: &str) -> Result<Option<u32>, ConfigError> {
	env_parse(name, "u32")
}

fn env_u64(name: &str) -> Result<Option<u64>, ConfigError> {
	env_parse(name, "u64")
}

fn env_list(name: &str) -> Option<Vec<String>> {
	env_var(name).map(|s| {
		s.split(',')
			.map(|s| s.trim().to_string())
			.filter(|s| !s.is_empty())
			.collect()
	})
}

fn env_ip_list(name: &str) -> Result<Option<Vec<IpAddr>>, ConfigError> {
	env_list(name)
		.map(|items| {
			items
				.iter()
				.map(|item| {
					item.parse::<IpAddr>().map_err(|e| ConfigError::InvalidValue {
						key: name.to_string(),
						message: format!("invalid IP address '{item}': {e}"),
					})
				})
				.collect()
		})
		.transpose()
}

fn env_redirect(name: &str) -> Result<Option<RedirectPolicy>, ConfigError> {
	env_var(name)
		.map(|v| {
			v.parse()
				.map_err(|message| ConfigError::InvalidValue {
					key: name.to_string(),
					message,
				})
		})
		.transpose()
}

fn load_http_from_env() -> Result<HttpConfigLayer, ConfigError> {
	Ok(HttpConfigLayer {
		host: env_var("HOIST_SERVER_HOST"),
		port: env_u16("HOIST_SERVER_PORT")?,
		base_url: env_var("HOIST_SERVER_BASE_URL"),
	})
}

fn load_database_from_env() -> DatabaseConfigLayer {
	DatabaseConfigLayer {
		url: env_var("HOIST_SERVER_DATABASE_URL"),
	}
}

fn load_logging_from_env() -> Result<LoggingConfigLayer, ConfigError> {
	let format = env_var("HOIST_SERVER_LOG_FORMAT")
		.map(|v| {
			v.parse::<LogFormat>()
				.map_err(|message| ConfigError::InvalidValue {
					key: "HOIST_SERVER_LOG_FORMAT".to_string(),
					message,
				})
		})
		.transpose()?;

	Ok(LoggingConfigLayer {
		level: env_var("HOIST_SERVER_LOG_LEVEL"),
		format,
	})
}

fn load_locale_from_env() -> Result<LocaleConfigLayer, ConfigError> {
	Ok(LocaleConfigLayer {
		default_locale: env_var("HOIST_SERVER_LOCALE_DEFAULT"),
		cookie_name: env_var("HOIST_SERVER_LOCALE_COOKIE_NAME"),
		cookie_max_age_secs: env_u64("HOIST_SERVER_LOCALE_COOKIE_MAX_AGE_SECS")?,
		cookie_secure: env_bool("HOIST_SERVER_LOCALE_COOKIE_SECURE"),
		refresh_cookie: env_bool("HOIST_SERVER_LOCALE_REFRESH_COOKIE"),
		redirect: env_redirect("HOIST_SERVER_LOCALE_REDIRECT")?,
		extra_bypass_prefixes: env_list("HOIST_SERVER_LOCALE_EXTRA_BYPASS_PREFIXES"),
	})
}

fn load_redirects_from_env() -> Result<RedirectsConfigLayer, ConfigError> {
	Ok(RedirectsConfigLayer {
		legacy_slug: env_redirect("HOIST_SERVER_LEGACY_REDIRECT")?,
	})
}

fn load_rate_limit_from_env() -> Result<RateLimitConfigLayer, ConfigError> {
	let mut routes = BTreeMap::new();
	for (route, prefix) in [
		("contact", "HOIST_SERVER_RATE_LIMIT_CONTACT"),
		("uploads", "HOIST_SERVER_RATE_LIMIT_UPLOADS"),
	] {
		let layer = RouteLimitConfigLayer {
			max_requests: env_u32(&format!("{prefix}_MAX_REQUESTS"))?,
			window_secs: env_u64(&format!("{prefix}_WINDOW_SECS"))?,
		};
		if layer != RouteLimitConfigLayer::default() {
			routes.insert(route.to_string(), layer);
		}
	}

	Ok(RateLimitConfigLayer {
		enabled: env_bool("HOIST_SERVER_RATE_LIMIT_ENABLED"),
		sweep_interval_secs: env_u64("HOIST_SERVER_RATE_LIMIT_SWEEP_INTERVAL_SECS")?,
		routes: (!routes.is_empty()).then_some(routes),
		bot_patterns: env_list("HOIST_SERVER_BOT_PATTERNS"),
		trusted_proxies: env_ip_list("HOIST_SERVER_RATE_LIMIT_TRUSTED_PROXIES")?,
	})
}

fn load_uploads_from_env() -> Result<UploadsConfigLayer, ConfigError> {
	Ok(UploadsConfigLayer {
		dir: env_var("HOIST_SERVER_UPLOADS_DIR"),
		max_bytes: env_u64("HOIST_SERVER_UPLOADS_MAX_BYTES")?,
		allowed_types: env_list("HOIST_SERVER_UPLOADS_ALLOWED_TYPES"),
	})
}

fn load_paths_from_env() -> PathsConfigLayer {
	PathsConfigLayer {
		static_dir: env_var("HOIST_SERVER_STATIC_DIR"),
	}
}
