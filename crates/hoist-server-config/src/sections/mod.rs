// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections for hoist-server.

pub mod admin;
pub mod database;
pub mod http;
pub mod locale;
pub mod logging;
pub mod paths;
pub mod rate_limit;
pub mod redirects;
pub mod uploads;

pub use admin::AdminConfig;
pub use database::{DatabaseConfig, DatabaseConfigLayer};
pub use http::{HttpConfig, HttpConfigLayer};
pub use locale::{LocaleConfig, LocaleConfigLayer};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
pub use paths::{PathsConfig, PathsConfigLayer};
pub use rate_limit::{RateLimitConfig, RateLimitConfigLayer, RouteLimitConfig, RouteLimitConfigLayer};
pub use redirects::{RedirectPolicy, RedirectsConfig, RedirectsConfigLayer};
pub use uploads::{UploadsConfig, UploadsConfigLayer};
