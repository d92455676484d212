// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Hoist tower crane sales site server.
//!
//! This crate wires the inventory database, locale-prefixed page routing,
//! rate-limited public endpoints and SEO files into one axum application.

pub mod admin_auth;
pub mod api;
pub mod api_docs;
pub mod api_response;
pub mod error;
pub mod health;
pub mod i18n;
pub mod pages;
pub mod pagination;
pub mod routes;
pub mod validation;
pub mod version;

pub use api::{create_app_state, create_router, locale_routing_layer, AppState};
pub use api_docs::ApiDoc;
pub use error::ServerError;
pub use hoist_server_config::ServerConfig;
pub use hoist_server_db as db;
