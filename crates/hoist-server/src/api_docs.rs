// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OpenAPI documentation for hoist-server, generated from the handler
//! annotations with utoipa and served at `/api/openapi.json`.

use utoipa::{
	openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
	Modify, OpenApi,
};

/// Registers the admin bearer token scheme referenced by write endpoints.
pub struct AdminTokenAddon;

impl Modify for AdminTokenAddon {
	fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
		if let Some(components) = openapi.components.as_mut() {
			components.add_security_scheme(
				"bearer",
				SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
			);
		}
	}
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hoist Server API",
        version = "1.0.0",
        description = "Tower crane sales site: inventory, uploads, contact requests and locale switching.",
        license(name = "Proprietary")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "cranes", description = "Crane inventory"),
        (name = "uploads", description = "Crane photos and documents"),
        (name = "contact", description = "Contact and quote requests"),
        (name = "locale", description = "Language switching"),
        (name = "seo", description = "Sitemap and robots.txt"),
        (name = "health", description = "Health checks")
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::cranes::list_cranes,
        crate::routes::cranes::get_crane,
        crate::routes::cranes::get_crane_by_slug,
        crate::routes::cranes::create_crane,
        crate::routes::cranes::update_crane,
        crate::routes::cranes::delete_crane,
        crate::routes::uploads::create_upload,
        crate::routes::uploads::get_upload,
        crate::routes::uploads::delete_upload,
        crate::routes::uploads::list_crane_uploads,
        crate::routes::contact::submit_contact,
        crate::routes::locale::switch_locale,
        crate::routes::locale::list_locales,
        crate::routes::seo::sitemap_xml,
        crate::routes::seo::robots_txt,
    ),
    components(
        schemas(
            crate::error::ErrorResponse,
            crate::health::HealthResponse,
            crate::health::HealthStatus,
            crate::health::HealthComponents,
            crate::health::DatabaseHealth,
            crate::health::UploadsDirHealth,
            hoist_server_api::CraneResponse,
            hoist_server_api::CraneLookupResponse,
            hoist_server_api::CreateCraneRequest,
            hoist_server_api::UpdateCraneRequest,
            hoist_server_api::ListCranesResponse,
            hoist_server_api::CraneErrorResponse,
            hoist_server_api::UploadResponse,
            hoist_server_api::ListUploadsResponse,
            hoist_server_api::UploadErrorResponse,
            hoist_server_api::ContactRequest,
            hoist_server_api::ContactResponse,
            hoist_server_api::ContactErrorResponse,
            hoist_server_api::LocaleInfo,
            hoist_server_api::LocalesResponse,
            hoist_server_db::CraneType,
            hoist_server_db::CraneCondition,
            hoist_server_db::CraneStatus,
        )
    ),
    modifiers(&AdminTokenAddon)
)]
pub struct ApiDoc;
