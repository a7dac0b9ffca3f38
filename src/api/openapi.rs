//! OpenAPI specification generated from handler annotations via utoipa.

use utoipa::openapi::security::{
    ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme,
};
use utoipa::{Modify, OpenApi};

/// Top-level OpenAPI document for the Asset Registry API.
///
/// Each handler module contributes its own paths and schemas via per-module
/// `#[derive(OpenApi)]` structs that are merged into this root document at
/// startup.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Asset Registry API",
        description = "Internal IT asset inventory: workstations, components, printers, cameras and miscellaneous network equipment.",
        version = "0.1.0",
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Login and session management"),
        (name = "workstations", description = "Workstation registry, search and components"),
        (name = "components", description = "Installed software and hardware components"),
        (name = "printers", description = "Printer registry"),
        (name = "cameras", description = "Camera registry"),
        (name = "misc", description = "Miscellaneous network equipment"),
        (name = "network", description = "IP availability scan and IP lookup"),
        (name = "reports", description = "CSV and PDF exports"),
        (name = "health", description = "Health and readiness checks"),
    ),
    components(schemas(ErrorResponse))
)]
pub struct ApiDoc;

/// Standard error response body returned by all endpoints on failure.
#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g. "NOT_FOUND", "VALIDATION_ERROR")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

/// Adds the session cookie and bearer security schemes to the OpenAPI spec.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("session"))),
            );
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build(),
                ),
            );
        }
    }
}

/// Build the merged OpenAPI document from all handler modules.
pub fn build_openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();

    doc.merge(super::handlers::auth::AuthApiDoc::openapi());
    doc.merge(super::handlers::workstations::WorkstationsApiDoc::openapi());
    doc.merge(super::handlers::components::ComponentsApiDoc::openapi());
    doc.merge(super::handlers::printers::PrintersApiDoc::openapi());
    doc.merge(super::handlers::cameras::CamerasApiDoc::openapi());
    doc.merge(super::handlers::misc_assets::MiscAssetsApiDoc::openapi());
    doc.merge(super::handlers::network::NetworkApiDoc::openapi());
    doc.merge(super::handlers::reports::ReportsApiDoc::openapi());
    doc.merge(super::handlers::health::HealthApiDoc::openapi());

    doc
}
