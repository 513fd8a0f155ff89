//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every production and diagnostic endpoint, the schema
//! wrappers from [`crate::inbound::http::schemas`], and the two ways a caller
//! can present an access token. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::schemas::{DefaultIntervalSchema, ErrorCodeSchema, ErrorSchema};
use crate::middleware::ACCESS_TOKEN_COOKIE;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Access token issued by the identity service."))
                    .build(),
            ),
        );
        components.add_security_scheme(
            "AccessTokenCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                ACCESS_TOKEN_COOKIE,
                "Access token cookie set by the browser client.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Bikecare API",
        description = "Bike maintenance records backed by a hosted database."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = []), ("AccessTokenCookie" = [])),
    paths(
        crate::inbound::http::bikes::list_bikes,
        crate::inbound::http::services::list_services,
        crate::inbound::http::services::create_service,
        crate::inbound::http::services::service_status,
        crate::inbound::http::default_intervals::list_default_intervals,
        crate::inbound::http::profile::get_profile,
        crate::inbound::http::locations::list_locations,
        crate::inbound::http::diagnostics::connectivity,
        crate::inbound::http::diagnostics::recent_locations,
        crate::inbound::http::diagnostics::recent_profiles,
        crate::inbound::http::diagnostics::mock_default_intervals,
        crate::inbound::http::diagnostics::echo_services,
        crate::inbound::http::diagnostics::mock_services,
        crate::inbound::http::diagnostics::create_mock_profile,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema, DefaultIntervalSchema)),
    tags(
        (name = "bikes", description = "Bikes owned by the caller"),
        (name = "services", description = "Service history and status per bike"),
        (name = "intervals", description = "Recommended service intervals"),
        (name = "profile", description = "Rider profile"),
        (name = "locations", description = "Saved locations"),
        (name = "diagnostics", description = "Development-only endpoints"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/api/bikes")]
    #[case("/api/bikes/{bikeId}/services")]
    #[case("/api/bikes/{bikeId}/service-status")]
    #[case("/api/default-intervals")]
    #[case("/api/profile")]
    #[case("/api/locations")]
    #[case("/api/debug/mock-profile")]
    #[case("/health/ready")]
    fn document_lists_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[test]
    fn document_registers_both_token_schemes() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("BearerToken"));
        assert!(components.security_schemes.contains_key("AccessTokenCookie"));
    }

    #[test]
    fn error_schema_is_named_after_the_domain_type() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.schemas.keys().any(|name| name.ends_with("Error")));
    }
}
