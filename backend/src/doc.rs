//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every HTTP endpoint from the inbound layer together
//! with the error schema wrappers and the session cookie security scheme. The
//! document backs Swagger UI in debug builds.

use crate::inbound::http::auth::{AuthResponse, CredentialsRequest, MeResponse, UserView};
use crate::inbound::http::barangay::{
    ClaimRequest, ClaimResponse, ClaimStatusResponse, ClaimView, ClaimsResponse,
};
use crate::inbound::http::profile::{
    ProfileRequest, ProfileView, SaveProfileResponse, SocialLinkDto,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, MessageResponse};
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Register the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Session cookie issued by POST /api/auth/signup or /api/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Barangay relief backend API",
        description = "Accounts, barangay claims, and public profiles for relief coordinators."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::me,
        crate::inbound::http::barangay::claim_barangay,
        crate::inbound::http::barangay::claim_status,
        crate::inbound::http::barangay::list_claims,
        crate::inbound::http::profile::save_profile,
        crate::inbound::http::profile::get_profile,
        crate::inbound::http::reset::reset_all,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        MessageResponse,
        CredentialsRequest,
        UserView,
        AuthResponse,
        MeResponse,
        ClaimRequest,
        ClaimView,
        ClaimResponse,
        ClaimStatusResponse,
        ClaimsResponse,
        SocialLinkDto,
        ProfileRequest,
        ProfileView,
        SaveProfileResponse
    )),
    tags(
        (name = "auth", description = "Account signup and session management"),
        (name = "barangay", description = "Barangay claims"),
        (name = "profile", description = "Public user profiles"),
        (name = "admin", description = "Development-only maintenance"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_uses_wire_field_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[test]
    fn every_api_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/signup",
            "/api/auth/login",
            "/api/auth/logout",
            "/api/auth/me",
            "/api/barangay/claim",
            "/api/barangay/claim/{code}",
            "/api/barangay/claims",
            "/api/profile",
            "/api/profile/{username}",
            "/api/reset-all",
            "/health/ready",
            "/health/live",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
