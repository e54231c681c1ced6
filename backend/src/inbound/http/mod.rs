//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod barangay;
pub mod error;
pub mod health;
pub mod profile;
pub mod reset;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every `/api` handler on `cfg`.
///
/// Callers mount this under a scope carrying the session middleware, e.g.
/// `web::scope("/api").wrap(session).configure(api_services)`.
pub fn api_services(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .service(auth::signup)
        .service(auth::login)
        .service(auth::logout)
        .service(auth::me)
        .service(barangay::claim_barangay)
        .service(barangay::list_claims)
        .service(barangay::claim_status)
        .service(profile::save_profile)
        .service(profile::get_profile)
        .service(reset::reset_all);
}
