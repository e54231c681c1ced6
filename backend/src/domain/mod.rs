//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed entities for accounts, barangay claims, and
//! public profiles, plus the services that implement the driving ports.
//! Types are immutable once constructed; invariants are documented on each
//! type.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifier.
//! - User, Username, UserId, PasswordHash: account identity.
//! - BarangayCode, BarangayClaim, ClaimStatus: claims.
//! - UserProfile, ProfileFields, SocialLink: public profiles.
//! - StoreSnapshot: unit of durable persistence.
//! - AccountsService, BarangayClaimsService, UserProfileService,
//!   ResetService: driving port implementations.

pub mod accounts;
pub mod auth;
pub mod barangay;
pub mod claims;
pub mod error;
pub mod ports;
pub mod profile;
pub mod profiles;
pub mod reset;
pub mod snapshot;
pub mod trace_id;
pub mod user;

pub use self::accounts::AccountsService;
pub use self::auth::{
    CredentialsValidationError, LoginCredentials, PASSWORD_MIN, SignupCredentials,
};
pub use self::barangay::{
    BARANGAY_CODE_MAX, BarangayClaim, BarangayCode, BarangayCodeValidationError, ClaimStatus,
};
pub use self::claims::BarangayClaimsService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::profile::{ProfileFields, SocialLink, UserProfile};
pub use self::profiles::UserProfileService;
pub use self::reset::ResetService;
pub use self::snapshot::StoreSnapshot;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    PasswordHash, USERNAME_MAX, USERNAME_MIN, User, UserId, UserValidationError, Username,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use relief_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("Not authenticated"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
