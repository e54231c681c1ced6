//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every validation failure becomes an `invalid_request` error whose details
//! carry `{field, code}` so clients can highlight the offending input.

use actix_web::web;
use serde_json::json;

use crate::domain::{
    BarangayCodeValidationError, CredentialsValidationError, Error, UserValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUsername,
    PasswordTooShort,
    InvalidBarangayCode,
    MalformedBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUsername => "invalid_username",
            ErrorCode::PasswordTooShort => "password_too_short",
            ErrorCode::InvalidBarangayCode => "invalid_barangay_code",
            ErrorCode::MalformedBody => "malformed_body",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const USERNAME: FieldName = FieldName::new("username");
pub(crate) const PASSWORD: FieldName = FieldName::new("password");
pub(crate) const BARANGAY_CODE: FieldName = FieldName::new("barangayCode");

fn field_error(
    message: impl Into<String>,
    field: FieldName,
    code: ErrorCode,
    reason: Option<String>,
) -> Error {
    let mut details = json!({
        "field": field.as_str(),
        "code": code.as_str(),
    });
    if let Some(reason) = reason {
        details["reason"] = json!(reason);
    }
    Error::invalid_request(message).with_details(details)
}

pub(crate) fn missing_field_error(message: &str, field: FieldName) -> Error {
    field_error(message, field, ErrorCode::MissingField, None)
}

/// Map login shape errors. Login only checks presence.
pub(crate) fn login_credentials_error(err: CredentialsValidationError) -> Error {
    const REQUIRED: &str = "Username and password are required";
    match err {
        CredentialsValidationError::EmptyUsername
        | CredentialsValidationError::InvalidUsername(_) => missing_field_error(REQUIRED, USERNAME),
        CredentialsValidationError::EmptyPassword
        | CredentialsValidationError::PasswordTooShort { .. } => {
            missing_field_error(REQUIRED, PASSWORD)
        }
    }
}

/// Map signup validation errors.
pub(crate) fn signup_credentials_error(err: CredentialsValidationError) -> Error {
    const INVALID_INPUT: &str = "Invalid input";
    let reason = Some(err.to_string());
    match err {
        CredentialsValidationError::EmptyUsername
        | CredentialsValidationError::InvalidUsername(UserValidationError::EmptyUsername) => {
            field_error(INVALID_INPUT, USERNAME, ErrorCode::MissingField, reason)
        }
        CredentialsValidationError::InvalidUsername(_) => {
            field_error(INVALID_INPUT, USERNAME, ErrorCode::InvalidUsername, reason)
        }
        CredentialsValidationError::EmptyPassword => {
            field_error(INVALID_INPUT, PASSWORD, ErrorCode::MissingField, reason)
        }
        CredentialsValidationError::PasswordTooShort { .. } => {
            field_error(INVALID_INPUT, PASSWORD, ErrorCode::PasswordTooShort, reason)
        }
    }
}

/// Map barangay code validation errors.
pub(crate) fn barangay_code_error(err: BarangayCodeValidationError) -> Error {
    match err {
        BarangayCodeValidationError::Empty => {
            missing_field_error("Barangay code is required", BARANGAY_CODE)
        }
        other => field_error(
            "Invalid barangay code",
            BARANGAY_CODE,
            ErrorCode::InvalidBarangayCode,
            Some(other.to_string()),
        ),
    }
}

/// JSON extractor configuration that reports malformed bodies in the API
/// error format instead of Actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request("Invalid input")
            .with_details(json!({
                "code": ErrorCode::MalformedBody.as_str(),
                "reason": err.to_string(),
            }))
            .into()
    })
}

/// Unwrap a JSON body that was extracted as a `Result`.
///
/// Protected handlers take their body this way so a missing session is
/// reported before a missing or malformed body.
pub(crate) fn json_body<T>(payload: Result<web::Json<T>, actix_web::Error>) -> Result<T, Error> {
    payload.map(web::Json::into_inner).map_err(|err| {
        err.as_error::<Error>()
            .cloned()
            .unwrap_or_else(|| Error::invalid_request("Invalid input"))
    })
}
