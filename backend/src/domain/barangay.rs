//! Barangay claims.
//!
//! A claim binds one barangay (ADM4 area code) to the user coordinating relief
//! there. Per code the lifecycle is `UNCLAIMED -> CLAIMED`; once claimed the
//! record is immutable and nothing in the system releases it short of a full
//! reset.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::{UserId, Username};

/// Maximum accepted length of a barangay code.
pub const BARANGAY_CODE_MAX: usize = 32;

/// Validation errors for [`BarangayCode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BarangayCodeValidationError {
    /// Code is missing or blank.
    #[error("barangay code must not be empty")]
    Empty,
    /// Code has leading or trailing whitespace.
    #[error("barangay code must not contain surrounding whitespace")]
    SurroundingWhitespace,
    /// Code exceeds [`BARANGAY_CODE_MAX`].
    #[error("barangay code must be at most {max} characters")]
    TooLong { max: usize },
    /// Code contains characters other than ASCII letters and digits.
    #[error("barangay code may only contain ASCII letters and digits")]
    InvalidCharacters,
}

/// ADM4 area code identifying a barangay, e.g. `PH137401001`.
///
/// Codes are compared exactly as given; no case folding is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BarangayCode(String);

impl BarangayCode {
    /// Validate and construct a [`BarangayCode`].
    ///
    /// # Examples
    /// ```
    /// use relief_backend::domain::BarangayCode;
    ///
    /// let code = BarangayCode::new("PH137401001").expect("valid code");
    /// assert_eq!(code.as_str(), "PH137401001");
    /// assert!(BarangayCode::new(" PH1 ").is_err());
    /// ```
    pub fn new(raw: impl Into<String>) -> Result<Self, BarangayCodeValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(BarangayCodeValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(BarangayCodeValidationError::SurroundingWhitespace);
        }
        if raw.chars().count() > BARANGAY_CODE_MAX {
            return Err(BarangayCodeValidationError::TooLong {
                max: BARANGAY_CODE_MAX,
            });
        }
        if !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(BarangayCodeValidationError::InvalidCharacters);
        }
        Ok(Self(raw))
    }

    /// Accept a code read back from persisted state; only blank codes are
    /// refused.
    pub fn from_stored(raw: impl Into<String>) -> Result<Self, BarangayCodeValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(BarangayCodeValidationError::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the code as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BarangayCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<BarangayCode> for String {
    fn from(value: BarangayCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for BarangayCode {
    type Error = BarangayCodeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Exclusive binding of a barangay to the user coordinating relief there.
///
/// `username` is a denormalised copy of the claimant's account name so the
/// claim can be displayed without a user lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarangayClaim {
    barangay_code: BarangayCode,
    user_id: UserId,
    username: Username,
    claimed_at: DateTime<Utc>,
}

impl BarangayClaim {
    /// Assemble a claim record.
    pub fn new(
        barangay_code: BarangayCode,
        user_id: UserId,
        username: Username,
        claimed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            barangay_code,
            user_id,
            username,
            claimed_at,
        }
    }

    /// Claimed barangay.
    pub fn barangay_code(&self) -> &BarangayCode {
        &self.barangay_code
    }

    /// Claimant's id.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Claimant's account name at claim time.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Moment the claim was recorded.
    pub fn claimed_at(&self) -> DateTime<Utc> {
        self.claimed_at
    }

    /// Claim time as milliseconds since the Unix epoch (wire format).
    pub fn claimed_at_millis(&self) -> i64 {
        self.claimed_at.timestamp_millis()
    }
}

/// Public status of a single barangay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimStatus {
    /// Nobody has claimed the barangay yet.
    Unclaimed,
    /// The barangay is claimed; carries the claim.
    Claimed(BarangayClaim),
}

impl From<Option<BarangayClaim>> for ClaimStatus {
    fn from(value: Option<BarangayClaim>) -> Self {
        value.map_or(Self::Unclaimed, Self::Claimed)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case("", BarangayCodeValidationError::Empty)]
    #[case("   ", BarangayCodeValidationError::Empty)]
    #[case(" PH137401001", BarangayCodeValidationError::SurroundingWhitespace)]
    #[case(
        "PH1374010011374010011374010011374",
        BarangayCodeValidationError::TooLong { max: BARANGAY_CODE_MAX }
    )]
    #[case("PH-137401001", BarangayCodeValidationError::InvalidCharacters)]
    fn rejects_invalid_codes(#[case] raw: &str, #[case] expected: BarangayCodeValidationError) {
        assert_eq!(BarangayCode::new(raw).expect_err("invalid code"), expected);
    }

    #[rstest]
    fn claim_exposes_epoch_millis() {
        let claimed_at = Utc
            .timestamp_millis_opt(1_730_000_000_123)
            .single()
            .expect("valid timestamp");
        let claim = BarangayClaim::new(
            BarangayCode::new("PH137401001").expect("code"),
            UserId::random(),
            Username::new("org1").expect("username"),
            claimed_at,
        );
        assert_eq!(claim.claimed_at_millis(), 1_730_000_000_123);
    }

    #[rstest]
    fn status_from_option() {
        assert_eq!(ClaimStatus::from(None), ClaimStatus::Unclaimed);
    }
}
