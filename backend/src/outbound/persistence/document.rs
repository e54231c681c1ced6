//! On-disk JSON document for store snapshots.
//!
//! ```json
//! {
//!   "users": [{ "id": "…", "username": "…", "password": "$argon2id$…" }],
//!   "barangayClaims": [{ "barangayCode": "…", "userId": "…", "username": "…", "claimedAt": 1700000000000 }],
//!   "userProfiles": [{ "userId": "…", "username": "…", "summary": "…", "socialLinks": [] }]
//! }
//! ```
//!
//! Missing collections read as empty. Every record is re-validated through
//! the domain constructors on load, so a hand-edited file cannot smuggle in
//! invalid usernames or codes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ports::SnapshotRepositoryError;
use crate::domain::{
    BarangayClaim, BarangayCode, PasswordHash, ProfileFields, SocialLink, StoreSnapshot, User,
    UserId, UserProfile, Username,
};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StoreDocument {
    #[serde(default)]
    users: Vec<UserRecord>,
    #[serde(default)]
    barangay_claims: Vec<ClaimRecord>,
    #[serde(default)]
    user_profiles: Vec<ProfileRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct UserRecord {
    id: String,
    username: String,
    password: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClaimRecord {
    barangay_code: String,
    user_id: String,
    username: String,
    claimed_at: i64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileRecord {
    user_id: String,
    username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    social_links: Option<Vec<SocialLink>>,
}

fn corrupt(kind: &str, err: impl std::fmt::Display) -> SnapshotRepositoryError {
    SnapshotRepositoryError::corrupt(format!("invalid {kind} record: {err}"))
}

impl From<&StoreSnapshot> for StoreDocument {
    fn from(snapshot: &StoreSnapshot) -> Self {
        Self {
            users: snapshot
                .users
                .iter()
                .map(|user| UserRecord {
                    id: user.id().to_string(),
                    username: user.username().to_string(),
                    password: user.password_hash().as_str().to_owned(),
                })
                .collect(),
            barangay_claims: snapshot
                .claims
                .iter()
                .map(|claim| ClaimRecord {
                    barangay_code: claim.barangay_code().to_string(),
                    user_id: claim.user_id().to_string(),
                    username: claim.username().to_string(),
                    claimed_at: claim.claimed_at_millis(),
                })
                .collect(),
            user_profiles: snapshot
                .profiles
                .iter()
                .map(|profile| {
                    let fields = profile.fields().clone();
                    ProfileRecord {
                        user_id: profile.user_id().to_string(),
                        username: profile.username().to_string(),
                        summary: fields.summary,
                        email: fields.email,
                        phone: fields.phone,
                        social_links: fields.social_links,
                    }
                })
                .collect(),
        }
    }
}

impl TryFrom<UserRecord> for User {
    type Error = SnapshotRepositoryError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        let id = UserId::new(&record.id).map_err(|err| corrupt("user", err))?;
        let username = Username::from_stored(record.username)
            .map_err(|err| corrupt("user", err))?;
        let hash = PasswordHash::new(record.password).map_err(|err| corrupt("user", err))?;
        Ok(User::new(id, username, hash))
    }
}

impl TryFrom<ClaimRecord> for BarangayClaim {
    type Error = SnapshotRepositoryError;

    fn try_from(record: ClaimRecord) -> Result<Self, Self::Error> {
        let code = BarangayCode::from_stored(record.barangay_code)
            .map_err(|err| corrupt("claim", err))?;
        let user_id = UserId::new(&record.user_id).map_err(|err| corrupt("claim", err))?;
        let username = Username::from_stored(record.username)
            .map_err(|err| corrupt("claim", err))?;
        let claimed_at = DateTime::<Utc>::from_timestamp_millis(record.claimed_at)
            .ok_or_else(|| corrupt("claim", format!("timestamp {} out of range", record.claimed_at)))?;
        Ok(BarangayClaim::new(code, user_id, username, claimed_at))
    }
}

impl TryFrom<ProfileRecord> for UserProfile {
    type Error = SnapshotRepositoryError;

    fn try_from(record: ProfileRecord) -> Result<Self, Self::Error> {
        let user_id = UserId::new(&record.user_id).map_err(|err| corrupt("profile", err))?;
        let username = Username::from_stored(record.username)
            .map_err(|err| corrupt("profile", err))?;
        let fields = ProfileFields {
            summary: record.summary,
            email: record.email,
            phone: record.phone,
            social_links: record.social_links,
        };
        Ok(UserProfile::new(user_id, username, fields))
    }
}

impl TryFrom<StoreDocument> for StoreSnapshot {
    type Error = SnapshotRepositoryError;

    fn try_from(document: StoreDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            users: document
                .users
                .into_iter()
                .map(User::try_from)
                .collect::<Result<_, _>>()?,
            claims: document
                .barangay_claims
                .into_iter()
                .map(BarangayClaim::try_from)
                .collect::<Result<_, _>>()?,
            profiles: document
                .user_profiles
                .into_iter()
                .map(UserProfile::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}
