//! Public user profiles.

use serde::{Deserialize, Serialize};

use super::user::{UserId, Username};

/// Named link shown on a public profile (e.g. "Facebook" → page URL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// Label shown to visitors.
    pub name: String,
    /// Target URL or handle, stored as given.
    pub link: String,
}

/// Editable public fields of a profile.
///
/// Saving a profile replaces every field; anything left `None` is cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFields {
    /// Free-text description of the organisation or volunteer.
    pub summary: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Ordered social links.
    pub social_links: Option<Vec<SocialLink>>,
}

/// Public profile owned by one user.
///
/// ## Invariants
/// - At most one profile exists per case-folded username; see
///   [`UserProfile::key`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    user_id: UserId,
    username: Username,
    fields: ProfileFields,
}

impl UserProfile {
    /// Build a profile for `username`.
    pub fn new(user_id: UserId, username: Username, fields: ProfileFields) -> Self {
        Self {
            user_id,
            username,
            fields,
        }
    }

    /// Owner's id.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Owner's account name as stored on the user record.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Editable fields.
    pub fn fields(&self) -> &ProfileFields {
        &self.fields
    }

    /// Store key: the lowercased username.
    pub fn key(&self) -> String {
        self.username.profile_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_case_folded_username() {
        let profile = UserProfile::new(
            UserId::random(),
            Username::new("Bob").expect("username"),
            ProfileFields::default(),
        );
        assert_eq!(profile.key(), "bob");
        assert_eq!(profile.username().as_str(), "Bob");
    }
}
