//! Full-state snapshot exchanged between the store and its persistence
//! adapter.
//!
//! The snapshot is the unit of durability: every mutation rewrites the whole
//! thing, and start-up rebuilds the in-memory collections from it.

use super::{BarangayClaim, User, UserProfile};

/// Every user, claim, and profile known to the store.
///
/// Collections are kept in a deterministic order (users by username, claims by
/// claim time then code, profiles by key) so identical states serialise to
/// identical bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSnapshot {
    /// Registered users.
    pub users: Vec<User>,
    /// Barangay claims.
    pub claims: Vec<BarangayClaim>,
    /// Public profiles.
    pub profiles: Vec<UserProfile>,
}

impl StoreSnapshot {
    /// `true` when the snapshot holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.claims.is_empty() && self.profiles.is_empty()
    }
}
