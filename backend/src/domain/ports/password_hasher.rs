//! Driven port for one-way password hashing.
//!
//! Implementations are CPU-bound and synchronous; services move calls onto
//! the blocking pool.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHasherError {
        /// Hashing failed or produced an unusable encoding.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Salted, slow password hashing.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh salt.
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError>;

    /// Check `password` against `hash`. A mismatch is `Ok(false)`.
    fn verify(&self, hash: &PasswordHash, password: &str) -> Result<bool, PasswordHasherError>;
}

/// Reversible stand-in hasher for tests where Argon2 would be too slow.
///
/// Never wire this into a running server.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

const FIXTURE_PREFIX: &str = "fixture$";

impl PasswordHasher for FixturePasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        PasswordHash::new(format!("{FIXTURE_PREFIX}{password}"))
            .map_err(|err| PasswordHasherError::hash(err.to_string()))
    }

    fn verify(&self, hash: &PasswordHash, password: &str) -> Result<bool, PasswordHasherError> {
        let stored = hash
            .as_str()
            .strip_prefix(FIXTURE_PREFIX)
            .ok_or_else(|| PasswordHasherError::malformed_hash("missing fixture prefix"))?;
        Ok(stored == password)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("secret1", true)]
    #[case("secret2", false)]
    fn fixture_hasher_verifies_only_the_original(#[case] attempt: &str, #[case] expected: bool) {
        let hasher = FixturePasswordHasher;
        let hash = hasher.hash("secret1").expect("hash");
        assert_ne!(hash.as_str(), "secret1");
        assert_eq!(hasher.verify(&hash, attempt).expect("verify"), expected);
    }

    #[rstest]
    fn fixture_hasher_rejects_foreign_hashes() {
        let hash = PasswordHash::new("$argon2id$v=19$whatever").expect("hash");
        let err = FixturePasswordHasher
            .verify(&hash, "secret1")
            .expect_err("foreign hash");
        assert!(matches!(err, PasswordHasherError::MalformedHash { .. }));
    }
}
