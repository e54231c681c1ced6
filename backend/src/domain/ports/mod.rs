//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod barangay_claims;
mod claim_repository;
mod password_hasher;
mod profile_repository;
mod reset_command;
mod snapshot_repository;
mod store_reset;
mod user_profile;
mod user_repository;

pub use account_service::AccountService;
pub use barangay_claims::{BarangayClaimsCommand, BarangayClaimsQuery};
#[cfg(test)]
pub use claim_repository::MockClaimRepository;
pub use claim_repository::{ClaimRepository, ClaimRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{FixturePasswordHasher, PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{ProfileRepository, ProfileRepositoryError};
pub use reset_command::ResetCommand;
#[cfg(test)]
pub use snapshot_repository::MockSnapshotRepository;
pub use snapshot_repository::{
    NoopSnapshotRepository, SnapshotRepository, SnapshotRepositoryError,
};
#[cfg(test)]
pub use store_reset::MockStoreReset;
pub use store_reset::{StoreReset, StoreResetError};
pub use user_profile::{UserProfileCommand, UserProfileQuery};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
