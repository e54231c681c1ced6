//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory_store**: mutex-guarded collections implementing every
//!   repository port
//! - **persistence**: JSON file snapshots written atomically via `cap-std`
//! - **hashing**: Argon2id password hashing
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod hashing;
pub mod memory_store;
pub mod persistence;

pub use hashing::Argon2PasswordHasher;
pub use memory_store::{MemoryStore, MemoryStoreOpenError};
pub use persistence::JsonFileSnapshotRepository;
