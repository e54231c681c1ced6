//! Driven port for durable snapshots of the whole store.
//!
//! Unlike the other ports this one is synchronous: the store calls it while
//! holding its state lock so that "mutate, persist, commit" is one critical
//! section with no suspension point inside.

use crate::domain::StoreSnapshot;

use super::define_port_error;

define_port_error! {
    /// Errors raised by snapshot persistence adapters.
    pub enum SnapshotRepositoryError {
        /// Reading, writing, renaming, or deleting the file failed.
        Io { message: String } => "snapshot I/O failed: {message}",
        /// The stored document could not be parsed or holds invalid records.
        Corrupt { message: String } => "snapshot is corrupt: {message}",
        /// The in-memory state could not be encoded.
        Serialization { message: String } => "snapshot serialisation failed: {message}",
    }
}

/// Load/save/remove of a full [`StoreSnapshot`].
#[cfg_attr(test, mockall::automock)]
pub trait SnapshotRepository: Send + Sync {
    /// Read the persisted snapshot; `Ok(None)` when nothing has been saved.
    fn load(&self) -> Result<Option<StoreSnapshot>, SnapshotRepositoryError>;

    /// Replace the persisted snapshot with `snapshot`.
    fn save(&self, snapshot: &StoreSnapshot) -> Result<(), SnapshotRepositoryError>;

    /// Delete the persisted snapshot. Absence is not an error.
    fn remove(&self) -> Result<(), SnapshotRepositoryError>;
}

/// Snapshot repository for memory-only deployments and tests: nothing is
/// loaded and writes are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSnapshotRepository;

impl SnapshotRepository for NoopSnapshotRepository {
    fn load(&self) -> Result<Option<StoreSnapshot>, SnapshotRepositoryError> {
        Ok(None)
    }

    fn save(&self, _snapshot: &StoreSnapshot) -> Result<(), SnapshotRepositoryError> {
        Ok(())
    }

    fn remove(&self) -> Result<(), SnapshotRepositoryError> {
        Ok(())
    }
}
