//! Driven port for wiping every stored collection.
use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised while resetting the store.
    pub enum StoreResetError {
        /// The in-memory state could not be cleared.
        Storage { message: String } => "store reset failed: {message}",
    }
}

/// Full reset of users, claims, and profiles, including the durable copy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreReset: Send + Sync {
    /// Clear every collection and remove the persisted snapshot.
    ///
    /// Failing to delete the snapshot file is logged by the adapter and does
    /// not fail the reset.
    async fn reset_all(&self) -> Result<(), StoreResetError>;
}
