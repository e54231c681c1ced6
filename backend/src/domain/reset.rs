//! Administrative reset service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::Error;
use crate::domain::ports::{ResetCommand, StoreReset};

/// Reset service implementing [`ResetCommand`].
pub struct ResetService<S> {
    store: Arc<S>,
}

impl<S> Clone for ResetService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> ResetService<S> {
    /// Create a service over the store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> ResetCommand for ResetService<S>
where
    S: StoreReset,
{
    async fn reset_all(&self) -> Result<(), Error> {
        self.store
            .reset_all()
            .await
            .map_err(|err| Error::internal(format!("store reset failed: {err}")))?;
        warn!("all users, claims, and profiles were reset");
        Ok(())
    }
}
