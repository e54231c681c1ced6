//! In-memory store backing every repository port.
//!
//! All collections live behind one mutex. A mutation is applied to a clone of
//! the state, the clone is persisted through the [`SnapshotRepository`], and
//! only then swapped in. If persisting fails the live state is untouched, so
//! memory never runs ahead of disk.
//!
//! Mutations and resets run on the blocking pool because the snapshot write
//! touches the disk. The `std::sync::Mutex` is held across that write and is
//! never held across an `.await`.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::Clock;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::ports::{
    ClaimRepository, ClaimRepositoryError, ProfileRepository, ProfileRepositoryError,
    SnapshotRepository, SnapshotRepositoryError, StoreReset, StoreResetError, UserRepository,
    UserRepositoryError,
};
use crate::domain::{
    BarangayClaim, BarangayCode, PasswordHash, StoreSnapshot, User, UserId, UserProfile, Username,
};

#[derive(Debug, Error)]
enum StoreFailure {
    #[error("store lock poisoned")]
    Poisoned,
    #[error("failed to persist snapshot: {0}")]
    Persist(#[from] SnapshotRepositoryError),
    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<StoreFailure> for UserRepositoryError {
    fn from(err: StoreFailure) -> Self {
        Self::storage(err.to_string())
    }
}

impl From<StoreFailure> for ClaimRepositoryError {
    fn from(err: StoreFailure) -> Self {
        Self::storage(err.to_string())
    }
}

impl From<StoreFailure> for ProfileRepositoryError {
    fn from(err: StoreFailure) -> Self {
        Self::storage(err.to_string())
    }
}

impl From<StoreFailure> for StoreResetError {
    fn from(err: StoreFailure) -> Self {
        Self::storage(err.to_string())
    }
}

/// Errors raised while opening a [`MemoryStore`].
#[derive(Debug, Error)]
pub enum MemoryStoreOpenError {
    /// The persisted snapshot could not be read.
    #[error(transparent)]
    Snapshot(#[from] SnapshotRepositoryError),
    /// The snapshot parsed but breaks a store invariant.
    #[error("snapshot violates store invariants: {0}")]
    Inconsistent(String),
}

#[derive(Debug, Clone, Default)]
struct StoreState {
    users: HashMap<UserId, User>,
    user_ids_by_name: HashMap<Username, UserId>,
    claims: HashMap<BarangayCode, BarangayClaim>,
    profiles: HashMap<String, UserProfile>,
}

impl StoreState {
    fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self, MemoryStoreOpenError> {
        let mut state = Self::default();
        for user in snapshot.users {
            if state.user_ids_by_name.contains_key(user.username()) {
                return Err(MemoryStoreOpenError::Inconsistent(format!(
                    "duplicate username {}",
                    user.username()
                )));
            }
            if state.users.contains_key(user.id()) {
                return Err(MemoryStoreOpenError::Inconsistent(format!(
                    "duplicate user id {}",
                    user.id()
                )));
            }
            state.insert_user(user);
        }
        for claim in snapshot.claims {
            let code = claim.barangay_code().clone();
            if state.claims.insert(code.clone(), claim).is_some() {
                return Err(MemoryStoreOpenError::Inconsistent(format!(
                    "barangay {code} claimed twice"
                )));
            }
        }
        for profile in snapshot.profiles {
            let key = profile.key();
            if state.profiles.insert(key.clone(), profile).is_some() {
                return Err(MemoryStoreOpenError::Inconsistent(format!(
                    "duplicate profile for {key}"
                )));
            }
        }
        Ok(state)
    }

    fn insert_user(&mut self, user: User) {
        self.user_ids_by_name
            .insert(user.username().clone(), user.id().clone());
        self.users.insert(user.id().clone(), user);
    }

    fn sorted_claims(&self) -> Vec<BarangayClaim> {
        let mut claims: Vec<_> = self.claims.values().cloned().collect();
        claims.sort_by(|a, b| {
            a.claimed_at()
                .cmp(&b.claimed_at())
                .then_with(|| a.barangay_code().cmp(b.barangay_code()))
        });
        claims
    }

    fn snapshot(&self) -> StoreSnapshot {
        let mut users: Vec<_> = self.users.values().cloned().collect();
        users.sort_by(|a, b| a.username().as_str().cmp(b.username().as_str()));
        let mut profiles: Vec<_> = self.profiles.values().cloned().collect();
        profiles.sort_by_key(UserProfile::key);
        StoreSnapshot {
            users,
            claims: self.sorted_claims(),
            profiles,
        }
    }
}

struct StoreCore {
    state: Mutex<StoreState>,
    snapshots: Arc<dyn SnapshotRepository>,
}

impl StoreCore {
    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, StoreFailure> {
        self.state.lock().map_err(|_| StoreFailure::Poisoned)
    }

    /// Apply `change` to a scratch copy; returning `None` discards the copy
    /// without persisting. Otherwise the copy is persisted and becomes the
    /// live state.
    fn commit<T>(
        &self,
        change: impl FnOnce(&mut StoreState) -> Option<T>,
    ) -> Result<Option<T>, StoreFailure> {
        let mut guard = self.lock()?;
        let mut next = guard.clone();
        let Some(outcome) = change(&mut next) else {
            return Ok(None);
        };
        self.snapshots.save(&next.snapshot())?;
        *guard = next;
        Ok(Some(outcome))
    }

    fn reset(&self) -> Result<(), StoreFailure> {
        let mut guard = self.lock()?;
        *guard = StoreState::default();
        if let Err(err) = self.snapshots.remove() {
            warn!(error = %err, "failed to remove snapshot during reset");
            // Overwrite instead so a restart does not resurrect data.
            if let Err(err) = self.snapshots.save(&StoreSnapshot::default()) {
                warn!(error = %err, "failed to blank snapshot during reset");
            }
        }
        Ok(())
    }
}

/// Thread-safe store for users, claims, and profiles.
pub struct MemoryStore {
    core: Arc<StoreCore>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}

impl MemoryStore {
    /// Build a store from whatever `snapshots` has persisted.
    ///
    /// A missing snapshot yields an empty store. A snapshot that parses but
    /// holds duplicate usernames, codes, or profile keys is rejected.
    pub fn open(
        snapshots: Arc<dyn SnapshotRepository>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Result<Self, MemoryStoreOpenError> {
        let state = match snapshots.load()? {
            Some(snapshot) => {
                let state = StoreState::from_snapshot(snapshot)?;
                info!(
                    users = state.users.len(),
                    claims = state.claims.len(),
                    profiles = state.profiles.len(),
                    "store restored from snapshot"
                );
                state
            }
            None => StoreState::default(),
        };
        Ok(Self {
            core: Arc::new(StoreCore {
                state: Mutex::new(state),
                snapshots,
            }),
            clock,
        })
    }

    /// Apply `change` atomically on the blocking pool.
    async fn commit<T, F>(&self, change: F) -> Result<Option<T>, StoreFailure>
    where
        F: FnOnce(&mut StoreState) -> Option<T> + Send + 'static,
        T: Send + 'static,
    {
        let core = Arc::clone(&self.core);
        tokio::task::spawn_blocking(move || core.commit(change)).await?
    }

    fn read<T>(&self, query: impl FnOnce(&StoreState) -> T) -> Result<T, StoreFailure> {
        let guard = self.core.lock()?;
        Ok(query(&guard))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(
        &self,
        username: &Username,
        password_hash: &PasswordHash,
    ) -> Result<User, UserRepositoryError> {
        let name = username.clone();
        let hash = password_hash.clone();
        self.commit(move |state| {
            if state.user_ids_by_name.contains_key(&name) {
                return None;
            }
            let mut id = UserId::random();
            while state.users.contains_key(&id) {
                id = UserId::random();
            }
            let user = User::new(id, name, hash);
            state.insert_user(user.clone());
            Some(user)
        })
        .await?
        .ok_or_else(|| UserRepositoryError::duplicate_username(username.as_str()))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.read(|state| state.users.get(id).cloned())?)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.read(|state| {
            state
                .users
                .values()
                .find(|user| user.username().as_str() == username)
                .cloned()
        })?)
    }
}

#[async_trait]
impl ClaimRepository for MemoryStore {
    async fn claim(
        &self,
        code: &BarangayCode,
        user_id: &UserId,
        username: &Username,
    ) -> Result<Option<BarangayClaim>, ClaimRepositoryError> {
        let claimed_at = self.clock.utc();
        let code = code.clone();
        let user_id = user_id.clone();
        let username = username.clone();
        Ok(self
            .commit(move |state| match state.claims.entry(code.clone()) {
                Entry::Occupied(_) => None,
                Entry::Vacant(slot) => {
                    let claim = BarangayClaim::new(code, user_id, username, claimed_at);
                    slot.insert(claim.clone());
                    Some(claim)
                }
            })
            .await?)
    }

    async fn find(&self, code: &BarangayCode) -> Result<Option<BarangayClaim>, ClaimRepositoryError> {
        Ok(self.read(|state| state.claims.get(code).cloned())?)
    }

    async fn list_all(&self) -> Result<Vec<BarangayClaim>, ClaimRepositoryError> {
        Ok(self.read(StoreState::sorted_claims)?)
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn save(&self, profile: &UserProfile) -> Result<(), ProfileRepositoryError> {
        let profile = profile.clone();
        self.commit(move |state| {
            state.profiles.insert(profile.key(), profile);
            Some(())
        })
        .await?;
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserProfile>, ProfileRepositoryError> {
        let key = username.to_lowercase();
        Ok(self.read(|state| state.profiles.get(&key).cloned())?)
    }
}

#[async_trait]
impl StoreReset for MemoryStore {
    async fn reset_all(&self) -> Result<(), StoreResetError> {
        let core = Arc::clone(&self.core);
        tokio::task::spawn_blocking(move || core.reset())
            .await
            .map_err(StoreFailure::from)??;
        Ok(())
    }
}
