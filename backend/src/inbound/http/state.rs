//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountService, BarangayClaimsCommand, BarangayClaimsQuery, PasswordHasher, ResetCommand,
    UserProfileCommand, UserProfileQuery,
};
use crate::domain::{AccountsService, BarangayClaimsService, ResetService, UserProfileService};
use crate::outbound::MemoryStore;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountService>,
    pub claims: Arc<dyn BarangayClaimsCommand>,
    pub claims_query: Arc<dyn BarangayClaimsQuery>,
    pub profiles: Arc<dyn UserProfileCommand>,
    pub profiles_query: Arc<dyn UserProfileQuery>,
    pub reset: Arc<dyn ResetCommand>,
}

impl HttpState {
    /// Wire every driving port to services backed by one shared store.
    pub fn from_store<H>(store: Arc<MemoryStore>, hasher: Arc<H>) -> Self
    where
        H: PasswordHasher + 'static,
    {
        let claims = Arc::new(BarangayClaimsService::new(
            Arc::clone(&store),
            Arc::clone(&store),
        ));
        let profiles = Arc::new(UserProfileService::new(
            Arc::clone(&store),
            Arc::clone(&store),
        ));
        Self {
            accounts: Arc::new(AccountsService::new(Arc::clone(&store), hasher)),
            claims: claims.clone(),
            claims_query: claims,
            profiles: profiles.clone(),
            profiles_query: profiles,
            reset: Arc::new(ResetService::new(store)),
        }
    }
}
