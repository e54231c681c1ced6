//! Server settings and the configuration object handed to [`super::create_server`].

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::{info, warn};

use relief_backend::domain::ports::{NoopSnapshotRepository, SnapshotRepository};
use relief_backend::inbound::http::session_config::SessionSettings;
use relief_backend::outbound::{JsonFileSnapshotRepository, MemoryStore};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Listener and storage settings, loaded from `RELIEF_*` variables,
/// configuration files, and the command line.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RELIEF")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// JSON snapshot file. The store is memory-only when unset.
    pub data_file: Option<PathBuf>,
}

impl ServerSettings {
    /// Configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Configured port, falling back to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Address pair accepted by `HttpServer::bind`.
    pub fn bind_addr(&self) -> (String, u16) {
        (self.host().to_owned(), self.port())
    }
}

/// Open the store, restoring from `data_file` when one is configured.
///
/// # Errors
/// Fails when the snapshot directory cannot be opened or the snapshot is
/// unreadable or inconsistent.
pub fn open_store(data_file: Option<&Path>) -> io::Result<Arc<MemoryStore>> {
    let snapshots: Arc<dyn SnapshotRepository> = match data_file {
        Some(path) => {
            let repository = JsonFileSnapshotRepository::open(path).map_err(io::Error::other)?;
            info!(path = %repository.path().display(), "persisting store to JSON file");
            Arc::new(repository)
        }
        None => {
            warn!("no data file configured; store contents are lost on restart");
            Arc::new(NoopSnapshotRepository)
        }
    };
    let store = MemoryStore::open(snapshots, Arc::new(DefaultClock)).map_err(io::Error::other)?;
    Ok(Arc::new(store))
}

/// Everything [`super::create_server`] needs to start listening.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: (String, u16),
    pub(crate) store: Arc<MemoryStore>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: (String, u16), store: Arc<MemoryStore>) -> Self {
        Self {
            session,
            bind_addr,
            store,
        }
    }
}
