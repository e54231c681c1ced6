//! Backend entry-point: loads settings, restores the store, and serves the
//! REST API with health probes and (in debug builds) Swagger UI.

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use relief_backend::inbound::http::health::HealthState;
use relief_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use server::{ServerConfig, ServerSettings, create_server, open_store};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(format!("failed to load server settings: {e}")))?;
    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .map_err(|e| io::Error::other(format!("invalid session configuration: {e}")))?;
    let store = open_store(settings.data_file.as_deref())?;

    let health_state = web::Data::new(HealthState::new());
    let bind_addr = settings.bind_addr();
    info!(host = %bind_addr.0, port = bind_addr.1, "starting server");
    let server = create_server(health_state, ServerConfig::new(session, bind_addr, store))?;
    server.await
}
