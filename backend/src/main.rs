//! Person API entry-point: loads settings, prepares the store, and serves
//! HTTP until a shutdown signal arrives.

mod server;

use std::ffi::OsString;
use std::sync::Arc;

use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use person_api::domain::ports::{IndexManager, UniqueIndex};
use person_api::outbound::persistence::{MongoIndexManager, MongoPersonRepository, MongoStore};
use server::{ServerConfig, ServerSettings, StoreSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let program = [OsString::from(env!("CARGO_PKG_NAME"))];
    let server_settings = ServerSettings::load_from_iter(program.clone())
        .map_err(|err| eyre!("failed to load server settings: {err}"))?;
    let store_settings = StoreSettings::load_from_iter(program)
        .map_err(|err| eyre!("failed to load store settings: {err}"))?;

    info!(
        uri = %store_settings.uri(),
        user = store_settings.user.as_deref().unwrap_or("<anonymous>"),
        database = store_settings.database(),
        collection = store_settings.collection(),
        "connecting to document store"
    );
    let store = MongoStore::connect(store_settings.store_config())
        .await
        .wrap_err("document store is unreachable")?;

    let index = UniqueIndex::person();
    MongoIndexManager::new(&store, store_settings.index_timeout())
        .ensure_unique_index(&index)
        .await
        .wrap_err_with(|| format!("failed to ensure index {}", index.name()))?;

    let config = ServerConfig::new(&server_settings);
    let bind_addr = config.bind_addr();
    let repository = Arc::new(MongoPersonRepository::new(&store));
    let server = create_server(config, repository)
        .wrap_err_with(|| format!("failed to start HTTP server on {bind_addr}"))?;
    info!(%bind_addr, "listening");

    let served = server.await.wrap_err("HTTP server failed");
    store.close().await;
    info!("server stopped");
    served
}
