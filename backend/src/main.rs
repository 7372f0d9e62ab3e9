//! Backend entry-point: loads settings, prepares persistence, and serves the
//! REST API with its OpenAPI docs.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::catalog::PokemonCatalogHttpSource;
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use backend::settings::ServerSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        ServerSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let database_url = settings.database_url().map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    if settings.run_migrations() {
        run_pending_migrations(&database_url)
            .await
            .map_err(std::io::Error::other)?;
    } else {
        info!("skipping embedded migrations");
    }

    let db_pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(std::io::Error::other)?;
    let catalog = PokemonCatalogHttpSource::new(
        settings.catalog_base_url().map_err(std::io::Error::other)?,
        settings.catalog_timeout(),
    )
    .map_err(std::io::Error::other)?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        ServerConfig::new(bind_addr, db_pool, catalog),
    )?;
    info!(%bind_addr, "pokedex backend listening");
    server.await
}
