//! Apply pending database migrations and exit.
//!
//! Resolves the connection URL through the same layered settings as the
//! server, so `POKEDEX_DATABASE_URL`, `DATABASE_URL`, configuration files, and
//! `--database-url` all apply.

use backend::outbound::persistence::run_pending_migrations;
use backend::settings::ServerSettings;
use color_eyre::eyre::{Result, eyre};
use ortho_config::OrthoConfig;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let settings = ServerSettings::load().map_err(|err| eyre!(err.to_string()))?;
    let database_url = settings.database_url()?;

    let applied = run_pending_migrations(&database_url).await?;
    if applied.is_empty() {
        println!("no pending migrations");
    }
    for version in applied {
        println!("applied {version}");
    }
    Ok(())
}
