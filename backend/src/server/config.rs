//! Resolved runtime configuration for the HTTP server.

use std::net::SocketAddr;

use backend::outbound::catalog::PokemonCatalogHttpSource;
use backend::outbound::persistence::DbPool;

/// Resolved dependencies for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) catalog: PokemonCatalogHttpSource,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool, catalog: PokemonCatalogHttpSource) -> Self {
        Self {
            bind_addr,
            db_pool,
            catalog,
        }
    }
}
