//! Builders wiring Diesel repositories and the catalog client into HTTP state.

use std::sync::Arc;

use actix_web::web;

use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{
    DieselOwnershipRepository, DieselPokemonRepository, DieselTrainerRepository,
};

use super::ServerConfig;

/// Build the shared HTTP state from the configured pool and catalog.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let pool = &config.db_pool;
    web::Data::new(HttpState::from_adapters(
        Arc::new(DieselTrainerRepository::new(pool.clone())),
        Arc::new(DieselPokemonRepository::new(pool.clone())),
        Arc::new(DieselOwnershipRepository::new(pool.clone())),
        Arc::new(config.catalog.clone()),
    ))
}
