//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::NormalizePath;
use actix_web::{App, web};

use crate::domain::ports::{
    MockBattleQuery, MockOwnershipCommand, MockPokemonCommand, MockPokemonQuery,
    MockTrainerCommand, MockTrainerQuery,
};
use crate::inbound::http::api_scope;
use crate::inbound::http::state::HttpState;

/// State whose ports are mocks without expectations. Tests replace the
/// ports they exercise.
pub fn mock_state() -> HttpState {
    HttpState {
        trainers: Arc::new(MockTrainerCommand::new()),
        trainers_query: Arc::new(MockTrainerQuery::new()),
        pokemons: Arc::new(MockPokemonCommand::new()),
        pokemons_query: Arc::new(MockPokemonQuery::new()),
        ownership: Arc::new(MockOwnershipCommand::new()),
        battle: Arc::new(MockBattleQuery::new()),
    }
}

/// App serving the API scope over `state`, with trailing slashes trimmed.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(NormalizePath::trim())
        .service(api_scope())
}
