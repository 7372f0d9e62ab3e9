//! HTTP inbound adapter exposing REST endpoints.

pub mod battle;
pub mod error;
pub mod health;
pub mod pokemons;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod trainers;
pub mod validation;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// The `/api/v1` scope with every registry endpoint and extractor settings
/// that report malformed input as domain errors.
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .app_data(validation::json_config())
        .app_data(validation::path_config())
        .service(trainers::list_trainers)
        .service(trainers::create_trainer)
        .service(trainers::get_trainer)
        .service(trainers::replace_trainer)
        .service(trainers::update_trainer)
        .service(trainers::delete_trainer)
        .service(trainers::add_pokemon)
        .service(trainers::remove_pokemon)
        .service(pokemons::list_pokemons)
        .service(pokemons::create_pokemon)
        .service(pokemons::get_pokemon)
        .service(pokemons::replace_pokemon)
        .service(pokemons::update_pokemon)
        .service(pokemons::delete_pokemon)
        .service(battle::resolve_battle)
}
