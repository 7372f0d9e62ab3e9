//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint in the inbound layer plus the
//! schema wrappers for the domain error payload. The document backs Swagger
//! UI in debug builds and is exported by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::battle::{BattleRequest, BattleResponse};
use crate::inbound::http::pokemons::{PokemonRequest, PokemonResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::trainers::{
    OwnershipRequest, RosterEntryResponse, TrainerRequest, TrainerResponse,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pokedex registry API",
        description = "Trainers, catalog-enriched pokemon, ownership, and battles."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::trainers::list_trainers,
        crate::inbound::http::trainers::create_trainer,
        crate::inbound::http::trainers::get_trainer,
        crate::inbound::http::trainers::replace_trainer,
        crate::inbound::http::trainers::update_trainer,
        crate::inbound::http::trainers::delete_trainer,
        crate::inbound::http::trainers::add_pokemon,
        crate::inbound::http::trainers::remove_pokemon,
        crate::inbound::http::pokemons::list_pokemons,
        crate::inbound::http::pokemons::create_pokemon,
        crate::inbound::http::pokemons::get_pokemon,
        crate::inbound::http::pokemons::replace_pokemon,
        crate::inbound::http::pokemons::update_pokemon,
        crate::inbound::http::pokemons::delete_pokemon,
        crate::inbound::http::battle::resolve_battle,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        TrainerRequest,
        TrainerResponse,
        RosterEntryResponse,
        OwnershipRequest,
        PokemonRequest,
        PokemonResponse,
        BattleRequest,
        BattleResponse,
    )),
    tags(
        (name = "trainers", description = "Trainers and their rosters"),
        (name = "pokemons", description = "Catalog-enriched pokemon"),
        (name = "battle", description = "Weight-based battle resolution"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
