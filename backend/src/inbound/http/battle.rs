//! Battle HTTP handler.
//!
//! ```text
//! POST /api/v1/battle
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BattleOutcome, PokemonId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::pokemons::PokemonResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require};

const POKEMON_1: FieldName = FieldName::new("pokemon_1_id");
const POKEMON_2: FieldName = FieldName::new("pokemon_2_id");

/// Request payload naming the two combatants.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct BattleRequest {
    #[schema(example = 6)]
    pub pokemon_1_id: Option<i64>,
    #[schema(example = 25)]
    pub pokemon_2_id: Option<i64>,
}

/// Battle result. `winner` is null on a tie.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BattleResponse {
    #[schema(example = "Charizard (weight: 905) beat Pikachu (weight: 60)!")]
    pub message: String,
    pub winner: Option<PokemonResponse>,
    pub pokemon_1: PokemonResponse,
    pub pokemon_2: PokemonResponse,
}

impl From<BattleOutcome> for BattleResponse {
    fn from(value: BattleOutcome) -> Self {
        let winner = value.winning_pokemon().cloned().map(Into::into);
        Self {
            message: value.message,
            winner,
            pokemon_1: value.pokemon_1.into(),
            pokemon_2: value.pokemon_2.into(),
        }
    }
}

/// Resolve a battle between two pokémon. The heavier one wins.
#[utoipa::path(
    post,
    path = "/api/v1/battle",
    request_body = BattleRequest,
    responses(
        (status = 200, description = "Battle resolved", body = BattleResponse),
        (status = 400, description = "Same team or invalid request", body = ErrorSchema),
        (status = 404, description = "Pokemon not found", body = ErrorSchema)
    ),
    tags = ["battle"],
    operation_id = "resolveBattle"
)]
#[post("/battle")]
pub async fn resolve_battle(
    state: web::Data<HttpState>,
    payload: web::Json<BattleRequest>,
) -> ApiResult<web::Json<BattleResponse>> {
    let BattleRequest {
        pokemon_1_id,
        pokemon_2_id,
    } = payload.into_inner();
    let first = PokemonId::new(require(pokemon_1_id, POKEMON_1)?);
    let second = PokemonId::new(require(pokemon_2_id, POKEMON_2)?);

    let outcome = state.battle.resolve(first, second).await?;
    Ok(web::Json(outcome.into()))
}
