//! Pokémon HTTP handlers.
//!
//! ```text
//! GET    /api/v1/pokemons
//! POST   /api/v1/pokemons
//! GET    /api/v1/pokemons/{id}
//! PUT    /api/v1/pokemons/{id}
//! PATCH  /api/v1/pokemons/{id}
//! DELETE /api/v1/pokemons/{id}
//! ```
//!
//! Clients only ever send a name. Photo, height, and weight come from the
//! catalog at creation and are read-only; any client-supplied values for
//! them are ignored.

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Pokemon, PokemonCandidate, PokemonChanges, PokemonId, PokemonName};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_value_error, require};

const NAME: FieldName = FieldName::new("name");

/// Request payload for creating or renaming a pokémon.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct PokemonRequest {
    #[schema(example = "Pikachu")]
    pub name: Option<String>,
}

/// Pokémon representation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PokemonResponse {
    pub id: i64,
    pub name: String,
    pub photo: Option<String>,
    pub height: Option<u32>,
    pub weight: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Pokemon> for PokemonResponse {
    fn from(value: Pokemon) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.to_string(),
            photo: value.photo_url,
            height: value.height,
            weight: value.weight,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

fn parse_name(payload: PokemonRequest) -> Result<PokemonName, Error> {
    let raw = require(payload.name, NAME)?;
    PokemonName::new(raw).map_err(|err| invalid_value_error(NAME, err))
}

/// List pokémon ordered by id.
#[utoipa::path(
    get,
    path = "/api/v1/pokemons",
    responses(
        (status = 200, description = "All pokemon ordered by id", body = [PokemonResponse]),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["pokemons"],
    operation_id = "listPokemons"
)]
#[get("/pokemons")]
pub async fn list_pokemons(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<PokemonResponse>>> {
    let pokemons = state.pokemons_query.list_pokemons().await?;
    Ok(web::Json(pokemons.into_iter().map(Into::into).collect()))
}

/// Create a pokémon, enriching it from the catalog.
#[utoipa::path(
    post,
    path = "/api/v1/pokemons",
    request_body = PokemonRequest,
    responses(
        (status = 201, description = "Pokemon created", body = PokemonResponse),
        (status = 400, description = "Invalid name or catalog lookup failed", body = ErrorSchema),
        (status = 409, description = "Name already taken", body = ErrorSchema)
    ),
    tags = ["pokemons"],
    operation_id = "createPokemon"
)]
#[post("/pokemons")]
pub async fn create_pokemon(
    state: web::Data<HttpState>,
    payload: web::Json<PokemonRequest>,
) -> ApiResult<HttpResponse> {
    let name = parse_name(payload.into_inner())?;
    let pokemon = state
        .pokemons
        .create_pokemon(PokemonCandidate::named(name))
        .await?;
    Ok(HttpResponse::Created().json(PokemonResponse::from(pokemon)))
}

/// Fetch one pokémon.
#[utoipa::path(
    get,
    path = "/api/v1/pokemons/{id}",
    params(("id" = i64, Path, description = "Pokemon id")),
    responses(
        (status = 200, description = "Pokemon", body = PokemonResponse),
        (status = 404, description = "Pokemon not found", body = ErrorSchema)
    ),
    tags = ["pokemons"],
    operation_id = "getPokemon"
)]
#[get("/pokemons/{id}")]
pub async fn get_pokemon(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<PokemonResponse>> {
    let pokemon = state
        .pokemons_query
        .get_pokemon(PokemonId::new(path.into_inner()))
        .await?;
    Ok(web::Json(pokemon.into()))
}

async fn apply_changes(
    state: &HttpState,
    id: i64,
    changes: PokemonChanges,
) -> ApiResult<web::Json<PokemonResponse>> {
    let pokemon = state
        .pokemons
        .update_pokemon(PokemonId::new(id), changes)
        .await?;
    Ok(web::Json(pokemon.into()))
}

/// Rename a pokémon. Derived attributes are never re-fetched.
#[utoipa::path(
    put,
    path = "/api/v1/pokemons/{id}",
    params(("id" = i64, Path, description = "Pokemon id")),
    request_body = PokemonRequest,
    responses(
        (status = 200, description = "Updated pokemon", body = PokemonResponse),
        (status = 400, description = "Invalid name", body = ErrorSchema),
        (status = 404, description = "Pokemon not found", body = ErrorSchema),
        (status = 409, description = "Name already taken", body = ErrorSchema)
    ),
    tags = ["pokemons"],
    operation_id = "replacePokemon"
)]
#[put("/pokemons/{id}")]
pub async fn replace_pokemon(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<PokemonRequest>,
) -> ApiResult<web::Json<PokemonResponse>> {
    let changes = PokemonChanges {
        name: Some(parse_name(payload.into_inner())?),
    };
    apply_changes(&state, path.into_inner(), changes).await
}

/// Partially update a pokémon. An absent name leaves it unchanged.
#[utoipa::path(
    patch,
    path = "/api/v1/pokemons/{id}",
    params(("id" = i64, Path, description = "Pokemon id")),
    request_body = PokemonRequest,
    responses(
        (status = 200, description = "Updated pokemon", body = PokemonResponse),
        (status = 400, description = "Invalid name", body = ErrorSchema),
        (status = 404, description = "Pokemon not found", body = ErrorSchema),
        (status = 409, description = "Name already taken", body = ErrorSchema)
    ),
    tags = ["pokemons"],
    operation_id = "updatePokemon"
)]
#[patch("/pokemons/{id}")]
pub async fn update_pokemon(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<PokemonRequest>,
) -> ApiResult<web::Json<PokemonResponse>> {
    let payload = payload.into_inner();
    let changes = PokemonChanges {
        name: match payload.name {
            Some(_) => Some(parse_name(payload)?),
            None => None,
        },
    };
    apply_changes(&state, path.into_inner(), changes).await
}

/// Delete a pokémon. Ownership rows go with it; trainers stay.
#[utoipa::path(
    delete,
    path = "/api/v1/pokemons/{id}",
    params(("id" = i64, Path, description = "Pokemon id")),
    responses(
        (status = 204, description = "Pokemon deleted"),
        (status = 404, description = "Pokemon not found", body = ErrorSchema)
    ),
    tags = ["pokemons"],
    operation_id = "deletePokemon"
)]
#[delete("/pokemons/{id}")]
pub async fn delete_pokemon(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .pokemons
        .delete_pokemon(PokemonId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "pokemons_tests.rs"]
mod tests;
