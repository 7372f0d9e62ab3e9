//! Trainer HTTP handlers, including roster ownership changes.
//!
//! ```text
//! GET    /api/v1/trainers
//! POST   /api/v1/trainers
//! GET    /api/v1/trainers/{id}
//! PUT    /api/v1/trainers/{id}
//! PATCH  /api/v1/trainers/{id}
//! DELETE /api/v1/trainers/{id}
//! POST   /api/v1/trainers/{id}/add-pokemon
//! POST   /api/v1/trainers/{id}/remove-pokemon
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, NewTrainer, PokemonId, RosterEntry, Trainer, TrainerAge, TrainerChanges, TrainerId,
    TrainerName,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_value_error, require};

const NAME: FieldName = FieldName::new("name");
const AGE: FieldName = FieldName::new("age");
const POKEMON: FieldName = FieldName::new("pokemon");

/// Request payload for creating or updating a trainer.
///
/// `POST` and `PUT` require both fields; `PATCH` accepts either.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct TrainerRequest {
    #[schema(example = "Ash")]
    pub name: Option<String>,
    #[schema(example = 10)]
    pub age: Option<i64>,
}

/// Request payload naming the pokémon to add or remove.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct OwnershipRequest {
    #[schema(example = 25)]
    pub pokemon: Option<i64>,
}

/// Pokémon summary embedded in a trainer.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RosterEntryResponse {
    pub id: i64,
    pub name: String,
    pub photo: Option<String>,
}

impl From<RosterEntry> for RosterEntryResponse {
    fn from(value: RosterEntry) -> Self {
        Self {
            id: value.id.get(),
            name: value.name,
            photo: value.photo_url,
        }
    }
}

/// Trainer representation with its current roster.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TrainerResponse {
    pub id: i64,
    pub name: String,
    pub age: u32,
    pub pokemons: Vec<RosterEntryResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Trainer> for TrainerResponse {
    fn from(value: Trainer) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.to_string(),
            age: value.age.get(),
            pokemons: value.roster.into_iter().map(Into::into).collect(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

fn parse_name(raw: String) -> Result<TrainerName, Error> {
    TrainerName::new(raw).map_err(|err| invalid_value_error(NAME, err))
}

fn parse_age(raw: i64) -> Result<TrainerAge, Error> {
    TrainerAge::new(raw).map_err(|err| invalid_value_error(AGE, err))
}

fn parse_new_trainer(payload: TrainerRequest) -> Result<NewTrainer, Error> {
    Ok(NewTrainer {
        name: parse_name(require(payload.name, NAME)?)?,
        age: parse_age(require(payload.age, AGE)?)?,
    })
}

fn parse_changes(payload: TrainerRequest) -> Result<TrainerChanges, Error> {
    Ok(TrainerChanges {
        name: payload.name.map(parse_name).transpose()?,
        age: payload.age.map(parse_age).transpose()?,
    })
}

fn parse_pokemon_id(payload: OwnershipRequest) -> Result<PokemonId, Error> {
    require(payload.pokemon, POKEMON).map(PokemonId::new)
}

/// List trainers with their rosters.
#[utoipa::path(
    get,
    path = "/api/v1/trainers",
    responses(
        (status = 200, description = "All trainers ordered by id", body = [TrainerResponse]),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["trainers"],
    operation_id = "listTrainers"
)]
#[get("/trainers")]
pub async fn list_trainers(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<TrainerResponse>>> {
    let trainers = state.trainers_query.list_trainers().await?;
    Ok(web::Json(trainers.into_iter().map(Into::into).collect()))
}

/// Create a trainer.
#[utoipa::path(
    post,
    path = "/api/v1/trainers",
    request_body = TrainerRequest,
    responses(
        (status = 201, description = "Trainer created", body = TrainerResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["trainers"],
    operation_id = "createTrainer"
)]
#[post("/trainers")]
pub async fn create_trainer(
    state: web::Data<HttpState>,
    payload: web::Json<TrainerRequest>,
) -> ApiResult<HttpResponse> {
    let new_trainer = parse_new_trainer(payload.into_inner())?;
    let trainer = state.trainers.create_trainer(new_trainer).await?;
    Ok(HttpResponse::Created().json(TrainerResponse::from(trainer)))
}

/// Fetch one trainer.
#[utoipa::path(
    get,
    path = "/api/v1/trainers/{id}",
    params(("id" = i64, Path, description = "Trainer id")),
    responses(
        (status = 200, description = "Trainer", body = TrainerResponse),
        (status = 404, description = "Trainer not found", body = ErrorSchema)
    ),
    tags = ["trainers"],
    operation_id = "getTrainer"
)]
#[get("/trainers/{id}")]
pub async fn get_trainer(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<TrainerResponse>> {
    let trainer = state
        .trainers_query
        .get_trainer(TrainerId::new(path.into_inner()))
        .await?;
    Ok(web::Json(trainer.into()))
}

/// Replace a trainer's name and age.
#[utoipa::path(
    put,
    path = "/api/v1/trainers/{id}",
    params(("id" = i64, Path, description = "Trainer id")),
    request_body = TrainerRequest,
    responses(
        (status = 200, description = "Updated trainer", body = TrainerResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Trainer not found", body = ErrorSchema)
    ),
    tags = ["trainers"],
    operation_id = "replaceTrainer"
)]
#[put("/trainers/{id}")]
pub async fn replace_trainer(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<TrainerRequest>,
) -> ApiResult<web::Json<TrainerResponse>> {
    let NewTrainer { name, age } = parse_new_trainer(payload.into_inner())?;
    let changes = TrainerChanges {
        name: Some(name),
        age: Some(age),
    };
    let trainer = state
        .trainers
        .update_trainer(TrainerId::new(path.into_inner()), changes)
        .await?;
    Ok(web::Json(trainer.into()))
}

/// Update a trainer's name and/or age.
#[utoipa::path(
    patch,
    path = "/api/v1/trainers/{id}",
    params(("id" = i64, Path, description = "Trainer id")),
    request_body = TrainerRequest,
    responses(
        (status = 200, description = "Updated trainer", body = TrainerResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Trainer not found", body = ErrorSchema)
    ),
    tags = ["trainers"],
    operation_id = "updateTrainer"
)]
#[patch("/trainers/{id}")]
pub async fn update_trainer(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<TrainerRequest>,
) -> ApiResult<web::Json<TrainerResponse>> {
    let changes = parse_changes(payload.into_inner())?;
    let trainer = state
        .trainers
        .update_trainer(TrainerId::new(path.into_inner()), changes)
        .await?;
    Ok(web::Json(trainer.into()))
}

/// Delete a trainer. Ownership rows go with it; pokémon stay.
#[utoipa::path(
    delete,
    path = "/api/v1/trainers/{id}",
    params(("id" = i64, Path, description = "Trainer id")),
    responses(
        (status = 204, description = "Trainer deleted"),
        (status = 404, description = "Trainer not found", body = ErrorSchema)
    ),
    tags = ["trainers"],
    operation_id = "deleteTrainer"
)]
#[delete("/trainers/{id}")]
pub async fn delete_trainer(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .trainers
        .delete_trainer(TrainerId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Add a pokémon to the trainer's roster.
#[utoipa::path(
    post,
    path = "/api/v1/trainers/{id}/add-pokemon",
    params(("id" = i64, Path, description = "Trainer id")),
    request_body = OwnershipRequest,
    responses(
        (status = 201, description = "Updated trainer", body = TrainerResponse),
        (status = 400, description = "Already owned or invalid request", body = ErrorSchema),
        (status = 404, description = "Trainer or pokemon not found", body = ErrorSchema)
    ),
    tags = ["trainers"],
    operation_id = "addPokemonToTrainer"
)]
#[post("/trainers/{id}/add-pokemon")]
pub async fn add_pokemon(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<OwnershipRequest>,
) -> ApiResult<HttpResponse> {
    let pokemon_id = parse_pokemon_id(payload.into_inner())?;
    let trainer = state
        .ownership
        .add_pokemon(TrainerId::new(path.into_inner()), pokemon_id)
        .await?;
    Ok(HttpResponse::Created().json(TrainerResponse::from(trainer)))
}

/// Remove a pokémon from the trainer's roster.
#[utoipa::path(
    post,
    path = "/api/v1/trainers/{id}/remove-pokemon",
    params(("id" = i64, Path, description = "Trainer id")),
    request_body = OwnershipRequest,
    responses(
        (status = 204, description = "Pokemon removed"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not owned, or trainer or pokemon not found", body = ErrorSchema)
    ),
    tags = ["trainers"],
    operation_id = "removePokemonFromTrainer"
)]
#[post("/trainers/{id}/remove-pokemon")]
pub async fn remove_pokemon(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<OwnershipRequest>,
) -> ApiResult<HttpResponse> {
    let pokemon_id = parse_pokemon_id(payload.into_inner())?;
    state
        .ownership
        .remove_pokemon(TrainerId::new(path.into_inner()), pokemon_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "trainers_tests.rs"]
mod tests;
