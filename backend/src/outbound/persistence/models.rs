//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{pokemons, trainer_pokemons, trainers};

/// Row struct for reading from the trainers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = trainers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TrainerRow {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = trainers)]
pub(crate) struct NewTrainerRow<'a> {
    pub name: &'a str,
    pub age: i32,
}

/// Row struct for reading from the pokemons table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pokemons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PokemonRow {
    pub id: i64,
    pub name: String,
    pub photo_url: Option<String>,
    pub height: Option<i32>,
    pub weight: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pokemons)]
pub(crate) struct NewPokemonRow<'a> {
    pub name: &'a str,
    pub photo_url: Option<&'a str>,
    pub height: i32,
    pub weight: i32,
}

/// Roster projection joined from trainer_pokemons and pokemons.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct RosterRow {
    pub trainer_id: i64,
    pub pokemon_id: i64,
    pub name: String,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = trainer_pokemons)]
pub(crate) struct OwnershipRow {
    pub trainer_id: i64,
    pub pokemon_id: i64,
}

/// Partial trainer update. `None` fields are skipped by Diesel.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = trainers)]
pub(crate) struct TrainerChangeset<'a> {
    pub name: Option<&'a str>,
    pub age: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

/// Partial pokémon update. Only the name may change.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = pokemons)]
pub(crate) struct PokemonChangeset<'a> {
    pub name: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}
