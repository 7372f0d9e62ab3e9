//! PostgreSQL-backed `PokemonRepository` implementation using Diesel ORM.
//!
//! Name uniqueness is case-insensitive and enforced by a unique index on
//! `lower(name)`; violations surface as `DuplicateName`.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{PokemonRepository, PokemonRepositoryError};
use crate::domain::{NewPokemon, Pokemon, PokemonChanges, PokemonId, PokemonName};

use super::diesel_basic_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewPokemonRow, PokemonChangeset, PokemonRow};
use super::pool::{DbPool, PoolError};
use super::schema::pokemons;

diesel::define_sql_function! {
    /// SQL `lower()` used for case-insensitive name matching.
    fn lower(value: Text) -> Text;
}

/// Diesel-backed implementation of the `PokemonRepository` port.
#[derive(Clone)]
pub struct DieselPokemonRepository {
    pool: DbPool,
}

impl DieselPokemonRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PokemonRepositoryError {
    map_basic_pool_error(error, PokemonRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PokemonRepositoryError {
    map_basic_diesel_error(
        error,
        PokemonRepositoryError::query,
        PokemonRepositoryError::connection,
    )
}

/// Map a write failure, turning unique violations into `DuplicateName`.
fn map_write_error(error: diesel::result::Error, name: &str) -> PokemonRepositoryError {
    match constraint_violation(&error) {
        Some(ConstraintViolation::Unique { .. }) => PokemonRepositoryError::duplicate_name(name),
        _ => map_diesel_error(error),
    }
}

fn attribute_column(value: u32, field: &'static str) -> Result<i32, PokemonRepositoryError> {
    i32::try_from(value)
        .map_err(|_| PokemonRepositoryError::query(format!("{field} exceeds column range")))
}

fn attribute_value(value: Option<i32>) -> Option<u32> {
    value.and_then(|raw| u32::try_from(raw).ok())
}

fn row_to_pokemon(row: PokemonRow) -> Result<Pokemon, PokemonRepositoryError> {
    let name = PokemonName::new(&row.name).map_err(|err| {
        warn!(pokemon_id = row.id, error = %err, "stored pokemon name is invalid");
        PokemonRepositoryError::query(format!("invalid pokemon row {}", row.id))
    })?;

    Ok(Pokemon {
        id: PokemonId::new(row.id),
        name,
        photo_url: row.photo_url,
        height: attribute_value(row.height),
        weight: attribute_value(row.weight),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl PokemonRepository for DieselPokemonRepository {
    async fn list(&self) -> Result<Vec<Pokemon>, PokemonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PokemonRow> = pokemons::table
            .order(pokemons::id.asc())
            .select(PokemonRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_pokemon).collect()
    }

    async fn find_by_id(&self, id: PokemonId) -> Result<Option<Pokemon>, PokemonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PokemonRow> = pokemons::table
            .find(id.get())
            .select(PokemonRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_pokemon).transpose()
    }

    async fn find_by_name(
        &self,
        name: &PokemonName,
    ) -> Result<Option<Pokemon>, PokemonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PokemonRow> = pokemons::table
            .filter(lower(pokemons::name).eq(name.catalog_key()))
            .select(PokemonRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_pokemon).transpose()
    }

    async fn create(&self, pokemon: &NewPokemon) -> Result<Pokemon, PokemonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let attributes = &pokemon.attributes;
        let new_row = NewPokemonRow {
            name: pokemon.name.as_ref(),
            photo_url: attributes.photo_url.as_deref(),
            height: attribute_column(attributes.height, "height")?,
            weight: attribute_column(attributes.weight, "weight")?,
        };

        let row: PokemonRow = diesel::insert_into(pokemons::table)
            .values(&new_row)
            .returning(PokemonRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, pokemon.name.as_ref()))?;

        row_to_pokemon(row)
    }

    async fn update(
        &self,
        id: PokemonId,
        changes: &PokemonChanges,
    ) -> Result<Option<Pokemon>, PokemonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_name = changes.name.as_ref().map(AsRef::as_ref);
        let changeset = PokemonChangeset {
            name: new_name,
            updated_at: Utc::now(),
        };

        let row: Option<PokemonRow> = diesel::update(pokemons::table.find(id.get()))
            .set(&changeset)
            .returning(PokemonRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_write_error(err, new_name.unwrap_or_default()))?;

        row.map(row_to_pokemon).transpose()
    }

    async fn delete(&self, id: PokemonId) -> Result<bool, PokemonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // trainer_pokemons rows cascade.
        let deleted = diesel::delete(pokemons::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
