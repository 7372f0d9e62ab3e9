//! PostgreSQL-backed `OwnershipRepository` implementation using Diesel ORM.

use std::collections::BTreeSet;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{OwnershipRepository, OwnershipRepositoryError};
use crate::domain::{PokemonId, TrainerId};

use super::diesel_basic_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::OwnershipRow;
use super::pool::{DbPool, PoolError};
use super::schema::trainer_pokemons;

/// Diesel-backed implementation of the `OwnershipRepository` port.
#[derive(Clone)]
pub struct DieselOwnershipRepository {
    pool: DbPool,
}

impl DieselOwnershipRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> OwnershipRepositoryError {
    map_basic_pool_error(error, OwnershipRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> OwnershipRepositoryError {
    map_basic_diesel_error(
        error,
        OwnershipRepositoryError::query,
        OwnershipRepositoryError::connection,
    )
}

fn map_insert_error(error: diesel::result::Error, row: OwnershipRow) -> OwnershipRepositoryError {
    match constraint_violation(&error) {
        Some(ConstraintViolation::Unique { .. }) => {
            OwnershipRepositoryError::already_owned(row.trainer_id, row.pokemon_id)
        }
        Some(ConstraintViolation::ForeignKey { message }) => {
            OwnershipRepositoryError::missing_reference(message)
        }
        None => map_diesel_error(error),
    }
}

fn pair_filter(
    trainer_id: TrainerId,
    pokemon_id: PokemonId,
) -> diesel::dsl::Filter<
    diesel::dsl::Filter<trainer_pokemons::table, diesel::dsl::Eq<trainer_pokemons::trainer_id, i64>>,
    diesel::dsl::Eq<trainer_pokemons::pokemon_id, i64>,
> {
    trainer_pokemons::table
        .filter(trainer_pokemons::trainer_id.eq(trainer_id.get()))
        .filter(trainer_pokemons::pokemon_id.eq(pokemon_id.get()))
}

#[async_trait]
impl OwnershipRepository for DieselOwnershipRepository {
    async fn exists(
        &self,
        trainer_id: TrainerId,
        pokemon_id: PokemonId,
    ) -> Result<bool, OwnershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(pair_filter(trainer_id, pokemon_id)))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn add(
        &self,
        trainer_id: TrainerId,
        pokemon_id: PokemonId,
    ) -> Result<(), OwnershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = OwnershipRow {
            trainer_id: trainer_id.get(),
            pokemon_id: pokemon_id.get(),
        };

        diesel::insert_into(trainer_pokemons::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_insert_error(err, row))
    }

    async fn remove(
        &self,
        trainer_id: TrainerId,
        pokemon_id: PokemonId,
    ) -> Result<bool, OwnershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(pair_filter(trainer_id, pokemon_id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }

    async fn trainer_ids_owning(
        &self,
        pokemon_id: PokemonId,
    ) -> Result<BTreeSet<TrainerId>, OwnershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let ids: Vec<i64> = trainer_pokemons::table
            .filter(trainer_pokemons::pokemon_id.eq(pokemon_id.get()))
            .select(trainer_pokemons::trainer_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(ids.into_iter().map(TrainerId::new).collect())
    }
}
