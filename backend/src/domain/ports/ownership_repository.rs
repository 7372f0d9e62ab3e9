//! Port abstraction for trainer–pokémon ownership storage.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::{PokemonId, TrainerId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by ownership repository adapters.
    pub enum OwnershipRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "ownership repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "ownership repository query failed: {message}",
        /// The pair is already recorded.
        AlreadyOwned { trainer_id: i64, pokemon_id: i64 } =>
            "trainer {trainer_id} already owns pokemon {pokemon_id}",
        /// One side of the pair does not exist.
        MissingReference { message: String } => "ownership references a missing record: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnershipRepository: Send + Sync {
    async fn exists(
        &self,
        trainer_id: TrainerId,
        pokemon_id: PokemonId,
    ) -> Result<bool, OwnershipRepositoryError>;

    /// Record the pair. Fails with `AlreadyOwned` when it already exists.
    async fn add(
        &self,
        trainer_id: TrainerId,
        pokemon_id: PokemonId,
    ) -> Result<(), OwnershipRepositoryError>;

    /// Remove the pair. Returns whether a row was removed.
    async fn remove(
        &self,
        trainer_id: TrainerId,
        pokemon_id: PokemonId,
    ) -> Result<bool, OwnershipRepositoryError>;

    /// Trainers currently owning `pokemon_id`.
    async fn trainer_ids_owning(
        &self,
        pokemon_id: PokemonId,
    ) -> Result<BTreeSet<TrainerId>, OwnershipRepositoryError>;
}
