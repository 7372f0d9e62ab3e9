//! Ownership domain service.
//!
//! Adds and removes pokémon from trainer rosters. Both ids are checked
//! before the pair is touched; duplicate pairs are rejected and the unique
//! key in storage guards concurrent adds.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use super::pokemon_service::{map_repository_error as map_pokemon_error, pokemon_not_found};
use super::trainer_service::{map_repository_error as map_trainer_error, trainer_not_found};
use crate::domain::ports::{
    OwnershipCommand, OwnershipRepository, OwnershipRepositoryError, PokemonRepository,
    TrainerRepository,
};
use crate::domain::{Error, PokemonId, Trainer, TrainerId};

fn already_owned_error(trainer_id: TrainerId, pokemon_id: PokemonId) -> Error {
    Error::invalid_request(format!(
        "trainer {trainer_id} already owns pokemon {pokemon_id}"
    ))
    .with_details(json!({
        "field": "pokemon",
        "code": "already_owned",
    }))
}

fn not_owned_error(trainer_id: TrainerId, pokemon_id: PokemonId) -> Error {
    Error::not_found(format!(
        "trainer {trainer_id} does not own pokemon {pokemon_id}"
    ))
    .with_details(json!({
        "field": "pokemon",
        "code": "not_owned",
    }))
}

pub(crate) fn map_ownership_error(error: OwnershipRepositoryError) -> Error {
    match error {
        OwnershipRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("ownership repository unavailable: {message}"))
        }
        OwnershipRepositoryError::Query { message } => {
            Error::internal(format!("ownership repository error: {message}"))
        }
        OwnershipRepositoryError::AlreadyOwned {
            trainer_id,
            pokemon_id,
        } => already_owned_error(TrainerId::new(trainer_id), PokemonId::new(pokemon_id)),
        OwnershipRepositoryError::MissingReference { message } => Error::not_found(message),
    }
}

/// Ownership service implementing [`OwnershipCommand`].
#[derive(Clone)]
pub struct OwnershipService<T, P, O> {
    trainer_repo: Arc<T>,
    pokemon_repo: Arc<P>,
    ownership_repo: Arc<O>,
}

impl<T, P, O> OwnershipService<T, P, O> {
    /// Create a new service from the three repositories it coordinates.
    pub fn new(trainer_repo: Arc<T>, pokemon_repo: Arc<P>, ownership_repo: Arc<O>) -> Self {
        Self {
            trainer_repo,
            pokemon_repo,
            ownership_repo,
        }
    }
}

impl<T, P, O> OwnershipService<T, P, O>
where
    T: TrainerRepository,
    P: PokemonRepository,
    O: OwnershipRepository,
{
    async fn load_trainer(&self, id: TrainerId) -> Result<Trainer, Error> {
        self.trainer_repo
            .find_by_id(id)
            .await
            .map_err(map_trainer_error)?
            .ok_or_else(|| trainer_not_found(id))
    }

    async fn ensure_references(
        &self,
        trainer_id: TrainerId,
        pokemon_id: PokemonId,
    ) -> Result<(), Error> {
        self.load_trainer(trainer_id).await?;
        self.pokemon_repo
            .find_by_id(pokemon_id)
            .await
            .map_err(map_pokemon_error)?
            .ok_or_else(|| pokemon_not_found(pokemon_id))?;
        Ok(())
    }
}

#[async_trait]
impl<T, P, O> OwnershipCommand for OwnershipService<T, P, O>
where
    T: TrainerRepository,
    P: PokemonRepository,
    O: OwnershipRepository,
{
    async fn add_pokemon(
        &self,
        trainer_id: TrainerId,
        pokemon_id: PokemonId,
    ) -> Result<Trainer, Error> {
        self.ensure_references(trainer_id, pokemon_id).await?;

        let owned = self
            .ownership_repo
            .exists(trainer_id, pokemon_id)
            .await
            .map_err(map_ownership_error)?;
        if owned {
            return Err(already_owned_error(trainer_id, pokemon_id));
        }

        self.ownership_repo
            .add(trainer_id, pokemon_id)
            .await
            .map_err(map_ownership_error)?;
        info!(%trainer_id, %pokemon_id, "pokemon added to roster");

        self.load_trainer(trainer_id).await
    }

    async fn remove_pokemon(
        &self,
        trainer_id: TrainerId,
        pokemon_id: PokemonId,
    ) -> Result<(), Error> {
        self.ensure_references(trainer_id, pokemon_id).await?;

        let removed = self
            .ownership_repo
            .remove(trainer_id, pokemon_id)
            .await
            .map_err(map_ownership_error)?;
        if !removed {
            return Err(not_owned_error(trainer_id, pokemon_id));
        }
        info!(%trainer_id, %pokemon_id, "pokemon removed from roster");
        Ok(())
    }
}

#[cfg(test)]
#[path = "ownership_service_tests.rs"]
mod tests;
