//! Driving port for roster changes.

use async_trait::async_trait;

use crate::domain::{Error, PokemonId, Trainer, TrainerId};

/// Domain use-case port for adding and removing pokémon from a roster.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnershipCommand: Send + Sync {
    /// Add a pokémon to a trainer's roster and return the updated trainer.
    ///
    /// Fails with `not_found` when either side is missing and with
    /// `invalid_request` (`already_owned`) when the pair exists.
    async fn add_pokemon(
        &self,
        trainer_id: TrainerId,
        pokemon_id: PokemonId,
    ) -> Result<Trainer, Error>;

    /// Remove a pokémon from a trainer's roster.
    ///
    /// Fails with `not_found` (`not_owned`) when the pair does not exist.
    async fn remove_pokemon(
        &self,
        trainer_id: TrainerId,
        pokemon_id: PokemonId,
    ) -> Result<(), Error>;
}
