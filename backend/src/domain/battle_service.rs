//! Battle domain service.
//!
//! Loads both combatants and their owners, then applies
//! [`resolve_battle`](crate::domain::resolve_battle). Nothing is written.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use super::ownership_service::map_ownership_error;
use super::pokemon_service::{map_repository_error as map_pokemon_error, pokemon_not_found};
use crate::domain::ports::{BattleQuery, OwnershipRepository, PokemonRepository};
use crate::domain::{BattleError, BattleOutcome, Error, Pokemon, PokemonId, resolve_battle};

fn map_battle_error(error: BattleError) -> Error {
    let message = error.to_string();
    match error {
        BattleError::SameTeam { shared_trainers } => {
            let trainers: Vec<i64> = shared_trainers.iter().map(|id| id.get()).collect();
            Error::invalid_request(message).with_details(json!({
                "code": "same_team",
                "trainers": trainers,
            }))
        }
    }
}

/// Battle service implementing [`BattleQuery`].
#[derive(Clone)]
pub struct BattleService<P, O> {
    pokemon_repo: Arc<P>,
    ownership_repo: Arc<O>,
}

impl<P, O> BattleService<P, O> {
    pub fn new(pokemon_repo: Arc<P>, ownership_repo: Arc<O>) -> Self {
        Self {
            pokemon_repo,
            ownership_repo,
        }
    }
}

impl<P, O> BattleService<P, O>
where
    P: PokemonRepository,
    O: OwnershipRepository,
{
    async fn load(&self, id: PokemonId) -> Result<Pokemon, Error> {
        self.pokemon_repo
            .find_by_id(id)
            .await
            .map_err(map_pokemon_error)?
            .ok_or_else(|| pokemon_not_found(id))
    }
}

#[async_trait]
impl<P, O> BattleQuery for BattleService<P, O>
where
    P: PokemonRepository,
    O: OwnershipRepository,
{
    async fn resolve(
        &self,
        pokemon_1: PokemonId,
        pokemon_2: PokemonId,
    ) -> Result<BattleOutcome, Error> {
        let first = self.load(pokemon_1).await?;
        let second = self.load(pokemon_2).await?;

        let owners_1 = self
            .ownership_repo
            .trainer_ids_owning(pokemon_1)
            .await
            .map_err(map_ownership_error)?;
        let owners_2 = self
            .ownership_repo
            .trainer_ids_owning(pokemon_2)
            .await
            .map_err(map_ownership_error)?;

        let outcome =
            resolve_battle(first, second, &owners_1, &owners_2).map_err(map_battle_error)?;
        debug!(%pokemon_1, %pokemon_2, tie = outcome.winner.is_none(), "battle resolved");
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "battle_service_tests.rs"]
mod tests;
