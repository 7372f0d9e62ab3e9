//! Driving port for battle resolution.

use async_trait::async_trait;

use crate::domain::{BattleOutcome, Error, PokemonId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BattleQuery: Send + Sync {
    /// Resolve a battle between two stored pokémon. Read-only.
    async fn resolve(
        &self,
        pokemon_1: PokemonId,
        pokemon_2: PokemonId,
    ) -> Result<BattleOutcome, Error>;
}
