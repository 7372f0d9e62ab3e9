//! Driving port for pokémon mutations.
//!
//! Creation owns the enrichment flow: the candidate is checked, enriched from
//! the catalog, and only then persisted.

use async_trait::async_trait;

use crate::domain::{Error, Pokemon, PokemonCandidate, PokemonChanges, PokemonId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PokemonCommand: Send + Sync {
    /// Enrich and persist a new pokémon. Nothing is stored when enrichment fails.
    async fn create_pokemon(&self, candidate: PokemonCandidate) -> Result<Pokemon, Error>;

    /// Rename an existing pokémon. Derived attributes are never re-fetched.
    async fn update_pokemon(
        &self,
        id: PokemonId,
        changes: PokemonChanges,
    ) -> Result<Pokemon, Error>;

    async fn delete_pokemon(&self, id: PokemonId) -> Result<(), Error>;
}
