//! Port abstraction for pokémon persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewPokemon, Pokemon, PokemonChanges, PokemonId, PokemonName};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by pokémon repository adapters.
    pub enum PokemonRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "pokemon repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "pokemon repository query failed: {message}",
        /// Another pokémon already uses this name, ignoring case.
        DuplicateName { name: String } => "pokemon name '{name}' is already taken",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PokemonRepository: Send + Sync {
    /// All pokémon ordered by id.
    async fn list(&self) -> Result<Vec<Pokemon>, PokemonRepositoryError>;

    async fn find_by_id(&self, id: PokemonId) -> Result<Option<Pokemon>, PokemonRepositoryError>;

    /// Case-insensitive lookup by name.
    async fn find_by_name(
        &self,
        name: &PokemonName,
    ) -> Result<Option<Pokemon>, PokemonRepositoryError>;

    /// Insert a fully-populated pokémon.
    async fn create(&self, pokemon: &NewPokemon) -> Result<Pokemon, PokemonRepositoryError>;

    /// Apply `changes`, returning `None` when the pokémon does not exist.
    async fn update(
        &self,
        id: PokemonId,
        changes: &PokemonChanges,
    ) -> Result<Option<Pokemon>, PokemonRepositoryError>;

    /// Delete the pokémon and its ownership rows. Returns whether a row was removed.
    async fn delete(&self, id: PokemonId) -> Result<bool, PokemonRepositoryError>;
}
