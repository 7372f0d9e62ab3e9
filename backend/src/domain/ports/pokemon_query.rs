//! Driving port for pokémon reads.

use async_trait::async_trait;

use crate::domain::{Error, Pokemon, PokemonId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PokemonQuery: Send + Sync {
    async fn list_pokemons(&self) -> Result<Vec<Pokemon>, Error>;

    async fn get_pokemon(&self, id: PokemonId) -> Result<Pokemon, Error>;
}
