//! Driven port for the external pokémon catalog.
//!
//! Adapters perform a single lookup per call: no retries and no caching.

use async_trait::async_trait;

use crate::domain::{CatalogData, PokemonName};

use super::define_port_error;

define_port_error! {
    /// Failures reported by catalog adapters.
    pub enum PokemonCatalogError {
        /// The catalog has no entry for the queried name.
        NotFound { name: String } => "pokemon '{name}' was not found in the catalog",
        /// The catalog could not be reached or answered with an error.
        ServiceUnavailable { message: String } => "pokemon catalog unavailable: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PokemonCatalog: Send + Sync {
    /// Look up canonical attributes for `name` using its lowercase key.
    async fn fetch(&self, name: &PokemonName) -> Result<CatalogData, PokemonCatalogError>;
}
