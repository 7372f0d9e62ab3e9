//! Catalog outbound adapters.
//!
//! Provides the reqwest implementation of the `PokemonCatalog` port.

mod dto;
mod http_source;

pub use http_source::PokemonCatalogHttpSource;
