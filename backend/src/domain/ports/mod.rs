//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PokemonCatalog`]) are implemented by
//! outbound adapters. Driving ports (`*Command`, `*Query`) are implemented by
//! domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod battle_query;
mod ownership_command;
mod ownership_repository;
mod pokemon_catalog;
mod pokemon_command;
mod pokemon_query;
mod pokemon_repository;
mod trainer_command;
mod trainer_query;
mod trainer_repository;

pub use battle_query::BattleQuery;
#[cfg(test)]
pub use battle_query::MockBattleQuery;
#[cfg(test)]
pub use ownership_command::MockOwnershipCommand;
pub use ownership_command::OwnershipCommand;
#[cfg(test)]
pub use ownership_repository::MockOwnershipRepository;
pub use ownership_repository::{OwnershipRepository, OwnershipRepositoryError};
#[cfg(test)]
pub use pokemon_catalog::MockPokemonCatalog;
pub use pokemon_catalog::{PokemonCatalog, PokemonCatalogError};
#[cfg(test)]
pub use pokemon_command::MockPokemonCommand;
pub use pokemon_command::PokemonCommand;
#[cfg(test)]
pub use pokemon_query::MockPokemonQuery;
pub use pokemon_query::PokemonQuery;
#[cfg(test)]
pub use pokemon_repository::MockPokemonRepository;
pub use pokemon_repository::{PokemonRepository, PokemonRepositoryError};
#[cfg(test)]
pub use trainer_command::MockTrainerCommand;
pub use trainer_command::TrainerCommand;
#[cfg(test)]
pub use trainer_query::MockTrainerQuery;
pub use trainer_query::TrainerQuery;
#[cfg(test)]
pub use trainer_repository::MockTrainerRepository;
pub use trainer_repository::{TrainerRepository, TrainerRepositoryError};
