//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselTrainerRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/registry")).await?;
//! let trainers = DieselTrainerRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_ownership_repository;
mod diesel_pokemon_repository;
mod diesel_trainer_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_ownership_repository::DieselOwnershipRepository;
pub use diesel_pokemon_repository::DieselPokemonRepository;
pub use diesel_trainer_repository::DieselTrainerRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
