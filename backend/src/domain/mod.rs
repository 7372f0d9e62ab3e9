//! Domain primitives, aggregates, ports, and services.
//!
//! Purpose: define the trainer and pokémon registry independently of HTTP
//! and storage. Inbound adapters call the driving ports in [`ports`];
//! outbound adapters implement the driven ones.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failure payload.
//! - [`Trainer`], [`Pokemon`], and their validated primitives.
//! - [`resolve_battle`]: the pure battle rule.
//! - Services: [`TrainerService`], [`PokemonService`], [`OwnershipService`],
//!   [`BattleService`].

pub mod battle;
mod battle_service;
pub mod error;
mod ownership_service;
pub mod pokemon;
mod pokemon_service;
pub mod ports;
pub mod trace_id;
pub mod trainer;
mod trainer_service;

pub use self::battle::{BattleError, BattleOutcome, BattleWinner, resolve_battle};
pub use self::battle_service::BattleService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::ownership_service::OwnershipService;
pub use self::pokemon::{
    CatalogData, NewPokemon, POKEMON_NAME_MAX, Pokemon, PokemonCandidate, PokemonChanges,
    PokemonId, PokemonName, PokemonValidationError,
};
pub use self::pokemon_service::PokemonService;
pub use self::trace_id::TraceId;
pub use self::trainer::{
    NewTrainer, RosterEntry, TRAINER_NAME_MAX, Trainer, TrainerAge, TrainerChanges, TrainerId,
    TrainerName, TrainerValidationError,
};
pub use self::trainer_service::TrainerService;
