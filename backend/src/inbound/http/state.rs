//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on the driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    BattleQuery, OwnershipCommand, OwnershipRepository, PokemonCatalog, PokemonCommand,
    PokemonQuery, PokemonRepository, TrainerCommand, TrainerQuery, TrainerRepository,
};
use crate::domain::{BattleService, OwnershipService, PokemonService, TrainerService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub trainers: Arc<dyn TrainerCommand>,
    pub trainers_query: Arc<dyn TrainerQuery>,
    pub pokemons: Arc<dyn PokemonCommand>,
    pub pokemons_query: Arc<dyn PokemonQuery>,
    pub ownership: Arc<dyn OwnershipCommand>,
    pub battle: Arc<dyn BattleQuery>,
}

impl HttpState {
    /// Wire the domain services over one set of driven adapters.
    pub fn from_adapters<T, P, O, C>(
        trainer_repo: Arc<T>,
        pokemon_repo: Arc<P>,
        ownership_repo: Arc<O>,
        catalog: Arc<C>,
    ) -> Self
    where
        T: TrainerRepository + 'static,
        P: PokemonRepository + 'static,
        O: OwnershipRepository + 'static,
        C: PokemonCatalog + 'static,
    {
        let trainers = Arc::new(TrainerService::new(trainer_repo.clone()));
        let pokemons = Arc::new(PokemonService::new(pokemon_repo.clone(), catalog));
        let ownership = Arc::new(OwnershipService::new(
            trainer_repo,
            pokemon_repo.clone(),
            ownership_repo.clone(),
        ));
        let battle = Arc::new(BattleService::new(pokemon_repo, ownership_repo));
        Self {
            trainers: trainers.clone(),
            trainers_query: trainers,
            pokemons: pokemons.clone(),
            pokemons_query: pokemons,
            ownership,
            battle,
        }
    }
}
