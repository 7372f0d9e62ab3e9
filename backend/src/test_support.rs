//! In-memory adapters for unit and integration tests.
//!
//! [`InMemoryRegistry`] implements every repository port over one shared
//! store, honouring the same uniqueness and cascade rules as the PostgreSQL
//! schema. [`StubPokemonCatalog`] answers catalog lookups from a fixed table
//! and counts calls so tests can assert when enrichment was skipped.
//! Compiled for tests and behind the `test-support` feature.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    OwnershipRepository, OwnershipRepositoryError, PokemonCatalog, PokemonCatalogError,
    PokemonRepository, PokemonRepositoryError, TrainerRepository, TrainerRepositoryError,
};
use crate::domain::{
    CatalogData, NewPokemon, NewTrainer, Pokemon, PokemonChanges, PokemonId, PokemonName,
    RosterEntry, Trainer, TrainerAge, TrainerChanges, TrainerId, TrainerName,
};
use crate::inbound::http::state::HttpState;

#[derive(Debug, Clone)]
struct TrainerRecord {
    name: TrainerName,
    age: TrainerAge,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct RegistryState {
    next_trainer_id: i64,
    next_pokemon_id: i64,
    trainers: BTreeMap<i64, TrainerRecord>,
    pokemons: BTreeMap<i64, Pokemon>,
    ownership: BTreeSet<(i64, i64)>,
}

impl RegistryState {
    fn trainer(&self, id: i64) -> Option<Trainer> {
        let record = self.trainers.get(&id)?;
        let roster = self
            .ownership
            .iter()
            .filter(|(trainer_id, _)| *trainer_id == id)
            .filter_map(|(_, pokemon_id)| self.pokemons.get(pokemon_id))
            .map(|pokemon| RosterEntry {
                id: pokemon.id,
                name: pokemon.name.to_string(),
                photo_url: pokemon.photo_url.clone(),
            })
            .collect();
        Some(Trainer {
            id: TrainerId::new(id),
            name: record.name.clone(),
            age: record.age,
            roster,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    fn name_taken(&self, name: &PokemonName, except: Option<i64>) -> bool {
        self.pokemons
            .iter()
            .any(|(id, pokemon)| Some(*id) != except && pokemon.name.matches(name.as_ref()))
    }
}

/// Shared in-memory store implementing the trainer, pokémon, and ownership
/// repository ports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    state: Arc<Mutex<RegistryState>>,
    offline: Arc<AtomicBool>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a connection error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of stored ownership pairs.
    pub fn ownership_count(&self) -> usize {
        self.lock().ownership.len()
    }

    /// Number of stored pokémon.
    pub fn pokemon_count(&self) -> usize {
        self.lock().pokemons.len()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_online<E>(&self, connection: impl FnOnce(&'static str) -> E) -> Result<(), E> {
        if self.offline.load(Ordering::SeqCst) {
            Err(connection("in-memory registry offline"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TrainerRepository for InMemoryRegistry {
    async fn list(&self) -> Result<Vec<Trainer>, TrainerRepositoryError> {
        self.check_online(TrainerRepositoryError::connection)?;
        let state = self.lock();
        Ok(state
            .trainers
            .keys()
            .filter_map(|id| state.trainer(*id))
            .collect())
    }

    async fn find_by_id(&self, id: TrainerId) -> Result<Option<Trainer>, TrainerRepositoryError> {
        self.check_online(TrainerRepositoryError::connection)?;
        Ok(self.lock().trainer(id.get()))
    }

    async fn create(&self, trainer: &NewTrainer) -> Result<Trainer, TrainerRepositoryError> {
        self.check_online(TrainerRepositoryError::connection)?;
        let mut state = self.lock();
        state.next_trainer_id += 1;
        let id = state.next_trainer_id;
        let now = Utc::now();
        state.trainers.insert(
            id,
            TrainerRecord {
                name: trainer.name.clone(),
                age: trainer.age,
                created_at: now,
                updated_at: now,
            },
        );
        state
            .trainer(id)
            .ok_or_else(|| TrainerRepositoryError::query("inserted trainer vanished"))
    }

    async fn update(
        &self,
        id: TrainerId,
        changes: &TrainerChanges,
    ) -> Result<Option<Trainer>, TrainerRepositoryError> {
        self.check_online(TrainerRepositoryError::connection)?;
        let mut state = self.lock();
        let Some(record) = state.trainers.get_mut(&id.get()) else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            record.name = name.clone();
        }
        if let Some(age) = changes.age {
            record.age = age;
        }
        record.updated_at = Utc::now();
        Ok(state.trainer(id.get()))
    }

    async fn delete(&self, id: TrainerId) -> Result<bool, TrainerRepositoryError> {
        self.check_online(TrainerRepositoryError::connection)?;
        let mut state = self.lock();
        let removed = state.trainers.remove(&id.get()).is_some();
        state
            .ownership
            .retain(|(trainer_id, _)| *trainer_id != id.get());
        Ok(removed)
    }
}

#[async_trait]
impl PokemonRepository for InMemoryRegistry {
    async fn list(&self) -> Result<Vec<Pokemon>, PokemonRepositoryError> {
        self.check_online(PokemonRepositoryError::connection)?;
        Ok(self.lock().pokemons.values().cloned().collect())
    }

    async fn find_by_id(&self, id: PokemonId) -> Result<Option<Pokemon>, PokemonRepositoryError> {
        self.check_online(PokemonRepositoryError::connection)?;
        Ok(self.lock().pokemons.get(&id.get()).cloned())
    }

    async fn find_by_name(
        &self,
        name: &PokemonName,
    ) -> Result<Option<Pokemon>, PokemonRepositoryError> {
        self.check_online(PokemonRepositoryError::connection)?;
        Ok(self
            .lock()
            .pokemons
            .values()
            .find(|pokemon| pokemon.name.matches(name.as_ref()))
            .cloned())
    }

    async fn create(&self, pokemon: &NewPokemon) -> Result<Pokemon, PokemonRepositoryError> {
        self.check_online(PokemonRepositoryError::connection)?;
        let mut state = self.lock();
        if state.name_taken(&pokemon.name, None) {
            return Err(PokemonRepositoryError::duplicate_name(
                pokemon.name.as_ref(),
            ));
        }
        state.next_pokemon_id += 1;
        let id = state.next_pokemon_id;
        let now = Utc::now();
        let created = Pokemon {
            id: PokemonId::new(id),
            name: pokemon.name.clone(),
            photo_url: pokemon.attributes.photo_url.clone(),
            height: Some(pokemon.attributes.height),
            weight: Some(pokemon.attributes.weight),
            created_at: now,
            updated_at: now,
        };
        state.pokemons.insert(id, created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: PokemonId,
        changes: &PokemonChanges,
    ) -> Result<Option<Pokemon>, PokemonRepositoryError> {
        self.check_online(PokemonRepositoryError::connection)?;
        let mut state = self.lock();
        if let Some(name) = changes
            .name
            .as_ref()
            .filter(|name| state.name_taken(name, Some(id.get())))
        {
            return Err(PokemonRepositoryError::duplicate_name(name.as_ref()));
        }
        let Some(pokemon) = state.pokemons.get_mut(&id.get()) else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            pokemon.name = name.clone();
        }
        pokemon.updated_at = Utc::now();
        Ok(Some(pokemon.clone()))
    }

    async fn delete(&self, id: PokemonId) -> Result<bool, PokemonRepositoryError> {
        self.check_online(PokemonRepositoryError::connection)?;
        let mut state = self.lock();
        let removed = state.pokemons.remove(&id.get()).is_some();
        state
            .ownership
            .retain(|(_, pokemon_id)| *pokemon_id != id.get());
        Ok(removed)
    }
}

#[async_trait]
impl OwnershipRepository for InMemoryRegistry {
    async fn exists(
        &self,
        trainer_id: TrainerId,
        pokemon_id: PokemonId,
    ) -> Result<bool, OwnershipRepositoryError> {
        self.check_online(OwnershipRepositoryError::connection)?;
        Ok(self
            .lock()
            .ownership
            .contains(&(trainer_id.get(), pokemon_id.get())))
    }

    async fn add(
        &self,
        trainer_id: TrainerId,
        pokemon_id: PokemonId,
    ) -> Result<(), OwnershipRepositoryError> {
        self.check_online(OwnershipRepositoryError::connection)?;
        let mut state = self.lock();
        if !state.trainers.contains_key(&trainer_id.get())
            || !state.pokemons.contains_key(&pokemon_id.get())
        {
            return Err(OwnershipRepositoryError::missing_reference(format!(
                "trainer {trainer_id} or pokemon {pokemon_id} does not exist"
            )));
        }
        if !state.ownership.insert((trainer_id.get(), pokemon_id.get())) {
            return Err(OwnershipRepositoryError::already_owned(
                trainer_id.get(),
                pokemon_id.get(),
            ));
        }
        Ok(())
    }

    async fn remove(
        &self,
        trainer_id: TrainerId,
        pokemon_id: PokemonId,
    ) -> Result<bool, OwnershipRepositoryError> {
        self.check_online(OwnershipRepositoryError::connection)?;
        Ok(self
            .lock()
            .ownership
            .remove(&(trainer_id.get(), pokemon_id.get())))
    }

    async fn trainer_ids_owning(
        &self,
        pokemon_id: PokemonId,
    ) -> Result<BTreeSet<TrainerId>, OwnershipRepositoryError> {
        self.check_online(OwnershipRepositoryError::connection)?;
        Ok(self
            .lock()
            .ownership
            .iter()
            .filter(|(_, owned)| *owned == pokemon_id.get())
            .map(|(trainer_id, _)| TrainerId::new(*trainer_id))
            .collect())
    }
}

/// Catalog double answering from a fixed table keyed by lowercase name.
#[derive(Debug, Default)]
pub struct StubPokemonCatalog {
    entries: HashMap<String, CatalogData>,
    unavailable: bool,
    calls: AtomicUsize,
}

impl StubPokemonCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog preloaded with a few well-known entries.
    pub fn with_defaults() -> Self {
        Self::new()
            .with_entry("pikachu", 4, 60, Some("https://img.example/pikachu.png"))
            .with_entry("raichu", 8, 300, Some("https://img.example/raichu.png"))
            .with_entry("charizard", 17, 905, Some("https://img.example/charizard.png"))
            .with_entry("snorlax", 21, 4600, None)
    }

    pub fn with_entry(
        mut self,
        name: &str,
        height: u32,
        weight: u32,
        photo_url: Option<&str>,
    ) -> Self {
        self.entries.insert(
            name.to_lowercase(),
            CatalogData {
                height,
                weight,
                photo_url: photo_url.map(str::to_owned),
            },
        );
        self
    }

    /// Every lookup fails with `ServiceUnavailable`.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Number of lookups performed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PokemonCatalog for StubPokemonCatalog {
    async fn fetch(&self, name: &PokemonName) -> Result<CatalogData, PokemonCatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(PokemonCatalogError::service_unavailable("stub catalog offline"));
        }
        let key = name.catalog_key();
        self.entries
            .get(&key)
            .cloned()
            .ok_or_else(|| PokemonCatalogError::not_found(key))
    }
}

/// Build an [`HttpState`] wiring the real services over in-memory adapters.
pub fn in_memory_http_state(
    registry: &InMemoryRegistry,
    catalog: Arc<StubPokemonCatalog>,
) -> HttpState {
    let store = Arc::new(registry.clone());
    HttpState::from_adapters(store.clone(), store.clone(), store, catalog)
}
