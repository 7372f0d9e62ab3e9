//! Diesel repositories wired to a freshly provisioned registry database.

use backend::domain::{CatalogData, NewPokemon, NewTrainer, PokemonName, TrainerAge, TrainerName};
use backend::outbound::persistence::{
    DbPool, DieselOwnershipRepository, DieselPokemonRepository, DieselTrainerRepository,
    PoolConfig,
};
use color_eyre::eyre::{Result, WrapErr, eyre};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use tokio::runtime::Runtime;

use super::{provision_registry_database, shared_cluster_handle};

/// Runtime, repositories, and the database guard they share.
///
/// Fields drop in declaration order, so connections close before the
/// temporary database is removed.
pub struct RegistryContext {
    pub runtime: Runtime,
    pub trainers: DieselTrainerRepository,
    pub pokemons: DieselPokemonRepository,
    pub ownership: DieselOwnershipRepository,
    pub database_url: String,
    _database: TemporaryDatabase,
}

pub fn setup_registry_context() -> Result<RegistryContext> {
    let runtime = Runtime::new().wrap_err("tokio runtime")?;
    let cluster = shared_cluster_handle().map_err(|err| eyre!("shared cluster: {err}"))?;
    let database = provision_registry_database(cluster, &runtime)?;
    let database_url = database.url().to_owned();

    let config = PoolConfig::new(database_url.as_str())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .wrap_err("connection pool")?;

    Ok(RegistryContext {
        runtime,
        trainers: DieselTrainerRepository::new(pool.clone()),
        pokemons: DieselPokemonRepository::new(pool.clone()),
        ownership: DieselOwnershipRepository::new(pool),
        database_url,
        _database: database,
    })
}

pub fn new_pokemon(name: &str, height: u32, weight: u32) -> NewPokemon {
    NewPokemon {
        name: PokemonName::new(name).expect("valid pokemon name"),
        attributes: CatalogData {
            height,
            weight,
            photo_url: Some(format!("https://img/{}.png", name.to_lowercase())),
        },
    }
}

pub fn new_trainer(name: &str, age: i64) -> NewTrainer {
    NewTrainer {
        name: TrainerName::new(name).expect("valid trainer name"),
        age: TrainerAge::new(age).expect("valid trainer age"),
    }
}
