//! Pokémon domain service and the enrichment-on-create flow.
//!
//! Creation runs in three explicit phases: check the name is free, enrich
//! the candidate from the catalog (unless all attributes were supplied), and
//! persist. A catalog failure aborts before anything is written. Updates
//! only rename and never consult the catalog.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    PokemonCatalog, PokemonCatalogError, PokemonCommand, PokemonQuery, PokemonRepository,
    PokemonRepositoryError,
};
use crate::domain::{
    CatalogData, Error, Pokemon, PokemonCandidate, PokemonChanges, PokemonId, PokemonName,
};

fn duplicate_name_error(name: &str) -> Error {
    Error::conflict(format!("pokemon name '{name}' is already taken")).with_details(json!({
        "field": "name",
        "code": "duplicate_name",
    }))
}

pub(crate) fn map_repository_error(error: PokemonRepositoryError) -> Error {
    match error {
        PokemonRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("pokemon repository unavailable: {message}"))
        }
        PokemonRepositoryError::Query { message } => {
            Error::internal(format!("pokemon repository error: {message}"))
        }
        PokemonRepositoryError::DuplicateName { name } => duplicate_name_error(&name),
    }
}

fn map_catalog_error(error: PokemonCatalogError) -> Error {
    match error {
        PokemonCatalogError::NotFound { name } => Error::invalid_request(format!(
            "pokemon '{name}' was not found in the catalog"
        ))
        .with_details(json!({
            "field": "name",
            "code": "catalog_not_found",
            "name": name,
        })),
        PokemonCatalogError::ServiceUnavailable { message } => {
            Error::invalid_request(format!("pokemon catalog is unavailable: {message}"))
                .with_details(json!({
                    "field": "name",
                    "code": "catalog_unavailable",
                }))
        }
    }
}

pub(crate) fn pokemon_not_found(id: PokemonId) -> Error {
    Error::not_found(format!("pokemon {id} not found"))
}

/// Pokémon service implementing [`PokemonCommand`] and [`PokemonQuery`].
#[derive(Clone)]
pub struct PokemonService<R, C> {
    pokemon_repo: Arc<R>,
    catalog: Arc<C>,
}

impl<R, C> PokemonService<R, C> {
    /// Create a new service with the pokémon repository and catalog.
    pub fn new(pokemon_repo: Arc<R>, catalog: Arc<C>) -> Self {
        Self {
            pokemon_repo,
            catalog,
        }
    }
}

impl<R, C> PokemonService<R, C>
where
    R: PokemonRepository,
    C: PokemonCatalog,
{
    async fn load(&self, id: PokemonId) -> Result<Pokemon, Error> {
        self.pokemon_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| pokemon_not_found(id))
    }

    /// Reject `name` when another pokémon (other than `owner`) already uses it.
    async fn ensure_name_available(
        &self,
        name: &PokemonName,
        owner: Option<PokemonId>,
    ) -> Result<(), Error> {
        let existing = self
            .pokemon_repo
            .find_by_name(name)
            .await
            .map_err(map_repository_error)?;
        match existing {
            Some(pokemon) if Some(pokemon.id) != owner => Err(duplicate_name_error(name.as_ref())),
            _ => Ok(()),
        }
    }

    async fn enrich(&self, candidate: &PokemonCandidate) -> Result<CatalogData, Error> {
        if let Some(attributes) = candidate.preset_attributes() {
            return Ok(attributes);
        }
        self.catalog.fetch(&candidate.name).await.map_err(|err| {
            warn!(name = %candidate.name, error = %err, "catalog enrichment failed");
            map_catalog_error(err)
        })
    }
}

#[async_trait]
impl<R, C> PokemonCommand for PokemonService<R, C>
where
    R: PokemonRepository,
    C: PokemonCatalog,
{
    async fn create_pokemon(&self, candidate: PokemonCandidate) -> Result<Pokemon, Error> {
        self.ensure_name_available(&candidate.name, None).await?;
        let attributes = self.enrich(&candidate).await?;
        let new_pokemon = candidate.enrich(attributes);

        let created = self
            .pokemon_repo
            .create(&new_pokemon)
            .await
            .map_err(map_repository_error)?;
        info!(pokemon_id = %created.id, name = %created.name, "pokemon created");
        Ok(created)
    }

    async fn update_pokemon(
        &self,
        id: PokemonId,
        changes: PokemonChanges,
    ) -> Result<Pokemon, Error> {
        let current = self.load(id).await?;
        let Some(name) = changes.name.as_ref() else {
            return Ok(current);
        };
        self.ensure_name_available(name, Some(id)).await?;
        self.pokemon_repo
            .update(id, &changes)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| pokemon_not_found(id))
    }

    async fn delete_pokemon(&self, id: PokemonId) -> Result<(), Error> {
        let removed = self
            .pokemon_repo
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(pokemon_not_found(id));
        }
        info!(pokemon_id = %id, "pokemon deleted");
        Ok(())
    }
}

#[async_trait]
impl<R, C> PokemonQuery for PokemonService<R, C>
where
    R: PokemonRepository,
    C: PokemonCatalog,
{
    async fn list_pokemons(&self) -> Result<Vec<Pokemon>, Error> {
        self.pokemon_repo.list().await.map_err(map_repository_error)
    }

    async fn get_pokemon(&self, id: PokemonId) -> Result<Pokemon, Error> {
        self.load(id).await
    }
}

#[cfg(test)]
#[path = "pokemon_service_tests.rs"]
mod tests;
