//! Trainer domain service.
//!
//! Implements the trainer driving ports over a [`TrainerRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    TrainerCommand, TrainerQuery, TrainerRepository, TrainerRepositoryError,
};
use crate::domain::{Error, NewTrainer, Trainer, TrainerChanges, TrainerId};

pub(crate) fn map_repository_error(error: TrainerRepositoryError) -> Error {
    match error {
        TrainerRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("trainer repository unavailable: {message}"))
        }
        TrainerRepositoryError::Query { message } => {
            Error::internal(format!("trainer repository error: {message}"))
        }
    }
}

pub(crate) fn trainer_not_found(id: TrainerId) -> Error {
    Error::not_found(format!("trainer {id} not found"))
}

/// Trainer service implementing [`TrainerCommand`] and [`TrainerQuery`].
#[derive(Clone)]
pub struct TrainerService<R> {
    trainer_repo: Arc<R>,
}

impl<R> TrainerService<R> {
    /// Create a new service with the trainer repository.
    pub fn new(trainer_repo: Arc<R>) -> Self {
        Self { trainer_repo }
    }
}

impl<R> TrainerService<R>
where
    R: TrainerRepository,
{
    async fn load(&self, id: TrainerId) -> Result<Trainer, Error> {
        self.trainer_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| trainer_not_found(id))
    }
}

#[async_trait]
impl<R> TrainerCommand for TrainerService<R>
where
    R: TrainerRepository,
{
    async fn create_trainer(&self, trainer: NewTrainer) -> Result<Trainer, Error> {
        let created = self
            .trainer_repo
            .create(&trainer)
            .await
            .map_err(map_repository_error)?;
        info!(trainer_id = %created.id, "trainer created");
        Ok(created)
    }

    async fn update_trainer(
        &self,
        id: TrainerId,
        changes: TrainerChanges,
    ) -> Result<Trainer, Error> {
        if changes.is_empty() {
            return self.load(id).await;
        }
        self.trainer_repo
            .update(id, &changes)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| trainer_not_found(id))
    }

    async fn delete_trainer(&self, id: TrainerId) -> Result<(), Error> {
        let removed = self
            .trainer_repo
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(trainer_not_found(id));
        }
        info!(trainer_id = %id, "trainer deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> TrainerQuery for TrainerService<R>
where
    R: TrainerRepository,
{
    async fn list_trainers(&self) -> Result<Vec<Trainer>, Error> {
        self.trainer_repo.list().await.map_err(map_repository_error)
    }

    async fn get_trainer(&self, id: TrainerId) -> Result<Trainer, Error> {
        self.load(id).await
    }
}

#[cfg(test)]
#[path = "trainer_service_tests.rs"]
mod tests;
