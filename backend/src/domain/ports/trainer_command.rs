//! Driving port for trainer mutations.

use async_trait::async_trait;

use crate::domain::{Error, NewTrainer, Trainer, TrainerChanges, TrainerId};

/// Domain use-case port for creating, updating, and deleting trainers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrainerCommand: Send + Sync {
    async fn create_trainer(&self, trainer: NewTrainer) -> Result<Trainer, Error>;

    /// Apply `changes` to an existing trainer. Missing trainers yield `not_found`.
    async fn update_trainer(
        &self,
        id: TrainerId,
        changes: TrainerChanges,
    ) -> Result<Trainer, Error>;

    /// Delete a trainer. Its pokémon remain; only ownership rows go.
    async fn delete_trainer(&self, id: TrainerId) -> Result<(), Error>;
}
