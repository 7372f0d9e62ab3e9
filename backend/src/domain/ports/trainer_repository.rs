//! Port abstraction for trainer persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewTrainer, Trainer, TrainerChanges, TrainerId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by trainer repository adapters.
    pub enum TrainerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "trainer repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "trainer repository query failed: {message}",
    }
}

/// Trainer storage. Every returned trainer carries its current roster.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrainerRepository: Send + Sync {
    /// All trainers ordered by id. Rosters are loaded in one batch.
    async fn list(&self) -> Result<Vec<Trainer>, TrainerRepositoryError>;

    async fn find_by_id(&self, id: TrainerId) -> Result<Option<Trainer>, TrainerRepositoryError>;

    async fn create(&self, trainer: &NewTrainer) -> Result<Trainer, TrainerRepositoryError>;

    /// Apply `changes`, returning `None` when the trainer does not exist.
    async fn update(
        &self,
        id: TrainerId,
        changes: &TrainerChanges,
    ) -> Result<Option<Trainer>, TrainerRepositoryError>;

    /// Delete the trainer and its ownership rows. Returns whether a row was removed.
    async fn delete(&self, id: TrainerId) -> Result<bool, TrainerRepositoryError>;
}
