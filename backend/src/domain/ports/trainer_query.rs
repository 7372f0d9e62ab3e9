//! Driving port for trainer reads.

use async_trait::async_trait;

use crate::domain::{Error, Trainer, TrainerId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrainerQuery: Send + Sync {
    /// All trainers with their rosters.
    async fn list_trainers(&self) -> Result<Vec<Trainer>, Error>;

    async fn get_trainer(&self, id: TrainerId) -> Result<Trainer, Error>;
}
