//! PostgreSQL-backed `TrainerRepository` implementation using Diesel ORM.
//!
//! Trainers are returned with their roster attached. Rosters for a page of
//! trainers are loaded with a single join and grouped in memory.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::warn;

use crate::domain::ports::{TrainerRepository, TrainerRepositoryError};
use crate::domain::{
    NewTrainer, PokemonId, RosterEntry, Trainer, TrainerAge, TrainerChanges, TrainerId,
    TrainerName,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewTrainerRow, RosterRow, TrainerChangeset, TrainerRow};
use super::pool::{DbPool, PoolError};
use super::schema::{pokemons, trainer_pokemons, trainers};

/// Diesel-backed implementation of the `TrainerRepository` port.
#[derive(Clone)]
pub struct DieselTrainerRepository {
    pool: DbPool,
}

impl DieselTrainerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TrainerRepositoryError {
    map_basic_pool_error(error, TrainerRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TrainerRepositoryError {
    map_basic_diesel_error(
        error,
        TrainerRepositoryError::query,
        TrainerRepositoryError::connection,
    )
}

/// Convert a domain age to the column type. Ages are bounded by the column.
fn age_column(age: TrainerAge) -> i32 {
    i32::try_from(age.get()).unwrap_or(i32::MAX)
}

async fn load_rosters(
    conn: &mut AsyncPgConnection,
    trainer_ids: &[i64],
) -> Result<BTreeMap<i64, Vec<RosterEntry>>, TrainerRepositoryError> {
    if trainer_ids.is_empty() {
        return Ok(BTreeMap::new());
    }

    let rows: Vec<RosterRow> = trainer_pokemons::table
        .inner_join(pokemons::table)
        .filter(trainer_pokemons::trainer_id.eq_any(trainer_ids))
        .order((trainer_pokemons::trainer_id.asc(), pokemons::id.asc()))
        .select((
            trainer_pokemons::trainer_id,
            pokemons::id,
            pokemons::name,
            pokemons::photo_url,
        ))
        .load(conn)
        .await
        .map_err(map_diesel_error)?;

    let mut rosters: BTreeMap<i64, Vec<RosterEntry>> = BTreeMap::new();
    for row in rows {
        rosters.entry(row.trainer_id).or_default().push(RosterEntry {
            id: PokemonId::new(row.pokemon_id),
            name: row.name,
            photo_url: row.photo_url,
        });
    }
    Ok(rosters)
}

fn row_to_trainer(
    row: TrainerRow,
    roster: Vec<RosterEntry>,
) -> Result<Trainer, TrainerRepositoryError> {
    let name = TrainerName::new(&row.name).map_err(|err| {
        warn!(trainer_id = row.id, error = %err, "stored trainer name is invalid");
        TrainerRepositoryError::query(format!("invalid trainer row {}", row.id))
    })?;
    let age = TrainerAge::new(i64::from(row.age)).map_err(|err| {
        warn!(trainer_id = row.id, error = %err, "stored trainer age is invalid");
        TrainerRepositoryError::query(format!("invalid trainer row {}", row.id))
    })?;

    Ok(Trainer {
        id: TrainerId::new(row.id),
        name,
        age,
        roster,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

async fn attach_roster(
    conn: &mut AsyncPgConnection,
    row: TrainerRow,
) -> Result<Trainer, TrainerRepositoryError> {
    let mut rosters = load_rosters(conn, &[row.id]).await?;
    let roster = rosters.remove(&row.id).unwrap_or_default();
    row_to_trainer(row, roster)
}

#[async_trait]
impl TrainerRepository for DieselTrainerRepository {
    async fn list(&self) -> Result<Vec<Trainer>, TrainerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TrainerRow> = trainers::table
            .order(trainers::id.asc())
            .select(TrainerRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut rosters = load_rosters(&mut conn, &ids).await?;

        rows.into_iter()
            .map(|row| {
                let roster = rosters.remove(&row.id).unwrap_or_default();
                row_to_trainer(row, roster)
            })
            .collect()
    }

    async fn find_by_id(&self, id: TrainerId) -> Result<Option<Trainer>, TrainerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<TrainerRow> = trainers::table
            .find(id.get())
            .select(TrainerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match row {
            Some(row) => attach_roster(&mut conn, row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn create(&self, trainer: &NewTrainer) -> Result<Trainer, TrainerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewTrainerRow {
            name: trainer.name.as_ref(),
            age: age_column(trainer.age),
        };

        let row: TrainerRow = diesel::insert_into(trainers::table)
            .values(&new_row)
            .returning(TrainerRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_trainer(row, Vec::new())
    }

    async fn update(
        &self,
        id: TrainerId,
        changes: &TrainerChanges,
    ) -> Result<Option<Trainer>, TrainerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = TrainerChangeset {
            name: changes.name.as_ref().map(AsRef::as_ref),
            age: changes.age.map(age_column),
            updated_at: Utc::now(),
        };

        let row: Option<TrainerRow> = diesel::update(trainers::table.find(id.get()))
            .set(&changeset)
            .returning(TrainerRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match row {
            Some(row) => attach_roster(&mut conn, row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: TrainerId) -> Result<bool, TrainerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // trainer_pokemons rows cascade.
        let deleted = diesel::delete(trainers::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
