//! Trainer aggregate and its validated primitives.
//!
//! A trainer carries a roster of owned pokémon summaries. The roster is a
//! read projection assembled by the repository; ownership changes go through
//! the ownership service.

use std::fmt;

use chrono::{DateTime, Utc};

use super::PokemonId;

/// Maximum number of characters accepted for trainer names.
pub const TRAINER_NAME_MAX: usize = 100;

/// Validation errors raised when constructing trainer primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrainerValidationError {
    #[error("trainer name must not be empty")]
    EmptyName,
    #[error("trainer name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("trainer age must be between 0 and {max}")]
    AgeOutOfRange { max: u32 },
}

/// Surrogate identifier of a persisted trainer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrainerId(i64);

impl TrainerId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TrainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trimmed, non-empty trainer name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainerName(String);

impl TrainerName {
    /// Validate and construct a trainer name.
    ///
    /// Surrounding whitespace is removed before the length checks run.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::TrainerName;
    ///
    /// let name = TrainerName::new("  Ash ").expect("valid name");
    /// assert_eq!(name.as_ref(), "Ash");
    /// assert!(TrainerName::new("   ").is_err());
    /// ```
    pub fn new(value: impl AsRef<str>) -> Result<Self, TrainerValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TrainerValidationError::EmptyName);
        }
        if trimmed.chars().count() > TRAINER_NAME_MAX {
            return Err(TrainerValidationError::NameTooLong {
                max: TRAINER_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for TrainerName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TrainerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Non-negative trainer age that fits the storage column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TrainerAge(u32);

impl TrainerAge {
    /// Largest age the relational column can hold.
    pub const MAX: u32 = i32::MAX as u32;

    /// Validate a raw age coming from a request or a database row.
    pub fn new(value: i64) -> Result<Self, TrainerValidationError> {
        u32::try_from(value)
            .ok()
            .filter(|age| *age <= Self::MAX)
            .map(Self)
            .ok_or(TrainerValidationError::AgeOutOfRange { max: Self::MAX })
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Summary of a pokémon as it appears inside a trainer's roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub id: PokemonId,
    pub name: String,
    pub photo_url: Option<String>,
}

/// Persisted trainer with its current roster ordered by pokémon id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trainer {
    pub id: TrainerId,
    pub name: TrainerName,
    pub age: TrainerAge,
    pub roster: Vec<RosterEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trainer {
    /// Whether the roster already lists `pokemon_id`.
    pub fn owns(&self, pokemon_id: PokemonId) -> bool {
        self.roster.iter().any(|entry| entry.id == pokemon_id)
    }
}

/// Input for creating a trainer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrainer {
    pub name: TrainerName,
    pub age: TrainerAge,
}

/// Partial update of a trainer. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainerChanges {
    pub name: Option<TrainerName>,
    pub age: Option<TrainerAge>,
}

impl TrainerChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none()
    }
}
