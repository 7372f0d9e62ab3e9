//! Battle resolution rule.
//!
//! The heavier pokémon wins. Equal weights tie, and an absent weight ranks
//! below any known weight, so two unknown weights also tie. Pokémon that
//! share an owner cannot battle.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::{Pokemon, TrainerId};

/// Reasons a battle cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    /// Both combatants are owned by at least one common trainer.
    #[error("pokemon owned by the same trainer cannot battle")]
    SameTeam { shared_trainers: Vec<TrainerId> },
}

/// Which combatant won, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleWinner {
    First,
    Second,
}

/// Result of a resolved battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleOutcome {
    pub message: String,
    pub winner: Option<BattleWinner>,
    pub pokemon_1: Pokemon,
    pub pokemon_2: Pokemon,
}

impl BattleOutcome {
    /// The winning pokémon, or `None` on a tie.
    pub fn winning_pokemon(&self) -> Option<&Pokemon> {
        self.winner.map(|winner| match winner {
            BattleWinner::First => &self.pokemon_1,
            BattleWinner::Second => &self.pokemon_2,
        })
    }
}

fn describe_weight(weight: Option<u32>) -> String {
    weight.map_or_else(|| "unknown".to_owned(), |value| value.to_string())
}

fn victory_message(winner: &Pokemon, loser: &Pokemon) -> String {
    format!(
        "{} (weight: {}) beat {} (weight: {})!",
        winner.name,
        describe_weight(winner.weight),
        loser.name,
        describe_weight(loser.weight),
    )
}

/// Resolve a battle between two pokémon given the trainers owning each.
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
///
/// use backend::domain::{resolve_battle, Pokemon, PokemonId, PokemonName};
/// use chrono::Utc;
///
/// let make = |id, name: &str, weight| Pokemon {
///     id: PokemonId::new(id),
///     name: PokemonName::new(name).expect("name"),
///     photo_url: None,
///     height: Some(1),
///     weight: Some(weight),
///     created_at: Utc::now(),
///     updated_at: Utc::now(),
/// };
/// let outcome = resolve_battle(
///     make(1, "Charizard", 905),
///     make(2, "Pikachu", 60),
///     &BTreeSet::new(),
///     &BTreeSet::new(),
/// )
/// .expect("battle resolves");
/// assert_eq!(outcome.winning_pokemon().map(|p| p.id), Some(PokemonId::new(1)));
/// ```
pub fn resolve_battle(
    pokemon_1: Pokemon,
    pokemon_2: Pokemon,
    owners_1: &BTreeSet<TrainerId>,
    owners_2: &BTreeSet<TrainerId>,
) -> Result<BattleOutcome, BattleError> {
    let shared_trainers: Vec<TrainerId> = owners_1.intersection(owners_2).copied().collect();
    if !shared_trainers.is_empty() {
        return Err(BattleError::SameTeam { shared_trainers });
    }

    let (winner, message) = match pokemon_1.weight.cmp(&pokemon_2.weight) {
        Ordering::Greater => (
            Some(BattleWinner::First),
            victory_message(&pokemon_1, &pokemon_2),
        ),
        Ordering::Less => (
            Some(BattleWinner::Second),
            victory_message(&pokemon_2, &pokemon_1),
        ),
        Ordering::Equal => (
            None,
            format!(
                "Tie! {} and {} have the same weight ({}).",
                pokemon_1.name,
                pokemon_2.name,
                describe_weight(pokemon_1.weight),
            ),
        ),
    };

    Ok(BattleOutcome {
        message,
        winner,
        pokemon_1,
        pokemon_2,
    })
}
