//! Pokémon entity, its catalog-derived attributes, and creation inputs.
//!
//! Height, weight, and photo are populated once at creation from the
//! catalog. Updates may only rename a pokémon; derived attributes are
//! read-only afterwards.

use std::fmt;

use chrono::{DateTime, Utc};

/// Maximum number of characters accepted for pokémon names.
pub const POKEMON_NAME_MAX: usize = 100;

/// Validation errors raised when constructing pokémon primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PokemonValidationError {
    #[error("pokemon name must not be empty")]
    EmptyName,
    #[error("pokemon name must be at most {max} characters")]
    NameTooLong { max: usize },
}

/// Surrogate identifier of a persisted pokémon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PokemonId(i64);

impl PokemonId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PokemonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trimmed pokémon name, stored as given and compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonName(String);

impl PokemonName {
    /// Validate and construct a pokémon name.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::PokemonName;
    ///
    /// let name = PokemonName::new(" Pikachu ").expect("valid name");
    /// assert_eq!(name.as_ref(), "Pikachu");
    /// assert_eq!(name.catalog_key(), "pikachu");
    /// ```
    pub fn new(value: impl AsRef<str>) -> Result<Self, PokemonValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PokemonValidationError::EmptyName);
        }
        if trimmed.chars().count() > POKEMON_NAME_MAX {
            return Err(PokemonValidationError::NameTooLong {
                max: POKEMON_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Lowercase lookup key used against the catalog and for uniqueness.
    pub fn catalog_key(&self) -> String {
        self.0.to_lowercase()
    }

    /// Case-insensitive equality.
    pub fn matches(&self, other: &str) -> bool {
        self.catalog_key() == other.trim().to_lowercase()
    }
}

impl AsRef<str> for PokemonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PokemonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Attributes returned by the external catalog for a single name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogData {
    pub height: u32,
    pub weight: u32,
    /// Official artwork when present, otherwise the default sprite.
    pub photo_url: Option<String>,
}

/// Persisted pokémon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pokemon {
    pub id: PokemonId,
    pub name: PokemonName,
    pub photo_url: Option<String>,
    pub height: Option<u32>,
    pub weight: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A pokémon awaiting creation.
///
/// Callers normally supply only the name. Programmatic callers may pre-fill
/// all derived attributes, in which case the catalog is not consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonCandidate {
    pub name: PokemonName,
    pub photo_url: Option<String>,
    pub height: Option<u32>,
    pub weight: Option<u32>,
}

impl PokemonCandidate {
    /// Candidate carrying only a name.
    pub fn named(name: PokemonName) -> Self {
        Self {
            name,
            photo_url: None,
            height: None,
            weight: None,
        }
    }

    /// Pre-supplied attributes, available only when all three are present.
    pub fn preset_attributes(&self) -> Option<CatalogData> {
        match (self.height, self.weight, self.photo_url.as_ref()) {
            (Some(height), Some(weight), Some(photo_url)) => Some(CatalogData {
                height,
                weight,
                photo_url: Some(photo_url.clone()),
            }),
            _ => None,
        }
    }

    /// Combine the candidate with enriched attributes for persistence.
    pub fn enrich(self, attributes: CatalogData) -> NewPokemon {
        NewPokemon {
            name: self.name,
            attributes,
        }
    }
}

/// Fully-populated pokémon ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPokemon {
    pub name: PokemonName,
    pub attributes: CatalogData,
}

/// Partial update of a pokémon. Only the name is mutable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PokemonChanges {
    pub name: Option<PokemonName>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn pikachu() -> PokemonName {
        PokemonName::new("Pikachu").expect("valid name")
    }

    #[rstest]
    #[case("")]
    #[case("  ")]
    fn name_rejects_blank_input(#[case] raw: &str) {
        assert_eq!(PokemonName::new(raw), Err(PokemonValidationError::EmptyName));
    }

    #[rstest]
    fn name_rejects_overlong_input() {
        let raw = "x".repeat(POKEMON_NAME_MAX + 1);
        assert!(matches!(
            PokemonName::new(raw),
            Err(PokemonValidationError::NameTooLong { .. })
        ));
    }

    #[rstest]
    #[case("pikachu")]
    #[case("PIKACHU")]
    #[case(" PiKaChU ")]
    fn name_matches_case_insensitively(pikachu: PokemonName, #[case] other: &str) {
        assert!(pikachu.matches(other));
    }

    #[rstest]
    fn catalog_key_is_lowercase(pikachu: PokemonName) {
        assert_eq!(pikachu.catalog_key(), "pikachu");
        assert_eq!(pikachu.as_ref(), "Pikachu");
    }

    #[rstest]
    fn named_candidate_has_no_preset_attributes(pikachu: PokemonName) {
        assert!(PokemonCandidate::named(pikachu).preset_attributes().is_none());
    }

    #[rstest]
    #[case(Some(4), Some(60), None)]
    #[case(Some(4), None, Some("https://img/pikachu.png"))]
    #[case(None, Some(60), Some("https://img/pikachu.png"))]
    fn partial_presets_still_require_enrichment(
        pikachu: PokemonName,
        #[case] height: Option<u32>,
        #[case] weight: Option<u32>,
        #[case] photo: Option<&str>,
    ) {
        let candidate = PokemonCandidate {
            name: pikachu,
            photo_url: photo.map(str::to_owned),
            height,
            weight,
        };
        assert!(candidate.preset_attributes().is_none());
    }

    #[rstest]
    fn complete_presets_skip_enrichment(pikachu: PokemonName) {
        let candidate = PokemonCandidate {
            name: pikachu.clone(),
            photo_url: Some("https://img/pikachu.png".to_owned()),
            height: Some(4),
            weight: Some(60),
        };

        let attributes = candidate.preset_attributes().expect("complete presets");
        let new_pokemon = candidate.enrich(attributes);

        assert_eq!(new_pokemon.name, pikachu);
        assert_eq!(new_pokemon.attributes.height, 4);
        assert_eq!(new_pokemon.attributes.weight, 60);
        assert_eq!(
            new_pokemon.attributes.photo_url.as_deref(),
            Some("https://img/pikachu.png")
        );
    }
}
