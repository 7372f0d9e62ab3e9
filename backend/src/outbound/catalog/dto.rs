//! DTOs for decoding catalog JSON responses.
//!
//! Only the fields the registry stores are decoded; everything else in the
//! catalog payload is ignored.

use serde::Deserialize;

use crate::domain::CatalogData;

#[derive(Debug, Deserialize)]
pub(super) struct CatalogPokemonDto {
    pub(super) height: u32,
    pub(super) weight: u32,
    #[serde(default)]
    pub(super) sprites: SpritesDto,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct SpritesDto {
    pub(super) front_default: Option<String>,
    #[serde(default)]
    pub(super) other: OtherSpritesDto,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct OtherSpritesDto {
    #[serde(rename = "official-artwork", default)]
    pub(super) official_artwork: Option<ArtworkDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ArtworkDto {
    pub(super) front_default: Option<String>,
}

impl CatalogPokemonDto {
    /// Official artwork wins over the default sprite when both are present.
    pub(super) fn into_catalog_data(self) -> CatalogData {
        let artwork = self
            .sprites
            .other
            .official_artwork
            .and_then(|artwork| artwork.front_default);
        CatalogData {
            height: self.height,
            weight: self.weight,
            photo_url: artwork.or(self.sprites.front_default),
        }
    }
}
