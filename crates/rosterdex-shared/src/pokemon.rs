//! The Pokémon model, shaped after the catalog API payload.
//!
//! Only the fields this application consumes are declared; the (very large)
//! remainder of the API response is ignored on deserialization. The same
//! shape is what gets serialized into a team's persisted roster blob, so it
//! must round-trip through serde unchanged.

use serde::{Deserialize, Serialize};

use crate::types::PokemonId;

/// A single Pokémon as fetched from the catalog.
///
/// Immutable once fetched: it is displayed and stored inside team rosters,
/// but never written back to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pokemon {
    pub id: PokemonId,
    pub name: String,
    pub sprites: SpriteSet,
    /// Type tags in slot order. One or two entries; order matters for
    /// display only.
    pub types: Vec<TypeSlot>,
    /// Absent for some catalog entries; treated as 0 in statistics.
    pub base_experience: Option<u32>,
    /// Decimetres, as reported by the catalog.
    pub height: u32,
    /// Hectograms, as reported by the catalog.
    pub weight: u32,
}

impl Pokemon {
    /// Display name with the first letter upper-cased (the catalog reports
    /// names in lowercase).
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }

    /// Type tag names in slot order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|slot| slot.kind.name.as_str())
    }

    /// Preferred image URL: the official artwork when present, falling back
    /// to the plain front sprite.
    pub fn artwork_url(&self) -> Option<&str> {
        self.sprites
            .other
            .as_ref()
            .and_then(|o| o.official_artwork.front_default.as_deref())
            .or(self.sprites.front_default.as_deref())
    }

    /// The small front sprite, if the catalog has one.
    pub fn sprite_url(&self) -> Option<&str> {
        self.sprites.front_default.as_deref()
    }

    /// Height in metres (the catalog reports decimetres).
    pub fn height_m(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    /// Weight in kilograms (the catalog reports hectograms).
    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }
}

/// Sprite URLs for a Pokémon. Any of these can be null in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SpriteSet {
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: ArtworkSprite,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ArtworkSprite {
    pub front_default: Option<String>,
}

/// One entry of the catalog's `types` array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: TypeRef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeRef {
    pub name: String,
}
