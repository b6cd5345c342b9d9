//! The Team model: a named, persisted, size-bounded roster of Pokémon.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_ROSTER_SIZE;
use crate::pokemon::Pokemon;
use crate::types::{PokemonId, TeamId};

/// A named collection of up to [`MAX_ROSTER_SIZE`] Pokémon.
///
/// The remote store is the durable owner of teams; during a session the
/// repository holds the authoritative in-memory copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    /// Store-assigned identifier.
    pub id: TeamId,
    /// Display name, 1 to 50 characters after trimming.
    pub name: String,
    /// Ordered roster; no duplicate Pokémon ids.
    pub roster: Vec<Pokemon>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Team {
    /// Whether a Pokémon with the given id is already on the roster.
    pub fn contains(&self, id: PokemonId) -> bool {
        self.roster.iter().any(|p| p.id == id)
    }

    /// Whether the roster has reached its size ceiling.
    pub fn is_full(&self) -> bool {
        self.roster.len() >= MAX_ROSTER_SIZE
    }

    /// Look up a roster member by id.
    pub fn member(&self, id: PokemonId) -> Option<&Pokemon> {
        self.roster.iter().find(|p| p.id == id)
    }
}
