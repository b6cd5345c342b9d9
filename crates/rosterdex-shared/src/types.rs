use serde::{Deserialize, Serialize};

/// Numeric catalog id of a Pokémon (the "national dex" number).
///
/// Serialized transparently so it matches the plain integer the catalog API
/// and the persisted roster blob use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct PokemonId(pub u32);

impl std::fmt::Display for PokemonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque team identifier, assigned by the remote store on creation.
///
/// The client never generates or interprets these; they are only compared
/// and echoed back in update/delete calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TeamId(pub String);

impl TeamId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TeamId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TeamId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
