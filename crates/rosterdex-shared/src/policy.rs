//! Roster mutation policy: the rules deciding which team mutations are
//! legal, applied before any remote call is issued.
//!
//! Every function here is pure. Each distinct rejection is its own
//! [`PolicyError`] variant so the caller can surface a specific message
//! rather than a generic failure.

use crate::constants::{MAX_ROSTER_SIZE, MAX_TEAM_NAME_CHARS};
use crate::error::PolicyError;
use crate::pokemon::Pokemon;
use crate::team::Team;
use crate::types::PokemonId;

/// Whether `pokemon` may be appended to `team`'s roster.
///
/// Rejects a full roster and a duplicate id; these are distinct conditions.
pub fn can_add(team: &Team, pokemon: &Pokemon) -> Result<(), PolicyError> {
    if team.is_full() {
        return Err(PolicyError::RosterFull {
            capacity: MAX_ROSTER_SIZE,
        });
    }
    if team.contains(pokemon.id) {
        return Err(PolicyError::AlreadyInTeam {
            name: pokemon.display_name(),
        });
    }
    Ok(())
}

/// Removal is never rejected. Removing an id that is not on the roster is a
/// no-op at the repository level, not an error.
pub fn can_remove(_team: &Team, _id: PokemonId) -> bool {
    true
}

/// Whether a team may be deleted from a collection of `team_count` teams.
/// The sole remaining team is protected.
pub fn can_delete(team_count: usize) -> Result<(), PolicyError> {
    if team_count <= 1 {
        return Err(PolicyError::LastTeam);
    }
    Ok(())
}

/// Validate a proposed team name and return its trimmed form.
pub fn validate_name(name: &str) -> Result<String, PolicyError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PolicyError::EmptyName);
    }
    if trimmed.chars().count() > MAX_TEAM_NAME_CHARS {
        return Err(PolicyError::NameTooLong {
            max: MAX_TEAM_NAME_CHARS,
        });
    }
    Ok(trimmed.to_string())
}
