use thiserror::Error;

/// Violations of the roster mutation rules.
///
/// These are raised before any remote call is issued and are meant to be
/// shown to the user as-is; they are never logged as errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// The proposed team name trims down to nothing.
    #[error("Team name cannot be empty")]
    EmptyName,

    /// The proposed team name exceeds the display limit.
    #[error("Team name is limited to {max} characters")]
    NameTooLong { max: usize },

    /// The roster already holds the maximum number of Pokémon.
    #[error("Team is full: a team can hold at most {capacity} Pokémon")]
    RosterFull { capacity: usize },

    /// The Pokémon is already on the roster.
    #[error("{name} is already in the team")]
    AlreadyInTeam { name: String },

    /// The last remaining team is protected from deletion.
    #[error("The last remaining team cannot be deleted")]
    LastTeam,
}
