//! # rosterdex-shared
//!
//! Domain model and pure rules shared by every rosterdex crate: the Pokémon
//! and Team types, the roster mutation policy, and derived team statistics.
//! Nothing in this crate performs I/O.

pub mod constants;
pub mod policy;
pub mod pokemon;
pub mod stats;
pub mod team;
pub mod types;

mod error;

pub use error::PolicyError;
pub use pokemon::Pokemon;
pub use stats::{summarize, StrengthTier, TeamSummary};
pub use team::Team;
pub use types::{PokemonId, TeamId};
