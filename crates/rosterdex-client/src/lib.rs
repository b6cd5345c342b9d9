//! # rosterdex-client
//!
//! The stateful side of the application: the [`TeamRepository`] owns the
//! in-memory team collection and keeps it reconciled with the remote store,
//! and the [`SearchSession`] tracks the single-slot catalog search flow.
//! Both are driven by a presentation layer that awaits each operation to
//! completion before issuing the next.

pub mod dex;
pub mod repository;
pub mod search;

mod error;

pub use dex::{LookupError, PokeApiClient, PokemonLookup};
pub use error::TeamError;
pub use repository::{SyncPhase, TeamRepository};
pub use search::{SearchSession, SearchToken};
