//! # rosterdex-store
//!
//! Remote persistence for teams. The hosted backend exposes the `teams`
//! table through a PostgREST-style endpoint; this crate wraps it in a small
//! CRUD client and adds an in-memory fallback used when no store
//! credentials are configured.
//!
//! The roster travels inside each row as a JSON text blob in the
//! `pokemon_data` column. Encoding and decoding that blob happens here, at
//! the wire boundary, so the rest of the application only ever sees
//! [`rosterdex_shared::Team`] values.

pub mod api;
pub mod config;
pub mod memory;
pub mod rest;
pub mod rows;

mod error;

pub use api::{TeamPatch, TeamStore};
pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use memory::MemoryTeamStore;
pub use rest::RestTeamStore;
