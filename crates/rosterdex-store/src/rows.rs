//! Wire shapes for the hosted `teams` table.
//!
//! Expected schema:
//!
//! ```sql
//! create table teams (
//!   id uuid primary key default gen_random_uuid(),
//!   name text not null,
//!   pokemon_data text,
//!   created_at timestamptz not null default now(),
//!   updated_at timestamptz
//! );
//! ```
//!
//! The roster is a JSON array serialized into the `pokemon_data` text
//! column. This module is the only place that blob is encoded or decoded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rosterdex_shared::{Pokemon, Team};

use crate::api::TeamPatch;
use crate::error::{Result, StoreError};

/// One row of the remote `teams` table, as returned by the REST endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamRow {
    pub id: rosterdex_shared::TeamId,
    pub name: String,
    /// JSON-encoded roster. `null` and the empty string both mean an empty
    /// roster.
    pub pokemon_data: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl TeamRow {
    /// Decode the row into the domain shape.
    ///
    /// A missing or blank `pokemon_data` blob is an empty roster by
    /// contract. A blob that is present but unparsable is a decode error;
    /// treating it as empty would silently discard the user's roster on the
    /// next save.
    pub fn into_team(self) -> Result<Team> {
        let roster = decode_roster(self.pokemon_data.as_deref()).map_err(|source| {
            StoreError::RosterDecode {
                team_id: self.id.clone(),
                source,
            }
        })?;
        Ok(Team {
            id: self.id,
            name: self.name,
            roster,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Insert body for a new team. New teams always start with an empty roster,
/// encoded as the literal `[]`.
#[derive(Debug, Serialize)]
pub struct NewTeamRow<'a> {
    pub name: &'a str,
    pub pokemon_data: &'a str,
}

impl<'a> NewTeamRow<'a> {
    pub fn named(name: &'a str) -> Self {
        Self {
            name,
            pokemon_data: "[]",
        }
    }
}

/// Parse a roster blob into Pokémon.
pub fn decode_roster(blob: Option<&str>) -> std::result::Result<Vec<Pokemon>, serde_json::Error> {
    match blob {
        None => Ok(Vec::new()),
        Some(s) if s.trim().is_empty() => Ok(Vec::new()),
        Some(s) => serde_json::from_str(s),
    }
}

/// Serialize a roster for the `pokemon_data` column.
pub fn encode_roster(roster: &[Pokemon]) -> Result<String> {
    serde_json::to_string(roster).map_err(StoreError::RosterEncode)
}

/// Build the JSON body for a partial update.
///
/// Only fields present in the patch are included, plus `updated_at`, which
/// is refreshed on every write so the row records when it last changed.
pub fn patch_body(patch: &TeamPatch, now: DateTime<Utc>) -> Result<serde_json::Value> {
    let mut body = serde_json::Map::new();
    body.insert("updated_at".to_string(), serde_json::json!(now));
    if let Some(name) = &patch.name {
        body.insert("name".to_string(), serde_json::Value::String(name.clone()));
    }
    if let Some(roster) = &patch.roster {
        body.insert(
            "pokemon_data".to_string(),
            serde_json::Value::String(encode_roster(roster)?),
        );
    }
    Ok(serde_json::Value::Object(body))
}
