//! Derived roster statistics: type coverage, average base experience, and a
//! rough strength tier. Computed on demand, never persisted.

use crate::constants::KNOWN_TYPE_COUNT;
use crate::pokemon::Pokemon;

/// Power tier derived from the roster's average base experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthTier {
    /// Empty roster or no experience data.
    NoData,
    /// Average below 100.
    Beginner,
    /// Average below 150.
    Intermediate,
    /// Average below 200.
    Advanced,
    /// Average 200 or higher.
    Elite,
}

impl StrengthTier {
    fn from_average(avg: u32) -> Self {
        match avg {
            0 => Self::NoData,
            1..=99 => Self::Beginner,
            100..=149 => Self::Intermediate,
            150..=199 => Self::Advanced,
            _ => Self::Elite,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NoData => "No Data",
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Elite => "Elite",
        }
    }
}

/// Snapshot of a roster's derived statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamSummary {
    pub size: usize,
    /// Distinct type tags in first-appearance order.
    pub unique_types: Vec<String>,
    /// Rounded mean of base experience; absent values count as 0.
    pub average_base_experience: u32,
    /// Coverage of the [`KNOWN_TYPE_COUNT`] known types, rounded percent.
    pub type_coverage_percent: u8,
    pub strength: StrengthTier,
    /// Mean height in metres.
    pub average_height_m: f64,
    /// Mean weight in kilograms.
    pub average_weight_kg: f64,
}

/// Compute the statistics panel for a roster.
pub fn summarize(roster: &[Pokemon]) -> TeamSummary {
    let mut unique_types: Vec<String> = Vec::new();
    for pokemon in roster {
        for name in pokemon.type_names() {
            if !unique_types.iter().any(|t| t == name) {
                unique_types.push(name.to_string());
            }
        }
    }

    let size = roster.len();

    let average_base_experience = if size == 0 {
        0
    } else {
        let total: u32 = roster.iter().map(|p| p.base_experience.unwrap_or(0)).sum();
        (f64::from(total) / size as f64).round() as u32
    };

    let type_coverage_percent =
        ((unique_types.len() as f64 / KNOWN_TYPE_COUNT as f64) * 100.0).round() as u8;

    let (average_height_m, average_weight_kg) = if size == 0 {
        (0.0, 0.0)
    } else {
        let height: u32 = roster.iter().map(|p| p.height).sum();
        let weight: u32 = roster.iter().map(|p| p.weight).sum();
        (
            f64::from(height) / size as f64 / 10.0,
            f64::from(weight) / size as f64 / 10.0,
        )
    };

    TeamSummary {
        size,
        average_base_experience,
        type_coverage_percent,
        strength: StrengthTier::from_average(average_base_experience),
        unique_types,
        average_height_m,
        average_weight_kg,
    }
}
