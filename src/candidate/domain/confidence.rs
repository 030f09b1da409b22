//! Coarse extraction-certainty classification.

use super::ParseConfidenceBandError;
use serde::{Deserialize, Serialize};

/// Confidence band assigned by the extraction pipeline.
///
/// Paired with the numeric `confidence_score` on the candidate; the band is
/// what clients display, the score is what rankings sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfidenceBand {
    /// Extraction is near-certain.
    High,
    /// Extraction is plausible but unverified.
    Med,
    /// Extraction is speculative.
    Low,
}

impl ConfidenceBand {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Med => "MED",
            Self::Low => "LOW",
        }
    }
}

impl TryFrom<&str> for ConfidenceBand {
    type Error = ParseConfidenceBandError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "HIGH" => Ok(Self::High),
            "MED" => Ok(Self::Med),
            "LOW" => Ok(Self::Low),
            _ => Err(ParseConfidenceBandError(value.to_owned())),
        }
    }
}
