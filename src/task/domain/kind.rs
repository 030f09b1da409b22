//! Task category classification shared with extracted candidates.

use super::ParseTaskKindError;
use serde::{Deserialize, Serialize};

/// Category assigned to a task or candidate by the extraction pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskKind {
    /// A dated submission or cutoff.
    Deadline,
    /// Assigned reading material.
    Reading,
    /// Administrative chore (forms, registration, payments).
    Admin,
    /// A change notice (rescheduled lecture, room move).
    Change,
    /// A calendar event to attend.
    Event,
}

impl TaskKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deadline => "DEADLINE",
            Self::Reading => "READING",
            Self::Admin => "ADMIN",
            Self::Change => "CHANGE",
            Self::Event => "EVENT",
        }
    }
}

impl TryFrom<&str> for TaskKind {
    type Error = ParseTaskKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "DEADLINE" => Ok(Self::Deadline),
            "READING" => Ok(Self::Reading),
            "ADMIN" => Ok(Self::Admin),
            "CHANGE" => Ok(Self::Change),
            "EVENT" => Ok(Self::Event),
            _ => Err(ParseTaskKindError(value.to_owned())),
        }
    }
}
