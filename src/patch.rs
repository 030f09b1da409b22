//! Tri-state field updates distinguishing "omitted" from "explicit null".
//!
//! JSON request bodies use three states for nullable fields: a missing key
//! leaves the stored value untouched, an explicit `null` clears it, and a
//! value replaces it. A plain `Option<T>` collapses the first two, so patch
//! payloads carry [`Patch<T>`] instead.

use serde::{Deserialize, Deserializer};

/// A tri-state update for a single nullable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch<T> {
    /// The field was omitted from the payload; keep the stored value.
    Keep,
    /// The field was `null` in the payload; clear the stored value.
    Clear,
    /// The field carried a value; replace the stored value.
    Set(T),
}

// A derived Default would demand `T: Default`, which types like
// `DateTime<Utc>` do not provide; the default is `Keep` for any `T`.
impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Keep
    }
}

impl<T> Patch<T> {
    /// Returns `true` when the patch leaves the stored value untouched.
    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// Resolves the patch against the currently stored value.
    #[must_use]
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Self::Keep => current,
            Self::Clear => None,
            Self::Set(value) => Some(value),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Reaching this impl at all means the key was present, so the field
        // is either `null` (Clear) or a value (Set). `Keep` only arises via
        // `#[serde(default)]` when the key is absent.
        Option::<T>::deserialize(deserializer).map(|value| value.map_or(Self::Clear, Self::Set))
    }
}
