//! User profile aggregate mirroring the identity-provider account.

use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned while constructing or mutating profile values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfileDomainError {
    /// The email address is not plausibly deliverable.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}

/// Parameter object for reconstructing a persisted profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProfileData {
    /// Persisted profile identifier (equals the provider user id).
    pub id: UserId,
    /// Persisted account email.
    pub email: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// User profile aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    id: UserId,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Provisions a profile for a freshly signed-up account.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDomainError::InvalidEmail`] when the email fails
    /// format validation.
    pub fn provision(
        id: UserId,
        email: impl Into<String>,
        clock: &dyn Clock,
    ) -> Result<Self, ProfileDomainError> {
        let validated = validated_email(email.into())?;
        let timestamp = clock.utc();
        Ok(Self {
            id,
            email: validated,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a profile from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProfileData) -> Self {
        Self {
            id: data.id,
            email: data.email,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the profile identifier (equal to the provider user id).
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the account email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the account email.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDomainError::InvalidEmail`] when the email fails
    /// format validation; the profile is left unchanged.
    pub fn change_email(
        &mut self,
        email: impl Into<String>,
        clock: &dyn Clock,
    ) -> Result<(), ProfileDomainError> {
        self.email = validated_email(email.into())?;
        self.updated_at = clock.utc();
        Ok(())
    }
}

/// Validates an email has a non-empty local part and domain.
fn validated_email(email: String) -> Result<String, ProfileDomainError> {
    let trimmed = email.trim();
    let valid = trimmed
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(ProfileDomainError::InvalidEmail(email));
    }
    Ok(trimmed.to_owned())
}
