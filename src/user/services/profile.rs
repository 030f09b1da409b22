//! Service layer for profile provisioning, retrieval, update, and deletion.

use crate::identity::domain::{UserId, UserIdentity};
use crate::user::{
    domain::{ProfileDomainError, UserProfile},
    ports::{ProfileRepository, ProfileRepositoryError},
};
use mockable::Clock;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

/// Partial profile update accepted by the profile endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfile {
    /// Replacement account email.
    pub email: Option<String>,
}

/// Service-level errors for profile operations.
#[derive(Debug, Error)]
pub enum ProfileServiceError {
    /// No profile exists for the user id.
    #[error("profile not found: {0}")]
    NotFound(UserId),
    /// The signed-up account carries no email to provision from.
    #[error("identity {0} has no email to provision a profile from")]
    MissingEmail(UserId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProfileDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProfileRepositoryError),
}

/// Result type for profile service operations.
pub type ProfileServiceResult<T> = Result<T, ProfileServiceError>;

/// Profile upkeep service.
#[derive(Clone)]
pub struct ProfileService {
    repository: Arc<dyn ProfileRepository>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl ProfileService {
    /// Creates a new profile service.
    #[must_use]
    pub const fn new(
        repository: Arc<dyn ProfileRepository>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self { repository, clock }
    }

    /// Retrieves the profile for a user id.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::NotFound`] when no profile exists and
    /// [`ProfileServiceError::Repository`] on store failure.
    pub async fn get(&self, id: UserId) -> ProfileServiceResult<UserProfile> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProfileServiceError::NotFound(id))
    }

    /// Provisions a profile for a freshly signed-up identity.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::MissingEmail`] when the identity
    /// carries no email, [`ProfileServiceError::Domain`] when the email
    /// fails validation, and [`ProfileServiceError::Repository`] on store
    /// failure.
    pub async fn provision(&self, identity: &UserIdentity) -> ProfileServiceResult<UserProfile> {
        let email = identity
            .email()
            .ok_or(ProfileServiceError::MissingEmail(identity.user_id()))?;
        let profile = UserProfile::provision(identity.user_id(), email, &*self.clock)?;
        self.repository.store(&profile).await?;
        Ok(profile)
    }

    /// Applies a partial update to the caller's profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::NotFound`] when no profile exists,
    /// [`ProfileServiceError::Domain`] when the update fails validation,
    /// and [`ProfileServiceError::Repository`] on store failure.
    pub async fn update(
        &self,
        id: UserId,
        update: UpdateProfile,
    ) -> ProfileServiceResult<UserProfile> {
        let mut profile = self.get(id).await?;
        if let Some(email) = update.email {
            profile.change_email(email, &*self.clock)?;
        }
        self.repository.update(&profile).await?;
        Ok(profile)
    }

    /// Hard-deletes the caller's profile.
    ///
    /// Dependent-record cleanup is an external-store concern; this call
    /// removes only the profile row.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Repository`] on store failure.
    pub async fn delete(&self, id: UserId) -> ProfileServiceResult<()> {
        Ok(self.repository.delete(id).await?)
    }
}
