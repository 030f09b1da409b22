//! Repository port for user profile persistence.

use crate::identity::domain::UserId;
use crate::user::domain::UserProfile;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for profile repository operations.
pub type ProfileRepositoryResult<T> = Result<T, ProfileRepositoryError>;

/// Profile persistence contract.
///
/// Profiles are keyed directly by the provider user id, which doubles as
/// the ownership scope.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Stores a newly provisioned profile.
    async fn store(&self, profile: &UserProfile) -> ProfileRepositoryResult<()>;

    /// Persists changes to an existing profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileRepositoryError::NotFound`] when no row matches.
    async fn update(&self, profile: &UserProfile) -> ProfileRepositoryResult<()>;

    /// Finds a profile by user id.
    ///
    /// Returns `None` when no profile exists.
    async fn find_by_id(&self, id: UserId) -> ProfileRepositoryResult<Option<UserProfile>>;

    /// Hard-deletes a profile; deleting an absent profile succeeds silently.
    async fn delete(&self, id: UserId) -> ProfileRepositoryResult<()>;
}

/// Errors returned by profile repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProfileRepositoryError {
    /// No profile exists for the user id.
    #[error("profile not found: {0}")]
    NotFound(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProfileRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
