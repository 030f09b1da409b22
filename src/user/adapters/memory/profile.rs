//! In-memory repository for profile service tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::domain::UserId;
use crate::user::{
    domain::UserProfile,
    ports::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult},
};

/// Thread-safe in-memory profile repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    state: Arc<RwLock<HashMap<UserId, UserProfile>>>,
}

impl InMemoryProfileRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> ProfileRepositoryError {
    ProfileRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn store(&self, profile: &UserProfile) -> ProfileRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.insert(profile.id(), profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &UserProfile) -> ProfileRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if !state.contains_key(&profile.id()) {
            return Err(ProfileRepositoryError::NotFound(profile.id()));
        }
        state.insert(profile.id(), profile.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> ProfileRepositoryResult<Option<UserProfile>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.get(&id).cloned())
    }

    async fn delete(&self, id: UserId) -> ProfileRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.remove(&id);
        Ok(())
    }
}
