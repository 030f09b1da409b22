//! In-memory source-message projection for candidate tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::candidate::{
    domain::{SourceMessageId, SourceSnippet},
    ports::{SourceMessageError, SourceMessageRepository, SourceMessageResult},
};

/// Thread-safe in-memory source-message store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySourceMessageRepository {
    state: Arc<RwLock<HashMap<SourceMessageId, SourceSnippet>>>,
}

impl InMemorySourceMessageRepository {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a snippet under the given message id.
    ///
    /// # Errors
    ///
    /// Returns [`SourceMessageError::Persistence`] when the store lock is
    /// poisoned.
    pub fn insert(&self, id: SourceMessageId, snippet: SourceSnippet) -> SourceMessageResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| SourceMessageError::persistence(std::io::Error::other(err.to_string())))?;
        state.insert(id, snippet);
        Ok(())
    }
}

#[async_trait]
impl SourceMessageRepository for InMemorySourceMessageRepository {
    async fn find_snippet(
        &self,
        id: SourceMessageId,
    ) -> SourceMessageResult<Option<SourceSnippet>> {
        let state = self
            .state
            .read()
            .map_err(|err| SourceMessageError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state.get(&id).cloned())
    }
}
