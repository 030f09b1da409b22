//! Read-only port for source-message snippet lookup.

use crate::candidate::domain::{SourceMessageId, SourceSnippet};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for source-message lookups.
pub type SourceMessageResult<T> = Result<T, SourceMessageError>;

/// Source-message projection contract.
///
/// Lookups are keyed by message id rather than owner: ownership is
/// established on the referencing candidate before this port is consulted.
#[async_trait]
pub trait SourceMessageRepository: Send + Sync {
    /// Fetches the display snippet for one source message.
    ///
    /// Returns `None` when the message does not exist.
    async fn find_snippet(
        &self,
        id: SourceMessageId,
    ) -> SourceMessageResult<Option<SourceSnippet>>;
}

/// Errors returned by source-message repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SourceMessageError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SourceMessageError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
