//! Repository port for owner-scoped candidate persistence.

use crate::candidate::domain::{CandidateId, CandidateStatus, TaskCandidate};
use crate::identity::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for candidate repository operations.
pub type CandidateRepositoryResult<T> = Result<T, CandidateRepositoryError>;

/// Ordering applied to candidate listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CandidateOrder {
    /// Newest first by creation time.
    #[default]
    Recency,
    /// Highest confidence score first (unscored last), newest first within
    /// equal scores. Used when surfacing candidates for triage.
    Confidence,
}

/// Filter and ordering options for candidate listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CandidateQuery {
    /// Restrict to one triage status.
    pub status: Option<CandidateStatus>,
    /// Ordering policy.
    pub order: CandidateOrder,
}

impl CandidateQuery {
    /// Restricts the query to one status.
    #[must_use]
    pub const fn with_status(mut self, status: CandidateStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Orders results by confidence ranking.
    #[must_use]
    pub const fn ranked_by_confidence(mut self) -> Self {
        self.order = CandidateOrder::Confidence;
        self
    }
}

/// Candidate persistence contract.
///
/// Every operation filters by owner id; candidates are never deleted by
/// this core, so the port exposes no delete.
#[async_trait]
pub trait CandidateRepository: Send + Sync {
    /// Stores a newly extracted candidate.
    async fn store(&self, candidate: &TaskCandidate) -> CandidateRepositoryResult<()>;

    /// Persists changes to an existing candidate, matching on id and owner.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateRepositoryError::NotFound`] when no row matches.
    async fn update(&self, candidate: &TaskCandidate) -> CandidateRepositoryResult<()>;

    /// Finds a candidate by identifier within the owner's rows.
    ///
    /// Returns `None` when no row matches id and owner.
    async fn find_by_id(
        &self,
        id: CandidateId,
        owner: UserId,
    ) -> CandidateRepositoryResult<Option<TaskCandidate>>;

    /// Lists the owner's candidates, filtered and ordered per the query.
    async fn list(
        &self,
        owner: UserId,
        query: CandidateQuery,
    ) -> CandidateRepositoryResult<Vec<TaskCandidate>>;
}

/// Errors returned by candidate repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CandidateRepositoryError {
    /// The candidate was not found for the given id and owner.
    #[error("candidate not found: {0}")]
    NotFound(CandidateId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CandidateRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
