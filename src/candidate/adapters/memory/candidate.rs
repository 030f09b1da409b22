//! In-memory repository for candidate lifecycle tests.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::candidate::{
    domain::{CandidateId, TaskCandidate},
    ports::{
        CandidateOrder, CandidateQuery, CandidateRepository, CandidateRepositoryError,
        CandidateRepositoryResult,
    },
};
use crate::identity::domain::UserId;

/// Thread-safe in-memory candidate repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCandidateRepository {
    state: Arc<RwLock<HashMap<CandidateId, TaskCandidate>>>,
}

impl InMemoryCandidateRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> CandidateRepositoryError {
    CandidateRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Orders candidates newest-first by creation time.
fn recency_order(a: &TaskCandidate, b: &TaskCandidate) -> Ordering {
    b.created_at().cmp(&a.created_at())
}

/// Orders candidates by confidence score descending with unscored
/// candidates last, then newest-first.
fn confidence_order(a: &TaskCandidate, b: &TaskCandidate) -> Ordering {
    match (a.confidence_score(), b.confidence_score()) {
        (Some(left), Some(right)) => right.total_cmp(&left).then_with(|| recency_order(a, b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => recency_order(a, b),
    }
}

#[async_trait]
impl CandidateRepository for InMemoryCandidateRepository {
    async fn store(&self, candidate: &TaskCandidate) -> CandidateRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.insert(candidate.id(), candidate.clone());
        Ok(())
    }

    async fn update(&self, candidate: &TaskCandidate) -> CandidateRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let matches_owner = state
            .get(&candidate.id())
            .is_some_and(|existing| existing.owner() == candidate.owner());
        if !matches_owner {
            return Err(CandidateRepositoryError::NotFound(candidate.id()));
        }
        state.insert(candidate.id(), candidate.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: CandidateId,
        owner: UserId,
    ) -> CandidateRepositoryResult<Option<TaskCandidate>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .get(&id)
            .filter(|candidate| candidate.owner() == owner)
            .cloned())
    }

    async fn list(
        &self,
        owner: UserId,
        query: CandidateQuery,
    ) -> CandidateRepositoryResult<Vec<TaskCandidate>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut candidates: Vec<TaskCandidate> = state
            .values()
            .filter(|candidate| {
                candidate.owner() == owner
                    && query
                        .status
                        .is_none_or(|status| candidate.status() == status)
            })
            .cloned()
            .collect();

        match query.order {
            CandidateOrder::Recency => candidates.sort_by(recency_order),
            CandidateOrder::Confidence => candidates.sort_by(confidence_order),
        }
        Ok(candidates)
    }
}
