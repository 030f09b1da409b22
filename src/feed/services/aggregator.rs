//! Read-side service merging candidate and task queries into feed views.

use crate::candidate::{
    domain::{CandidateStatus, TaskCandidate},
    ports::{CandidateQuery, CandidateRepository, CandidateRepositoryError},
};
use crate::identity::domain::UserId;
use crate::task::{
    domain::{Task, TaskStatus},
    ports::{TaskQuery, TaskRepository, TaskRepositoryError},
};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

/// Number of tasks returned by the upcoming view when no limit is given.
const DEFAULT_UPCOMING_LIMIT: i64 = 10;

/// Status partition requested for the feed's candidate half.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedStatusFilter {
    /// Only unprocessed candidates.
    New,
    /// Only confirmed candidates.
    Confirmed,
    /// Every candidate regardless of status.
    #[default]
    All,
}

impl FeedStatusFilter {
    const fn as_status(self) -> Option<CandidateStatus> {
        match self {
            Self::New => Some(CandidateStatus::New),
            Self::Confirmed => Some(CandidateStatus::Confirmed),
            Self::All => None,
        }
    }
}

/// Merged feed response: both halves are independent scoped queries with
/// no cross-relation join.
#[derive(Debug, Clone, PartialEq)]
pub struct Feed {
    /// Owner's candidates, newest first.
    pub candidates: Vec<TaskCandidate>,
    /// Owner's tasks, due date ascending with undated tasks last.
    pub tasks: Vec<Task>,
}

/// Errors returned by feed queries.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Candidate store query failed.
    #[error(transparent)]
    CandidateRepository(#[from] CandidateRepositoryError),
    /// Task store query failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
}

/// Result type for feed queries.
pub type FeedResult<T> = Result<T, FeedError>;

/// Feed aggregation service.
#[derive(Clone)]
pub struct FeedService {
    candidates: Arc<dyn CandidateRepository>,
    tasks: Arc<dyn TaskRepository>,
}

impl FeedService {
    /// Creates a new feed service.
    #[must_use]
    pub const fn new(
        candidates: Arc<dyn CandidateRepository>,
        tasks: Arc<dyn TaskRepository>,
    ) -> Self {
        Self { candidates, tasks }
    }

    /// Returns the owner's merged feed, optionally filtering candidates to
    /// one status.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError`] when either scoped query fails.
    pub async fn feed(&self, owner: UserId, filter: FeedStatusFilter) -> FeedResult<Feed> {
        let mut candidate_query = CandidateQuery::default();
        if let Some(status) = filter.as_status() {
            candidate_query = candidate_query.with_status(status);
        }

        let candidates = self.candidates.list(owner, candidate_query).await?;
        let tasks = self.tasks.list(owner, TaskQuery::default()).await?;
        Ok(Feed { candidates, tasks })
    }

    /// Returns the owner's unprocessed candidates ranked by confidence
    /// score descending (unscored last), then recency.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::CandidateRepository`] when the query fails.
    pub async fn new_candidates(&self, owner: UserId) -> FeedResult<Vec<TaskCandidate>> {
        let query = CandidateQuery::default()
            .with_status(CandidateStatus::New)
            .ranked_by_confidence();
        Ok(self.candidates.list(owner, query).await?)
    }

    /// Returns the owner's pending, dated tasks soonest-first, capped at
    /// `limit` (default 10).
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::TaskRepository`] when the query fails.
    pub async fn upcoming_tasks(
        &self,
        owner: UserId,
        limit: Option<i64>,
    ) -> FeedResult<Vec<Task>> {
        let query = TaskQuery::default()
            .with_status(TaskStatus::Pending)
            .scheduled_only()
            .with_limit(limit.unwrap_or(DEFAULT_UPCOMING_LIMIT));
        Ok(self.tasks.list(owner, query).await?)
    }
}
