//! Error types for candidate domain validation and parsing.

use super::{CandidateId, CandidateStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain candidate values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CandidateDomainError {
    /// The candidate title is empty after trimming.
    #[error("candidate title must not be empty")]
    EmptyTitle,

    /// The requested status change is not permitted by the state machine.
    #[error("candidate {candidate_id} cannot move from {from:?} to {to:?}")]
    InvalidStatusTransition {
        /// Candidate whose transition was rejected.
        candidate_id: CandidateId,
        /// Status before the rejected transition.
        from: CandidateStatus,
        /// Requested target status.
        to: CandidateStatus,
    },
}

/// Error returned while parsing candidate statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown candidate status: {0}")]
pub struct ParseCandidateStatusError(pub String);

/// Error returned while parsing confidence bands from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown confidence band: {0}")]
pub struct ParseConfidenceBandError(pub String);
