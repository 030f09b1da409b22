//! Domain model for extracted task candidates.
//!
//! Candidates are created by the ingestion pipeline, mutated only through
//! the lifecycle service, and never deleted in-core.

mod candidate;
mod confidence;
mod error;
mod ids;
mod source;

pub use candidate::{
    CandidateStatus, EditCandidate, ExtractedCandidate, PersistedCandidateData, TaskCandidate,
};
pub use confidence::ConfidenceBand;
pub use error::{
    CandidateDomainError, ParseCandidateStatusError, ParseConfidenceBandError,
};
pub use ids::{CandidateId, SourceMessageId};
pub use source::SourceSnippet;
