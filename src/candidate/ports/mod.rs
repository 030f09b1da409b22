//! Port contracts for candidate persistence and source-message lookup.
//!
//! Ports define infrastructure-agnostic interfaces used by the candidate
//! lifecycle service.

pub mod repository;
pub mod source;

pub use repository::{
    CandidateOrder, CandidateQuery, CandidateRepository, CandidateRepositoryError,
    CandidateRepositoryResult,
};
pub use source::{SourceMessageError, SourceMessageRepository, SourceMessageResult};
