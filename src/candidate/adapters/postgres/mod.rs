//! `PostgreSQL` adapters for candidate persistence and source lookup.

mod models;
mod repository;
mod schema;
mod source;

pub use repository::{CandidatePgPool, PostgresCandidateRepository};
pub use source::PostgresSourceMessageRepository;
