//! Application services for candidate triage.

mod lifecycle;

pub use lifecycle::{
    CandidateLifecycleError, CandidateLifecycleResult, CandidateLifecycleService, Confirmation,
    ConfirmOverrides, IgnoreReason,
};
