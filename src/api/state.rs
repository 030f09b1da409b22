//! Dependency-injected application state shared across handlers.

use crate::candidate::services::CandidateLifecycleService;
use crate::feed::services::FeedService;
use crate::identity::ports::IdentityVerifier;
use crate::task::services::TaskService;
use crate::user::services::ProfileService;
use mockable::Clock;
use std::sync::Arc;

/// Explicitly constructed service graph handed to the router.
///
/// Every dependency sits behind a trait object so tests can substitute
/// in-memory doubles without any global state.
#[derive(Clone)]
pub struct AppState {
    /// Candidate triage service.
    pub candidates: CandidateLifecycleService,
    /// Task upkeep service.
    pub tasks: TaskService,
    /// Feed aggregation service.
    pub feed: FeedService,
    /// Profile upkeep service.
    pub profiles: ProfileService,
    /// Credential verifier consulted once per request.
    pub identity: Arc<dyn IdentityVerifier>,
    /// Clock used for response timestamps.
    pub clock: Arc<dyn Clock + Send + Sync>,
}
