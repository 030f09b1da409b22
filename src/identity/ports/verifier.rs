//! Verification port resolving bearer tokens to user identities.

use crate::identity::domain::UserIdentity;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity verification.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Credential verification contract.
///
/// Implementations perform a read-only check against the identity provider;
/// they must not cache results across calls.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Resolves a bearer token to the identity it was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Rejected`] when the provider refuses the
    /// token and [`IdentityError::Provider`] when the provider cannot be
    /// reached or answers malformed data.
    async fn verify(&self, bearer_token: &str) -> IdentityResult<UserIdentity>;
}

/// Errors returned by identity verification.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// The provider refused the token (invalid, expired, or revoked).
    #[error("token rejected by identity provider")]
    Rejected,

    /// The provider could not be consulted.
    #[error("identity provider failure: {0}")]
    Provider(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityError {
    /// Wraps a provider transport or decoding failure.
    pub fn provider(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Provider(Arc::new(err))
    }
}
