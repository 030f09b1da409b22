//! Static token table for tests and local development.

use crate::identity::{
    domain::UserIdentity,
    ports::{IdentityError, IdentityResult, IdentityVerifier},
};
use async_trait::async_trait;
use std::collections::HashMap;

/// Verifier resolving a fixed set of tokens to fixed identities.
///
/// Any token not present in the table is rejected, mirroring how the real
/// provider refuses unknown credentials.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, UserIdentity>,
}

impl StaticTokenVerifier {
    /// Creates an empty verifier that rejects every token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token as resolving to the given identity.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>, identity: UserIdentity) -> Self {
        self.tokens.insert(token.into(), identity);
        self
    }
}

#[async_trait]
impl IdentityVerifier for StaticTokenVerifier {
    async fn verify(&self, bearer_token: &str) -> IdentityResult<UserIdentity> {
        self.tokens
            .get(bearer_token)
            .cloned()
            .ok_or(IdentityError::Rejected)
    }
}
