//! HTTP adapter verifying tokens against the identity provider's user
//! endpoint.

use crate::identity::{
    domain::{UserId, UserIdentity},
    ports::{IdentityError, IdentityResult, IdentityVerifier},
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

/// Account payload returned by the provider's `GET /auth/v1/user` endpoint.
#[derive(Debug, Deserialize)]
struct ProviderAccount {
    id: Uuid,
    email: Option<String>,
}

/// Identity verifier backed by the provider's REST user endpoint.
#[derive(Debug, Clone)]
pub struct HttpIdentityVerifier {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl HttpIdentityVerifier {
    /// Creates a verifier for the given provider base URL and anon-tier key.
    #[must_use]
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            anon_key: anon_key.into(),
        }
    }

    fn user_endpoint(&self) -> String {
        format!("{}/auth/v1/user", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl IdentityVerifier for HttpIdentityVerifier {
    async fn verify(&self, bearer_token: &str) -> IdentityResult<UserIdentity> {
        let response = self
            .client
            .get(self.user_endpoint())
            .bearer_auth(bearer_token)
            .header("apikey", &self.anon_key)
            .send()
            .await
            .map_err(IdentityError::provider)?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Err(IdentityError::Rejected);
        }

        let account: ProviderAccount = response
            .error_for_status()
            .map_err(IdentityError::provider)?
            .json()
            .await
            .map_err(IdentityError::provider)?;

        Ok(UserIdentity::new(
            UserId::from_uuid(account.id),
            account.email,
        ))
    }
}
