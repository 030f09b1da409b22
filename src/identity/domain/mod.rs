//! Domain types for verified request identities.

mod ids;

pub use ids::UserId;

use serde::{Deserialize, Serialize};

/// A verified identity attached to one in-flight request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    user_id: UserId,
    email: Option<String>,
}

impl UserIdentity {
    /// Creates an identity from a provider user id and optional email.
    #[must_use]
    pub const fn new(user_id: UserId, email: Option<String>) -> Self {
        Self { user_id, email }
    }

    /// Returns the stable provider-issued user id.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the account email, when the provider supplied one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}
