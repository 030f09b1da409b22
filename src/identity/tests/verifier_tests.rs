//! Tests for the static token verifier and identity domain types.

#![expect(clippy::expect_used, reason = "test code uses expect for assertion clarity")]

use crate::identity::{
    adapters::memory::StaticTokenVerifier,
    domain::{UserId, UserIdentity},
    ports::{IdentityError, IdentityVerifier},
};
use rstest::{fixture, rstest};
use uuid::Uuid;

#[fixture]
fn identity() -> UserIdentity {
    UserIdentity::new(
        UserId::from_uuid(Uuid::new_v4()),
        Some("student@example.edu".to_owned()),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn known_token_resolves_to_registered_identity(identity: UserIdentity) {
    let verifier = StaticTokenVerifier::new().with_token("valid-token", identity.clone());

    let resolved = verifier
        .verify("valid-token")
        .await
        .expect("known token should verify");

    assert_eq!(resolved, identity);
    assert_eq!(resolved.email(), Some("student@example.edu"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_token_is_rejected(identity: UserIdentity) {
    let verifier = StaticTokenVerifier::new().with_token("valid-token", identity);

    let result = verifier.verify("forged-token").await;

    assert!(matches!(result, Err(IdentityError::Rejected)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_table_rejects_everything() {
    let verifier = StaticTokenVerifier::new();

    let result = verifier.verify("anything").await;

    assert!(matches!(result, Err(IdentityError::Rejected)));
}
