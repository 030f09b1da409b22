//! Port contracts for credential verification.

pub mod verifier;

pub use verifier::{IdentityError, IdentityResult, IdentityVerifier};
