//! Bearer-credential verification against the external identity provider.
//!
//! Every authenticated request carries an opaque bearer token issued by the
//! identity provider. This module resolves such a token to a stable user
//! identity for the remainder of one request; identities are never cached
//! across requests. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
