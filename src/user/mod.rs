//! User profiles mirroring identity-provider accounts.
//!
//! A profile is created at signup-time provisioning with the provider's
//! user id, carries app-local fields alongside the account email, and is
//! hard-deleted without any in-core cascade. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
