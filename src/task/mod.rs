//! Task records materialised from confirmed candidates.
//!
//! A task is the durable, user-owned form of a triaged candidate: it is
//! created exclusively by the candidate confirm flow, carries a
//! pending/completed/cancelled status, and is listed, patched, completed,
//! and deleted through the task service. The module follows hexagonal
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
