//! Candidate lifecycle management.
//!
//! A task candidate is a provisional task extracted from an inbound source
//! message by the (external) ingestion pipeline. This module owns the
//! triage side of that output: confirming a candidate into a task, editing
//! it, ignoring it, and exposing the source-message snippet it was derived
//! from. Status transitions are validated by an explicit state machine; the
//! confirm flow's two store writes are deliberately not atomic (see the
//! service docs). The module follows hexagonal architecture:
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
