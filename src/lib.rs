//! Taskfeed: an email-derived task triage service.
//!
//! This crate provides the backend for a task-management feed: provisional
//! task candidates extracted from inbound mail are triaged (confirmed,
//! edited, or ignored) by their owner, and confirmed candidates are
//! materialised as user-owned tasks served through an authenticated HTTP
//! API.
//!
//! # Architecture
//!
//! Taskfeed follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, identity
//!   provider, in-memory test doubles)
//!
//! # Modules
//!
//! - [`candidate`]: Candidate lifecycle — confirm, edit, ignore, source
//! - [`task`]: Task records materialised from confirmed candidates
//! - [`feed`]: Merged candidate/task feed views
//! - [`user`]: User profiles mirroring identity-provider accounts
//! - [`identity`]: Bearer-credential verification
//! - [`api`]: HTTP router, request validation, and error classification
//! - [`config`]: Environment-derived runtime configuration

pub mod api;
pub mod candidate;
pub mod config;
pub mod feed;
pub mod identity;
pub mod patch;
pub mod task;
pub mod user;
