//! Unit and service tests for candidate triage.

mod domain_tests;
mod service_tests;
mod state_transition_tests;
