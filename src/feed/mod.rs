//! Merged candidate/task feed views.
//!
//! The feed is a read-only aggregation over the candidate and task stores:
//! two independent owner-scoped queries whose results are returned side by
//! side, with any further partitioning left to the client.

pub mod services;

#[cfg(test)]
mod tests;
