//! Application services for feed aggregation.

mod aggregator;

pub use aggregator::{Feed, FeedError, FeedResult, FeedService, FeedStatusFilter};
