//! Read-only projection of the source message behind a candidate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable snippet of the message a candidate was extracted from.
///
/// The ingestion side owns the full message; this core only ever reads
/// this projection for display next to a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSnippet {
    /// Message subject line.
    pub subject: String,
    /// Sender display name, when known.
    pub from_name: Option<String>,
    /// Sender address.
    pub from_email: String,
    /// Time the message was received.
    pub received_at: DateTime<Utc>,
    /// Leading excerpt of the message body.
    pub body_snippet: String,
    /// URLs extracted from the message body.
    pub urls: Vec<String>,
}
