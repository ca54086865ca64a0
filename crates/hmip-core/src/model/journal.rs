use chrono::{DateTime, Utc};
use serde::Serialize;

/// One entry of the security journal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecurityJournalEntry {
    /// `None` when the service sent a timestamp outside chrono's range.
    pub timestamp: Option<DateTime<Utc>>,
    pub event_type: String,
    pub label: String,
}
