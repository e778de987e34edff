use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of searches kept per user.
pub const MAX_RECENT_SEARCHES: usize = 7;

/// One recorded search. Repeated queries are stored as separate entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryEntry {
    pub user_id: String,
    pub query: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SaveSearchRequest {
    pub query: Option<String>,
}
