use serde::{Deserialize, Serialize};

/// One submission's review record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeworkEntry {
    #[serde(rename = "homework_name")]
    pub name: String,
    pub status: String,
}

/// Typed view of a validated status API payload
///
/// The API lists entries most-recent-first. Only the head is tracked, so only
/// the head is decoded; older entries are carried as raw JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub latest: Option<HomeworkEntry>,
    pub older: Vec<serde_json::Value>,
    pub current_date: i64,
}

impl ApiResponse {
    pub fn latest(&self) -> Option<&HomeworkEntry> {
        self.latest.as_ref()
    }

    pub fn homework_count(&self) -> usize {
        usize::from(self.latest.is_some()) + self.older.len()
    }
}

/// In-memory state carried between poll cycles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    pub last_message: String,
    pub cursor_timestamp: i64,
}

impl PollState {
    pub fn new(cursor_timestamp: i64) -> Self {
        Self {
            last_message: String::new(),
            cursor_timestamp,
        }
    }
}
