use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A blog the reader has opened
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadingHistoryEntry {
    /// The ID of the blog that was read
    pub blog_id: Uuid,
    /// When the blog was first read
    pub read_at: DateTime<Utc>,
}

/// Reader profile used to personalize recommendations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    /// Free-text interests stated by the reader
    pub preferences: Vec<String>,
    /// Blogs the reader has opened, at most one entry per blog
    pub reading_history: Vec<ReadingHistoryEntry>,
}

impl UserProfile {
    /// Creates a reader with no history
    pub fn new(name: String, preferences: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            preferences,
            reading_history: Vec::new(),
        }
    }

    /// Replaces the stated preferences
    pub fn set_preferences(&mut self, preferences: Vec<String>) {
        self.preferences = preferences;
    }

    /// Records a read. A blog already in the history keeps its first entry.
    /// Returns true if a new entry was added.
    pub fn record_read(&mut self, blog_id: Uuid, read_at: DateTime<Utc>) -> bool {
        if self.has_read(&blog_id) {
            return false;
        }
        self.reading_history.push(ReadingHistoryEntry { blog_id, read_at });
        true
    }

    pub fn has_read(&self, blog_id: &Uuid) -> bool {
        self.reading_history.iter().any(|h| h.blog_id == *blog_id)
    }
}
