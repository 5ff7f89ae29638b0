use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Fingerprint;
use crate::services::fingerprint::build_fingerprint;

/// Author reference carried on every blog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorRef {
    pub id: Uuid,
    pub name: String,
}

/// A published blog post together with its cached content fingerprint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlogDocument {
    /// Unique identifier for the blog
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub author: AuthorRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Number of times the blog has been opened
    pub read_count: u64,
    /// Users who currently like the blog
    pub liked_by: Vec<Uuid>,
    /// Computed from `content` and `tags` when the content was last written
    pub fingerprint: Fingerprint,
}

impl BlogDocument {
    /// Creates a new blog and computes its fingerprint
    pub fn new(
        title: String,
        content: String,
        tags: Vec<String>,
        author: AuthorRef,
        now: DateTime<Utc>,
    ) -> Self {
        let fingerprint = build_fingerprint(&content, &tags);
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            tags,
            author,
            created_at: now,
            updated_at: now,
            read_count: 0,
            liked_by: Vec::new(),
            fingerprint,
        }
    }

    /// Applies an edit.
    ///
    /// The fingerprint is only rebuilt when the content text changes; a
    /// tag-only edit keeps the previous fingerprint. Returns whether the
    /// fingerprint was rebuilt.
    pub fn apply_update(
        &mut self,
        title: String,
        content: String,
        tags: Vec<String>,
        now: DateTime<Utc>,
    ) -> bool {
        let content_changed = content != self.content;
        if content_changed {
            self.fingerprint = build_fingerprint(&content, &tags);
        }
        self.title = title;
        self.content = content;
        self.tags = tags;
        self.updated_at = now;
        content_changed
    }

    /// Likes or unlikes the blog for `user_id`. Returns true if the blog is now liked.
    pub fn toggle_like(&mut self, user_id: Uuid) -> bool {
        if let Some(pos) = self.liked_by.iter().position(|id| *id == user_id) {
            self.liked_by.remove(pos);
            false
        } else {
            self.liked_by.push(user_id);
            true
        }
    }

    pub fn like_count(&self) -> usize {
        self.liked_by.len()
    }

    /// True when the blog carries `tag`, ignoring case
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == wanted)
    }
}
