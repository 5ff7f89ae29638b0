use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AuthorRef, BlogDocument};

/// Excerpt length used for recommendation and trending listings
pub const LISTING_EXCERPT_CHARS: usize = 200;

/// Excerpt length used for related-blog listings
pub const RELATED_EXCERPT_CHARS: usize = 150;

const ELLIPSIS: &str = "...";

/// First `max_chars` characters of `content` followed by an ellipsis marker
pub fn excerpt(content: &str, max_chars: usize) -> String {
    let mut out: String = content.chars().take(max_chars).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Blog projection returned by listings (no full content, no fingerprint)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlogSummary {
    pub id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub author: AuthorRef,
    pub read_count: u64,
    pub like_count: usize,
    pub created_at: DateTime<Utc>,
}

impl BlogSummary {
    pub fn from_blog(blog: &BlogDocument, excerpt_chars: usize) -> Self {
        Self {
            id: blog.id,
            title: blog.title.clone(),
            excerpt: excerpt(&blog.content, excerpt_chars),
            tags: blog.tags.clone(),
            author: blog.author.clone(),
            read_count: blog.read_count,
            like_count: blog.like_count(),
            created_at: blog.created_at,
        }
    }
}

/// A ranked recommendation, computed per request and never stored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationEntry {
    pub id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub author: AuthorRef,
    pub read_count: u64,
    pub like_count: usize,
    /// Combined similarity score in [0, 1]
    pub score: f64,
    pub created_at: DateTime<Utc>,
}

impl RecommendationEntry {
    pub fn from_blog(blog: &BlogDocument, score: f64) -> Self {
        Self {
            id: blog.id,
            title: blog.title.clone(),
            excerpt: excerpt(&blog.content, LISTING_EXCERPT_CHARS),
            tags: blog.tags.clone(),
            author: blog.author.clone(),
            read_count: blog.read_count,
            like_count: blog.like_count(),
            score,
            created_at: blog.created_at,
        }
    }
}
