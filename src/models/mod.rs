use serde::{Deserialize, Serialize};

mod blog;
mod fingerprint;
mod recommendation;
mod user_profile;

pub use blog::{AuthorRef, BlogDocument};
pub use fingerprint::{Fingerprint, FingerprintError};
pub use recommendation::{
    excerpt, BlogSummary, RecommendationEntry, LISTING_EXCERPT_CHARS, RELATED_EXCERPT_CHARS,
};
pub use user_profile::{ReadingHistoryEntry, UserProfile};

/// Response body for a reader's personalized feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<RecommendationEntry>,
    /// Preferences the ranking was computed from
    pub preferences: Vec<String>,
    pub reading_history_count: usize,
}

/// Response body for the like toggle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LikeStatus {
    pub liked: bool,
    pub likes: usize,
}

/// One page of the blog listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPage {
    pub blogs: Vec<BlogSummary>,
    /// Pages needed to show every matching blog at the requested page size
    pub total_pages: usize,
    pub current_page: usize,
}

/// Blog counts for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlogStats {
    pub total_blogs: usize,
    /// Blogs written by the requesting user; 0 when no user is given
    pub my_blogs: usize,
}
