use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{BlogDocument, UserProfile},
};

pub mod memory;

pub use memory::InMemoryStore;

/// Storage for blogs and reader profiles
///
/// The recommendation services only depend on this trait; the bundled
/// implementation is [`InMemoryStore`]. Operations that mutate a single
/// blog or profile under concurrent traffic (edits, read counts, likes,
/// history) are separate methods so an implementation can apply them
/// atomically.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogStore: Send + Sync {
    async fn insert_blog(&self, blog: BlogDocument) -> AppResult<()>;

    async fn get_blog(&self, id: Uuid) -> AppResult<Option<BlogDocument>>;

    /// Applies an author's edit and returns the updated blog
    ///
    /// Fails with `Forbidden` when `author_id` is not the blog's author. The
    /// check and the edit happen together, so concurrent reads and likes on
    /// the same blog are kept.
    async fn update_blog(
        &self,
        id: Uuid,
        author_id: Uuid,
        title: String,
        content: String,
        tags: Vec<String>,
        now: chrono::DateTime<chrono::Utc>,
    ) -> AppResult<Option<BlogDocument>>;

    /// Removes a blog; returns false if it does not exist
    async fn delete_blog(&self, id: Uuid) -> AppResult<bool>;

    /// All blogs in insertion order
    async fn list_blogs(&self) -> AppResult<Vec<BlogDocument>>;

    /// Increments the read count and returns the updated blog
    async fn increment_read_count(&self, id: Uuid) -> AppResult<Option<BlogDocument>>;

    /// Toggles `user_id`'s like and returns the updated blog
    async fn toggle_like(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<BlogDocument>>;

    async fn insert_user(&self, user: UserProfile) -> AppResult<()>;

    async fn get_user(&self, id: Uuid) -> AppResult<Option<UserProfile>>;

    /// Replaces a reader's preferences and returns the updated profile
    async fn set_preferences(
        &self,
        id: Uuid,
        preferences: Vec<String>,
    ) -> AppResult<Option<UserProfile>>;

    /// Appends a history entry unless the blog is already in the reader's history
    async fn record_read(
        &self,
        user_id: Uuid,
        blog_id: Uuid,
        read_at: chrono::DateTime<chrono::Utc>,
    ) -> AppResult<Option<UserProfile>>;
}
