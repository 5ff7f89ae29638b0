use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::BlogStore;
use crate::{
    error::{AppError, AppResult},
    models::{BlogDocument, UserProfile},
};

#[derive(Default)]
struct Blogs {
    by_id: HashMap<Uuid, BlogDocument>,
    /// Insertion order, used to list blogs deterministically
    order: Vec<Uuid>,
}

/// Process-local store backed by hash maps
#[derive(Default)]
pub struct InMemoryStore {
    blogs: RwLock<Blogs>,
    users: RwLock<HashMap<Uuid, UserProfile>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlogStore for InMemoryStore {
    async fn insert_blog(&self, blog: BlogDocument) -> AppResult<()> {
        let id = blog.id;
        let mut blogs = self.blogs.write().await;
        if blogs.by_id.insert(id, blog).is_none() {
            blogs.order.push(id);
        }
        Ok(())
    }

    async fn get_blog(&self, id: Uuid) -> AppResult<Option<BlogDocument>> {
        Ok(self.blogs.read().await.by_id.get(&id).cloned())
    }

    async fn update_blog(
        &self,
        id: Uuid,
        author_id: Uuid,
        title: String,
        content: String,
        tags: Vec<String>,
        now: DateTime<Utc>,
    ) -> AppResult<Option<BlogDocument>> {
        let mut blogs = self.blogs.write().await;
        let Some(blog) = blogs.by_id.get_mut(&id) else {
            return Ok(None);
        };

        if blog.author.id != author_id {
            return Err(AppError::Forbidden(
                "Not authorized to update this blog".to_string(),
            ));
        }

        let rebuilt = blog.apply_update(title, content, tags, now);
        tracing::debug!(blog_id = %id, fingerprint_rebuilt = rebuilt, "Applied blog edit");

        Ok(Some(blog.clone()))
    }

    async fn delete_blog(&self, id: Uuid) -> AppResult<bool> {
        let mut blogs = self.blogs.write().await;
        if blogs.by_id.remove(&id).is_none() {
            return Ok(false);
        }
        blogs.order.retain(|existing| *existing != id);
        Ok(true)
    }

    async fn list_blogs(&self) -> AppResult<Vec<BlogDocument>> {
        let blogs = self.blogs.read().await;
        Ok(blogs
            .order
            .iter()
            .filter_map(|id| blogs.by_id.get(id))
            .cloned()
            .collect())
    }

    async fn increment_read_count(&self, id: Uuid) -> AppResult<Option<BlogDocument>> {
        let mut blogs = self.blogs.write().await;
        Ok(blogs.by_id.get_mut(&id).map(|blog| {
            blog.read_count += 1;
            blog.clone()
        }))
    }

    async fn toggle_like(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<BlogDocument>> {
        let mut blogs = self.blogs.write().await;
        Ok(blogs.by_id.get_mut(&id).map(|blog| {
            blog.toggle_like(user_id);
            blog.clone()
        }))
    }

    async fn insert_user(&self, user: UserProfile) -> AppResult<()> {
        self.users.write().await.insert(user.id, user);
        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> AppResult<Option<UserProfile>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn set_preferences(
        &self,
        id: Uuid,
        preferences: Vec<String>,
    ) -> AppResult<Option<UserProfile>> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(&id).map(|user| {
            user.set_preferences(preferences);
            user.clone()
        }))
    }

    async fn record_read(
        &self,
        user_id: Uuid,
        blog_id: Uuid,
        read_at: DateTime<Utc>,
    ) -> AppResult<Option<UserProfile>> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(&user_id).map(|user| {
            user.record_read(blog_id, read_at);
            user.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthorRef;
    use std::sync::Arc;
    use tokio_test::assert_ok;

    fn blog(title: &str) -> BlogDocument {
        BlogDocument::new(
            title.to_string(),
            "content words here".to_string(),
            vec![],
            AuthorRef {
                id: Uuid::new_v4(),
                name: "Author".to_string(),
            },
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = InMemoryStore::new();
        let titles = ["first", "second", "third", "fourth"];
        for title in titles {
            assert_ok!(store.insert_blog(blog(title)).await);
        }

        let listed: Vec<String> = store
            .list_blogs()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(listed, titles);
    }

    #[tokio::test]
    async fn test_delete_removes_from_listing() {
        let store = InMemoryStore::new();
        let keep = blog("keep");
        let removed = blog("removed");
        store.insert_blog(keep.clone()).await.unwrap();
        store.insert_blog(removed.clone()).await.unwrap();

        assert!(store.delete_blog(removed.id).await.unwrap());
        assert!(!store.delete_blog(removed.id).await.unwrap());

        let listed = store.list_blogs().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, keep.id);
    }

    #[tokio::test]
    async fn test_update_missing_blog() {
        let store = InMemoryStore::new();
        let result = store
            .update_blog(
                Uuid::new_v4(),
                Uuid::new_v4(),
                "Title".to_string(),
                "content".to_string(),
                vec![],
                Utc::now(),
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_by_other_user_is_forbidden() {
        let store = InMemoryStore::new();
        let post = blog("owned");
        store.insert_blog(post.clone()).await.unwrap();

        let result = store
            .update_blog(
                post.id,
                Uuid::new_v4(),
                "Hijacked".to_string(),
                "other words".to_string(),
                vec![],
                Utc::now(),
            )
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));

        let stored = store.get_blog(post.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "owned");
    }

    #[tokio::test]
    async fn test_update_keeps_reads_and_likes_made_after_a_fetch() {
        let store = InMemoryStore::new();
        let post = blog("draft");
        let fan = Uuid::new_v4();
        store.insert_blog(post.clone()).await.unwrap();

        // An editor holds a copy while other requests read and like the blog
        let stale = store.get_blog(post.id).await.unwrap().unwrap();
        store.increment_read_count(post.id).await.unwrap();
        store.toggle_like(post.id, fan).await.unwrap();

        let updated = store
            .update_blog(
                stale.id,
                stale.author.id,
                "Final".to_string(),
                "rewritten content words".to_string(),
                stale.tags.clone(),
                Utc::now(),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Final");
        assert_eq!(updated.read_count, 1);
        assert_eq!(updated.liked_by, vec![fan]);
        assert_eq!(updated.fingerprint.get("rewritten"), Some(1));

        let stored = store.get_blog(post.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_concurrent_read_counts_are_not_lost() {
        let store = Arc::new(InMemoryStore::new());
        let post = blog("popular");
        let id = post.id;
        store.insert_blog(post).await.unwrap();

        let mut tasks = Vec::new();
        for _ in 0..50 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move { store.increment_read_count(id).await }));
        }
        for task in tasks {
            assert_ok!(task.await.unwrap());
        }

        let stored = store.get_blog(id).await.unwrap().unwrap();
        assert_eq!(stored.read_count, 50);
    }

    #[tokio::test]
    async fn test_record_read_for_unknown_user() {
        let store = InMemoryStore::new();
        let result = store
            .record_read(Uuid::new_v4(), Uuid::new_v4(), Utc::now())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_record_read_keeps_first_entry() {
        let store = InMemoryStore::new();
        let user = UserProfile::new("Reader".to_string(), vec![]);
        let blog_id = Uuid::new_v4();
        store.insert_user(user.clone()).await.unwrap();

        store.record_read(user.id, blog_id, Utc::now()).await.unwrap();
        let updated = store
            .record_read(user.id, blog_id, Utc::now())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.reading_history.len(), 1);
    }

    #[test]
    fn test_toggle_like_round_trip() {
        tokio_test::block_on(async {
            let store = InMemoryStore::new();
            let post = blog("likeable");
            let user = Uuid::new_v4();
            store.insert_blog(post.clone()).await.unwrap();

            let liked = store.toggle_like(post.id, user).await.unwrap().unwrap();
            assert_eq!(liked.like_count(), 1);
            let unliked = store.toggle_like(post.id, user).await.unwrap().unwrap();
            assert_eq!(unliked.like_count(), 0);
        });
    }
}
