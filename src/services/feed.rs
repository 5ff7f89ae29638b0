use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::time::Instant;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    db::BlogStore,
    error::{AppError, AppResult},
    models::{
        BlogDocument, BlogPage, BlogStats, BlogSummary, RecommendationResponse,
        LISTING_EXCERPT_CHARS,
    },
    services::{
        recommendations::{recommend, ResolvedHistoryEntry},
        selectors::{select_related, select_trending, BlogFilter},
    },
};

/// Builds a reader's personalized feed
///
/// Loads the reader's profile and every blog, resolves each history entry
/// to its blog (entries for deleted blogs stay unresolved), drops blogs the
/// reader has already read, and ranks what is left.
pub async fn personalized_feed(
    store: &dyn BlogStore,
    user_id: Uuid,
    limit: usize,
) -> AppResult<RecommendationResponse> {
    let start = Instant::now();

    let user = store
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

    let blogs = store.list_blogs().await?;
    let by_id: HashMap<Uuid, &BlogDocument> = blogs.iter().map(|b| (b.id, b)).collect();

    let history: Vec<ResolvedHistoryEntry<'_>> = user
        .reading_history
        .iter()
        .map(|entry| ResolvedHistoryEntry {
            entry,
            blog: by_id.get(&entry.blog_id).copied(),
        })
        .collect();

    let read: HashSet<Uuid> = user.reading_history.iter().map(|h| h.blog_id).collect();
    let candidates: Vec<BlogDocument> = blogs
        .iter()
        .filter(|blog| !read.contains(&blog.id))
        .cloned()
        .collect();

    tracing::info!(
        user_id = %user_id,
        preferences = user.preferences.len(),
        history = history.len(),
        candidates = candidates.len(),
        "Ranking recommendations"
    );

    let recommendations = recommend(&user.preferences, &candidates, &history, limit);

    tracing::info!(
        user_id = %user_id,
        returned = recommendations.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Recommendations ready"
    );

    Ok(RecommendationResponse {
        recommendations,
        preferences: user.preferences.clone(),
        reading_history_count: user.reading_history.len(),
    })
}

/// Most read blogs created within the last `since_days`
pub async fn trending_blogs(
    store: &dyn BlogStore,
    since_days: u32,
    limit: usize,
    now: DateTime<Utc>,
) -> AppResult<Vec<BlogSummary>> {
    let blogs = store.list_blogs().await?;
    let trending = select_trending(&blogs, since_days, now, limit);

    tracing::debug!(since_days, returned = trending.len(), "Selected trending blogs");

    Ok(trending
        .into_iter()
        .map(|blog| BlogSummary::from_blog(blog, LISTING_EXCERPT_CHARS))
        .collect())
}

/// Blogs related to `blog_id` by tag or author, backfilled with recent blogs
pub async fn related_blogs(
    store: &dyn BlogStore,
    blog_id: Uuid,
    limit: usize,
    excerpt_chars: usize,
) -> AppResult<Vec<BlogSummary>> {
    let reference = store
        .get_blog(blog_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Blog {} not found", blog_id)))?;

    let blogs = store.list_blogs().await?;

    Ok(select_related(&reference, &blogs, limit)
        .into_iter()
        .map(|blog| BlogSummary::from_blog(blog, excerpt_chars))
        .collect())
}

/// One page of blogs matching `filter`, newest first
///
/// Pages are numbered from 1. A page past the end is empty but still reports
/// the total page count.
pub async fn list_blogs(
    store: &dyn BlogStore,
    filter: &BlogFilter,
    page: usize,
    per_page: usize,
) -> AppResult<BlogPage> {
    if page == 0 {
        return Err(AppError::InvalidInput("page must be at least 1".to_string()));
    }
    if per_page == 0 {
        return Err(AppError::InvalidInput("limit must be at least 1".to_string()));
    }

    let blogs = store.list_blogs().await?;
    let mut matching: Vec<&BlogDocument> = blogs.iter().filter(|b| filter.matches(b)).collect();
    matching.sort_by_key(|blog| Reverse(blog.created_at));

    let total_pages = matching.len().div_ceil(per_page);
    let skip = (page - 1).saturating_mul(per_page);

    tracing::debug!(
        matching = matching.len(),
        page,
        per_page,
        total_pages,
        "Listed blogs"
    );

    Ok(BlogPage {
        blogs: matching
            .into_iter()
            .skip(skip)
            .take(per_page)
            .map(|blog| BlogSummary::from_blog(blog, LISTING_EXCERPT_CHARS))
            .collect(),
        total_pages,
        current_page: page,
    })
}

/// Total blog count, plus the count written by `user_id` when given
pub async fn blog_stats(store: &dyn BlogStore, user_id: Option<Uuid>) -> AppResult<BlogStats> {
    let blogs = store.list_blogs().await?;
    let my_blogs = user_id.map_or(0, |id| blogs.iter().filter(|b| b.author.id == id).count());

    Ok(BlogStats {
        total_blogs: blogs.len(),
        my_blogs,
    })
}

/// Opens a blog: bumps its read count and, for a known reader, records the read
pub async fn read_blog(
    store: &dyn BlogStore,
    blog_id: Uuid,
    reader: Option<Uuid>,
    now: DateTime<Utc>,
) -> AppResult<BlogDocument> {
    if let Some(reader_id) = reader {
        if store.get_user(reader_id).await?.is_none() {
            return Err(AppError::NotFound(format!("User {} not found", reader_id)));
        }
    }

    let blog = store
        .increment_read_count(blog_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Blog {} not found", blog_id)))?;

    if let Some(reader_id) = reader {
        store.record_read(reader_id, blog_id, now).await?;
        tracing::debug!(blog_id = %blog_id, reader = %reader_id, "Recorded read");
    }

    Ok(blog)
}
