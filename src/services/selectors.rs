use std::cmp::Reverse;

use chrono::{DateTime, Duration, Utc};

use crate::models::BlogDocument;

/// Blogs created within the last `since_days`, most read first
///
/// Ties on read count fall back to like count, then to input order.
pub fn select_trending<'a>(
    candidates: &'a [BlogDocument],
    since_days: u32,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<&'a BlogDocument> {
    // A window reaching before the earliest representable date keeps everything
    let cutoff = now.checked_sub_signed(Duration::days(i64::from(since_days)));

    let mut trending: Vec<&BlogDocument> = candidates
        .iter()
        .filter(|blog| cutoff.map_or(true, |cutoff| blog.created_at >= cutoff))
        .collect();

    trending.sort_by_key(|blog| Reverse((blog.read_count, blog.like_count())));
    trending.truncate(limit);
    trending
}

/// Blogs related to `reference`, newest first
///
/// A candidate is related when it shares a tag with the reference (ignoring
/// case) or has the same author. When fewer than `limit` candidates are
/// related, the most recent remaining blogs fill the gap. The reference
/// itself is never returned.
pub fn select_related<'a>(
    reference: &BlogDocument,
    candidates: &'a [BlogDocument],
    limit: usize,
) -> Vec<&'a BlogDocument> {
    let (mut related, mut rest): (Vec<&BlogDocument>, Vec<&BlogDocument>) = candidates
        .iter()
        .filter(|blog| blog.id != reference.id)
        .partition(|blog| is_related(reference, blog));

    let matched = related.len();

    related.sort_by_key(|blog| Reverse(blog.created_at));
    related.truncate(limit);

    if related.len() < limit {
        rest.sort_by_key(|blog| Reverse(blog.created_at));
        let missing = limit - related.len();
        related.extend(rest.into_iter().take(missing));
    }

    tracing::debug!(
        reference = %reference.id,
        matched,
        returned = related.len(),
        "Selected related blogs"
    );

    related
}

/// Listing filters; every filter that is set must match
#[derive(Debug, Clone, Default)]
pub struct BlogFilter {
    /// Exact tag, ignoring case
    pub tag: Option<String>,
    /// Substring of the author's name, ignoring case
    pub author: Option<String>,
    /// Substring of the title, the content or any tag, ignoring case
    pub search: Option<String>,
}

impl BlogFilter {
    pub fn matches(&self, blog: &BlogDocument) -> bool {
        if let Some(tag) = &self.tag {
            if !blog.has_tag(tag) {
                return false;
            }
        }

        if let Some(author) = &self.author {
            if !contains_ignoring_case(&blog.author.name, author) {
                return false;
            }
        }

        if let Some(search) = &self.search {
            let found = contains_ignoring_case(&blog.title, search)
                || contains_ignoring_case(&blog.content, search)
                || blog.tags.iter().any(|tag| contains_ignoring_case(tag, search));
            if !found {
                return false;
            }
        }

        true
    }
}

fn contains_ignoring_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn is_related(reference: &BlogDocument, blog: &BlogDocument) -> bool {
    blog.author.id == reference.author.id || reference.tags.iter().any(|tag| blog.has_tag(tag))
}
