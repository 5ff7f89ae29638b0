use std::cmp::Ordering;

use uuid::Uuid;

use crate::models::{BlogDocument, Fingerprint, ReadingHistoryEntry, RecommendationEntry};
use crate::services::{fingerprint::build_fingerprint, similarity::similarity};

/// Weight of preference-to-content similarity
pub const CONTENT_WEIGHT: f64 = 0.4;
/// Weight of preference-to-tag overlap
pub const TAG_WEIGHT: f64 = 0.3;
/// Weight of similarity to previously read blogs
pub const HISTORY_WEIGHT: f64 = 0.3;

const MAX_SCORE: f64 = 1.0;

/// Error types for scoring a single candidate
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RankingError {
    #[error("score for blog {0} is not a finite number")]
    NonFiniteScore(Uuid),
}

/// A reading-history entry with its blog, if the blog still exists
#[derive(Debug, Clone, Copy)]
pub struct ResolvedHistoryEntry<'a> {
    pub entry: &'a ReadingHistoryEntry,
    pub blog: Option<&'a BlogDocument>,
}

/// Weighted terms that make up a candidate's score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    /// Weighted preference-to-content similarity
    pub content: f64,
    /// Weighted tag overlap; `None` when preferences or blog tags are empty
    pub tags: Option<f64>,
    /// Weighted history similarity; `None` when the history is empty
    pub history: Option<f64>,
    /// Sum of the applied terms, capped at 1.0
    pub total: f64,
}

/// Scores candidate blogs for one reader
///
/// The reader's preferences are fingerprinted once on construction; every
/// candidate is then scored against that fingerprint, the preference list,
/// and the reader's history.
pub struct Ranker<'a> {
    preferences: &'a [String],
    lowered_preferences: Vec<String>,
    preference_fingerprint: Fingerprint,
    history: &'a [ResolvedHistoryEntry<'a>],
}

impl<'a> Ranker<'a> {
    pub fn new(preferences: &'a [String], history: &'a [ResolvedHistoryEntry<'a>]) -> Self {
        let preference_fingerprint = build_fingerprint(&preferences.join(" "), &[]);
        let lowered_preferences = preferences.iter().map(|p| p.to_lowercase()).collect();
        Self {
            preferences,
            lowered_preferences,
            preference_fingerprint,
            history,
        }
    }

    /// Computes the weighted terms for `blog`
    ///
    /// Weights are not renormalized when a term does not apply, so a reader
    /// with no preferences or no history cannot reach the full score.
    pub fn score(&self, blog: &BlogDocument) -> ScoreBreakdown {
        let content = similarity(&self.preference_fingerprint, &blog.fingerprint) * CONTENT_WEIGHT;

        let tags = if !self.preferences.is_empty() && !blog.tags.is_empty() {
            Some(self.tag_overlap(blog) * TAG_WEIGHT)
        } else {
            None
        };

        let history = if !self.history.is_empty() {
            Some(self.history_similarity(blog) * HISTORY_WEIGHT)
        } else {
            None
        };

        let sum = content + tags.unwrap_or(0.0) + history.unwrap_or(0.0);

        ScoreBreakdown {
            content,
            tags,
            history,
            total: sum.min(MAX_SCORE),
        }
    }

    /// Final score for `blog`, or an error if it cannot be ranked
    pub fn try_score(&self, blog: &BlogDocument) -> Result<f64, RankingError> {
        let total = self.score(blog).total;
        if total.is_finite() {
            Ok(total)
        } else {
            Err(RankingError::NonFiniteScore(blog.id))
        }
    }

    /// Fraction of preferences that occur inside at least one blog tag, ignoring case
    fn tag_overlap(&self, blog: &BlogDocument) -> f64 {
        let lowered_tags: Vec<String> = blog.tags.iter().map(|t| t.to_lowercase()).collect();
        let matched = self
            .lowered_preferences
            .iter()
            .filter(|pref| lowered_tags.iter().any(|tag| tag.contains(pref.as_str())))
            .count();
        matched as f64 / self.preferences.len() as f64
    }

    /// Mean similarity to every history entry.
    ///
    /// Entries whose blog is gone or has no content count as 0 and still
    /// take a slot in the denominator.
    fn history_similarity(&self, blog: &BlogDocument) -> f64 {
        let sum: f64 = self
            .history
            .iter()
            .map(|item| match item.blog {
                Some(read) if !read.content.is_empty() => {
                    similarity(&read.fingerprint, &blog.fingerprint)
                }
                _ => 0.0,
            })
            .sum();
        sum / self.history.len() as f64
    }

    /// Scores every candidate and keeps the top `limit`, see [`rank_scored`]
    pub fn rank(&self, candidates: &[BlogDocument], limit: usize) -> Vec<RecommendationEntry> {
        let scored = candidates
            .iter()
            .map(|blog| (blog, self.try_score(blog)))
            .collect();
        rank_scored(scored, limit)
    }
}

/// Sorts scored candidates by descending score and keeps the top `limit`
///
/// The sort is stable, so equal scores keep their input order. A candidate
/// whose score is an error is logged and left out; the rest are still ranked.
pub fn rank_scored(
    scored: Vec<(&BlogDocument, Result<f64, RankingError>)>,
    limit: usize,
) -> Vec<RecommendationEntry> {
    let candidates = scored.len();
    let mut ranked: Vec<(&BlogDocument, f64)> = Vec::with_capacity(candidates);

    for (blog, score) in scored {
        match score {
            Ok(score) => ranked.push((blog, score)),
            Err(e) => {
                tracing::warn!(blog_id = %blog.id, error = %e, "Skipping candidate");
            }
        }
    }

    let skipped = candidates - ranked.len();

    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked.truncate(limit);

    tracing::debug!(
        candidates,
        skipped,
        returned = ranked.len(),
        "Ranked candidates"
    );

    ranked
        .into_iter()
        .map(|(blog, score)| RecommendationEntry::from_blog(blog, score))
        .collect()
}

/// Ranks `candidates` for a reader with the given preferences and history
///
/// Candidates must already exclude blogs in the reader's history.
pub fn recommend(
    preferences: &[String],
    candidates: &[BlogDocument],
    history: &[ResolvedHistoryEntry<'_>],
    limit: usize,
) -> Vec<RecommendationEntry> {
    Ranker::new(preferences, history).rank(candidates, limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthorRef;
    use chrono::Utc;

    fn prefs(list: &[&str]) -> Vec<String> {
        list.iter().map(|p| p.to_string()).collect()
    }

    fn blog(title: &str, content: &str, tags: &[&str]) -> BlogDocument {
        BlogDocument::new(
            title.to_string(),
            content.to_string(),
            tags.iter().map(|t| t.to_string()).collect(),
            AuthorRef {
                id: Uuid::new_v4(),
                name: "Author".to_string(),
            },
            Utc::now(),
        )
    }

    fn entry(blog_id: Uuid) -> ReadingHistoryEntry {
        ReadingHistoryEntry {
            blog_id,
            read_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_inputs_score_zero_and_keep_order() {
        let candidates: Vec<BlogDocument> = (0..5)
            .map(|i| blog(&format!("Post {}", i), "plenty of words about things", &["misc"]))
            .collect();

        let results = recommend(&[], &candidates, &[], 10);

        assert_eq!(results.len(), 5);
        for (result, candidate) in results.iter().zip(&candidates) {
            assert_eq!(result.score, 0.0);
            assert_eq!(result.id, candidate.id);
        }
    }

    #[test]
    fn test_no_candidates() {
        let results = recommend(&prefs(&["rust"]), &[], &[], 10);
        assert!(results.is_empty());
    }

    #[test]
    fn test_truncates_to_limit_in_descending_order() {
        let candidates: Vec<BlogDocument> = (0..10)
            .map(|i| {
                let content = format!("{} filler text words", "rust ".repeat(i));
                let tags: &[&str] = if i % 2 == 0 { &["rustlang"] } else { &["other"] };
                blog(&format!("Post {}", i), &content, tags)
            })
            .collect();

        let results = recommend(&prefs(&["rust", "filler"]), &candidates, &[], 3);

        assert_eq!(results.len(), 3);
        assert!(results[0].score >= results[1].score);
        assert!(results[1].score >= results[2].score);
    }

    #[test]
    fn test_limit_zero_returns_nothing() {
        let candidates = vec![blog("A", "content here", &[])];
        assert!(recommend(&prefs(&["content"]), &candidates, &[], 0).is_empty());
    }

    #[test]
    fn test_cooking_scenario() {
        let preferences = prefs(&["cooking"]);
        let candidate = blog(
            "Weeknight dinners",
            "cooking pasta cooking rice cooking beans cooking soup cooking",
            &["Cooking", "Recipes"],
        );
        let ranker = Ranker::new(&preferences, &[]);
        let breakdown = ranker.score(&candidate);

        // "cooking" appears 5 times in content plus once from the tag
        assert!((breakdown.content - CONTENT_WEIGHT / 6.0).abs() < 1e-12);
        assert!(breakdown.content > 0.0);
        assert_eq!(breakdown.tags, Some(0.3));
        assert_eq!(breakdown.history, None);
        assert!(breakdown.total <= 1.0);
        assert!((breakdown.total - (0.4 / 6.0 + 0.3)).abs() < 1e-12);
    }

    #[test]
    fn test_tag_term_is_case_insensitive_substring() {
        let preferences = prefs(&["Script", "rust", "haskell"]);
        let candidate = blog("JS", "", &["typescript", "RUSTACEANS"]);
        let breakdown = Ranker::new(&preferences, &[]).score(&candidate);
        // "script" in "typescript", "rust" in "rustaceans", haskell unmatched
        let expected = 2.0 / 3.0 * TAG_WEIGHT;
        assert!((breakdown.tags.unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_tag_term_skipped_without_blog_tags() {
        let preferences = prefs(&["rust"]);
        let candidate = blog("Untagged", "rust everywhere", &[]);
        let breakdown = Ranker::new(&preferences, &[]).score(&candidate);
        assert_eq!(breakdown.tags, None);
    }

    #[test]
    fn test_history_term_counts_missing_blogs_in_denominator() {
        let read = blog("Read", "async runtimes compared", &[]);
        let read_entry = entry(read.id);
        let gone_entry = entry(Uuid::new_v4());
        let history = vec![
            ResolvedHistoryEntry {
                entry: &read_entry,
                blog: Some(&read),
            },
            ResolvedHistoryEntry {
                entry: &gone_entry,
                blog: None,
            },
        ];

        // Same content as the read blog: similarity 1.0 for that entry
        let candidate = blog("Candidate", "async runtimes compared", &[]);
        let breakdown = Ranker::new(&[], &history).score(&candidate);

        assert_eq!(breakdown.history, Some(0.5 * HISTORY_WEIGHT));
        assert_eq!(breakdown.content, 0.0);
        assert_eq!(breakdown.tags, None);
    }

    #[test]
    fn test_history_entry_with_empty_content_counts_zero() {
        let mut read = blog("Read", "async runtimes compared", &[]);
        read.content.clear();
        let read_entry = entry(read.id);
        let history = vec![ResolvedHistoryEntry {
            entry: &read_entry,
            blog: Some(&read),
        }];

        let candidate = blog("Candidate", "async runtimes compared", &[]);
        let breakdown = Ranker::new(&[], &history).score(&candidate);
        assert_eq!(breakdown.history, Some(0.0));
    }

    #[test]
    fn test_all_terms_together_reach_at_most_one() {
        let preferences = prefs(&["tokio"]);
        let read = blog("Read", "tokio", &[]);
        let read_entry = entry(read.id);
        let history = vec![ResolvedHistoryEntry {
            entry: &read_entry,
            blog: Some(&read),
        }];
        let candidate = blog("Candidate", "", &["tokio"]);

        let breakdown = Ranker::new(&preferences, &history).score(&candidate);
        assert!(breakdown.total <= 1.0);
        assert!((breakdown.total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let preferences = prefs(&["garden"]);
        let first = blog("First", "garden tips", &[]);
        let second = blog("Second", "garden tips", &[]);
        let best = blog("Best", "garden", &["garden"]);
        let candidates = vec![first.clone(), second.clone(), best.clone()];

        let results = recommend(&preferences, &candidates, &[], 10);

        assert_eq!(results[0].id, best.id);
        assert_eq!(results[1].id, first.id);
        assert_eq!(results[2].id, second.id);
    }

    #[test]
    fn test_entries_carry_excerpt_not_content() {
        let long = "word ".repeat(100);
        let candidates = vec![blog("Long", &long, &[])];
        let results = recommend(&[], &candidates, &[], 1);
        assert_eq!(results[0].excerpt.chars().count(), 203);
        assert!(results[0].excerpt.ends_with("..."));
    }

    #[test]
    fn test_failed_candidate_is_skipped_and_rest_ranked() {
        let low = blog("Low", "alpha", &[]);
        let broken = blog("Broken", "beta", &[]);
        let high = blog("High", "gamma", &[]);
        let mid = blog("Mid", "delta", &[]);

        let scored = vec![
            (&low, Ok(0.1)),
            (&broken, Err(RankingError::NonFiniteScore(broken.id))),
            (&high, Ok(0.9)),
            (&mid, Ok(0.5)),
        ];

        let results = rank_scored(scored, 2);

        let ids: Vec<Uuid> = results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![high.id, mid.id]);
        assert!(results.iter().all(|r| r.id != broken.id));
        assert_eq!(results[0].score, 0.9);
    }

    #[test]
    fn test_every_candidate_failing_gives_empty_result() {
        let only = blog("Only", "alpha", &[]);
        let scored = vec![(&only, Err(RankingError::NonFiniteScore(only.id)))];
        assert!(rank_scored(scored, 10).is_empty());
    }

    #[test]
    fn test_try_score_accepts_finite_totals() {
        let preferences = prefs(&["garden"]);
        let candidate = blog("Garden", "garden", &["garden"]);
        let score = Ranker::new(&preferences, &[]).try_score(&candidate);
        assert_eq!(score, Ok(Ranker::new(&preferences, &[]).score(&candidate).total));
    }
}
