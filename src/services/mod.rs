pub mod feed;
pub mod fingerprint;
pub mod recommendations;
pub mod selectors;
pub mod similarity;

pub use fingerprint::build_fingerprint;
pub use recommendations::{rank_scored, recommend, Ranker, ResolvedHistoryEntry};
pub use selectors::{select_related, select_trending, BlogFilter};
pub use similarity::similarity;
