use crate::models::Fingerprint;

/// Similarity between two fingerprints, in [0, 1]
///
/// Only keywords present on both sides are considered. Each shared keyword
/// contributes `min / max` of its two counts and the result is the mean of
/// those ratios; keywords unique to one side do not lower the score. No
/// shared keywords gives exactly 0.
///
/// Shared keywords are visited in ascending order regardless of argument
/// order, so `similarity(a, b) == similarity(b, a)` holds bit for bit.
pub fn similarity(a: &Fingerprint, b: &Fingerprint) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut shared = 0usize;
    let mut total = 0.0f64;

    for (keyword, small_count) in small.iter() {
        if let Some(large_count) = large.get(keyword) {
            let (lo, hi) = if small_count <= large_count {
                (small_count, large_count)
            } else {
                (large_count, small_count)
            };
            total += f64::from(lo) / f64::from(hi);
            shared += 1;
        }
    }

    if shared == 0 {
        return 0.0;
    }

    total / shared as f64
}
