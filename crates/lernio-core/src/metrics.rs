//! Offline evaluation metrics for recommendation quality.
//!
//! Standard information-retrieval measures over ranked id lists:
//! recall@k and precision@k for a single query, hit rate across a query
//! set. Used by the CLI's leave-last-out evaluation.

use std::collections::HashSet;
use std::hash::Hash;

/// Proportion of the relevant items that made it into the ranked list.
///
/// # Formula
///
/// `recall@k = |relevant ∩ ranked| / |relevant|`
///
/// Returns 0.0 when `relevant` is empty (avoids division by zero).
#[must_use]
pub fn recall_at_k<T: Eq + Hash + Copy>(relevant: &[T], ranked: &[T]) -> f64 {
    if relevant.is_empty() {
        return 0.0;
    }

    let relevant_set: HashSet<T> = relevant.iter().copied().collect();
    let found = ranked.iter().filter(|id| relevant_set.contains(id)).count();

    #[allow(clippy::cast_precision_loss)] // Reason: list lengths are far below 2^52
    let recall = found as f64 / relevant.len() as f64;
    recall
}

/// Proportion of the ranked list that is relevant.
///
/// # Formula
///
/// `precision@k = |relevant ∩ ranked| / |ranked|`
///
/// Returns 0.0 when `ranked` is empty.
#[must_use]
pub fn precision_at_k<T: Eq + Hash + Copy>(relevant: &[T], ranked: &[T]) -> f64 {
    if ranked.is_empty() {
        return 0.0;
    }

    let relevant_set: HashSet<T> = relevant.iter().copied().collect();
    let hits = ranked.iter().filter(|id| relevant_set.contains(id)).count();

    #[allow(clippy::cast_precision_loss)] // Reason: list lengths are far below 2^52
    let precision = hits as f64 / ranked.len() as f64;
    precision
}

/// Proportion of queries whose ranked list contains at least one relevant
/// item.
///
/// Pairs the two slices positionally and ignores the tail of the longer one.
/// Returns 0.0 when either input is empty.
#[must_use]
pub fn hit_rate<T: Eq + Hash + Copy>(relevant_lists: &[Vec<T>], ranked_lists: &[Vec<T>]) -> f64 {
    let queries = relevant_lists.len().min(ranked_lists.len());
    if queries == 0 {
        return 0.0;
    }

    let hits = relevant_lists
        .iter()
        .zip(ranked_lists.iter())
        .filter(|(relevant, ranked)| {
            let relevant_set: HashSet<T> = relevant.iter().copied().collect();
            ranked.iter().any(|id| relevant_set.contains(id))
        })
        .count();

    #[allow(clippy::cast_precision_loss)] // Reason: query counts are far below 2^52
    let rate = hits as f64 / queries as f64;
    rate
}
