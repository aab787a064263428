//! Scoring, ranking, and exclusion logic for recommendation requests.

use crate::config::DEFAULT_RECOMMENDATIONS;
use crate::error::{Error, Result};
use crate::factor::LatentFactorModel;
use crate::interactions::Interactions;

/// A single recommendation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationRequest {
    /// User to recommend for; must be known to the trained model.
    pub user_id: String,
    /// Maximum number of courses to return. Zero yields an empty result
    /// rather than an error.
    pub num_recommendations: usize,
}

impl RecommendationRequest {
    /// Requests `num_recommendations` courses for `user_id`.
    pub fn new(user_id: impl Into<String>, num_recommendations: usize) -> Self {
        Self {
            user_id: user_id.into(),
            num_recommendations,
        }
    }

    /// Requests the default number of courses.
    pub fn with_defaults(user_id: impl Into<String>) -> Self {
        Self::new(user_id, DEFAULT_RECOMMENDATIONS)
    }
}

/// Produces a ranked course list for one user.
///
/// Courses are ordered by descending latent score; exact ties fall back to
/// ascending course index so results are reproducible across runs. Courses
/// the user already enrolled in (per the interaction matrix row, which
/// unions every record the user appeared in) are removed before truncation,
/// so the result holds `min(num_recommendations, courses - enrolled)` ids.
///
/// Pure with respect to its inputs; safe to call concurrently against the
/// same model.
///
/// # Errors
///
/// Returns [`Error::UnknownUser`] when `request.user_id` was not present in
/// the training records.
pub fn recommend(
    model: &LatentFactorModel,
    interactions: &Interactions,
    request: &RecommendationRequest,
) -> Result<Vec<String>> {
    let user_index = interactions
        .user_index(&request.user_id)
        .ok_or_else(|| Error::UnknownUser(request.user_id.clone()))?;

    let scores = model.score_courses(user_index);
    let ranking = rank_by_score(scores.as_slice());

    Ok(ranking
        .into_iter()
        .filter(|&course| !interactions.is_enrolled(user_index, course))
        .take(request.num_recommendations)
        .filter_map(|course| interactions.course_id(course))
        .map(str::to_owned)
        .collect())
}

/// Course indices sorted by descending score, ties by ascending index.
///
/// The comparator is explicit: reversing a stable ascending sort would
/// invert the relative order of tied entries, which must stay by ascending
/// course index.
pub(crate) fn rank_by_score(scores: &[f64]) -> Vec<usize> {
    let mut ranking: Vec<usize> = (0..scores.len()).collect();
    ranking.sort_unstable_by(|&a, &b| scores[b].total_cmp(&scores[a]).then_with(|| a.cmp(&b)));
    ranking
}
