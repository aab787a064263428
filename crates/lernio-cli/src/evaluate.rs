//! Leave-last-out evaluation of recommendation quality.
//!
//! For every user with at least two enrollments, the final course in their
//! list is held out. The engine retrains once on the reduced records, then
//! each held-out course is checked against that user's top-N
//! recommendations.

use anyhow::{ensure, Result};
use lernio_core::{metrics, Engine, EnrollmentRecord, ModelConfig, RecommendationRequest};

/// Aggregate outcome of a leave-last-out run.
#[derive(Debug, Clone, Copy)]
pub struct Evaluation {
    /// Users that had a course held out.
    pub evaluated_users: usize,
    /// Fraction of evaluated users whose held-out course came back in the
    /// top N.
    pub hit_rate: f64,
    /// Mean recall@N over the evaluated users.
    pub mean_recall: f64,
}

/// Runs the protocol against `records` with the given model configuration.
pub fn leave_last_out(
    records: &[EnrollmentRecord],
    config: &ModelConfig,
    count: usize,
) -> Result<Evaluation> {
    let mut reduced = Vec::with_capacity(records.len());
    let mut held_out: Vec<(String, String)> = Vec::new();

    for record in records {
        if record.course_ids.len() >= 2 {
            let mut course_ids = record.course_ids.clone();
            if let Some(target) = course_ids.pop() {
                held_out.push((record.user_id.clone(), target));
            }
            reduced.push(EnrollmentRecord {
                user_id: record.user_id.clone(),
                course_ids,
            });
        } else {
            reduced.push(record.clone());
        }
    }

    ensure!(
        !held_out.is_empty(),
        "no user has at least two enrollments to hold one out"
    );

    let engine = Engine::train(&reduced, config)?;

    let mut outcomes: Vec<(String, Vec<String>)> = Vec::with_capacity(held_out.len());
    for (user_id, target) in held_out {
        let picks = engine.recommend(&RecommendationRequest::new(user_id, count))?;
        outcomes.push((target, picks));
    }

    let relevant: Vec<Vec<&str>> = outcomes
        .iter()
        .map(|(target, _)| vec![target.as_str()])
        .collect();
    let ranked: Vec<Vec<&str>> = outcomes
        .iter()
        .map(|(_, picks)| picks.iter().map(String::as_str).collect())
        .collect();

    let hit_rate = metrics::hit_rate(&relevant, &ranked);
    let recall_sum: f64 = relevant
        .iter()
        .zip(&ranked)
        .map(|(relevant, ranked)| metrics::recall_at_k(relevant, ranked))
        .sum();
    #[allow(clippy::cast_precision_loss)] // Reason: user counts are far below 2^52
    let mean_recall = recall_sum / relevant.len() as f64;

    Ok(Evaluation {
        evaluated_users: relevant.len(),
        hit_rate,
        mean_recall,
    })
}
