//! Latent factor model fitted by truncated SVD.

use nalgebra::{DMatrix, DVector};

use crate::config::ModelConfig;
use crate::error::Result;
use crate::interactions::Interactions;
use crate::svd;

/// Low-rank factorization of an interaction matrix.
///
/// `user_factors · course_factorsᵀ` approximates the original 0/1 matrix in
/// the least-squares sense of the truncated SVD. The user factors carry the
/// singular-value scaling (U·Σ) and the course factors are V, so a user's
/// latent vector is directly comparable against course-factor rows by dot
/// product.
///
/// The model is immutable once fitted and safe to share across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct LatentFactorModel {
    /// `users × k`.
    user_factors: DMatrix<f64>,
    /// `courses × k`.
    course_factors: DMatrix<f64>,
    rank: usize,
}

impl LatentFactorModel {
    /// Fits a rank-`config.rank` model to the interaction matrix.
    ///
    /// Identical `(interactions, config)` inputs produce identical factor
    /// matrices: the randomized decomposition is seeded from `config.seed`
    /// and every downstream step is deterministic.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] when the rank is zero or exceeds
    /// `min(users, courses)`, and [`crate::Error::Decomposition`] if the
    /// numerical backend fails. A failed fit produces no model.
    pub fn fit(interactions: &Interactions, config: &ModelConfig) -> Result<Self> {
        config.validate_for(interactions.user_count(), interactions.course_count())?;

        let decomposition = svd::truncated_svd(interactions.matrix(), config.rank, config.seed)?;
        let user_factors = decomposition.u * DMatrix::from_diagonal(&decomposition.sigma);
        let course_factors = decomposition.v;

        tracing::debug!(
            users = interactions.user_count(),
            courses = interactions.course_count(),
            rank = config.rank,
            "fitted latent factor model"
        );

        Ok(Self {
            user_factors,
            course_factors,
            rank: config.rank,
        })
    }

    /// Factorization rank (k).
    #[must_use]
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// User latent factors, `users × k`.
    #[must_use]
    pub fn user_factors(&self) -> &DMatrix<f64> {
        &self.user_factors
    }

    /// Course latent factors, `courses × k`.
    #[must_use]
    pub fn course_factors(&self) -> &DMatrix<f64> {
        &self.course_factors
    }

    /// Latent vector of the user at `user_index`, length k.
    #[must_use]
    pub fn user_vector(&self, user_index: usize) -> DVector<f64> {
        self.user_factors.row(user_index).transpose()
    }

    /// Scores every course for the user at `user_index`.
    ///
    /// One dot product of the user's latent vector against each
    /// course-factor row; higher means a stronger recommendation.
    #[must_use]
    pub fn score_courses(&self, user_index: usize) -> DVector<f64> {
        &self.course_factors * self.user_vector(user_index)
    }

    /// Frobenius norm of the reconstruction residual against `interactions`.
    ///
    /// Non-increasing in the rank: refitting the same matrix with a larger k
    /// can only shrink this value.
    #[must_use]
    pub fn reconstruction_error(&self, interactions: &Interactions) -> f64 {
        (interactions.matrix() - &self.user_factors * self.course_factors.transpose()).norm()
    }
}
