//! # Lernio Core
//!
//! Latent-factor course recommendation engine.
//!
//! Lernio learns latent preference structure from historical enrollment
//! data: a binary user × course interaction matrix is factorized with a
//! seeded truncated SVD, and recommendations are served by scoring a user's
//! latent vector against every course factor, excluding courses the user
//! already took.
//!
//! ## Features
//!
//! - **Deterministic pipeline**: first-appearance index mappings and a
//!   seeded decomposition make every run reproducible
//! - **Explicit lifecycle**: build → serve → rebuild, with atomic
//!   publication of replacement models
//! - **Lock-free serving**: any number of concurrent `recommend` calls
//!   against an immutable artifact
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lernio_core::{Engine, EnrollmentRecord, ModelConfig, RecommendationRequest};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let records = vec![
//!         EnrollmentRecord::new("alice", ["algebra", "calculus"]),
//!         EnrollmentRecord::new("bob", ["calculus", "statistics"]),
//!         EnrollmentRecord::new("carol", ["statistics", "algebra"]),
//!     ];
//!
//!     // Build the interaction matrix and fit the latent factors once.
//!     let config = ModelConfig { rank: 2, ..ModelConfig::default() };
//!     let engine = Engine::train(&records, &config)?;
//!
//!     // Serve requests against the immutable artifact.
//!     let picks = engine.recommend(&RecommendationRequest::new("alice", 3))?;
//!     println!("recommended: {picks:?}");
//!     # Ok(())
//! }
//! ```

#![warn(missing_docs)]
// Clippy lints configured in workspace Cargo.toml [workspace.lints.clippy]

use std::sync::Arc;

use arc_swap::ArcSwap;

pub mod config;
pub mod error;
pub mod factor;
#[cfg(test)]
mod factor_tests;
pub mod interactions;
pub mod metrics;
pub mod recommend;
mod svd;

pub use config::{ModelConfig, DEFAULT_RANK, DEFAULT_RECOMMENDATIONS, DEFAULT_SEED};
pub use error::{Error, Result};
pub use factor::LatentFactorModel;
pub use interactions::{EnrollmentRecord, Interactions};
pub use metrics::{hit_rate, precision_at_k, recall_at_k};
pub use recommend::{recommend, RecommendationRequest};

/// An immutable trained artifact: interaction matrix, mappings, and fitted
/// latent factors.
///
/// Built once from a snapshot of enrollment records; never mutated. Shared
/// by reference for however many requests arrive until the owning
/// [`Engine`] publishes a replacement.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    interactions: Interactions,
    model: LatentFactorModel,
}

impl TrainedModel {
    /// Runs the full batch pipeline: matrix construction followed by the
    /// factorization.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::InvalidRecord`] from the builder and
    /// [`Error::Config`] / [`Error::Decomposition`] from the fit; on any
    /// failure no artifact exists.
    pub fn fit(records: &[EnrollmentRecord], config: &ModelConfig) -> Result<Self> {
        let interactions = Interactions::from_records(records)?;
        let model = LatentFactorModel::fit(&interactions, config)?;
        Ok(Self {
            interactions,
            model,
        })
    }

    /// The interaction matrix and id ↔ index mappings.
    #[must_use]
    pub fn interactions(&self) -> &Interactions {
        &self.interactions
    }

    /// The fitted latent factors.
    #[must_use]
    pub fn model(&self) -> &LatentFactorModel {
        &self.model
    }

    /// Ranked recommendations for one user against this artifact.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownUser`] when the requested user was not in
    /// the training records.
    pub fn recommend(&self, request: &RecommendationRequest) -> Result<Vec<String>> {
        recommend::recommend(&self.model, &self.interactions, request)
    }
}

/// Handle that owns the current trained artifact and serves requests.
///
/// Readers never block: `recommend` loads the current [`TrainedModel`]
/// through an atomic reference swap. `rebuild` constructs the replacement
/// artifact completely before publishing it, so in-flight requests keep
/// using the artifact they started with and a failed rebuild changes
/// nothing.
pub struct Engine {
    artifact: ArcSwap<TrainedModel>,
}

impl Engine {
    /// Trains an engine from a snapshot of enrollment records.
    ///
    /// # Errors
    ///
    /// Propagates any [`TrainedModel::fit`] failure; no engine is produced.
    pub fn train(records: &[EnrollmentRecord], config: &ModelConfig) -> Result<Self> {
        let trained = TrainedModel::fit(records, config)?;
        tracing::info!(
            users = trained.interactions().user_count(),
            courses = trained.interactions().course_count(),
            rank = config.rank,
            "trained recommendation model"
        );
        Ok(Self {
            artifact: ArcSwap::from_pointee(trained),
        })
    }

    /// Retrains on fresh records and atomically publishes the new artifact.
    ///
    /// The previous artifact stays live for requests that already loaded it.
    ///
    /// # Errors
    ///
    /// Propagates any [`TrainedModel::fit`] failure; the previous artifact
    /// remains published untouched.
    pub fn rebuild(&self, records: &[EnrollmentRecord], config: &ModelConfig) -> Result<()> {
        let trained = TrainedModel::fit(records, config)?;
        tracing::info!(
            users = trained.interactions().user_count(),
            courses = trained.interactions().course_count(),
            rank = config.rank,
            "published rebuilt recommendation model"
        );
        self.artifact.store(Arc::new(trained));
        Ok(())
    }

    /// Ranked recommendations for one user against the current artifact.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownUser`] when the requested user was not in
    /// the training records of the current artifact.
    pub fn recommend(&self, request: &RecommendationRequest) -> Result<Vec<String>> {
        self.artifact.load().recommend(request)
    }

    /// A stable reference to the current artifact.
    ///
    /// The returned `Arc` keeps that artifact alive across later rebuilds.
    #[must_use]
    pub fn snapshot(&self) -> Arc<TrainedModel> {
        self.artifact.load_full()
    }
}
