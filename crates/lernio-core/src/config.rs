//! Model configuration and validation.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default factorization rank (number of latent factors).
pub const DEFAULT_RANK: usize = 5;

/// Default seed for the randomized decomposition.
pub const DEFAULT_SEED: u64 = 42;

/// Default number of recommendations per request.
pub const DEFAULT_RECOMMENDATIONS: usize = 3;

/// Configuration for fitting a latent factor model.
///
/// Both fields are fixed inputs: the engine never tunes them adaptively.
/// Identical configuration against identical records reproduces identical
/// factor matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Number of latent factors (k). Must satisfy
    /// `1 <= rank <= min(users, courses)` for the trained matrix.
    pub rank: usize,
    /// Seed for the Gaussian test matrix of the randomized decomposition.
    pub seed: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            rank: DEFAULT_RANK,
            seed: DEFAULT_SEED,
        }
    }
}

impl ModelConfig {
    /// Checks the configured rank against the interaction matrix shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the rank is zero or exceeds
    /// `min(users, courses)`. Raised at fit time and never downgraded.
    pub fn validate_for(&self, users: usize, courses: usize) -> Result<()> {
        if self.rank == 0 {
            return Err(Error::Config("rank must be at least 1".to_string()));
        }
        let max_rank = users.min(courses);
        if self.rank > max_rank {
            return Err(Error::Config(format!(
                "rank {} exceeds min(users, courses) = {}",
                self.rank, max_rank
            )));
        }
        Ok(())
    }
}
