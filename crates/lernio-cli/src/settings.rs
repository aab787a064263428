//! Layered CLI configuration: defaults, optional TOML file, environment.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use lernio_core::{ModelConfig, DEFAULT_RECOMMENDATIONS};
use serde::{Deserialize, Serialize};

/// Tunables accepted from `lernio.toml` and `LERNIO_*` variables.
///
/// Command-line flags override whatever this resolves to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Factorization rank (number of latent factors).
    pub rank: usize,
    /// Seed for the randomized decomposition.
    pub seed: u64,
    /// Default number of recommendations per request.
    pub recommendations: usize,
}

impl Default for Settings {
    fn default() -> Self {
        let model = ModelConfig::default();
        Self {
            rank: model.rank,
            seed: model.seed,
            recommendations: DEFAULT_RECOMMENDATIONS,
        }
    }
}

impl Settings {
    /// Resolves settings: defaults < TOML file < environment variables.
    ///
    /// A missing TOML file is fine; a present but invalid one is an error.
    pub fn load(config_path: &str) -> Result<Self> {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("LERNIO_"))
            .extract()
            .context("invalid configuration")
    }

    /// Model configuration view of these settings.
    #[must_use]
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            rank: self.rank,
            seed: self.seed,
        }
    }
}
