//! Rating system configuration

use crate::error::{RatingError, Result};
use crate::rating::TrueSkillParams;
use crate::types::{SkillBelief, DEFAULT_MU, DEFAULT_SIGMA};
use serde::{Deserialize, Serialize};

/// Defaults for new players plus the model parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Skill mean given to players without history
    pub default_mu: f64,
    /// Skill uncertainty given to players without history
    pub default_sigma: f64,
    pub params: TrueSkillParams,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            default_mu: DEFAULT_MU,
            default_sigma: DEFAULT_SIGMA,
            params: TrueSkillParams::default(),
        }
    }
}

impl RatingConfig {
    /// Belief assigned to a player the caller has no rating for
    pub fn default_belief(&self) -> SkillBelief {
        SkillBelief::new(self.default_mu, self.default_sigma)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.default_belief().is_valid() {
            return Err(RatingError::ConfigurationError {
                message: format!(
                    "Default belief must have finite mu and positive sigma, got mu={} sigma={}",
                    self.default_mu, self.default_sigma
                ),
            });
        }

        self.params.validate()
    }
}
