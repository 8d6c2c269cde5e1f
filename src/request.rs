//! Match rating requests as callers submit them
//!
//! Requests carry optional `mu`/`sigma` per player. Filling in the defaults
//! for players without history happens here, at the caller boundary, so the
//! engine itself only ever sees complete beliefs.

use crate::config::RatingConfig;
use crate::error::Result;
use crate::rating::{RatingEngine, TrueSkillParams};
use crate::types::{Participant, PlayerId, RatingUpdateResult, SkillBelief};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A player as submitted in a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub id: PlayerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub mu: Option<f64>,
    #[serde(default)]
    pub sigma: Option<f64>,
}

impl PlayerInput {
    pub fn new(id: impl Into<PlayerId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            mu: None,
            sigma: None,
        }
    }

    pub fn with_belief(mut self, mu: f64, sigma: f64) -> Self {
        self.mu = Some(mu);
        self.sigma = Some(sigma);
        self
    }

    /// Participant with each missing field taken from the configured default
    pub fn to_participant(&self, defaults: &RatingConfig) -> Participant {
        Participant {
            id: self.id.clone(),
            belief: SkillBelief::new(
                self.mu.unwrap_or(defaults.default_mu),
                self.sigma.unwrap_or(defaults.default_sigma),
            ),
        }
    }
}

/// Per-request parameter overrides
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamOverrides {
    pub beta: Option<f64>,
    pub tau: Option<f64>,
    pub draw_probability: Option<f64>,
}

impl ParamOverrides {
    pub fn apply(&self, base: TrueSkillParams) -> TrueSkillParams {
        TrueSkillParams {
            beta: self.beta.unwrap_or(base.beta),
            tau: self.tau.unwrap_or(base.tau),
            draw_probability: self.draw_probability.unwrap_or(base.draw_probability),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.beta.is_none() && self.tau.is_none() && self.draw_probability.is_none()
    }
}

/// Request to rate one two-team match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRequest {
    pub team1: Vec<PlayerInput>,
    pub team2: Vec<PlayerInput>,
    pub team1_score: f64,
    pub team2_score: f64,
    #[serde(default, skip_serializing_if = "ParamOverrides::is_empty")]
    pub params: ParamOverrides,
}

impl MatchRequest {
    pub fn teams(&self, defaults: &RatingConfig) -> (Vec<Participant>, Vec<Participant>) {
        (
            resolve_team(&self.team1, defaults),
            resolve_team(&self.team2, defaults),
        )
    }
}

/// Request for the predicted quality of a pairing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityRequest {
    pub team1: Vec<PlayerInput>,
    pub team2: Vec<PlayerInput>,
}

impl QualityRequest {
    pub fn teams(&self, defaults: &RatingConfig) -> (Vec<Participant>, Vec<Participant>) {
        (
            resolve_team(&self.team1, defaults),
            resolve_team(&self.team2, defaults),
        )
    }
}

fn resolve_team(team: &[PlayerInput], defaults: &RatingConfig) -> Vec<Participant> {
    team.iter()
        .map(|player| player.to_participant(defaults))
        .collect()
}

/// Resolve defaults and rate the request through any engine
pub fn rate_request(
    engine: &dyn RatingEngine,
    request: &MatchRequest,
    defaults: &RatingConfig,
) -> Result<RatingUpdateResult> {
    let (team_a, team_b) = request.teams(defaults);
    debug!(
        "Rating request: {} vs {} players, score {}-{}",
        team_a.len(),
        team_b.len(),
        request.team1_score,
        request.team2_score
    );
    engine.update_teams(&team_a, &team_b, request.team1_score, request.team2_score)
}
