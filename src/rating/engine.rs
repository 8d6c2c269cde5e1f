//! Rating engine trait and a recording mock
//!
//! `RatingEngine` is the single interface callers rate matches through.
//! The in-process [`TrueSkillEngine`](crate::rating::TrueSkillEngine) is the
//! canonical implementation; a client for an out-of-process rating service
//! would be another implementation of the same trait.

use crate::error::Result;
use crate::rating::trueskill::TrueSkillParams;
use crate::types::{MatchOutcome, Participant, PlayerRatingChange, RatingUpdateResult};

/// Trait for rating two-team matches
pub trait RatingEngine: Send + Sync {
    /// Rate a match between two teams
    ///
    /// # Arguments
    /// * `team_a` - Players of the first team, in input order
    /// * `team_b` - Players of the second team, in input order
    /// * `score_a` / `score_b` - Declared non-negative scores
    ///
    /// # Returns
    /// Updated beliefs for every player plus outcome flags and match quality
    fn update_teams(
        &self,
        team_a: &[Participant],
        team_b: &[Participant],
        score_a: f64,
        score_b: f64,
    ) -> Result<RatingUpdateResult>;

    /// Rate a one-on-one match
    fn update_players(
        &self,
        player_a: &Participant,
        player_b: &Participant,
        score_a: f64,
        score_b: f64,
    ) -> Result<RatingUpdateResult> {
        self.update_teams(
            std::slice::from_ref(player_a),
            std::slice::from_ref(player_b),
            score_a,
            score_b,
        )
    }

    /// Model parameters currently in effect
    fn params(&self) -> TrueSkillParams;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;

    /// Update configuration from JSON
    fn update_config(&mut self, config: serde_json::Value) -> Result<()>;
}

/// A recorded `update_teams` call
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedMatch {
    pub team_a: Vec<Participant>,
    pub team_b: Vec<Participant>,
    pub score_a: f64,
    pub score_b: f64,
}

/// Mock rating engine for testing callers
#[derive(Debug, Default)]
pub struct MockRatingEngine {
    calls: std::sync::Mutex<Vec<RecordedMatch>>,
    fixed_result: std::sync::RwLock<Option<RatingUpdateResult>>,
    params: TrueSkillParams,
}

impl MockRatingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a fixed result to return for all calls
    pub fn set_fixed_result(&self, result: RatingUpdateResult) {
        if let Ok(mut fixed) = self.fixed_result.write() {
            *fixed = Some(result);
        }
    }

    /// Get all calls made (for testing)
    pub fn get_calls(&self) -> Vec<RecordedMatch> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Clear recorded calls
    pub fn clear_calls(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
    }
}

impl RatingEngine for MockRatingEngine {
    fn update_teams(
        &self,
        team_a: &[Participant],
        team_b: &[Participant],
        score_a: f64,
        score_b: f64,
    ) -> Result<RatingUpdateResult> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedMatch {
                team_a: team_a.to_vec(),
                team_b: team_b.to_vec(),
                score_a,
                score_b,
            });
        }

        if let Ok(fixed) = self.fixed_result.read() {
            if let Some(result) = fixed.as_ref() {
                return Ok(result.clone());
            }
        }

        // Default behavior: outcome from the scores, beliefs unchanged
        let unchanged = |team: &[Participant]| -> Vec<PlayerRatingChange> {
            team.iter()
                .map(|p| PlayerRatingChange::new(p.id.clone(), p.belief, p.belief))
                .collect()
        };

        Ok(RatingUpdateResult::new(
            MatchOutcome::from_scores(score_a, score_b),
            unchanged(team_a),
            unchanged(team_b),
            0.8,
        ))
    }

    fn params(&self) -> TrueSkillParams {
        self.params
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "mock",
            "beta": self.params.beta,
            "tau": self.params.tau,
            "draw_probability": self.params.draw_probability
        })
    }

    fn update_config(&mut self, config: serde_json::Value) -> Result<()> {
        if let Some(beta) = config.get("beta").and_then(|v| v.as_f64()) {
            self.params.beta = beta;
        }
        if let Some(tau) = config.get("tau").and_then(|v| v.as_f64()) {
            self.params.tau = tau;
        }
        Ok(())
    }
}
