//! TrueSkill-style two-team rating engine
//!
//! Given two teams of skill beliefs and their declared scores, this module
//! derives the outcome, aggregates each team additively, shifts each team's
//! performance with the truncated-Gaussian functions from [`gaussian`], and
//! apportions the shift to players by their share of the team variance.
//!
//! Every call is a pure function of its inputs; nothing is cached between
//! calls, so the engine can be shared freely across threads.

use crate::error::{RatingError, Result};
use crate::rating::engine::RatingEngine;
use crate::rating::gaussian;
use crate::types::{
    MatchOutcome, Participant, PlayerRatingChange, RatingUpdateResult, SkillBelief, TeamSide,
    TeamStanding,
};
use serde::{Deserialize, Serialize};
use skillratings::trueskill::TrueSkillConfig;
use tracing::{debug, trace, warn};

/// Parameters of the rating model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrueSkillParams {
    /// Performance spread of a single player
    pub beta: f64,
    /// Dynamics noise added to every belief after a match
    pub tau: f64,
    /// Prior probability that a match ends level
    pub draw_probability: f64,
}

impl Default for TrueSkillParams {
    fn default() -> Self {
        Self {
            beta: 166.67,
            tau: 1.0,
            draw_probability: 0.10,
        }
    }
}

impl TrueSkillParams {
    /// Wider performance spread and little drift between matches
    pub fn conservative() -> Self {
        Self {
            beta: 250.0,
            tau: 0.5,
            draw_probability: 0.10,
        }
    }

    /// Narrow performance spread and more drift between matches
    pub fn aggressive() -> Self {
        Self {
            beta: 100.0,
            tau: 5.0,
            draw_probability: 0.10,
        }
    }

    /// Validate parameters before any rating work
    pub fn validate(&self) -> Result<()> {
        if !self.beta.is_finite() || self.beta <= 0.0 {
            return Err(RatingError::InvalidParameters {
                reason: format!("beta must be positive, got {}", self.beta),
            });
        }

        if !self.tau.is_finite() || self.tau < 0.0 {
            return Err(RatingError::InvalidParameters {
                reason: format!("tau must be non-negative, got {}", self.tau),
            });
        }

        if !self.draw_probability.is_finite() || !(0.0..1.0).contains(&self.draw_probability) {
            return Err(RatingError::InvalidParameters {
                reason: format!(
                    "draw probability must be in [0, 1), got {}",
                    self.draw_probability
                ),
            });
        }

        Ok(())
    }
}

impl From<TrueSkillParams> for TrueSkillConfig {
    fn from(params: TrueSkillParams) -> Self {
        Self {
            draw_probability: params.draw_probability,
            beta: params.beta,
            default_dynamics: params.tau,
        }
    }
}

/// Combined skill of a team: member means and variances are summed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamAggregate {
    pub mean: f64,
    pub variance: f64,
    pub size: usize,
}

impl TeamAggregate {
    pub fn from_team(team: &[Participant]) -> Self {
        team.iter().fold(
            Self {
                mean: 0.0,
                variance: 0.0,
                size: 0,
            },
            |acc, player| Self {
                mean: acc.mean + player.belief.mu,
                variance: acc.variance + player.belief.variance(),
                size: acc.size + 1,
            },
        )
    }

    pub fn sigma(&self) -> f64 {
        self.variance.sqrt()
    }
}

/// Conservative rating used for ranking and display, `mu - 3 * sigma`
pub fn conservative_rating(mu: f64, sigma: f64) -> f64 {
    mu - 3.0 * sigma
}

/// Total variance of the performance difference between two teams
pub fn variance_sum(team_a: &TeamAggregate, team_b: &TeamAggregate, params: &TrueSkillParams) -> f64 {
    // a + b is exact under swapping, which keeps swapped calls bit-identical
    2.0 * params.beta * params.beta + (team_a.variance + team_b.variance)
}

/// Match quality in (0, 1], highest when both teams have equal means
pub fn match_quality(team_a: &TeamAggregate, team_b: &TeamAggregate, params: &TrueSkillParams) -> f64 {
    let delta = team_a.mean - team_b.mean;
    (-(delta * delta) / (2.0 * variance_sum(team_a, team_b, params))).exp()
}

/// Margin inside which a performance difference counts as a draw.
///
/// Only drawn matches carry a margin, and a zero draw probability disables
/// it entirely.
pub fn draw_margin(outcome: MatchOutcome, variance_sum: f64, params: &TrueSkillParams) -> f64 {
    if outcome != MatchOutcome::Draw || params.draw_probability == 0.0 {
        return 0.0;
    }
    gaussian::cdf(params.draw_probability / 2.0) * variance_sum.sqrt()
}

/// Rate a two-team match and return updated beliefs for every player
pub fn update_teams(
    team_a: &[Participant],
    team_b: &[Participant],
    score_a: f64,
    score_b: f64,
    params: &TrueSkillParams,
) -> Result<RatingUpdateResult> {
    params.validate()?;
    validate_team_sizes(team_a, team_b)?;
    validate_score(TeamSide::A, score_a)?;
    validate_score(TeamSide::B, score_b)?;
    validate_beliefs(team_a)?;
    validate_beliefs(team_b)?;

    let outcome = MatchOutcome::from_scores(score_a, score_b);

    let aggregate_a = TeamAggregate::from_team(team_a);
    let aggregate_b = TeamAggregate::from_team(team_b);
    let variance_sum = variance_sum(&aggregate_a, &aggregate_b, params);
    let c = variance_sum.sqrt();

    let quality = match_quality(&aggregate_a, &aggregate_b, params);
    let margin = draw_margin(outcome, variance_sum, params);

    debug!(
        "Rating {:?}: team A mean={:.2} var={:.2}, team B mean={:.2} var={:.2}, quality={:.4}, draw margin={:.4}",
        outcome,
        aggregate_a.mean,
        aggregate_a.variance,
        aggregate_b.mean,
        aggregate_b.variance,
        quality,
        margin
    );

    let performance_a = team_performance(
        outcome.standing(TeamSide::A),
        &aggregate_a,
        &aggregate_b,
        c,
        margin,
    )?;
    let performance_b = team_performance(
        outcome.standing(TeamSide::B),
        &aggregate_b,
        &aggregate_a,
        c,
        margin,
    )?;

    let changes_a = apportion(team_a, &aggregate_a, performance_a, params.tau)?;
    let changes_b = apportion(team_b, &aggregate_b, performance_b, params.tau)?;

    Ok(RatingUpdateResult::new(outcome, changes_a, changes_b, quality))
}

/// Rate a one-on-one match by treating each player as a solo team
pub fn update_players(
    player_a: &Participant,
    player_b: &Participant,
    score_a: f64,
    score_b: f64,
    params: &TrueSkillParams,
) -> Result<RatingUpdateResult> {
    update_teams(
        std::slice::from_ref(player_a),
        std::slice::from_ref(player_b),
        score_a,
        score_b,
        params,
    )
}

/// Shifted team performance.
///
/// Winners move up and losers down by `V` of the winner's normalised lead,
/// so an expected result moves little and an upset moves a lot. Draws use
/// the draw-truncated shift, pulling the team that was ahead down and the
/// team that was behind up.
fn team_performance(
    standing: TeamStanding,
    own: &TeamAggregate,
    other: &TeamAggregate,
    c: f64,
    margin: f64,
) -> Result<f64> {
    let delta = own.mean - other.mean;
    let performance = match standing {
        TeamStanding::Won => own.mean + own.sigma() * decisive_shift((delta - margin) / c)?,
        TeamStanding::Lost => own.mean - own.sigma() * decisive_shift((-delta - margin) / c)?,
        TeamStanding::Drew => own.mean + own.sigma() * gaussian::v_draw(delta / c, margin / c),
    };
    Ok(performance)
}

/// `V` at the winner's normalised lead, rejected when its `W` leaves `[0, 1]`.
///
/// `W` only reaches 0 by underflow for an overwhelming favourite, where the
/// shift is negligible anyway.
fn decisive_shift(z: f64) -> Result<f64> {
    let shrink = gaussian::w(0.0, z, 1.0);
    if !(0.0..=1.0).contains(&shrink) {
        warn!("Variance shrink {} out of range at z={}", shrink, z);
        return Err(RatingError::NumericalDefect {
            reason: format!("variance shrink {} outside [0, 1] at z={}", shrink, z),
        });
    }
    Ok(gaussian::v(0.0, z, 1.0))
}

/// Spread a team's performance shift over its players by variance share
fn apportion(
    team: &[Participant],
    aggregate: &TeamAggregate,
    performance: f64,
    tau: f64,
) -> Result<Vec<PlayerRatingChange>> {
    team.iter()
        .map(|player| {
            let before = player.belief;
            let weight = before.variance() / aggregate.variance;

            let mu = before.mu + weight * (performance - aggregate.mean);
            let variance = before.variance() * (1.0 - weight) + tau * tau;
            let after = SkillBelief::new(mu, variance.sqrt());

            if !after.mu.is_finite() || !after.sigma.is_finite() {
                warn!("Non-finite update for player {}: {:?}", player.id, after);
                return Err(RatingError::NumericalDefect {
                    reason: format!("non-finite belief for player {}", player.id),
                });
            }

            trace!(
                "Player {}: weight={:.4} mu {:.2} -> {:.2}, sigma {:.2} -> {:.2}",
                player.id,
                weight,
                before.mu,
                after.mu,
                before.sigma,
                after.sigma
            );

            Ok(PlayerRatingChange::new(player.id.clone(), before, after))
        })
        .collect()
}

fn validate_team_sizes(team_a: &[Participant], team_b: &[Participant]) -> Result<()> {
    for (side, team) in [(TeamSide::A, team_a), (TeamSide::B, team_b)] {
        if team.is_empty() {
            warn!("Rejecting match: team {} is empty", side);
            return Err(RatingError::EmptyTeam { side });
        }
    }
    Ok(())
}

fn validate_score(side: TeamSide, score: f64) -> Result<()> {
    if !score.is_finite() || score < 0.0 {
        warn!("Rejecting match: team {} score {} is invalid", side, score);
        return Err(RatingError::InvalidScore { side, score });
    }
    Ok(())
}

fn validate_beliefs(team: &[Participant]) -> Result<()> {
    match team.iter().find(|player| !player.belief.is_valid()) {
        Some(player) => {
            warn!(
                "Rejecting match: player {} has mu={} sigma={}",
                player.id, player.belief.mu, player.belief.sigma
            );
            Err(RatingError::InvalidBelief {
                player_id: player.id.clone(),
                mu: player.belief.mu,
                sigma: player.belief.sigma,
            })
        }
        None => Ok(()),
    }
}

/// In-process TrueSkill rating engine
#[derive(Debug, Clone, Default)]
pub struct TrueSkillEngine {
    params: TrueSkillParams,
}

impl TrueSkillEngine {
    /// Create a new engine with validated parameters
    pub fn new(params: TrueSkillParams) -> Result<Self> {
        params.validate()?;

        Ok(Self { params })
    }

    /// Predicted match quality for two teams, without rating them
    pub fn match_quality(&self, team_a: &[Participant], team_b: &[Participant]) -> Result<f64> {
        validate_team_sizes(team_a, team_b)?;
        validate_beliefs(team_a)?;
        validate_beliefs(team_b)?;

        Ok(match_quality(
            &TeamAggregate::from_team(team_a),
            &TeamAggregate::from_team(team_b),
            &self.params,
        ))
    }
}

impl RatingEngine for TrueSkillEngine {
    fn update_teams(
        &self,
        team_a: &[Participant],
        team_b: &[Participant],
        score_a: f64,
        score_b: f64,
    ) -> Result<RatingUpdateResult> {
        update_teams(team_a, team_b, score_a, score_b, &self.params)
    }

    fn params(&self) -> TrueSkillParams {
        self.params
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(self.params).unwrap_or(serde_json::Value::Null)
    }

    fn update_config(&mut self, config: serde_json::Value) -> Result<()> {
        let params: TrueSkillParams =
            serde_json::from_value(config).map_err(|e| RatingError::ConfigurationError {
                message: format!("Invalid TrueSkill parameters: {}", e),
            })?;

        params.validate()?;
        self.params = params;
        Ok(())
    }
}
