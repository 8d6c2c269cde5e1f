//! Common types used throughout the rating engine

use serde::{Deserialize, Serialize};
use skillratings::elo::EloRating;
use skillratings::trueskill::TrueSkillRating;

/// Unique identifier for players
pub type PlayerId = String;

/// Skill mean assigned to a player with no match history
pub const DEFAULT_MU: f64 = 1000.0;

/// Skill uncertainty assigned to a player with no match history
pub const DEFAULT_SIGMA: f64 = 333.33;

/// Gaussian belief over a player's latent skill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillBelief {
    pub mu: f64,
    pub sigma: f64,
}

impl SkillBelief {
    pub fn new(mu: f64, sigma: f64) -> Self {
        Self { mu, sigma }
    }

    pub fn variance(&self) -> f64 {
        self.sigma * self.sigma
    }

    /// Pessimistic point estimate, `mu - 3 * sigma`
    pub fn conservative(&self) -> f64 {
        crate::rating::trueskill::conservative_rating(self.mu, self.sigma)
    }

    /// A belief the engine can update: finite mean, finite positive sigma
    pub fn is_valid(&self) -> bool {
        self.mu.is_finite() && self.sigma.is_finite() && self.sigma > 0.0
    }
}

impl Default for SkillBelief {
    fn default() -> Self {
        Self {
            mu: DEFAULT_MU,
            sigma: DEFAULT_SIGMA,
        }
    }
}

impl From<TrueSkillRating> for SkillBelief {
    fn from(rating: TrueSkillRating) -> Self {
        Self {
            mu: rating.rating,
            sigma: rating.uncertainty,
        }
    }
}

impl From<SkillBelief> for TrueSkillRating {
    fn from(belief: SkillBelief) -> Self {
        Self {
            rating: belief.mu,
            uncertainty: belief.sigma,
        }
    }
}

/// A player taking part in one rating event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: PlayerId,
    #[serde(flatten)]
    pub belief: SkillBelief,
}

impl Participant {
    pub fn new(id: impl Into<PlayerId>, mu: f64, sigma: f64) -> Self {
        Self {
            id: id.into(),
            belief: SkillBelief::new(mu, sigma),
        }
    }

    /// A participant with the default belief for players without history
    pub fn newcomer(id: impl Into<PlayerId>) -> Self {
        Self {
            id: id.into(),
            belief: SkillBelief::default(),
        }
    }
}

/// Which of the two teams in a rating event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamSide {
    A,
    B,
}

impl TeamSide {
    pub fn opponent(self) -> Self {
        match self {
            TeamSide::A => TeamSide::B,
            TeamSide::B => TeamSide::A,
        }
    }
}

impl std::fmt::Display for TeamSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeamSide::A => write!(f, "A"),
            TeamSide::B => write!(f, "B"),
        }
    }
}

/// Result of a match, derived from the two declared scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    TeamAWins,
    TeamBWins,
    Draw,
}

impl MatchOutcome {
    /// Equal scores are a draw regardless of their value
    pub fn from_scores(score_a: f64, score_b: f64) -> Self {
        if score_a > score_b {
            MatchOutcome::TeamAWins
        } else if score_a < score_b {
            MatchOutcome::TeamBWins
        } else {
            MatchOutcome::Draw
        }
    }

    pub fn winner(self) -> Option<TeamSide> {
        match self {
            MatchOutcome::TeamAWins => Some(TeamSide::A),
            MatchOutcome::TeamBWins => Some(TeamSide::B),
            MatchOutcome::Draw => None,
        }
    }

    pub fn standing(self, side: TeamSide) -> TeamStanding {
        match self.winner() {
            None => TeamStanding::Drew,
            Some(winner) if winner == side => TeamStanding::Won,
            Some(_) => TeamStanding::Lost,
        }
    }

    /// The same result seen with the teams swapped
    pub fn mirrored(self) -> Self {
        match self {
            MatchOutcome::TeamAWins => MatchOutcome::TeamBWins,
            MatchOutcome::TeamBWins => MatchOutcome::TeamAWins,
            MatchOutcome::Draw => MatchOutcome::Draw,
        }
    }
}

/// How a single team fared in a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamStanding {
    Won,
    Lost,
    Drew,
}

/// Rating change information for a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRatingChange {
    pub id: PlayerId,
    pub mu_before: f64,
    pub mu_after: f64,
    pub sigma_before: f64,
    pub sigma_after: f64,
    pub conservative_before: f64,
    pub conservative_after: f64,
}

impl PlayerRatingChange {
    /// Conservative ratings are always derived here from the beliefs
    pub fn new(id: PlayerId, before: SkillBelief, after: SkillBelief) -> Self {
        Self {
            id,
            mu_before: before.mu,
            mu_after: after.mu,
            sigma_before: before.sigma,
            sigma_after: after.sigma,
            conservative_before: before.conservative(),
            conservative_after: after.conservative(),
        }
    }

    pub fn belief_before(&self) -> SkillBelief {
        SkillBelief::new(self.mu_before, self.sigma_before)
    }

    pub fn belief_after(&self) -> SkillBelief {
        SkillBelief::new(self.mu_after, self.sigma_after)
    }

    pub fn mu_change(&self) -> f64 {
        self.mu_after - self.mu_before
    }

    pub fn sigma_change(&self) -> f64 {
        self.sigma_after - self.sigma_before
    }

    pub fn conservative_change(&self) -> f64 {
        self.conservative_after - self.conservative_before
    }
}

/// Output of one two-team rating event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingUpdateResult {
    pub team_a: Vec<PlayerRatingChange>,
    pub team_b: Vec<PlayerRatingChange>,
    pub team_a_won: bool,
    pub team_b_won: bool,
    pub is_draw: bool,
    /// Predicted closeness of the match in (0, 1], display only
    pub match_quality: f64,
}

impl RatingUpdateResult {
    pub fn new(
        outcome: MatchOutcome,
        team_a: Vec<PlayerRatingChange>,
        team_b: Vec<PlayerRatingChange>,
        match_quality: f64,
    ) -> Self {
        Self {
            team_a,
            team_b,
            team_a_won: outcome == MatchOutcome::TeamAWins,
            team_b_won: outcome == MatchOutcome::TeamBWins,
            is_draw: outcome == MatchOutcome::Draw,
            match_quality,
        }
    }

    pub fn outcome(&self) -> MatchOutcome {
        if self.team_a_won {
            MatchOutcome::TeamAWins
        } else if self.team_b_won {
            MatchOutcome::TeamBWins
        } else {
            MatchOutcome::Draw
        }
    }

    pub fn standing(&self, side: TeamSide) -> TeamStanding {
        self.outcome().standing(side)
    }

    pub fn changes(&self, side: TeamSide) -> &[PlayerRatingChange] {
        match side {
            TeamSide::A => &self.team_a,
            TeamSide::B => &self.team_b,
        }
    }

    /// Find a player's change and the side they played on
    pub fn find_player(&self, player_id: &str) -> Option<(TeamSide, &PlayerRatingChange)> {
        self.team_a
            .iter()
            .map(|change| (TeamSide::A, change))
            .chain(self.team_b.iter().map(|change| (TeamSide::B, change)))
            .find(|(_, change)| change.id == player_id)
    }
}

/// A stored player rating in either of the two shapes callers keep.
///
/// Skill ratings carry `mu` and `sigma`; records produced by the legacy
/// single-number path only carry `elo`. Deserialization prefers the skill
/// shape whenever both `mu` and `sigma` are present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RatingSnapshot {
    Skill { mu: f64, sigma: f64 },
    Legacy { elo: f64 },
}

impl RatingSnapshot {
    pub fn is_skill(&self) -> bool {
        matches!(self, RatingSnapshot::Skill { .. })
    }

    pub fn belief(&self) -> Option<SkillBelief> {
        match *self {
            RatingSnapshot::Skill { mu, sigma } => Some(SkillBelief::new(mu, sigma)),
            RatingSnapshot::Legacy { .. } => None,
        }
    }
}

impl From<SkillBelief> for RatingSnapshot {
    fn from(belief: SkillBelief) -> Self {
        RatingSnapshot::Skill {
            mu: belief.mu,
            sigma: belief.sigma,
        }
    }
}

impl From<EloRating> for RatingSnapshot {
    fn from(rating: EloRating) -> Self {
        RatingSnapshot::Legacy { elo: rating.rating }
    }
}
