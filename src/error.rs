//! Error types for the rating engine
//!
//! Every rejected input is reported as a typed `RatingError` so callers can
//! branch on the variant. Application edges (config loading, the CLI) wrap
//! these in anyhow.

use crate::types::{PlayerId, TeamSide};

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, RatingError>;

/// Custom error types for rating calculations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("Team {side} has no players")]
    EmptyTeam { side: TeamSide },

    #[error("Invalid score for team {side}: {score}")]
    InvalidScore { side: TeamSide, score: f64 },

    #[error("Invalid belief for player {player_id}: mu={mu}, sigma={sigma}")]
    InvalidBelief {
        player_id: PlayerId,
        mu: f64,
        sigma: f64,
    },

    #[error("Invalid rating parameters: {reason}")]
    InvalidParameters { reason: String },

    #[error("Numerical defect in rating update: {reason}")]
    NumericalDefect { reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
