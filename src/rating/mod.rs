//! TrueSkill-style rating system
//!
//! This module provides the Gaussian primitives, the two-team rating
//! engine, and the trait callers use to reach it.

pub mod engine;
pub mod gaussian;
pub mod trueskill;

// Re-export commonly used types
pub use engine::{MockRatingEngine, RatingEngine};
pub use trueskill::{
    conservative_rating, update_players, update_teams, TeamAggregate, TrueSkillEngine,
    TrueSkillParams,
};
