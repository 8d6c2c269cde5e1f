//! Team TrueSkill - Bayesian skill ratings for two-team matches
//!
//! This crate provides a TrueSkill-style rating engine: Gaussian primitives,
//! additive team aggregation, draw-margin handling and per-player
//! apportionment, plus the caller-side request and display helpers around it.

pub mod config;
pub mod display;
pub mod error;
pub mod rating;
pub mod request;
pub mod types;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use rating::{RatingEngine, TrueSkillEngine, TrueSkillParams};
pub use request::{rate_request, MatchRequest};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
