//! Configuration management for the team-trueskill binary
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values for the rating engine.

pub mod app;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use rating::RatingConfig;
