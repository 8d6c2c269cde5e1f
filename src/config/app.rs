//! Main application configuration
//!
//! This module defines the configuration for the `team-trueskill` binary,
//! including environment variable and TOML file loading and validation.

use crate::config::rating::RatingConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingConfig,
}

/// Process-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name used in log output
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Pretty-print JSON output
    pub pretty_output: bool,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "team-trueskill".to_string(),
            log_level: "warn".to_string(),
            pretty_output: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from a TOML file; missing keys take defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Service settings
        if let Some(name) = lookup("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Some(log_level) = lookup("LOG_LEVEL") {
            config.service.log_level = log_level;
        }
        if let Some(pretty) = lookup("PRETTY_OUTPUT") {
            config.service.pretty_output = parse_var("PRETTY_OUTPUT", &pretty)?;
        }

        // Rating settings
        if let Some(beta) = lookup("RATING_BETA") {
            config.rating.params.beta = parse_var("RATING_BETA", &beta)?;
        }
        if let Some(tau) = lookup("RATING_TAU") {
            config.rating.params.tau = parse_var("RATING_TAU", &tau)?;
        }
        if let Some(draw) = lookup("RATING_DRAW_PROBABILITY") {
            config.rating.params.draw_probability = parse_var("RATING_DRAW_PROBABILITY", &draw)?;
        }
        if let Some(mu) = lookup("RATING_DEFAULT_MU") {
            config.rating.default_mu = parse_var("RATING_DEFAULT_MU", &mu)?;
        }
        if let Some(sigma) = lookup("RATING_DEFAULT_SIGMA") {
            config.rating.default_sigma = parse_var("RATING_DEFAULT_SIGMA", &sigma)?;
        }

        validate_config(&config)?;
        Ok(config)
    }
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| anyhow!("Invalid {} value: {}", name, value))
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    config.rating.validate()?;

    Ok(())
}
