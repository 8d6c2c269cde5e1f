//! Command-line entry point for the team-trueskill rating engine
//!
//! Reads a JSON match request from a file or stdin, rates it, and prints the
//! result as JSON on stdout. Failures print `{"error": "..."}` and exit 1,
//! so callers spawning this as a subprocess only ever parse JSON. Logs go to
//! stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use team_trueskill::config::AppConfig;
use team_trueskill::display::summarize;
use team_trueskill::request::{rate_request, MatchRequest, QualityRequest};
use team_trueskill::TrueSkillEngine;
use tracing::{debug, error, info};

/// Team TrueSkill - Bayesian ratings for two-team matches
#[derive(Parser)]
#[command(
    name = "team-trueskill",
    version,
    about = "Rate two-team matches with a TrueSkill-style Bayesian engine",
    long_about = "Reads a match request as JSON (two teams of players with optional mu/sigma \
                 and the two scores), computes updated skill beliefs for every player, and \
                 prints the rating result as JSON."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        global = true,
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true, help = "Pretty-print JSON output")]
    pretty: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without rating")]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Rate a match and print updated beliefs
    Rate {
        /// Request file; stdin when omitted
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Print per-player display rows instead of the full result
        #[arg(long)]
        summary: bool,
    },
    /// Print the predicted quality of a pairing
    Quality {
        /// Request file; stdin when omitted
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
    },
}

/// Initialize structured logging on stderr with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load configuration from file or environment, then apply CLI overrides
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.pretty {
        config.service.pretty_output = true;
    }

    team_trueskill::config::validate_config(&config)?;
    Ok(config)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read request from stdin")?;
            Ok(buffer)
        }
    }
}

fn run(command: &Command, config: &AppConfig) -> Result<serde_json::Value> {
    match command {
        Command::Rate { input, summary } => {
            let request: MatchRequest = serde_json::from_str(&read_input(input.as_deref())?)
                .context("Invalid match request")?;

            let params = request.params.apply(config.rating.params);
            debug!("Rating with parameters {:?}", params);
            let engine = TrueSkillEngine::new(params)?;

            let result = rate_request(&engine, &request, &config.rating)?;
            info!(
                "Rated match: {} players, quality {:.4}",
                result.team_a.len() + result.team_b.len(),
                result.match_quality
            );

            if *summary {
                Ok(serde_json::to_value(summarize(&result))?)
            } else {
                Ok(serde_json::to_value(result)?)
            }
        }
        Command::Quality { input } => {
            let request: QualityRequest = serde_json::from_str(&read_input(input.as_deref())?)
                .context("Invalid quality request")?;

            let engine = TrueSkillEngine::new(config.rating.params)?;
            let (team_a, team_b) = request.teams(&config.rating);
            let quality = engine.match_quality(&team_a, &team_b)?;

            Ok(serde_json::json!({ "matchQuality": quality }))
        }
    }
}

fn print_json(value: &serde_json::Value, pretty: bool) {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match rendered {
        Ok(text) => println!("{}", text),
        Err(e) => println!("{{\"error\": \"Failed to encode output: {}\"}}", e),
    }
}

fn main() {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        print_json(&serde_json::json!({ "error": format!("{:#}", e) }), false);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if args.dry_run {
        info!(
            "{} {}: configuration valid ({:?})",
            config.service.name,
            team_trueskill::VERSION,
            config.rating.params
        );
        print_json(
            &serde_json::json!({
                "status": "ok",
                "service": config.service.name,
                "version": team_trueskill::VERSION,
                "params": config.rating.params,
            }),
            config.service.pretty_output,
        );
        return;
    }

    let Some(command) = &args.command else {
        print_json(
            &serde_json::json!({ "error": "No command given; try `rate` or `quality`" }),
            false,
        );
        std::process::exit(1);
    };

    match run(command, &config) {
        Ok(output) => print_json(&output, config.service.pretty_output),
        Err(e) => {
            error!("Rating failed: {:#}", e);
            print_json(&serde_json::json!({ "error": format!("{:#}", e) }), false);
            std::process::exit(1);
        }
    }
}
