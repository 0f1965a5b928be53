mod matching;
mod network;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "creatormap-cli")]
#[command(about = "Match creators to campaign briefs and map their similarity network")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Score every candidate against a brief and print the matches as JSON
    Score {
        /// Candidate profiles (YAML or JSON)
        #[arg(long)]
        candidates: PathBuf,
        /// Campaign brief (YAML or JSON)
        #[arg(long)]
        brief: PathBuf,
        /// Reference time for the recent-activity window (RFC 3339); defaults to now
        #[arg(long, value_parser = parse_reference_time)]
        at: Option<DateTime<Utc>>,
    },
    /// Blend match scores with keyword-search hits and print the top candidates
    Rank {
        /// Candidate profiles (YAML or JSON)
        #[arg(long)]
        candidates: PathBuf,
        /// Campaign brief (YAML or JSON)
        #[arg(long)]
        brief: PathBuf,
        /// Keyword-search hit counts (YAML or JSON)
        #[arg(long)]
        hits: PathBuf,
        /// Number of candidates to keep; defaults to `CREATORMAP_TOP_N`
        #[arg(long)]
        top_n: Option<usize>,
        /// Reference time for the recent-activity window (RFC 3339); defaults to now
        #[arg(long, value_parser = parse_reference_time)]
        at: Option<DateTime<Utc>>,
    },
    /// Build the creator similarity network and print it with its metrics
    Network {
        /// Candidate profiles (YAML or JSON)
        #[arg(long)]
        candidates: PathBuf,
        /// Divide pair similarity by the weight of the terms that applied
        #[arg(long)]
        renormalize: bool,
        /// Minimum edge weight (exclusive); defaults to `CREATORMAP_EDGE_THRESHOLD`
        #[arg(long)]
        edge_threshold: Option<f64>,
        /// Also write the graph as GraphML to this path
        #[arg(long)]
        graphml: Option<PathBuf>,
    },
}

fn parse_reference_time(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = creatormap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Commands::Score {
            candidates,
            brief,
            at,
        } => matching::run_score(&candidates, &brief, at),
        Commands::Rank {
            candidates,
            brief,
            hits,
            top_n,
            at,
        } => matching::run_rank(&candidates, &brief, &hits, top_n.unwrap_or(config.top_n), at),
        Commands::Network {
            candidates,
            renormalize,
            edge_threshold,
            graphml,
        } => network::run_network(
            &config,
            &candidates,
            network::Overrides {
                renormalize,
                edge_threshold,
            },
            graphml.as_deref(),
        ),
    }
}
