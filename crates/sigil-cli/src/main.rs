// crates/sigil-cli/src/main.rs
//
// CLI entrypoint for the Sigil developer tools.
//
// Provides subcommands for scoring gathered input snapshots: legitimacy,
// engagement rank, wallet matching, and feed ranking.

mod commands;
mod config;
mod output;

use clap::{Parser, Subcommand};
use commands::engagement::EngagementCmd;
use commands::matching::MatchCmd;
use commands::rank::RankCmd;
use commands::score::ScoreCmd;
use config::SigilConfig;
use output::OutputFormat;

/// Sigil CLI — wallet legitimacy and influence scoring tools.
#[derive(Parser, Debug)]
#[command(
    name = "sigil",
    version = "0.1.0",
    about = "Sigil CLI — score, rank, and match wallets from gathered input snapshots"
)]
struct Cli {
    /// Path to the TOML configuration file (default: ~/.sigil/config.toml).
    #[arg(long, global = true)]
    config: Option<String>,

    /// Emit JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Legitimacy score with a per-dimension breakdown.
    Score(ScoreCmd),

    /// Engagement rank with percentile and label.
    Engagement(EngagementCmd),

    /// Similarity score and explanation for two subjects.
    Match(MatchCmd),

    /// Blended feed ranking over a list of subjects.
    Rank(RankCmd),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber for structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = SigilConfig::load_or_default(cli.config.as_deref())?;
    let format = OutputFormat::from_flag(cli.json);
    tracing::debug!(
        config_override = cli.config.is_some(),
        command = ?cli.command,
        "dispatching"
    );

    match &cli.command {
        Commands::Score(cmd) => commands::score::run(cmd, &config, format).await?,
        Commands::Engagement(cmd) => commands::engagement::run(cmd, format).await?,
        Commands::Match(cmd) => commands::matching::run(cmd, &config, format).await?,
        Commands::Rank(cmd) => commands::rank::run(cmd, &config, format).await?,
    }

    Ok(())
}
