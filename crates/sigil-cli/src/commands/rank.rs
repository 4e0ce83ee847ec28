// crates/sigil-cli/src/commands/rank.rs
//
// `sigil rank <subjects.json>` — blended feed ranking over a list of
// gathered feed subjects.

use chrono::{DateTime, Utc};
use clap::Args;
use tabled::Tabled;

use sigil_gather::{FeedOptions, FeedRanker, FeedSubject, ScoredSubject};

use crate::config::SigilConfig;
use crate::output::{format_json, format_table, OutputFormat};

/// Feed ranking command.
#[derive(Debug, Args)]
pub struct RankCmd {
    /// Path to a JSON array of gathered FeedSubject snapshots.
    #[arg()]
    pub input: String,

    /// Evaluate freshness at a fixed RFC 3339 time instead of now.
    #[arg(long)]
    pub at: Option<DateTime<Utc>>,
}

#[derive(Tabled)]
struct RankRow {
    rank: usize,
    subject: String,
    feed: String,
    legitimacy: u32,
    engagement: u32,
    freshness: String,
}

impl RankRow {
    fn new(rank: usize, s: &ScoredSubject) -> Self {
        Self {
            rank,
            subject: s.key.clone(),
            feed: format!("{:.1}", s.feed_score),
            legitimacy: s.legitimacy,
            engagement: s.engagement,
            freshness: format!("{:.2}", s.freshness),
        }
    }
}

/// Run the rank command.
pub async fn run(
    cmd: &RankCmd,
    config: &SigilConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(&cmd.input)?;
    let subjects: Vec<FeedSubject> = serde_json::from_str(&contents)?;

    let ranker = FeedRanker::new(FeedOptions {
        weights: config.feed_weights,
        freshness: config.freshness,
        scoring: config.scoring.clone(),
        now: cmd.at,
    });
    let ranked = ranker.rank(subjects).await;

    if format == OutputFormat::Json {
        println!("{}", format_json(&ranked));
        return Ok(());
    }

    let rows: Vec<RankRow> = ranked
        .iter()
        .enumerate()
        .map(|(i, s)| RankRow::new(i + 1, s))
        .collect();
    println!("{}", format_table(&rows));

    Ok(())
}
