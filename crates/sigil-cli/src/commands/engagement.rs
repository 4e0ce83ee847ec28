// crates/sigil-cli/src/commands/engagement.rs
//
// `sigil engagement <inputs.json>` — engagement rank for one gathered
// input snapshot.

use clap::Args;

use sigil_core::ScoringInputs;
use sigil_score::compute_engagement_rank;

use crate::output::{format_json, OutputFormat};

/// Engagement ranking command.
#[derive(Debug, Args)]
pub struct EngagementCmd {
    /// Path to a gathered ScoringInputs JSON snapshot.
    #[arg()]
    pub input: String,
}

/// Run the engagement command.
pub async fn run(
    cmd: &EngagementCmd,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(&cmd.input)?;
    let inputs: ScoringInputs = serde_json::from_str(&contents)?;
    let rank = compute_engagement_rank(&inputs);

    if format == OutputFormat::Json {
        println!("{}", format_json(&rank));
        return Ok(());
    }

    println!("Engagement score: {} ({})", rank.score, rank.label);
    println!("  Approx. percentile: top {:.0}%", rank.percentile_approx);
    println!(
        "  Follower component: {:.3}, reliability: x{:.2}",
        rank.breakdown.follower_component, rank.breakdown.reliability_multiplier
    );
    println!(
        "  Bonuses: consistency +{:.3}, on-chain +{:.3}",
        rank.breakdown.consistency_bonus, rank.breakdown.onchain_bonus
    );

    Ok(())
}
