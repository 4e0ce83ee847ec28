// crates/sigil-cli/src/commands/matching.rs
//
// `sigil match <left.json> <right.json>` — similarity score, breakdown,
// and explanation for two gathered match subjects.

use clap::Args;
use tabled::Tabled;

use sigil_match::{explain_match, match_subjects, MatchSubject};

use crate::config::SigilConfig;
use crate::output::{format_json, format_table, OutputFormat};

/// Wallet matching command.
#[derive(Debug, Args)]
pub struct MatchCmd {
    /// Path to the left subject's MatchSubject JSON snapshot.
    #[arg()]
    pub left: String,

    /// Path to the right subject's MatchSubject JSON snapshot.
    #[arg()]
    pub right: String,
}

#[derive(Tabled)]
struct SimilarityRow {
    dimension: &'static str,
    similarity: String,
}

fn row(dimension: &'static str, value: f64) -> SimilarityRow {
    SimilarityRow {
        dimension,
        similarity: format!("{:.3}", value),
    }
}

fn read_subject(path: &str) -> Result<MatchSubject, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Run the match command.
pub async fn run(
    cmd: &MatchCmd,
    config: &SigilConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let left = read_subject(&cmd.left)?;
    let right = read_subject(&cmd.right)?;
    let report = match_subjects(&left, &right, &config.match_weights, &config.scoring);
    let explanation = explain_match(&report);

    if format == OutputFormat::Json {
        #[derive(serde::Serialize)]
        struct Out<'a> {
            #[serde(flatten)]
            report: &'a sigil_match::MatchReport,
            explanation: &'a [String],
        }
        println!(
            "{}",
            format_json(&Out {
                report: &report,
                explanation: &explanation
            })
        );
        return Ok(());
    }

    println!(
        "Match {} <-> {}: {}",
        report.left, report.right, report.score
    );
    for line in &explanation {
        println!("  - {}", line);
    }
    println!();

    let b = &report.breakdown;
    let rows = vec![
        row("identity", b.identity),
        row("platforms", b.platforms),
        row("usernames", b.usernames),
        row("followers", b.followers),
        row("creators", b.creators),
        row("onchain", b.onchain),
        row("memory", b.memory),
        row("ens", b.ens),
        row("engagement", b.engagement),
        row("farcaster", b.farcaster),
    ];
    println!("{}", format_table(&rows));

    Ok(())
}
