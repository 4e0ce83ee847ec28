// crates/sigil-cli/src/commands/score.rs
//
// `sigil score <inputs.json>` — legitimacy score and per-dimension
// breakdown for one gathered input snapshot.

use clap::Args;
use tabled::Tabled;

use sigil_core::{DimensionScore, ScoringInputs};
use sigil_score::explain_legitimacy_score;

use crate::config::SigilConfig;
use crate::output::{format_json, format_table, OutputFormat};

/// Legitimacy scoring command.
#[derive(Debug, Args)]
pub struct ScoreCmd {
    /// Path to a gathered ScoringInputs JSON snapshot.
    #[arg()]
    pub input: String,
}

#[derive(Tabled)]
struct DimensionRow {
    dimension: &'static str,
    normalized: String,
    weight: String,
    weighted: String,
}

impl DimensionRow {
    fn new(dimension: &'static str, score: &DimensionScore) -> Self {
        Self {
            dimension,
            normalized: format!("{:.3}", score.normalized),
            weight: format!("{:.2}", score.weight),
            weighted: format!("{:.3}", score.weighted),
        }
    }
}

/// Run the score command.
pub async fn run(
    cmd: &ScoreCmd,
    config: &SigilConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(&cmd.input)?;
    let inputs: ScoringInputs = serde_json::from_str(&contents)?;
    let report = explain_legitimacy_score(&inputs, &config.scoring);

    if format == OutputFormat::Json {
        println!("{}", format_json(&report));
        return Ok(());
    }

    let b = &report.breakdown;
    let rows = vec![
        DimensionRow::new("identity", &b.identity),
        DimensionRow::new("wallet", &b.wallet),
        DimensionRow::new("social", &b.social),
        DimensionRow::new("ens", &b.ens),
        DimensionRow::new("memory", &b.memory),
        DimensionRow::new("external", &b.external),
        DimensionRow::new("overlap", &b.overlap),
    ];

    println!("Legitimacy score: {}", report.score);
    if inputs.degraded {
        println!("  (one or more sources degraded during gathering)");
    }
    if let Some(reason) = &report.meta.reason {
        println!("  Reason: {}", reason);
    }
    println!(
        "  Identities: {} ({} verified, {} platforms), claims: {}",
        report.meta.identity_count,
        report.meta.verified_count,
        report.meta.platform_count,
        report.meta.claim_count
    );
    println!();
    println!("{}", format_table(&rows));

    Ok(())
}
