// crates/sigil-gather/src/matchrun.rs
//
// Match driver: gathers both subjects concurrently and runs the matching
// engine over the assembled envelopes and graph sets.

use sigil_match::{explain_match, match_subjects, MatchReport, MatchWeights};
use sigil_score::ScoringOptions;

use crate::inputs::InputGatherer;

/// Runs two-sided match comparisons on top of an [`InputGatherer`].
#[derive(Clone)]
pub struct MatchRunner {
    gatherer: InputGatherer,
    weights: MatchWeights,
    options: ScoringOptions,
}

/// A match report plus its rendered explanation lines.
#[derive(Debug, Clone)]
pub struct ExplainedMatch {
    pub report: MatchReport,
    pub explanation: Vec<String>,
}

impl MatchRunner {
    pub fn new(gatherer: InputGatherer, weights: MatchWeights, options: ScoringOptions) -> Self {
        Self {
            gatherer,
            weights,
            options,
        }
    }

    /// Gather and compare two subjects.
    pub async fn match_wallets(&self, left: &str, right: &str) -> ExplainedMatch {
        let (a, b) = tokio::join!(
            self.gatherer.gather_match_subject(left),
            self.gatherer.gather_match_subject(right)
        );

        let report = match_subjects(&a, &b, &self.weights, &self.options);
        tracing::info!(
            "matched {} vs {} -> {}",
            report.left,
            report.right,
            report.score
        );
        let explanation = explain_match(&report);
        ExplainedMatch {
            report,
            explanation,
        }
    }
}
