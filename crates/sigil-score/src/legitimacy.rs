// crates/sigil-score/src/legitimacy.rs
//
// The legitimacy aggregator: runs the seven dimension normalizers, applies
// the (re-normalized) weight vector, and emits a 0..=100 score with a full
// per-dimension breakdown.

use sigil_core::{BreakdownMeta, DimensionBreakdown, DimensionScore, ScoreBreakdown, ScoringInputs};

use crate::dimensions::{
    distinct_platforms, ens_dimension, external_dimension, identity_dimension, memory_dimension,
    overlap_dimension, social_dimension, wallet_dimension, ScoringOptions,
};

/// Score a subject, returning only the 0..=100 legitimacy score.
pub fn compute_legitimacy_score(inputs: &ScoringInputs, options: &ScoringOptions) -> u32 {
    explain_legitimacy_score(inputs, options).score
}

/// Score a subject with a full per-dimension breakdown.
///
/// A subject with no identities or no profile is unknown, not merely weak:
/// it scores 0 with a reason rather than collecting neutral credit.
pub fn explain_legitimacy_score(inputs: &ScoringInputs, options: &ScoringOptions) -> ScoreBreakdown {
    let weights = options.weights.normalized();
    let meta = meta_for(inputs);

    if inputs.identities.is_empty() || inputs.profile.is_none() {
        return ScoreBreakdown {
            score: 0,
            breakdown: zero_breakdown(&weights),
            meta: BreakdownMeta {
                reason: Some("no-identities-or-profile".to_string()),
                ..meta
            },
        };
    }

    let thresholds = &options.thresholds;
    let stats = &options.stats;

    let breakdown = DimensionBreakdown {
        identity: DimensionScore::new(identity_dimension(inputs, thresholds), weights.identity),
        wallet: DimensionScore::new(
            wallet_dimension(inputs, thresholds, stats),
            weights.wallet,
        ),
        social: DimensionScore::new(
            social_dimension(inputs, thresholds, stats),
            weights.social,
        ),
        ens: DimensionScore::new(ens_dimension(inputs, thresholds), weights.ens),
        memory: DimensionScore::new(memory_dimension(inputs, thresholds), weights.memory),
        external: DimensionScore::new(external_dimension(inputs), weights.external),
        overlap: DimensionScore::new(overlap_dimension(inputs), weights.overlap),
    };

    let score = (breakdown.weighted_sum() * 100.0).round().clamp(0.0, 100.0) as u32;
    ScoreBreakdown {
        score,
        breakdown,
        meta,
    }
}

fn meta_for(inputs: &ScoringInputs) -> BreakdownMeta {
    BreakdownMeta {
        identity_count: inputs.identities.len(),
        verified_count: inputs.identities.iter().filter(|i| i.is_verified()).count(),
        platform_count: distinct_platforms(inputs),
        claim_count: inputs.onchain.claims.len(),
        reason: None,
    }
}

fn zero_breakdown(weights: &crate::weights::DimensionWeights) -> DimensionBreakdown {
    DimensionBreakdown {
        identity: DimensionScore::new(0.0, weights.identity),
        wallet: DimensionScore::new(0.0, weights.wallet),
        social: DimensionScore::new(0.0, weights.social),
        ens: DimensionScore::new(0.0, weights.ens),
        memory: DimensionScore::new(0.0, weights.memory),
        external: DimensionScore::new(0.0, weights.external),
        overlap: DimensionScore::new(0.0, weights.overlap),
    }
}
