// crates/sigil-core/src/breakdown.rs
//
// Explainability output of the legitimacy aggregator: the final 0-100 score
// plus the per-dimension normalized/weight/weighted triples and diagnostic
// meta counts that let a caller see why a subject scored what it did.

use serde::{Deserialize, Serialize};

/// One dimension's contribution to the final score.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DimensionScore {
    /// Normalized dimension value in [0,1].
    pub normalized: f64,
    /// Resolved weight in [0,1] (weights sum to 1 across dimensions).
    pub weight: f64,
    /// `normalized * weight`.
    pub weighted: f64,
}

impl DimensionScore {
    pub fn new(normalized: f64, weight: f64) -> Self {
        Self {
            normalized,
            weight,
            weighted: normalized * weight,
        }
    }
}

/// Per-dimension breakdown across the seven legitimacy dimensions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DimensionBreakdown {
    pub identity: DimensionScore,
    pub wallet: DimensionScore,
    pub social: DimensionScore,
    pub ens: DimensionScore,
    pub memory: DimensionScore,
    pub external: DimensionScore,
    pub overlap: DimensionScore,
}

impl DimensionBreakdown {
    /// Sum of the weighted contributions.
    pub fn weighted_sum(&self) -> f64 {
        self.identity.weighted
            + self.wallet.weighted
            + self.social.weighted
            + self.ens.weighted
            + self.memory.weighted
            + self.external.weighted
            + self.overlap.weighted
    }
}

/// Diagnostic counts attached to a score for explainability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BreakdownMeta {
    /// Number of linked identities considered.
    pub identity_count: usize,
    /// Number of verified identities.
    pub verified_count: usize,
    /// Number of distinct platforms.
    pub platform_count: usize,
    /// Number of reward claims considered.
    pub claim_count: usize,
    /// Set on defined terminal states (e.g. "no-identities-or-profile").
    pub reason: Option<String>,
}

/// Full output of `explain_legitimacy_score`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Final legitimacy score in 0..=100.
    pub score: u32,
    /// Per-dimension contributions.
    pub breakdown: DimensionBreakdown,
    /// Diagnostic meta.
    pub meta: BreakdownMeta,
}
