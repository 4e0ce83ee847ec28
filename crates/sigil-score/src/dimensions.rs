// crates/sigil-score/src/dimensions.rs
//
// The seven dimension normalizers. Each maps one slice of ScoringInputs to
// [0,1]. Unknown signals (None) normalize to a neutral 0.5; a present zero
// is scored as the weak signal it is.

use serde::{Deserialize, Serialize};
use sigil_core::{EnsStatus, ScoringInputs};

use crate::prepare::identity_consistency;
use crate::scale::{clamp01, linear_ratio, scale_by_quantiles, Quantiles};
use crate::weights::DimensionWeights;

/// Fixed-threshold fallbacks used when no distribution stats are available.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreThresholds {
    /// Wallet age granting full age credit.
    #[serde(default = "default_wallet_age_days_full")]
    pub wallet_age_days_full: f64,
    /// Transaction count granting full tx credit (linear fallback).
    #[serde(default = "default_wallet_tx_full")]
    pub wallet_tx_full: f64,
    /// log10(gas + 1) granting full gas credit.
    #[serde(default = "default_wallet_gas_log_full")]
    pub wallet_gas_log_full: f64,
    /// ENS name age granting full age credit.
    #[serde(default = "default_ens_age_days_full")]
    pub ens_age_days_full: f64,
    /// Renewal count granting full renewal credit.
    #[serde(default = "default_ens_renewals_full")]
    pub ens_renewals_full: f64,
    /// Claim count granting full memory-claims credit.
    #[serde(default = "default_memory_claims_full")]
    pub memory_claims_full: f64,
    /// Token balance granting full memory-balance credit.
    #[serde(default = "default_memory_balance_full")]
    pub memory_balance_full: f64,
    /// Platform count granting full richness credit.
    #[serde(default = "default_platform_soft_cap")]
    pub platform_soft_cap: f64,
    /// Platform count past which additional platforms stop counting.
    #[serde(default = "default_platform_hard_cap")]
    pub platform_hard_cap: f64,
    /// log10(followers + 1) granting full reach credit (linear fallback).
    #[serde(default = "default_social_follower_log_full")]
    pub social_follower_log_full: f64,
}

fn default_wallet_age_days_full() -> f64 {
    365.0
}
fn default_wallet_tx_full() -> f64 {
    200.0
}
fn default_wallet_gas_log_full() -> f64 {
    1.0
}
fn default_ens_age_days_full() -> f64 {
    365.0
}
fn default_ens_renewals_full() -> f64 {
    3.0
}
fn default_memory_claims_full() -> f64 {
    10.0
}
fn default_memory_balance_full() -> f64 {
    10_000.0
}
fn default_platform_soft_cap() -> f64 {
    5.0
}
fn default_platform_hard_cap() -> f64 {
    10.0
}
fn default_social_follower_log_full() -> f64 {
    6.0
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            wallet_age_days_full: default_wallet_age_days_full(),
            wallet_tx_full: default_wallet_tx_full(),
            wallet_gas_log_full: default_wallet_gas_log_full(),
            ens_age_days_full: default_ens_age_days_full(),
            ens_renewals_full: default_ens_renewals_full(),
            memory_claims_full: default_memory_claims_full(),
            memory_balance_full: default_memory_balance_full(),
            platform_soft_cap: default_platform_soft_cap(),
            platform_hard_cap: default_platform_hard_cap(),
            social_follower_log_full: default_social_follower_log_full(),
        }
    }
}

/// Empirical distribution breakpoints for the heavy-tailed metrics.
///
/// When a metric's quantiles are absent or degenerate the normalizer falls
/// back to the matching fixed threshold in [`ScoreThresholds`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DistributionStats {
    /// Population quantiles of wallet transaction counts.
    pub tx_count_quantiles: Option<Quantiles>,
    /// Population quantiles of per-identity log10(followers + 1).
    pub follower_log_quantiles: Option<Quantiles>,
}

/// Full configuration for one legitimacy-scoring call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringOptions {
    #[serde(default)]
    pub weights: DimensionWeights,
    #[serde(default)]
    pub thresholds: ScoreThresholds,
    #[serde(default)]
    pub stats: DistributionStats,
}

/// Whether an ENS metadata record carries usable signals.
fn ens_usable(inputs: &ScoringInputs) -> Option<&sigil_core::EnsData> {
    inputs
        .ens_data
        .as_ref()
        .filter(|d| matches!(d.status, EnsStatus::Ok | EnsStatus::Fallback))
}

/// Long-lived-naming anchor in [0,1]: rewards an aged ENS name and a
/// basename, both cheap to hold but annoying to farm at scale.
fn naming_anchor(inputs: &ScoringInputs, thresholds: &ScoreThresholds) -> f64 {
    let mut anchor = if let Some(ens) = ens_usable(inputs) {
        ens.name_age_days
            .map(|d| linear_ratio(d, thresholds.ens_age_days_full))
            .unwrap_or(0.5)
    } else if inputs.ens_name.is_some() {
        0.3
    } else {
        0.0
    };
    if inputs.bns_name.is_some() {
        anchor += 0.1;
    }
    clamp01(anchor)
}

/// Diminishing-returns credit for breadth of linked platforms.
fn platform_richness(platform_count: usize, thresholds: &ScoreThresholds) -> f64 {
    if thresholds.platform_soft_cap <= 0.0 {
        return 0.0;
    }
    let capped = (platform_count as f64).min(thresholds.platform_hard_cap);
    clamp01((capped / thresholds.platform_soft_cap).sqrt())
}

/// Count of distinct platforms across the identity list.
pub fn distinct_platforms(inputs: &ScoringInputs) -> usize {
    let mut platforms: Vec<&str> = inputs.identities.iter().map(|i| i.platform.as_str()).collect();
    platforms.sort_unstable();
    platforms.dedup();
    platforms.len()
}

/// Identity dimension: verification depth, platform breadth, cross-platform
/// behavior consistency, and the naming anchor.
///
/// When an upstream identity-trust score is present it dominates the blend;
/// otherwise the structural signals carry the full weight.
pub fn identity_dimension(inputs: &ScoringInputs, thresholds: &ScoreThresholds) -> f64 {
    if inputs.identities.is_empty() {
        return 0.0;
    }

    let verified = inputs.identities.iter().filter(|i| i.is_verified()).count();
    let verification_ratio = verified as f64 / inputs.identities.len() as f64;
    let richness = platform_richness(distinct_platforms(inputs), thresholds);
    let consistency = inputs
        .consistency_score
        .map(clamp01)
        .unwrap_or_else(|| identity_consistency(&inputs.identities).blended());
    let anchor = naming_anchor(inputs, thresholds);

    let structural =
        0.45 * verification_ratio + 0.25 * richness + 0.20 * consistency + 0.10 * anchor;

    match inputs.identity_trust {
        Some(trust) => {
            let trust = clamp01(trust);
            let blended_trust = (trust + consistency) / 2.0;
            let legacy = (verification_ratio + consistency) / 2.0;
            clamp01(0.6 * blended_trust + 0.2 * legacy + 0.1 * richness + 0.1 * anchor)
        }
        None => clamp01(structural),
    }
}

/// Wallet dimension: age, transaction count (quantile-scaled when stats are
/// present), and log-scaled gas spend.
pub fn wallet_dimension(
    inputs: &ScoringInputs,
    thresholds: &ScoreThresholds,
    stats: &DistributionStats,
) -> f64 {
    let activity = &inputs.wallet_activity;

    let age = activity
        .age_days
        .map(|d| linear_ratio(d, thresholds.wallet_age_days_full));
    let tx = activity.tx_count.map(|n| {
        scale_by_quantiles(n as f64, stats.tx_count_quantiles.as_ref())
            .unwrap_or_else(|| linear_ratio(n as f64, thresholds.wallet_tx_full))
    });
    let gas = activity.gas_spent.map(|g| {
        if g > 0.0 {
            linear_ratio((g + 1.0).log10(), thresholds.wallet_gas_log_full)
        } else {
            0.3
        }
    });

    // Gas data is frequently unavailable upstream, so its weight folds into
    // the age/tx split; a missing age or tx count still contributes neutral
    // 0.5 at its weight.
    let pairs: Vec<(Option<f64>, f64)> = if gas.is_some() {
        vec![(age, 0.4), (tx, 0.35), (gas, 0.25)]
    } else {
        vec![(age, 0.6), (tx, 0.4)]
    };

    let acc: f64 = pairs
        .into_iter()
        .map(|(component, weight)| component.unwrap_or(0.5) * weight)
        .sum();
    clamp01(acc)
}

/// Social dimension: audience reach blended with audience quality.
pub fn social_dimension(
    inputs: &ScoringInputs,
    thresholds: &ScoreThresholds,
    stats: &DistributionStats,
) -> f64 {
    let follower_logs: Vec<f64> = inputs
        .identities
        .iter()
        .filter_map(|i| i.social.followers)
        .map(|f| (f as f64 + 1.0).log10())
        .collect();

    let reach = if follower_logs.is_empty() {
        0.5
    } else {
        let avg_log = follower_logs.iter().sum::<f64>() / follower_logs.len() as f64;
        scale_by_quantiles(avg_log, stats.follower_log_quantiles.as_ref())
            .unwrap_or_else(|| linear_ratio(avg_log, thresholds.social_follower_log_full))
    };

    let quality = inputs.follower_quality.ratio();
    clamp01(0.6 * reach + 0.4 * quality)
}

/// ENS dimension: name age and renewal history; neutral without usable
/// metadata.
pub fn ens_dimension(inputs: &ScoringInputs, thresholds: &ScoreThresholds) -> f64 {
    let Some(ens) = ens_usable(inputs) else {
        return 0.5;
    };

    let age = ens
        .name_age_days
        .map(|d| linear_ratio(d, thresholds.ens_age_days_full))
        .unwrap_or(0.5);
    let renewals = ens
        .renewal_count
        .map(|n| linear_ratio(n as f64, thresholds.ens_renewals_full))
        .unwrap_or(0.5);

    clamp01(0.7 * age + 0.3 * renewals)
}

/// Memory dimension: reward-claim history and token balance.
pub fn memory_dimension(inputs: &ScoringInputs, thresholds: &ScoreThresholds) -> f64 {
    let onchain = &inputs.onchain;
    if onchain.balance.is_none() && onchain.claims.is_empty() {
        return 0.5;
    }

    let claims = linear_ratio(onchain.claims.len() as f64, thresholds.memory_claims_full);
    let balance = onchain
        .balance
        .map(|b| linear_ratio(b, thresholds.memory_balance_full))
        .unwrap_or(0.5);

    clamp01(0.6 * claims + 0.4 * balance)
}

/// External-reputation dimension: pass-through, neutral when absent.
pub fn external_dimension(inputs: &ScoringInputs) -> f64 {
    inputs.external_reputation.map(clamp01).unwrap_or(0.5)
}

/// Mutual-overlap dimension: pass-through, neutral when absent.
pub fn overlap_dimension(inputs: &ScoringInputs) -> f64 {
    inputs.mutual_overlap.map(clamp01).unwrap_or(0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigil_core::{EnsData, Identity, SocialStats, SourceRecord, WalletActivity};

    fn verified_identity(platform: &str) -> Identity {
        let mut ident = Identity::new(platform);
        ident.sources.push(SourceRecord {
            kind: "oauth".to_string(),
            verified: true,
        });
        ident
    }

    fn inputs_with_identities(identities: Vec<Identity>) -> ScoringInputs {
        ScoringInputs {
            identities,
            ..ScoringInputs::default()
        }
    }

    #[test]
    fn identity_zero_without_identities() {
        let inputs = ScoringInputs::default();
        assert_eq!(identity_dimension(&inputs, &ScoreThresholds::default()), 0.0);
    }

    #[test]
    fn identity_rewards_verification_and_breadth() {
        let sparse = inputs_with_identities(vec![Identity::new("website")]);
        let rich = inputs_with_identities(vec![
            verified_identity("twitter"),
            verified_identity("farcaster"),
            verified_identity("lens"),
            verified_identity("github"),
            verified_identity("ethereum"),
        ]);
        let t = ScoreThresholds::default();
        assert!(identity_dimension(&rich, &t) > identity_dimension(&sparse, &t));
    }

    #[test]
    fn identity_trust_path_dominates_when_present() {
        let mut inputs = inputs_with_identities(vec![Identity::new("website")]);
        inputs.identity_trust = Some(1.0);
        inputs.consistency_score = Some(1.0);
        let t = ScoreThresholds::default();
        let with_trust = identity_dimension(&inputs, &t);

        inputs.identity_trust = None;
        let without = identity_dimension(&inputs, &t);
        assert!(with_trust > without);
    }

    #[test]
    fn wallet_full_credit_at_thresholds() {
        let mut inputs = ScoringInputs::default();
        inputs.wallet_activity = WalletActivity {
            age_days: Some(365.0),
            tx_count: Some(300),
            gas_spent: None,
        };
        let v = wallet_dimension(&inputs, &ScoreThresholds::default(), &DistributionStats::default());
        assert!((v - 1.0).abs() < 1e-10);
    }

    #[test]
    fn wallet_neutral_without_signals() {
        let inputs = ScoringInputs::default();
        let v = wallet_dimension(&inputs, &ScoreThresholds::default(), &DistributionStats::default());
        assert!((v - 0.5).abs() < 1e-10);
    }

    #[test]
    fn wallet_uses_quantiles_when_present() {
        let mut inputs = ScoringInputs::default();
        inputs.wallet_activity.tx_count = Some(12);
        let stats = DistributionStats {
            tx_count_quantiles: Some(Quantiles {
                p50: 12.0,
                p75: 55.0,
                p90: 200.0,
            }),
            follower_log_quantiles: None,
        };
        // tx at p50 scales to 0.4; the missing age is neutral:
        // 0.6 * 0.5 + 0.4 * 0.4
        let v = wallet_dimension(&inputs, &ScoreThresholds::default(), &stats);
        assert!((v - 0.46).abs() < 1e-10);
    }

    #[test]
    fn missing_tx_count_contributes_neutral_not_full_weight() {
        let mut inputs = ScoringInputs::default();
        inputs.wallet_activity = WalletActivity {
            age_days: Some(365.0),
            tx_count: None,
            gas_spent: None,
        };
        // 0.6 * 1.0 + 0.4 * 0.5: an age-only wallet must not collect full
        // credit for activity it never showed.
        let v = wallet_dimension(&inputs, &ScoreThresholds::default(), &DistributionStats::default());
        assert!((v - 0.8).abs() < 1e-10);
    }

    #[test]
    fn zero_gas_scores_below_real_spend() {
        let t = ScoreThresholds::default();
        let stats = DistributionStats::default();
        let mut zero = ScoringInputs::default();
        zero.wallet_activity = WalletActivity {
            age_days: Some(365.0),
            tx_count: Some(200),
            gas_spent: Some(0.0),
        };
        let mut spent = zero.clone();
        spent.wallet_activity.gas_spent = Some(10.0);
        assert!(wallet_dimension(&spent, &t, &stats) > wallet_dimension(&zero, &t, &stats));
    }

    #[test]
    fn social_blends_reach_and_quality() {
        let mut ident = Identity::new("twitter");
        ident.social = SocialStats {
            followers: Some(999_999),
            following: None,
            engagement_rate: None,
        };
        let mut inputs = inputs_with_identities(vec![ident]);
        inputs.follower_quality = sigil_core::FollowerQuality {
            real_followers: 1.0,
            bot_followers: 0.0,
        };
        // reach = log10(1e6)/6 = 1.0, quality = 1.0
        let v = social_dimension(&inputs, &ScoreThresholds::default(), &DistributionStats::default());
        assert!((v - 1.0).abs() < 1e-6);
    }

    #[test]
    fn ens_neutral_without_usable_metadata() {
        let inputs = ScoringInputs::default();
        assert_eq!(ens_dimension(&inputs, &ScoreThresholds::default()), 0.5);

        let mut inputs = ScoringInputs::default();
        inputs.ens_data = Some(EnsData {
            name: "ghost.eth".to_string(),
            name_age_days: Some(1000.0),
            renewal_count: Some(5),
            address: None,
            source: None,
            status: EnsStatus::NotFound,
            reason: None,
        });
        assert_eq!(ens_dimension(&inputs, &ScoreThresholds::default()), 0.5);
    }

    #[test]
    fn ens_full_credit_for_aged_renewed_name() {
        let mut inputs = ScoringInputs::default();
        inputs.ens_data = Some(EnsData {
            name: "alice.eth".to_string(),
            name_age_days: Some(900.0),
            renewal_count: Some(4),
            address: None,
            source: Some("registry".to_string()),
            status: EnsStatus::Ok,
            reason: None,
        });
        let v = ens_dimension(&inputs, &ScoreThresholds::default());
        assert!((v - 1.0).abs() < 1e-10);
    }

    #[test]
    fn memory_neutral_without_any_onchain_data() {
        let inputs = ScoringInputs::default();
        assert_eq!(memory_dimension(&inputs, &ScoreThresholds::default()), 0.5);
    }

    #[test]
    fn memory_scores_claims_and_balance() {
        let mut inputs = ScoringInputs::default();
        inputs.onchain = sigil_core::OnchainData::from_parts(
            Some(5000.0),
            (0..5)
                .map(|i| sigil_core::Claim {
                    amount: 10.0,
                    block_number: Some(i),
                    tx_hash: None,
                    timestamp: None,
                    source: "onchain".to_string(),
                })
                .collect(),
        );
        // 0.6 * 0.5 + 0.4 * 0.5 = 0.5, but from real evidence this time.
        let v = memory_dimension(&inputs, &ScoreThresholds::default());
        assert!((v - 0.5).abs() < 1e-10);
    }

    #[test]
    fn passthrough_dimensions_clamp_and_default() {
        let mut inputs = ScoringInputs::default();
        assert_eq!(external_dimension(&inputs), 0.5);
        assert_eq!(overlap_dimension(&inputs), 0.5);

        inputs.external_reputation = Some(1.7);
        inputs.mutual_overlap = Some(-0.2);
        assert_eq!(external_dimension(&inputs), 1.0);
        assert_eq!(overlap_dimension(&inputs), 0.0);
    }
}
