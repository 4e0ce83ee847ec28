// crates/sigil-score/src/engagement.rs
//
// Engagement rank: a 0..=100 influence score over a subject's linked
// identities, with a population-percentile approximation and a coarse
// label. Distinct from legitimacy: this measures reach and activity, not
// whether the subject is who they claim to be.

use serde::{Deserialize, Serialize};
use sigil_core::ScoringInputs;

use crate::prepare::social_overlap;
use crate::scale::clamp01;

/// Platform weight for engagement evidence. Broadcast platforms where an
/// audience is hard to fake count more than passive link types.
pub fn platform_weight(platform: &str) -> f64 {
    match platform {
        "twitter" | "x" => 1.3,
        "youtube" => 1.25,
        "lens" | "instagram" | "tiktok" => 1.2,
        "farcaster" => 1.15,
        "zora" => 1.1,
        "github" => 1.05,
        "ethereum" | "ens" => 0.8,
        "website" => 0.6,
        "email" => 0.4,
        _ => 0.75,
    }
}

/// Coarse engagement tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngagementLabel {
    Elite,
    High,
    Rising,
    Active,
    Emerging,
    Developing,
    Dormant,
    NoData,
}

impl std::fmt::Display for EngagementLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EngagementLabel::Elite => "elite",
            EngagementLabel::High => "high",
            EngagementLabel::Rising => "rising",
            EngagementLabel::Active => "active",
            EngagementLabel::Emerging => "emerging",
            EngagementLabel::Developing => "developing",
            EngagementLabel::Dormant => "dormant",
            EngagementLabel::NoData => "no-data",
        };
        f.write_str(s)
    }
}

/// Intermediate engagement evidence, surfaced for explanation output.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EngagementBreakdown {
    /// Sum of platform-weighted log follower mass, unbounded above.
    pub follower_component: f64,
    /// Verification multiplier in [1.0, 1.5].
    pub reliability_multiplier: f64,
    /// Handle-reuse bonus, capped at 0.12.
    pub consistency_bonus: f64,
    /// Claims/balance bonus, capped at 0.25.
    pub onchain_bonus: f64,
    /// Pre-sigmoid raw score.
    pub raw: f64,
}

/// Engagement rank output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementRank {
    /// Final score, 0..=100.
    pub score: u32,
    /// Approximate population percentile (lower is better; 1 means top 1%).
    pub percentile_approx: f64,
    pub label: EngagementLabel,
    pub breakdown: EngagementBreakdown,
}

/// Logistic rescale of the raw engagement total.
///
/// Centers at raw 50 and compresses the extremes, so mid-range subjects are
/// spread out while outliers saturate around the low 90s.
fn sigmoid_rescale(raw: f64) -> f64 {
    (100.0 / (1.0 + (-0.07 * (raw - 50.0)).exp()) - 5.0).clamp(0.0, 100.0)
}

/// Percentile approximation from the score alone. The mild power keeps the
/// estimate conservative at the top of the scale.
fn approximate_percentile(score: f64) -> f64 {
    let score = score.clamp(0.0, 100.0);
    (100.0 - score.powf(1.05) / 100.0f64.powf(1.05) * 100.0).clamp(0.0, 100.0)
}

fn label_for(score: f64, percentile: f64) -> EngagementLabel {
    if score >= 90.0 {
        EngagementLabel::Elite
    } else if score >= 75.0 {
        if percentile <= 20.0 {
            EngagementLabel::High
        } else {
            EngagementLabel::Rising
        }
    } else if score >= 60.0 {
        EngagementLabel::Active
    } else if score >= 40.0 {
        EngagementLabel::Emerging
    } else if score >= 20.0 {
        EngagementLabel::Developing
    } else {
        EngagementLabel::Dormant
    }
}

/// Rank a subject's engagement from its gathered inputs.
///
/// Raw score is a platform-weighted sum of log follower mass, multiplied by
/// a verification reliability factor and by the consistency and on-chain
/// bonuses. An identity with no follower data still counts log10(10) = 1 at
/// its platform weight; only an empty identity list is "no data".
pub fn compute_engagement_rank(inputs: &ScoringInputs) -> EngagementRank {
    if inputs.identities.is_empty() {
        return EngagementRank {
            score: 0,
            percentile_approx: 100.0,
            label: EngagementLabel::NoData,
            breakdown: EngagementBreakdown::default(),
        };
    }

    let follower_component: f64 = inputs
        .identities
        .iter()
        .map(|i| {
            let followers = i.social.followers.unwrap_or(0) as f64;
            platform_weight(&i.platform) * (followers + 10.0).log10()
        })
        .sum();

    let verified = inputs.identities.iter().filter(|i| i.is_verified()).count();
    let verified_ratio = verified as f64 / inputs.identities.len() as f64;
    let reliability_multiplier = 1.0 + (verified_ratio * 0.6).min(0.5);

    let consistency_bonus = (social_overlap(&inputs.identities) * 0.2).min(0.12);

    let claims_part = clamp01(inputs.onchain.claims.len() as f64 / 12.0) * 0.7;
    let balance_part = clamp01(inputs.onchain.balance.unwrap_or(0.0) / 15_000.0) * 0.3;
    let onchain_bonus = (claims_part + balance_part) * 0.25;

    let raw =
        follower_component * reliability_multiplier * (1.0 + consistency_bonus + onchain_bonus);
    let score = sigmoid_rescale(raw);
    let percentile_approx = approximate_percentile(score);

    EngagementRank {
        score: score.round() as u32,
        percentile_approx,
        label: label_for(score, percentile_approx),
        breakdown: EngagementBreakdown {
            follower_component,
            reliability_multiplier,
            consistency_bonus,
            onchain_bonus,
            raw,
        },
    }
}
