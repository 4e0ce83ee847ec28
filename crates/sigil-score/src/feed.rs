// crates/sigil-score/src/feed.rs
//
// Feed-ranking math: exponential freshness decay over a subject's most
// recent weighted activity signal, blended with legitimacy and engagement
// into a single feed score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sigil_core::ActivitySignal;

use crate::scale::clamp01;

/// Blend weights for the final feed score. Re-normalized before use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FeedWeights {
    #[serde(default = "default_legitimacy")]
    pub legitimacy: f64,
    #[serde(default = "default_engagement")]
    pub engagement: f64,
    #[serde(default = "default_freshness")]
    pub freshness: f64,
}

fn default_legitimacy() -> f64 {
    0.55
}
fn default_engagement() -> f64 {
    0.35
}
fn default_freshness() -> f64 {
    0.10
}

impl Default for FeedWeights {
    fn default() -> Self {
        Self {
            legitimacy: default_legitimacy(),
            engagement: default_engagement(),
            freshness: default_freshness(),
        }
    }
}

impl FeedWeights {
    /// Clamp negatives to zero and re-normalize to sum to 1.0, falling back
    /// to the defaults when everything resolves to zero.
    pub fn resolve(&self) -> Self {
        let clamp = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
        let legitimacy = clamp(self.legitimacy);
        let engagement = clamp(self.engagement);
        let freshness = clamp(self.freshness);
        let sum = legitimacy + engagement + freshness;
        if sum <= 0.0 {
            return Self::default();
        }
        Self {
            legitimacy: legitimacy / sum,
            engagement: engagement / sum,
            freshness: freshness / sum,
        }
    }
}

/// Freshness decay configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FreshnessConfig {
    /// Days for the activity signal to decay to roughly half its weight.
    #[serde(default = "default_half_life_days")]
    pub half_life_days: f64,
}

fn default_half_life_days() -> f64 {
    14.0
}

impl Default for FreshnessConfig {
    fn default() -> Self {
        Self {
            half_life_days: default_half_life_days(),
        }
    }
}

/// Freshness in [0,1] for one timestamp.
///
/// Decays exponentially with a 0.2 floor, so old-but-real activity keeps a
/// minimum presence. Missing timestamps are neutral; future timestamps are
/// treated as now.
pub fn freshness_from_timestamp(
    timestamp: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    config: &FreshnessConfig,
) -> f64 {
    let Some(ts) = timestamp else {
        return 0.5;
    };
    if config.half_life_days <= 0.0 {
        return 0.5;
    }
    let age_days = (now - ts).num_seconds() as f64 / 86_400.0;
    if age_days <= 0.0 {
        return 1.0;
    }
    clamp01(0.2 + 0.8 * (-age_days / config.half_life_days).exp())
}

/// Pick the activity signal with the highest kind-weighted freshness.
pub fn select_freshness_signal<'a>(
    signals: &'a [ActivitySignal],
    now: DateTime<Utc>,
    config: &FreshnessConfig,
) -> Option<&'a ActivitySignal> {
    signals.iter().max_by(|a, b| {
        let fa = a.kind.weight() * freshness_from_timestamp(Some(a.timestamp), now, config);
        let fb = b.kind.weight() * freshness_from_timestamp(Some(b.timestamp), now, config);
        fa.partial_cmp(&fb).unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// Overall freshness in [0,1] for a subject's activity signals.
///
/// A recent strong signal (a wallet tx) dominates; a subject whose only
/// recent activity is a weak signal (an identity update) is capped by that
/// signal's weight. No signals at all is neutral.
pub fn subject_freshness(
    signals: &[ActivitySignal],
    now: DateTime<Utc>,
    config: &FreshnessConfig,
) -> f64 {
    if signals.is_empty() {
        return 0.5;
    }
    signals
        .iter()
        .map(|s| s.kind.weight() * freshness_from_timestamp(Some(s.timestamp), now, config))
        .fold(0.0, f64::max)
        .clamp(0.0, 1.0)
}

/// Blend legitimacy, engagement, and freshness into a 0..=100 feed score,
/// rounded to the nearest integer.
pub fn blend_feed_score(
    legitimacy: u32,
    engagement: u32,
    freshness: f64,
    weights: &FeedWeights,
) -> f64 {
    let w = weights.resolve();
    let score = w.legitimacy * legitimacy.min(100) as f64
        + w.engagement * engagement.min(100) as f64
        + w.freshness * clamp01(freshness) * 100.0;
    score.clamp(0.0, 100.0).round()
}

/// Stable descending sort by a score projection. NaN scores sink to the end.
pub fn sort_ranked<T, F: Fn(&T) -> f64>(items: &mut [T], score: F) {
    items.sort_by(|a, b| {
        let (sa, sb) = (score(a), score(b));
        sb.partial_cmp(&sa).unwrap_or_else(|| {
            if sa.is_nan() && !sb.is_nan() {
                std::cmp::Ordering::Greater
            } else if !sa.is_nan() && sb.is_nan() {
                std::cmp::Ordering::Less
            } else {
                std::cmp::Ordering::Equal
            }
        })
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sigil_core::ActivityKind;

    fn now() -> DateTime<Utc> {
        "2026-01-15T00:00:00Z".parse().unwrap()
    }

    fn signal(kind: ActivityKind, days_ago: i64) -> ActivitySignal {
        ActivitySignal {
            kind,
            timestamp: now() - Duration::days(days_ago),
        }
    }

    #[test]
    fn freshness_decays_with_a_floor() {
        let cfg = FreshnessConfig::default();
        let fresh = freshness_from_timestamp(Some(now()), now(), &cfg);
        assert!((fresh - 1.0).abs() < 1e-10);

        let two_weeks = freshness_from_timestamp(Some(now() - Duration::days(14)), now(), &cfg);
        // 0.2 + 0.8 / e
        assert!((two_weeks - (0.2 + 0.8 * (-1.0f64).exp())).abs() < 1e-6);

        let ancient = freshness_from_timestamp(Some(now() - Duration::days(3650)), now(), &cfg);
        assert!((ancient - 0.2).abs() < 1e-6);
    }

    #[test]
    fn missing_timestamp_is_neutral_and_future_is_now() {
        let cfg = FreshnessConfig::default();
        assert_eq!(freshness_from_timestamp(None, now(), &cfg), 0.5);
        let future = freshness_from_timestamp(Some(now() + Duration::days(3)), now(), &cfg);
        assert_eq!(future, 1.0);
    }

    #[test]
    fn strong_recent_signal_beats_weak_fresher_one() {
        let cfg = FreshnessConfig::default();
        let signals = vec![
            signal(ActivityKind::EnsUpdate, 0),
            signal(ActivityKind::WalletTx, 3),
        ];
        let best = select_freshness_signal(&signals, now(), &cfg).unwrap();
        assert_eq!(best.kind, ActivityKind::WalletTx);
    }

    #[test]
    fn subject_freshness_neutral_without_signals() {
        assert_eq!(
            subject_freshness(&[], now(), &FreshnessConfig::default()),
            0.5
        );
    }

    #[test]
    fn subject_freshness_tracks_best_weighted_signal() {
        let cfg = FreshnessConfig::default();
        let weak_only = vec![signal(ActivityKind::IdentityUpdate, 0)];
        let strong = vec![signal(ActivityKind::WalletTx, 0)];
        let f_weak = subject_freshness(&weak_only, now(), &cfg);
        let f_strong = subject_freshness(&strong, now(), &cfg);
        assert!((f_weak - 0.4).abs() < 1e-10);
        assert!((f_strong - 1.0).abs() < 1e-10);
    }

    #[test]
    fn blend_uses_default_split() {
        let w = FeedWeights::default();
        let score = blend_feed_score(80, 60, 1.0, &w);
        // 0.55*80 + 0.35*60 + 0.10*100
        assert!((score - 75.0).abs() < 1e-9);
    }

    #[test]
    fn blend_rounds_to_whole_points() {
        let w = FeedWeights::default();
        // 0.55*61 + 0.35*0 + 0.10*20 = 35.55
        assert_eq!(blend_feed_score(61, 0, 0.2, &w), 36.0);
    }

    #[test]
    fn blend_renormalizes_partial_weights() {
        let w = FeedWeights {
            legitimacy: 1.0,
            engagement: 0.0,
            freshness: 0.0,
        };
        assert!((blend_feed_score(70, 0, 0.0, &w) - 70.0).abs() < 1e-9);

        let zeroed = FeedWeights {
            legitimacy: 0.0,
            engagement: 0.0,
            freshness: 0.0,
        };
        // Falls back to the default split.
        assert!((blend_feed_score(80, 60, 1.0, &zeroed) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn sort_ranked_is_stable_and_descending() {
        let mut items = vec![("a", 50.0), ("b", 80.0), ("c", 50.0), ("d", f64::NAN)];
        sort_ranked(&mut items, |(_, s)| *s);
        let order: Vec<&str> = items.iter().map(|(n, _)| *n).collect();
        assert_eq!(order, vec!["b", "a", "c", "d"]);
    }
}
