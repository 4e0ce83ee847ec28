// crates/sigil-score/src/lib.rs
//
// sigil-score: The pure scoring core. Quantile scaling, the seven
// legitimacy dimension normalizers, the legitimacy aggregator, the
// engagement rank, gather-time input heuristics, and the feed-ranking
// math. Everything here is deterministic and synchronous; the async
// gathering layer lives in sigil-gather.

pub mod dimensions;
pub mod engagement;
pub mod feed;
pub mod legitimacy;
pub mod prepare;
pub mod scale;
pub mod weights;

pub use dimensions::{DistributionStats, ScoreThresholds, ScoringOptions};
pub use engagement::{
    compute_engagement_rank, platform_weight, EngagementBreakdown, EngagementLabel, EngagementRank,
};
pub use feed::{
    blend_feed_score, freshness_from_timestamp, select_freshness_signal, sort_ranked,
    subject_freshness, FeedWeights, FreshnessConfig,
};
pub use legitimacy::{compute_legitimacy_score, explain_legitimacy_score};
pub use prepare::{follower_quality, identity_consistency, social_overlap, IdentityConsistency};
pub use scale::{clamp01, linear_ratio, scale_by_quantiles, Quantiles};
pub use weights::DimensionWeights;
