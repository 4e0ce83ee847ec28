// crates/sigil-gather/src/feed.rs
//
// Feed ranking driver: scores each gathered subject on legitimacy,
// engagement, and freshness, blends them, and sorts the result.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sigil_core::{ActivitySignal, ScoringInputs};
use sigil_score::{
    blend_feed_score, compute_engagement_rank, compute_legitimacy_score, sort_ranked,
    subject_freshness, FeedWeights, FreshnessConfig, ScoringOptions,
};
use tokio::task::JoinSet;

/// One feed candidate: gathered inputs plus dated activity signals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSubject {
    pub key: String,
    pub inputs: ScoringInputs,
    #[serde(default)]
    pub signals: Vec<ActivitySignal>,
}

/// Configuration for a feed ranking run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedOptions {
    #[serde(default)]
    pub weights: FeedWeights,
    #[serde(default)]
    pub freshness: FreshnessConfig,
    #[serde(default)]
    pub scoring: ScoringOptions,
    /// Fixed evaluation time; wall-clock now when absent.
    pub now: Option<DateTime<Utc>>,
}

/// One ranked feed entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredSubject {
    pub key: String,
    pub legitimacy: u32,
    pub engagement: u32,
    /// Freshness in [0,1].
    pub freshness: f64,
    /// Blended feed score, 0..=100.
    pub feed_score: f64,
    pub degraded: bool,
}

/// Scores and sorts feed subjects.
#[derive(Clone)]
pub struct FeedRanker {
    options: Arc<FeedOptions>,
}

impl FeedRanker {
    pub fn new(options: FeedOptions) -> Self {
        Self {
            options: Arc::new(options),
        }
    }

    /// Score a single subject.
    ///
    /// An empty subject key is a caller bug and scores all-zero. A subject
    /// with no identities is merely unknown: legitimacy is 0 by the
    /// aggregator's rule and freshness is neutral, so it sinks without
    /// vanishing entirely.
    pub fn score_subject(&self, subject: &FeedSubject) -> ScoredSubject {
        if subject.key.trim().is_empty() {
            return ScoredSubject {
                key: subject.key.clone(),
                legitimacy: 0,
                engagement: 0,
                freshness: 0.0,
                feed_score: 0.0,
                degraded: subject.inputs.degraded,
            };
        }

        let now = self.options.now.unwrap_or_else(Utc::now);
        let legitimacy = compute_legitimacy_score(&subject.inputs, &self.options.scoring);
        let engagement = compute_engagement_rank(&subject.inputs).score;
        let freshness = if subject.inputs.identities.is_empty() {
            0.5
        } else {
            subject_freshness(&subject.signals, now, &self.options.freshness)
        };
        let feed_score =
            blend_feed_score(legitimacy, engagement, freshness, &self.options.weights);
        ScoredSubject {
            key: subject.key.clone(),
            legitimacy,
            engagement,
            freshness,
            feed_score,
            degraded: subject.inputs.degraded,
        }
    }

    /// Score all subjects concurrently and return them sorted by feed score,
    /// descending. Ties keep the input order.
    pub async fn rank(&self, subjects: Vec<FeedSubject>) -> Vec<ScoredSubject> {
        let mut set = JoinSet::new();
        for (index, subject) in subjects.into_iter().enumerate() {
            let ranker = self.clone();
            set.spawn(async move { (index, ranker.score_subject(&subject)) });
        }

        let mut indexed = Vec::new();
        while let Some(result) = set.join_next().await {
            match result {
                Ok(pair) => indexed.push(pair),
                Err(err) => tracing::warn!("feed scoring task failed: {}", err),
            }
        }

        // Restore input order before the stable sort so ties are broken by
        // the caller's ordering, not task completion order.
        indexed.sort_by_key(|(index, _)| *index);
        let mut scored: Vec<ScoredSubject> = indexed.into_iter().map(|(_, s)| s).collect();
        sort_ranked(&mut scored, |s| s.feed_score);
        scored
    }
}
