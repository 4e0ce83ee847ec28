// crates/sigil-match/src/engine.rs
//
// The matching engine: compares two gathered subjects across ten
// dimensions (set overlap, score closeness, profile-shape similarity) and
// emits a 0..=100 match score with a breakdown and shared-item evidence.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sigil_core::{Identity, ScoringInputs};
use sigil_score::dimensions::ScoringOptions;
use sigil_score::{clamp01, compute_engagement_rank, explain_legitimacy_score};

use crate::similarity::{closeness, cosine, jaccard};

/// Social/on-chain graph sets gathered for one subject.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSets {
    /// Creators the subject has minted or collected from.
    pub creators: BTreeSet<String>,
    /// Accounts the subject follows or is followed by.
    pub social_graph: BTreeSet<String>,
    /// NFT collections the subject holds.
    pub collections: BTreeSet<String>,
    /// Contracts the subject has interacted with.
    pub contracts: BTreeSet<String>,
    /// Wallets linked to the subject's Farcaster account.
    pub farcaster_wallets: BTreeSet<String>,
}

/// One side of a match comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSubject {
    /// Wallet address or ENS name.
    pub key: String,
    pub inputs: ScoringInputs,
    #[serde(default)]
    pub graphs: GraphSets,
}

/// Weights for the ten match dimensions. Re-normalized before use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchWeights {
    #[serde(default = "default_identity")]
    pub identity: f64,
    #[serde(default = "default_platforms")]
    pub platforms: f64,
    #[serde(default = "default_usernames")]
    pub usernames: f64,
    #[serde(default = "default_followers")]
    pub followers: f64,
    #[serde(default = "default_creators")]
    pub creators: f64,
    #[serde(default = "default_onchain")]
    pub onchain: f64,
    #[serde(default = "default_memory")]
    pub memory: f64,
    #[serde(default = "default_ens")]
    pub ens: f64,
    #[serde(default = "default_engagement")]
    pub engagement: f64,
    #[serde(default = "default_farcaster")]
    pub farcaster: f64,
}

fn default_identity() -> f64 {
    0.18
}
fn default_platforms() -> f64 {
    0.07
}
fn default_usernames() -> f64 {
    0.04
}
fn default_followers() -> f64 {
    0.13
}
fn default_creators() -> f64 {
    0.17
}
fn default_onchain() -> f64 {
    0.15
}
fn default_memory() -> f64 {
    0.07
}
fn default_ens() -> f64 {
    0.04
}
fn default_engagement() -> f64 {
    0.07
}
fn default_farcaster() -> f64 {
    0.08
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            identity: default_identity(),
            platforms: default_platforms(),
            usernames: default_usernames(),
            followers: default_followers(),
            creators: default_creators(),
            onchain: default_onchain(),
            memory: default_memory(),
            ens: default_ens(),
            engagement: default_engagement(),
            farcaster: default_farcaster(),
        }
    }
}

impl MatchWeights {
    /// Clamp negatives to zero and re-normalize to sum to 1.0, falling back
    /// to the defaults when everything resolves to zero.
    pub fn normalized(&self) -> Self {
        let clamp = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
        let v = [
            clamp(self.identity),
            clamp(self.platforms),
            clamp(self.usernames),
            clamp(self.followers),
            clamp(self.creators),
            clamp(self.onchain),
            clamp(self.memory),
            clamp(self.ens),
            clamp(self.engagement),
            clamp(self.farcaster),
        ];
        let sum: f64 = v.iter().sum();
        if sum <= 0.0 {
            return Self::default();
        }
        Self {
            identity: v[0] / sum,
            platforms: v[1] / sum,
            usernames: v[2] / sum,
            followers: v[3] / sum,
            creators: v[4] / sum,
            onchain: v[5] / sum,
            memory: v[6] / sum,
            ens: v[7] / sum,
            engagement: v[8] / sum,
            farcaster: v[9] / sum,
        }
    }
}

/// Per-dimension similarity values, each in [0,1].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MatchBreakdown {
    pub identity: f64,
    pub platforms: f64,
    pub usernames: f64,
    pub followers: f64,
    pub creators: f64,
    pub onchain: f64,
    pub memory: f64,
    pub ens: f64,
    pub engagement: f64,
    pub farcaster: f64,
}

impl MatchBreakdown {
    /// Weighted sum in [0,1] under re-normalized weights.
    pub fn weighted_sum(&self, weights: &MatchWeights) -> f64 {
        let w = weights.normalized();
        self.identity * w.identity
            + self.platforms * w.platforms
            + self.usernames * w.usernames
            + self.followers * w.followers
            + self.creators * w.creators
            + self.onchain * w.onchain
            + self.memory * w.memory
            + self.ens * w.ens
            + self.engagement * w.engagement
            + self.farcaster * w.farcaster
    }
}

/// Concrete shared items backing the breakdown, sorted for stable output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchEvidence {
    pub creators: Vec<String>,
    pub collections: Vec<String>,
    pub contracts: Vec<String>,
    pub farcaster_wallets: Vec<String>,
    pub platforms: Vec<String>,
    pub handles: Vec<String>,
}

/// Full output of one match comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub left: String,
    pub right: String,
    /// Final match score, 0..=100.
    pub score: u32,
    pub breakdown: MatchBreakdown,
    pub evidence: MatchEvidence,
}

fn platform_set(identities: &[Identity]) -> BTreeSet<String> {
    identities.iter().map(|i| i.platform.clone()).collect()
}

fn handle_set(identities: &[Identity]) -> BTreeSet<String> {
    identities.iter().filter_map(|i| i.handle()).collect()
}

/// Log-scaled follower counts aligned on the union of both platform sets,
/// so cosine compares audience shape rather than raw magnitude order.
fn follower_vectors(a: &[Identity], b: &[Identity]) -> (Vec<f64>, Vec<f64>) {
    let count_by_platform = |identities: &[Identity]| {
        let mut counts: std::collections::BTreeMap<String, f64> = std::collections::BTreeMap::new();
        for ident in identities {
            if let Some(f) = ident.social.followers {
                *counts.entry(ident.platform.clone()).or_insert(0.0) +=
                    (f as f64 + 1.0).log10();
            }
        }
        counts
    };
    let counts_a = count_by_platform(a);
    let counts_b = count_by_platform(b);

    let platforms: BTreeSet<&String> = counts_a.keys().chain(counts_b.keys()).collect();
    let vec_for = |counts: &std::collections::BTreeMap<String, f64>| {
        platforms
            .iter()
            .map(|p| counts.get(*p).copied().unwrap_or(0.0))
            .collect()
    };
    (vec_for(&counts_a), vec_for(&counts_b))
}

/// Wallet age/transaction vector for on-chain shape comparison.
fn activity_vector(inputs: &ScoringInputs) -> Vec<f64> {
    vec![
        inputs.wallet_activity.age_days.unwrap_or(0.0),
        inputs.wallet_activity.tx_count.unwrap_or(0) as f64,
    ]
}

/// Token balance and claim count. All-zero when the subject has no reward
/// history, which cosine scores as no similarity.
fn memory_vector(inputs: &ScoringInputs) -> Vec<f64> {
    vec![
        inputs.onchain.balance.unwrap_or(0.0),
        inputs.onchain.claims.len() as f64,
    ]
}

/// ENS renewal count and name age, all-zero without metadata.
fn ens_vector(inputs: &ScoringInputs) -> Vec<f64> {
    match &inputs.ens_data {
        Some(d) => vec![
            d.renewal_count.unwrap_or(0) as f64,
            d.name_age_days.unwrap_or(0.0),
        ],
        None => vec![0.0, 0.0],
    }
}

fn shared(a: &BTreeSet<String>, b: &BTreeSet<String>) -> Vec<String> {
    a.intersection(b).cloned().collect()
}

/// Compare two subjects and produce a scored match report.
///
/// Symmetric: `match_subjects(a, b, ..)` and `match_subjects(b, a, ..)`
/// yield the same score.
///
/// The identity dimension blends legitimacy-score closeness with a cosine
/// over the per-dimension breakdowns, so two very different profiles with
/// coincidentally equal scores do not read as identical.
pub fn match_subjects(
    a: &MatchSubject,
    b: &MatchSubject,
    weights: &MatchWeights,
    options: &ScoringOptions,
) -> MatchReport {
    let leg_a = explain_legitimacy_score(&a.inputs, options);
    let leg_b = explain_legitimacy_score(&b.inputs, options);
    let vec_a = dimension_vector(&leg_a.breakdown);
    let vec_b = dimension_vector(&leg_b.breakdown);

    let identity = 0.5 * cosine(&vec_a, &vec_b)
        + 0.5 * closeness(leg_a.score as f64, leg_b.score as f64);

    let platforms_a = platform_set(&a.inputs.identities);
    let platforms_b = platform_set(&b.inputs.identities);
    let handles_a = handle_set(&a.inputs.identities);
    let handles_b = handle_set(&b.inputs.identities);

    let (followers_a, followers_b) = follower_vectors(&a.inputs.identities, &b.inputs.identities);
    let followers = 0.5 * jaccard(&a.graphs.social_graph, &b.graphs.social_graph)
        + 0.5 * cosine(&followers_a, &followers_b);

    let creators = 0.6 * jaccard(&a.graphs.creators, &b.graphs.creators)
        + 0.4 * jaccard(&a.graphs.collections, &b.graphs.collections);

    let onchain = 0.5 * jaccard(&a.graphs.contracts, &b.graphs.contracts)
        + 0.5 * cosine(&activity_vector(&a.inputs), &activity_vector(&b.inputs));

    let memory = cosine(&memory_vector(&a.inputs), &memory_vector(&b.inputs));

    let ens = match (&a.inputs.ens_name, &b.inputs.ens_name) {
        (Some(x), Some(y)) if x.eq_ignore_ascii_case(y) => 1.0,
        _ => cosine(&ens_vector(&a.inputs), &ens_vector(&b.inputs)),
    };

    let engagement = closeness(
        compute_engagement_rank(&a.inputs).score as f64,
        compute_engagement_rank(&b.inputs).score as f64,
    );

    let breakdown = MatchBreakdown {
        identity: clamp01(identity),
        platforms: jaccard(&platforms_a, &platforms_b),
        usernames: jaccard(&handles_a, &handles_b),
        followers: clamp01(followers),
        creators: clamp01(creators),
        onchain: clamp01(onchain),
        memory: clamp01(memory),
        ens: clamp01(ens),
        engagement: clamp01(engagement),
        farcaster: jaccard(&a.graphs.farcaster_wallets, &b.graphs.farcaster_wallets),
    };

    let score = (breakdown.weighted_sum(weights) * 100.0)
        .round()
        .clamp(0.0, 100.0) as u32;

    MatchReport {
        left: a.key.clone(),
        right: b.key.clone(),
        score,
        breakdown,
        evidence: MatchEvidence {
            creators: shared(&a.graphs.creators, &b.graphs.creators),
            collections: shared(&a.graphs.collections, &b.graphs.collections),
            contracts: shared(&a.graphs.contracts, &b.graphs.contracts),
            farcaster_wallets: shared(&a.graphs.farcaster_wallets, &b.graphs.farcaster_wallets),
            platforms: shared(&platforms_a, &platforms_b),
            handles: shared(&handles_a, &handles_b),
        },
    }
}

fn dimension_vector(b: &sigil_core::DimensionBreakdown) -> Vec<f64> {
    vec![
        b.identity.normalized,
        b.wallet.normalized,
        b.social.normalized,
        b.ens.normalized,
        b.memory.normalized,
        b.external.normalized,
        b.overlap.normalized,
    ]
}
