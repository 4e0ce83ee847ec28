// crates/sigil-core/src/inputs.rs
//
// On-chain signal types and the ScoringInputs envelope consumed by the
// legitimacy aggregator, engagement rank, and matching engine.
//
// Missing-data convention: `None` means the signal is unknown and must be
// treated as neutral by the scorers; a present zero is a real weak signal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::{Identity, Profile};

/// Wallet activity signals sourced from chain explorers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletActivity {
    /// Days since the wallet's first transaction, if determinable.
    pub age_days: Option<f64>,
    /// Total transaction count, if determinable.
    pub tx_count: Option<u64>,
    /// Total gas spent in native token units, if determinable.
    pub gas_spent: Option<f64>,
}

/// A single reward claim observed on-chain or via the rewards API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    /// Claimed amount in token units.
    pub amount: f64,
    /// Block number of the claim transaction, if observed on-chain.
    pub block_number: Option<u64>,
    /// Transaction hash, if observed on-chain.
    pub tx_hash: Option<String>,
    /// Claim timestamp, if reported.
    pub timestamp: Option<DateTime<Utc>>,
    /// Which source reported the claim (e.g. "api", "onchain").
    pub source: String,
}

/// Reward-token balance and claim history for a wallet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OnchainData {
    /// Token balance, `None` when the balance fetch degraded.
    pub balance: Option<f64>,
    /// All observed claims, newest first.
    pub claims: Vec<Claim>,
    /// Mean claim amount (0 when there are no claims).
    pub avg_claim: f64,
    /// Simple upcoming-reward projection.
    pub projection: f64,
}

impl OnchainData {
    /// Assemble from a balance fetch and a claim list, deriving the mean
    /// claim and a projection (slight upward bias on the mean plus a small
    /// multiplier on the unclaimed balance).
    pub fn from_parts(balance: Option<f64>, claims: Vec<Claim>) -> Self {
        let avg_claim = if claims.is_empty() {
            0.0
        } else {
            claims.iter().map(|c| c.amount).sum::<f64>() / claims.len() as f64
        };
        let projection = avg_claim * 1.1 + balance.unwrap_or(0.0) * 0.02;
        Self {
            balance,
            claims,
            avg_claim,
            projection,
        }
    }
}

/// Resolution status of an ENS metadata lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnsStatus {
    /// Metadata resolved from the primary source.
    Ok,
    /// Resolved via a fallback resolver; age/renewal data may be missing.
    Fallback,
    /// The name definitively does not exist.
    NotFound,
    /// The input was not a valid ENS name.
    Invalid,
    /// All sources errored.
    Error,
}

/// ENS name metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsData {
    /// The ENS name, lower-cased.
    pub name: String,
    /// Days since first registration, if known.
    pub name_age_days: Option<f64>,
    /// Number of registration/renewal events, if known.
    pub renewal_count: Option<u32>,
    /// Resolved address, if known.
    pub address: Option<String>,
    /// Which source produced this record.
    pub source: Option<String>,
    /// Resolution status.
    pub status: EnsStatus,
    /// Diagnostic reason for non-ok statuses.
    pub reason: Option<String>,
}

/// Output of the follower-quality classifier: weighted evidence mass for
/// real vs. manufactured followers across a subject's identities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FollowerQuality {
    /// Weighted evidence that the audience is real.
    pub real_followers: f64,
    /// Weighted evidence that the audience is manufactured.
    pub bot_followers: f64,
}

impl FollowerQuality {
    /// Real-audience ratio in [0,1]; neutral 0.5 when there is no evidence.
    pub fn ratio(&self) -> f64 {
        let total = self.real_followers + self.bot_followers;
        if total > 0.0 {
            self.real_followers / total
        } else {
            0.5
        }
    }
}

/// Kind of activity signal considered for freshness, ordered by how strongly
/// it indicates the subject is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityKind {
    /// An on-chain transaction from the wallet.
    WalletTx,
    /// A reward claim.
    RewardClaim,
    /// A social post on a linked identity.
    SocialPost,
    /// A linked-identity record update.
    IdentityUpdate,
    /// An ENS registration or renewal.
    EnsUpdate,
}

impl ActivityKind {
    /// Relative weight used when selecting the freshness timestamp.
    pub fn weight(&self) -> f64 {
        match self {
            ActivityKind::WalletTx => 1.0,
            ActivityKind::RewardClaim => 0.8,
            ActivityKind::SocialPost => 0.7,
            ActivityKind::IdentityUpdate => 0.4,
            ActivityKind::EnsUpdate => 0.2,
        }
    }
}

/// One dated activity observation for a subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivitySignal {
    pub kind: ActivityKind,
    pub timestamp: DateTime<Utc>,
}

/// The unifying envelope consumed by the scorers.
///
/// Assembled once per subject by the gathering layer and treated as
/// immutable for the duration of a scoring call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringInputs {
    /// All linked identities (duplicated out of `profile` for convenience).
    pub identities: Vec<Identity>,
    /// The aggregate profile, `None` when the subject is unknown upstream.
    pub profile: Option<Profile>,
    /// Reward-token balance and claims.
    #[serde(default)]
    pub onchain: OnchainData,
    /// Wallet age/transaction/gas signals.
    #[serde(default)]
    pub wallet_activity: WalletActivity,
    /// Canonical ENS name (".eth", excluding ".base.eth"), if any.
    pub ens_name: Option<String>,
    /// ENS metadata for `ens_name`, if resolved.
    pub ens_data: Option<EnsData>,
    /// Basename (".base.eth"), if any.
    pub bns_name: Option<String>,
    /// Follower-quality classifier output.
    #[serde(default)]
    pub follower_quality: FollowerQuality,
    /// Externally computed identity-trust score in [0,1], if available.
    pub identity_trust: Option<f64>,
    /// Externally computed identity-consistency score in [0,1], if available.
    pub consistency_score: Option<f64>,
    /// External reputation signal in [0,1], if available.
    pub external_reputation: Option<f64>,
    /// Mutual social-graph overlap in [0,1], if available.
    pub mutual_overlap: Option<f64>,
    /// Set when any sub-fetch degraded after retries; surfaced to callers
    /// for disclosure, never blocks scoring.
    #[serde(default)]
    pub degraded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn onchain_from_parts_derives_avg_and_projection() {
        let claims = vec![
            Claim {
                amount: 10.0,
                block_number: None,
                tx_hash: None,
                timestamp: None,
                source: "api".to_string(),
            },
            Claim {
                amount: 30.0,
                block_number: None,
                tx_hash: None,
                timestamp: None,
                source: "api".to_string(),
            },
        ];
        let data = OnchainData::from_parts(Some(100.0), claims);
        assert!((data.avg_claim - 20.0).abs() < 1e-10);
        // 20 * 1.1 + 100 * 0.02 = 24.0
        assert!((data.projection - 24.0).abs() < 1e-10);
    }

    #[test]
    fn onchain_from_parts_empty_claims() {
        let data = OnchainData::from_parts(None, vec![]);
        assert_eq!(data.avg_claim, 0.0);
        assert_eq!(data.projection, 0.0);
        assert!(data.balance.is_none());
    }

    #[test]
    fn follower_quality_ratio_neutral_without_evidence() {
        let fq = FollowerQuality::default();
        assert!((fq.ratio() - 0.5).abs() < 1e-10);

        let fq = FollowerQuality {
            real_followers: 3.0,
            bot_followers: 1.0,
        };
        assert!((fq.ratio() - 0.75).abs() < 1e-10);
    }

    #[test]
    fn activity_kind_weights_ordered() {
        assert!(ActivityKind::WalletTx.weight() > ActivityKind::RewardClaim.weight());
        assert!(ActivityKind::RewardClaim.weight() > ActivityKind::SocialPost.weight());
        assert!(ActivityKind::SocialPost.weight() > ActivityKind::IdentityUpdate.weight());
        assert!(ActivityKind::IdentityUpdate.weight() > ActivityKind::EnsUpdate.weight());
    }
}
