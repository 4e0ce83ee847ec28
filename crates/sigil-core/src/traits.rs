// crates/sigil-core/src/traits.rs
//
// Collaborator traits for the external data sources the scoring engine
// consumes. Implementations wrap HTTP/RPC providers; the engine only
// depends on these contracts.
//
// Contract: sources never fail the overall computation. Unknown subjects
// yield empty-but-valid results, and fetch failures degrade to `None` /
// empty at the source boundary. The one exception is `ReverseEnsSource`,
// which surfaces errors so the retry/rotation layer can classify them.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::error::SigilError;
use crate::identity::Profile;
use crate::inputs::{ActivitySignal, Claim, EnsData, WalletActivity};

/// Identity/profile source: all linked identities for a wallet or ENS name.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetch the profile. Must return an empty-but-valid profile for
    /// unknown subjects, never an error.
    async fn profile(&self, wallet_or_ens: &str) -> Profile;
}

/// Wallet-age source: days since the wallet's first transaction.
#[async_trait]
pub trait WalletAgeSource: Send + Sync {
    /// `None` when no source in the fallback chain could determine the age.
    async fn age_days(&self, address: &str) -> Option<f64>;
}

/// Wallet-activity source: transaction count and gas spent.
#[async_trait]
pub trait WalletActivitySource: Send + Sync {
    async fn activity(&self, address: &str) -> WalletActivity;
}

/// ENS metadata source: registration age and renewal history for a name.
#[async_trait]
pub trait EnsMetadataSource: Send + Sync {
    /// `None` when the name could not be resolved by any source.
    async fn metadata(&self, ens_name: &str) -> Option<EnsData>;
}

/// Reward-token source: balance and claim history.
#[async_trait]
pub trait RewardsSource: Send + Sync {
    /// `None` when the balance fetch degraded.
    async fn balance(&self, wallet_or_ens: &str) -> Option<f64>;

    /// Empty when no claims are known or the fetch degraded.
    async fn claims(&self, wallet_or_ens: &str) -> Vec<Claim>;
}

/// Reverse ENS lookup against a specific provider endpoint.
///
/// Fallible so the retry layer can distinguish transient provider failures
/// (rotate and retry) from definitive no-name results (`Ok(None)`).
#[async_trait]
pub trait ReverseEnsSource: Send + Sync {
    async fn lookup_address(
        &self,
        endpoint: Option<&str>,
        address: &str,
    ) -> Result<Option<String>, SigilError>;
}

/// Graph-set source used by the matching engine: normalized identifier sets
/// a subject is connected to. Sets are `BTreeSet` so shared-evidence lists
/// come out sorted and deterministic.
#[async_trait]
pub trait GraphSource: Send + Sync {
    /// Creators the subject follows, collects, or interacts with.
    async fn creator_set(&self, wallet_or_ens: &str) -> BTreeSet<String>;

    /// Social-graph peers (union of follower and following identifiers).
    async fn social_graph(&self, wallet_or_ens: &str) -> BTreeSet<String>;

    /// NFT collections the subject has collected.
    async fn collection_set(&self, wallet_or_ens: &str) -> BTreeSet<String>;

    /// Distinct contract addresses the subject has transacted with.
    async fn contract_set(&self, wallet_or_ens: &str) -> BTreeSet<String>;

    /// Wallets adjacent to the subject in the Farcaster graph.
    async fn farcaster_wallets(&self, wallet_or_ens: &str) -> BTreeSet<String>;
}

/// Activity-timestamp source used by the feed ranker's freshness score.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// All dated activity observations for a subject; empty when unknown.
    async fn activity_signals(&self, wallet_or_ens: &str) -> Vec<ActivitySignal>;
}
