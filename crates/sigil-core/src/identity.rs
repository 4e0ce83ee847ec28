// crates/sigil-core/src/identity.rs
//
// Linked-identity data model for the Sigil scoring engine.
//
// An Identity is one account on one platform (twitter, farcaster, ens, ...)
// linked to a wallet. A Profile aggregates all identities for one subject.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Social statistics attached to a linked identity.
///
/// All fields are optional: `None` means the upstream source did not report
/// the value, which is semantically different from a reported zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialStats {
    /// Follower count, if reported.
    pub followers: Option<u64>,
    /// Following count, if reported.
    pub following: Option<u64>,
    /// Engagement rate, either as a [0,1] fraction or an absolute
    /// interaction count (disambiguated by the follower-quality heuristics).
    pub engagement_rate: Option<f64>,
}

/// Provenance record describing how an identity link was established.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Source kind (e.g. "oauth", "signature", "attestation").
    pub kind: String,
    /// Whether this source cryptographically or procedurally verified the link.
    pub verified: bool,
}

/// NFT mint/collect record attached to an identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MintRecord {
    /// Creator handle or address, if known.
    pub creator: Option<String>,
    /// Contract address of the collection.
    pub contract: Option<String>,
    /// Collection name or slug.
    pub collection: Option<String>,
}

/// One linked account on a platform.
///
/// Invariant: `platform` is lower-cased at construction (the adapter
/// boundary enforces this); all platform comparisons assume it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Identity {
    /// Platform name, lower-cased (e.g. "twitter", "farcaster", "ens").
    pub platform: String,
    /// Username or handle on the platform. For ENS/basename identities this
    /// is the name itself (e.g. "alice.eth").
    pub username: Option<String>,
    /// Display name, if distinct from the handle.
    pub display_name: Option<String>,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Social statistics, if the platform reports them.
    #[serde(default)]
    pub social: SocialStats,
    /// Provenance records for the link.
    #[serde(default)]
    pub sources: Vec<SourceRecord>,
    /// NFT mint/collect activity attributed to this identity.
    #[serde(default)]
    pub mints: Vec<MintRecord>,
    /// When the account was created upstream, if known.
    pub created_at: Option<DateTime<Utc>>,
}

impl Identity {
    /// Create an identity with a lower-cased platform and no other data.
    pub fn new(platform: &str) -> Self {
        Self {
            platform: platform.to_lowercase(),
            ..Self::default()
        }
    }

    /// An identity is verified if any of its sources verified the link.
    pub fn is_verified(&self) -> bool {
        self.sources.iter().any(|s| s.verified)
    }

    /// Lower-cased handle for cross-platform comparison, if present.
    pub fn handle(&self) -> Option<String> {
        self.username
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(str::to_lowercase)
    }
}

/// Aggregate of identities for one wallet or ENS name.
///
/// Invariant: `verified <= total` (maintained by the adapter boundary).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    /// The wallet address or ENS name this profile belongs to.
    pub wallet: String,
    /// All linked identities.
    pub identities: Vec<Identity>,
    /// Total identity count as reported upstream.
    pub total: u32,
    /// Verified identity count as reported upstream.
    pub verified: u32,
}

impl Profile {
    /// Build a profile from identities, deriving the total/verified counts.
    pub fn from_identities(wallet: &str, identities: Vec<Identity>) -> Self {
        let total = identities.len() as u32;
        let verified = identities.iter().filter(|i| i.is_verified()).count() as u32;
        Self {
            wallet: wallet.to_string(),
            identities,
            total,
            verified,
        }
    }

    /// An empty-but-valid profile for an unknown subject.
    pub fn empty(wallet: &str) -> Self {
        Self {
            wallet: wallet.to_string(),
            ..Self::default()
        }
    }
}
