// crates/sigil-gather/src/inputs.rs
//
// The input gatherer: classifies a subject (address, ENS name, basename),
// fans out to the collaborator sources concurrently, and assembles the
// ScoringInputs envelope with the gather-time heuristics applied.

use std::sync::Arc;

use sigil_core::{
    ActivitySource, EnsMetadataSource, GraphSource, ProfileSource, RewardsSource, ScoringInputs,
    WalletActivitySource, WalletAgeSource,
};
use sigil_match::{GraphSets, MatchSubject};
use sigil_score::{follower_quality, identity_consistency, social_overlap};

use crate::ens::EnsResolver;
use crate::feed::FeedSubject;

/// The external sources one gather fans out to.
#[derive(Clone)]
pub struct Collaborators {
    pub profiles: Arc<dyn ProfileSource>,
    pub wallet_age: Arc<dyn WalletAgeSource>,
    pub wallet_activity: Arc<dyn WalletActivitySource>,
    pub ens_metadata: Arc<dyn EnsMetadataSource>,
    pub rewards: Arc<dyn RewardsSource>,
    pub graphs: Arc<dyn GraphSource>,
    pub activity: Arc<dyn ActivitySource>,
}

/// How a subject string was classified.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SubjectKind {
    Address,
    EnsName,
    Basename,
    Other,
}

/// Whether a string looks like a 0x-prefixed 20-byte hex address.
pub fn is_address(subject: &str) -> bool {
    let s = subject.trim();
    s.len() == 42
        && s.starts_with("0x")
        && s[2..].chars().all(|c| c.is_ascii_hexdigit())
}

fn classify(subject: &str) -> SubjectKind {
    let s = subject.trim().to_lowercase();
    if is_address(&s) {
        SubjectKind::Address
    } else if s.ends_with(".base.eth") {
        SubjectKind::Basename
    } else if s.ends_with(".eth") {
        SubjectKind::EnsName
    } else {
        SubjectKind::Other
    }
}

/// Gathers everything the scorers need for one subject.
#[derive(Clone)]
pub struct InputGatherer {
    collaborators: Collaborators,
    resolver: EnsResolver,
}

impl InputGatherer {
    pub fn new(collaborators: Collaborators, resolver: EnsResolver) -> Self {
        Self {
            collaborators,
            resolver,
        }
    }

    /// Gather the full scoring envelope for a wallet address, ENS name, or
    /// basename. Degraded sub-fetches never fail the gather; they set the
    /// `degraded` flag and leave their field neutral.
    pub async fn gather(&self, subject: &str) -> ScoringInputs {
        let subject = subject.trim().to_lowercase();
        let kind = classify(&subject);
        let mut degraded = false;

        let (mut ens_name, mut bns_name, mut address) = match kind {
            SubjectKind::Address => (None, None, Some(subject.clone())),
            SubjectKind::EnsName => (Some(subject.clone()), None, None),
            SubjectKind::Basename => (None, Some(subject.clone()), None),
            SubjectKind::Other => (None, None, None),
        };

        // Addresses may have a primary name; it feeds the naming signals.
        if kind == SubjectKind::Address {
            let lookup = self.resolver.resolve(&subject).await;
            degraded |= lookup.degraded;
            match lookup.name {
                Some(name) if name.ends_with(".base.eth") => bns_name = Some(name),
                Some(name) if name.ends_with(".eth") => ens_name = Some(name),
                _ => {}
            }
        }

        let c = &self.collaborators;
        let (profile, ens_data) = tokio::join!(c.profiles.profile(&subject), async {
            match &ens_name {
                Some(name) => c.ens_metadata.metadata(name).await,
                None => None,
            }
        });

        // An ENS subject's wallet signals come from the resolved address.
        if address.is_none() {
            address = ens_data.as_ref().and_then(|d| d.address.clone());
        }
        if ens_name.is_some() && ens_data.is_none() {
            degraded = true;
        }

        let (age_days, wallet_activity, balance, claims) = tokio::join!(
            async {
                match &address {
                    Some(addr) => c.wallet_age.age_days(addr).await,
                    None => None,
                }
            },
            async {
                match &address {
                    Some(addr) => c.wallet_activity.activity(addr).await,
                    None => Default::default(),
                }
            },
            c.rewards.balance(&subject),
            c.rewards.claims(&subject)
        );

        let mut wallet_activity = wallet_activity;
        if wallet_activity.age_days.is_none() {
            wallet_activity.age_days = age_days;
        }

        let identities = profile.identities.clone();
        let consistency = identity_consistency(&identities).blended();
        let overlap = social_overlap(&identities);
        let quality = follower_quality(&identities);

        tracing::info!(
            "gathered {} ({} identities, degraded={})",
            subject,
            identities.len(),
            degraded
        );

        ScoringInputs {
            identities,
            profile: Some(profile),
            onchain: sigil_core::OnchainData::from_parts(balance, claims),
            wallet_activity,
            ens_name,
            ens_data,
            bns_name,
            follower_quality: quality,
            identity_trust: None,
            consistency_score: Some(consistency),
            external_reputation: None,
            mutual_overlap: Some(overlap),
            degraded,
        }
    }

    /// Gather a feed subject: the scoring envelope plus activity signals.
    pub async fn gather_feed_subject(&self, subject: &str) -> FeedSubject {
        let (inputs, signals) = tokio::join!(
            self.gather(subject),
            self.collaborators.activity.activity_signals(subject)
        );
        FeedSubject {
            key: subject.trim().to_lowercase(),
            inputs,
            signals,
        }
    }

    /// Gather a match subject: the scoring envelope plus the graph sets.
    pub async fn gather_match_subject(&self, subject: &str) -> MatchSubject {
        let g = &self.collaborators.graphs;
        let (inputs, creators, social_graph, collections, contracts, farcaster_wallets) = tokio::join!(
            self.gather(subject),
            g.creator_set(subject),
            g.social_graph(subject),
            g.collection_set(subject),
            g.contract_set(subject),
            g.farcaster_wallets(subject)
        );
        MatchSubject {
            key: subject.trim().to_lowercase(),
            inputs,
            graphs: GraphSets {
                creators,
                social_graph,
                collections,
                contracts,
                farcaster_wallets,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_detection() {
        assert!(is_address("0x1234567890abcdef1234567890abcdef12345678"));
        assert!(!is_address("0x1234"));
        assert!(!is_address("alice.eth"));
        assert!(!is_address("0x1234567890abcdef1234567890abcdef1234567g"));
    }

    #[test]
    fn classification_distinguishes_name_kinds() {
        assert_eq!(classify("alice.eth"), SubjectKind::EnsName);
        assert_eq!(classify("alice.base.eth"), SubjectKind::Basename);
        assert_eq!(
            classify("0x1234567890abcdef1234567890abcdef12345678"),
            SubjectKind::Address
        );
        assert_eq!(classify("not-a-name"), SubjectKind::Other);
        assert_eq!(classify("  ALICE.ETH "), SubjectKind::EnsName);
    }
}
