// crates/sigil-gather/tests/gather.rs
//
// End-to-end gathering tests over the static in-memory sources: subject
// classification, envelope assembly, feed ranking, and two-sided matching.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use sigil_core::{
    ActivityKind, ActivitySignal, Claim, EnsData, EnsStatus, Identity, Profile, SocialStats,
    SourceRecord, WalletActivity,
};
use sigil_gather::sources::StaticBundle;
use sigil_gather::{
    Collaborators, EndpointPool, EnsResolver, FeedOptions, FeedRanker, InputGatherer, MatchRunner,
};
use sigil_score::{compute_legitimacy_score, ScoringOptions};

const ALICE_ADDR: &str = "0x00000000000000000000000000000000000000aa";
const BOB_ADDR: &str = "0x00000000000000000000000000000000000000bb";

fn now() -> DateTime<Utc> {
    "2026-01-15T00:00:00Z".parse().unwrap()
}

fn identity(platform: &str, handle: &str, followers: u64) -> Identity {
    let mut ident = Identity::new(platform);
    ident.username = Some(handle.to_string());
    ident.avatar_url = Some(format!("https://img/{handle}.png"));
    ident.social = SocialStats {
        followers: Some(followers),
        following: Some(followers / 2),
        engagement_rate: Some(0.02),
    };
    ident.sources.push(SourceRecord {
        kind: "oauth".to_string(),
        verified: true,
    });
    ident
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn populate(bundle: &mut StaticBundle, address: &str, name: &str, handle: &str) {
    let identities = vec![
        identity("twitter", handle, 8_000),
        identity("farcaster", handle, 2_000),
        identity("lens", handle, 500),
    ];
    bundle
        .profiles
        .insert(Profile::from_identities(address, identities));
    bundle.wallet_stats.insert(
        address,
        Some(400.0),
        WalletActivity {
            age_days: Some(400.0),
            tx_count: Some(180),
            gas_spent: Some(1.5),
        },
    );
    bundle.rewards.insert(
        address,
        Some(2_500.0),
        vec![Claim {
            amount: 40.0,
            block_number: Some(100),
            tx_hash: Some("0x1".to_string()),
            timestamp: Some(now() - Duration::days(3)),
            source: "onchain".to_string(),
        }],
    );
    bundle.ens.insert_reverse(address, name);
    bundle.ens.insert_metadata(EnsData {
        name: name.to_string(),
        name_age_days: Some(700.0),
        renewal_count: Some(2),
        address: Some(address.to_string()),
        source: Some("registry".to_string()),
        status: EnsStatus::Ok,
        reason: None,
    });
    bundle.graphs.insert(
        address,
        set(&["creator-x", "creator-y"]),
        set(&["peer-1", "peer-2"]),
        set(&["collection-a"]),
        set(&["0xcontract1"]),
        set(&["0xfc-wallet"]),
    );
    bundle.activity.insert(
        address,
        vec![ActivitySignal {
            kind: ActivityKind::WalletTx,
            timestamp: now() - Duration::days(2),
        }],
    );
}

fn gatherer() -> InputGatherer {
    let mut bundle = StaticBundle::new();
    populate(&mut bundle, ALICE_ADDR, "alice.eth", "alice");
    populate(&mut bundle, BOB_ADDR, "bob.eth", "bob");
    let arcs = bundle.into_arcs();

    let resolver = EnsResolver::new(
        arcs.reverse_ens.clone(),
        EndpointPool::new(vec!["primary".to_string()]),
    );
    InputGatherer::new(
        Collaborators {
            profiles: arcs.profiles,
            wallet_age: arcs.wallet_stats.clone(),
            wallet_activity: arcs.wallet_stats,
            ens_metadata: arcs.ens_metadata,
            rewards: arcs.rewards,
            graphs: arcs.graphs,
            activity: arcs.activity,
        },
        resolver,
    )
}

#[tokio::test]
async fn address_gather_resolves_name_and_assembles_envelope() {
    let inputs = gatherer().gather(ALICE_ADDR).await;

    assert_eq!(inputs.ens_name.as_deref(), Some("alice.eth"));
    assert!(inputs.bns_name.is_none());
    assert_eq!(inputs.identities.len(), 3);
    assert_eq!(inputs.wallet_activity.tx_count, Some(180));
    assert_eq!(inputs.onchain.claims.len(), 1);
    assert!(inputs.consistency_score.unwrap() > 0.9);
    assert!(inputs.mutual_overlap.unwrap() > 0.9);
    assert!(!inputs.degraded);
    assert_eq!(
        inputs.ens_data.as_ref().unwrap().name_age_days,
        Some(700.0)
    );

    let score = compute_legitimacy_score(&inputs, &ScoringOptions::default());
    assert!(score >= 55, "gathered subject scored {}", score);
}

#[tokio::test]
async fn unknown_subject_yields_empty_envelope_and_zero_score() {
    let inputs = gatherer().gather("stranger.eth").await;
    assert!(inputs.identities.is_empty());
    assert!(inputs.profile.as_ref().unwrap().identities.is_empty());
    // The metadata fetch for an unknown name degrades the envelope.
    assert!(inputs.degraded);
    assert_eq!(
        compute_legitimacy_score(&inputs, &ScoringOptions::default()),
        0
    );
}

#[tokio::test]
async fn feed_ranking_over_gathered_subjects() {
    let g = gatherer();
    let alice = g.gather_feed_subject(ALICE_ADDR).await;
    let ghost = g.gather_feed_subject("stranger.eth").await;

    let ranker = FeedRanker::new(FeedOptions {
        now: Some(now()),
        ..FeedOptions::default()
    });
    let ranked = ranker.rank(vec![ghost, alice]).await;
    assert_eq!(ranked[0].key, ALICE_ADDR);
    assert!(ranked[0].feed_score > ranked[1].feed_score);
    assert!(ranked[0].freshness > 0.8);
}

#[tokio::test]
async fn self_match_of_gathered_subject_is_full() {
    let runner = MatchRunner::new(
        gatherer(),
        Default::default(),
        ScoringOptions::default(),
    );
    let out = runner.match_wallets(ALICE_ADDR, ALICE_ADDR).await;
    assert_eq!(out.report.score, 100);
    assert!(!out.explanation.is_empty());
}

#[tokio::test]
async fn distinct_subjects_match_below_self_match() {
    let runner = MatchRunner::new(
        gatherer(),
        Default::default(),
        ScoringOptions::default(),
    );
    let cross = runner.match_wallets(ALICE_ADDR, BOB_ADDR).await;
    let self_match = runner.match_wallets(ALICE_ADDR, ALICE_ADDR).await;
    assert!(cross.report.score < self_match.report.score);
    // Both were populated with the same graph fixtures, so shared-creator
    // evidence still appears.
    assert_eq!(
        cross.report.evidence.creators,
        vec!["creator-x".to_string(), "creator-y".to_string()]
    );
}
