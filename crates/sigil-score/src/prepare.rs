// crates/sigil-score/src/prepare.rs
//
// Input-preparation heuristics run at gather time: identity consistency,
// the follower-quality classifier, and social overlap. All are pure
// functions over the identity list and feed ScoringInputs fields.

use std::collections::HashMap;

use sigil_core::{FollowerQuality, Identity};

use crate::scale::clamp01;

/// Handle/avatar reuse fractions across a subject's identities.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityConsistency {
    /// Fraction of distinct handles used on >= 2 platforms.
    pub handle_consistency: f64,
    /// Fraction of distinct avatars used on >= 2 platforms.
    pub avatar_consistency: f64,
}

impl IdentityConsistency {
    /// Blended consistency value in [0,1].
    pub fn blended(&self) -> f64 {
        (self.handle_consistency + self.avatar_consistency) / 2.0
    }
}

/// Fraction of distinct values in `counts` that occur at least twice.
fn reuse_fraction(counts: &HashMap<String, usize>) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }
    let reused = counts.values().filter(|&&c| c >= 2).count();
    reused as f64 / counts.len() as f64
}

/// Measure how consistently a subject reuses handles and avatar images
/// across platforms. Reuse is a legitimacy signal: sybil identity sets
/// rarely bother to keep handles and avatars aligned.
pub fn identity_consistency(identities: &[Identity]) -> IdentityConsistency {
    let mut handles: HashMap<String, usize> = HashMap::new();
    let mut avatars: HashMap<String, usize> = HashMap::new();

    for ident in identities {
        if let Some(h) = ident.handle() {
            *handles.entry(h).or_insert(0) += 1;
        }
        if let Some(a) = &ident.avatar_url {
            if !a.is_empty() {
                *avatars.entry(a.clone()).or_insert(0) += 1;
            }
        }
    }

    IdentityConsistency {
        handle_consistency: reuse_fraction(&handles),
        avatar_consistency: reuse_fraction(&avatars),
    }
}

/// Fraction of distinct handles appearing on >= 2 platforms; 0 when the
/// subject has at most one handle.
pub fn social_overlap(identities: &[Identity]) -> f64 {
    let handles: Vec<String> = identities.iter().filter_map(|i| i.handle()).collect();
    if handles.len() <= 1 {
        return 0.0;
    }

    let mut counts: HashMap<String, usize> = HashMap::new();
    for h in handles {
        *counts.entry(h).or_insert(0) += 1;
    }
    reuse_fraction(&counts)
}

/// Per-platform weight applied to follower-quality evidence. High-signal
/// social platforms count more than passive link types.
fn platform_quality_weight(platform: &str) -> f64 {
    match platform {
        "twitter" | "x" => 1.3,
        "github" => 1.25,
        "farcaster" => 1.2,
        "youtube" => 1.2,
        "lens" => 1.15,
        "instagram" => 1.1,
        "zora" => 1.05,
        "website" => 0.5,
        "email" => 0.4,
        _ => 0.8,
    }
}

/// Classify a subject's audience into weighted real/bot evidence scores.
///
/// Evidence per identity:
/// - Bot signals: tiny follower count with large following, skewed
///   follower/following ratios, and near-zero engagement on large accounts.
/// - Real signals: log-scaled follower mass, balanced or organic
///   follower/following ratios, and small accounts with no follow spam.
///
/// Identities with no social data contribute nothing; a subject with no
/// evidence at all yields a neutral 0.5 ratio.
pub fn follower_quality(identities: &[Identity]) -> FollowerQuality {
    let mut weighted_real = 0.0;
    let mut weighted_bot = 0.0;

    for ident in identities {
        let weight = platform_quality_weight(&ident.platform);
        let followers = ident.social.followers.unwrap_or(0) as f64;
        let following = ident.social.following.map(|f| f as f64);

        if followers <= 0.0 && following.is_none() {
            continue;
        }

        let mut bot_score = 0.0;
        let mut real_score = 0.0;

        if let Some(fg) = following {
            if followers < 10.0 && fg > 50.0 {
                bot_score += 0.7;
            }
            if fg > 0.0 {
                let ratio = followers / fg.max(1.0);
                if ratio < 0.1 && fg > 100.0 {
                    bot_score += 0.5;
                } else if ratio < 0.25 && fg > 50.0 {
                    bot_score += 0.3;
                }
            }
        }

        if let Some(raw) = ident.social.engagement_rate {
            if followers > 1000.0 {
                // Values above 1 are absolute interaction counts.
                let rate = if raw > 1.0 { raw / followers } else { raw };
                if rate < 0.002 {
                    bot_score += 0.4;
                }
            }
        }

        let follower_log = (followers + 1.0).log10();
        if follower_log > 0.5 {
            real_score += follower_log * 0.5;
        }

        if let Some(fg) = following {
            if fg > 0.0 {
                let ratio = followers / fg.max(1.0);
                if (0.5..=4.0).contains(&ratio) {
                    real_score += 0.3;
                } else if ratio > 4.0 && followers > 200.0 {
                    real_score += 0.4;
                }
            }
        }
        if followers > 0.0 && followers < 50.0 && following.is_none() {
            real_score += 0.2;
        }

        weighted_real += real_score * weight;
        weighted_bot += bot_score * clamp01(1.3 - weight * 0.4);
    }

    FollowerQuality {
        real_followers: weighted_real,
        bot_followers: weighted_bot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigil_core::SocialStats;

    fn ident(platform: &str, username: Option<&str>, avatar: Option<&str>) -> Identity {
        Identity {
            username: username.map(String::from),
            avatar_url: avatar.map(String::from),
            ..Identity::new(platform)
        }
    }

    fn social_ident(platform: &str, followers: u64, following: Option<u64>) -> Identity {
        Identity {
            social: SocialStats {
                followers: Some(followers),
                following,
                engagement_rate: None,
            },
            ..Identity::new(platform)
        }
    }

    #[test]
    fn consistency_full_when_all_identities_share_handle_and_avatar() {
        let ids = vec![
            ident("twitter", Some("alice"), Some("https://a/pfp.png")),
            ident("farcaster", Some("alice"), Some("https://a/pfp.png")),
            ident("lens", Some("Alice"), Some("https://a/pfp.png")),
        ];
        let c = identity_consistency(&ids);
        assert!((c.handle_consistency - 1.0).abs() < 1e-10);
        assert!((c.avatar_consistency - 1.0).abs() < 1e-10);
        assert!((c.blended() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn consistency_zero_for_all_distinct() {
        let ids = vec![
            ident("twitter", Some("alice"), Some("https://a/1.png")),
            ident("farcaster", Some("bob"), Some("https://a/2.png")),
        ];
        let c = identity_consistency(&ids);
        assert_eq!(c.handle_consistency, 0.0);
        assert_eq!(c.avatar_consistency, 0.0);
    }

    #[test]
    fn overlap_zero_with_at_most_one_handle() {
        assert_eq!(social_overlap(&[]), 0.0);
        assert_eq!(
            social_overlap(&[ident("twitter", Some("alice"), None)]),
            0.0
        );
    }

    #[test]
    fn overlap_counts_reused_handles() {
        let ids = vec![
            ident("twitter", Some("alice"), None),
            ident("farcaster", Some("alice"), None),
            ident("lens", Some("other"), None),
        ];
        // 2 distinct handles, 1 reused.
        assert!((social_overlap(&ids) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn follower_quality_neutral_without_evidence() {
        let fq = follower_quality(&[ident("website", None, None)]);
        assert!((fq.ratio() - 0.5).abs() < 1e-10);
    }

    #[test]
    fn bot_heavy_profile_scores_below_balanced_profile() {
        // 3 followers, following 500: classic follow-spam shape.
        let botty = follower_quality(&[social_ident("twitter", 3, Some(500))]);
        // 2000 followers, following 1000: organic shape.
        let organic = follower_quality(&[social_ident("twitter", 2000, Some(1000))]);
        assert!(botty.ratio() < organic.ratio());
        assert!(organic.ratio() > 0.5);
    }

    #[test]
    fn low_engagement_large_account_flagged() {
        let mut id = social_ident("twitter", 100_000, Some(50_000));
        id.social.engagement_rate = Some(0.0001);
        let fq = follower_quality(&[id]);
        assert!(fq.bot_followers > 0.0);
    }
}
