// crates/sigil-gather/src/adapters.rs
//
// Adapters from upstream JSON payloads to the core data model. Parsing is
// tolerant: malformed list items are skipped, missing fields stay None,
// and field aliases from older gateway versions are accepted.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use sigil_core::{
    Claim, EnsData, EnsStatus, Identity, MintRecord, Profile, SocialStats, SourceRecord,
};

fn str_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| value.get(*k))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(String::from)
}

fn u64_field(value: &Value, keys: &[&str]) -> Option<u64> {
    keys.iter().filter_map(|k| value.get(*k)).find_map(|v| {
        v.as_u64()
            .or_else(|| v.as_str().and_then(|s| s.parse().ok()))
    })
}

fn f64_field(value: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().filter_map(|k| value.get(*k)).find_map(|v| {
        v.as_f64()
            .or_else(|| v.as_str().and_then(|s| s.parse().ok()))
    })
}

fn timestamp_field(value: &Value, keys: &[&str]) -> Option<DateTime<Utc>> {
    keys.iter().filter_map(|k| value.get(*k)).find_map(|v| {
        if let Some(s) = v.as_str() {
            if let Ok(dt) = s.parse::<DateTime<Utc>>() {
                return Some(dt);
            }
            if let Ok(secs) = s.parse::<i64>() {
                return Utc.timestamp_opt(secs, 0).single();
            }
            None
        } else {
            v.as_i64().and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        }
    })
}

fn identity_from_value(value: &Value) -> Option<Identity> {
    let platform = str_field(value, &["platform"])?;
    let mut ident = Identity::new(&platform);
    ident.username = str_field(value, &["username", "handle", "identity"]);
    ident.display_name = str_field(value, &["displayName", "display_name"]);
    ident.avatar_url = str_field(value, &["avatar", "avatarUrl", "avatar_url"]);
    ident.created_at = timestamp_field(value, &["createdAt", "created_at"]);

    if let Some(social) = value.get("social") {
        ident.social = SocialStats {
            followers: u64_field(social, &["follower", "followers"]),
            following: u64_field(social, &["following"]),
            engagement_rate: f64_field(social, &["engagement", "engagementRate"]),
        };
    }

    if let Some(sources) = value.get("sources").and_then(Value::as_array) {
        for source in sources {
            if let Some(kind) = source.as_str() {
                ident.sources.push(SourceRecord {
                    kind: kind.to_string(),
                    verified: false,
                });
            } else if let Some(kind) = str_field(source, &["type", "kind"]) {
                ident.sources.push(SourceRecord {
                    kind,
                    verified: source
                        .get("verified")
                        .and_then(Value::as_bool)
                        .unwrap_or(false),
                });
            }
        }
    }
    // Older payloads carry a flat verified flag instead of source records.
    if ident.sources.is_empty() {
        if let Some(true) = value.get("verified").and_then(Value::as_bool) {
            ident.sources.push(SourceRecord {
                kind: "upstream".to_string(),
                verified: true,
            });
        }
    }

    if let Some(mints) = value.get("mints").and_then(Value::as_array) {
        for mint in mints {
            ident.mints.push(MintRecord {
                creator: str_field(mint, &["creator", "artist"]),
                contract: str_field(mint, &["contract", "contractAddress"]),
                collection: str_field(mint, &["collection", "collectionName"]),
            });
        }
    }

    Some(ident)
}

/// Build a profile from an identity-registry payload: either a bare array
/// of identity objects or an envelope with an `identities` field.
pub fn profile_from_registry(wallet: &str, payload: &Value) -> Profile {
    let items = payload
        .get("identities")
        .and_then(Value::as_array)
        .or_else(|| payload.as_array());

    let identities: Vec<Identity> = match items {
        Some(items) => items.iter().filter_map(identity_from_value).collect(),
        None => Vec::new(),
    };
    Profile::from_identities(wallet, identities)
}

/// Parse a rewards-API claim list.
pub fn claims_from_rewards(payload: &Value) -> Vec<Claim> {
    let items = payload
        .get("claims")
        .and_then(Value::as_array)
        .or_else(|| payload.as_array());

    let Some(items) = items else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let amount = f64_field(item, &["amount", "value"])?;
            Some(Claim {
                amount,
                block_number: u64_field(item, &["blockNumber", "block_number"]),
                tx_hash: str_field(item, &["txHash", "transactionHash", "tx_hash"]),
                timestamp: timestamp_field(item, &["timestamp", "claimedAt"]),
                source: str_field(item, &["source"]).unwrap_or_else(|| "api".to_string()),
            })
        })
        .collect()
}

/// Build ENS metadata from a registration payload.
///
/// Age is derived from the registration timestamp against `now`; a payload
/// without one still yields an Ok record with unknown age.
pub fn ens_from_registration(name: &str, payload: &Value, now: DateTime<Utc>) -> EnsData {
    let registered = timestamp_field(
        payload,
        &["registeredAt", "registrationDate", "registered_at"],
    );
    let name_age_days = registered.map(|r| ((now - r).num_seconds() as f64 / 86_400.0).max(0.0));
    let renewal_count = u64_field(payload, &["renewals", "renewalCount", "renewal_count"])
        .map(|n| n.min(u32::MAX as u64) as u32);

    EnsData {
        name: name.to_lowercase(),
        name_age_days,
        renewal_count,
        address: str_field(payload, &["address", "owner"]),
        source: str_field(payload, &["source"]).or_else(|| Some("registry".to_string())),
        status: EnsStatus::Ok,
        reason: None,
    }
}

/// Wallet age in days from an explorer transaction list, using the oldest
/// transaction timestamp.
pub fn age_days_from_first_tx(payload: &Value, now: DateTime<Utc>) -> Option<f64> {
    let items = payload
        .get("result")
        .and_then(Value::as_array)
        .or_else(|| payload.as_array())?;

    let oldest = items
        .iter()
        .filter_map(|tx| timestamp_field(tx, &["timeStamp", "timestamp"]))
        .min()?;
    Some(((now - oldest).num_seconds() as f64 / 86_400.0).max(0.0))
}
