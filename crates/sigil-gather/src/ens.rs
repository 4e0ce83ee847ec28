// crates/sigil-gather/src/ens.rs
//
// Cached reverse-ENS resolution. Lookups go through the retry/rotation
// layer; positive results are cached for five minutes, negative or
// degraded results for two, so a flaky gateway cannot pin a wrong answer.

use std::sync::Arc;
use std::time::Duration;

use sigil_core::ReverseEnsSource;

use crate::cache::TtlCache;
use crate::retry::{retry_with_rotation, EndpointPool, RetryPolicy};

const POSITIVE_TTL: Duration = Duration::from_secs(300);
const NEGATIVE_TTL: Duration = Duration::from_secs(120);

/// Result of one reverse lookup.
#[derive(Debug, Clone, Default)]
pub struct ReverseLookup {
    /// The primary ENS name, if the address has one.
    pub name: Option<String>,
    /// Set when the answer came after retries or exhaustion.
    pub degraded: bool,
}

/// Reverse resolver with an endpoint pool and a TTL cache.
#[derive(Clone)]
pub struct EnsResolver {
    source: Arc<dyn ReverseEnsSource>,
    pool: EndpointPool,
    policy: RetryPolicy,
    cache: TtlCache<ReverseLookup>,
}

impl EnsResolver {
    pub fn new(source: Arc<dyn ReverseEnsSource>, pool: EndpointPool) -> Self {
        Self {
            source,
            pool,
            policy: RetryPolicy::default(),
            cache: TtlCache::new(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolve an address to its primary ENS name, if any.
    pub async fn resolve(&self, address: &str) -> ReverseLookup {
        let key = address.to_lowercase();
        let load_key = key.clone();
        let source = self.source.clone();
        let pool = self.pool.clone();
        let policy = self.policy;

        self.cache
            .get_or_load(
                &key,
                |v: &ReverseLookup| {
                    if v.degraded || v.name.is_none() {
                        NEGATIVE_TTL
                    } else {
                        POSITIVE_TTL
                    }
                },
                || async move {
                    let address = load_key.clone();
                    let (name, degraded) =
                        retry_with_rotation(&pool, &policy, move |endpoint| {
                            let source = source.clone();
                            let address = address.clone();
                            async move {
                                source.lookup_address(endpoint.as_deref(), &address).await
                            }
                        })
                        .await;
                    ReverseLookup {
                        name: name.flatten().map(|n| n.to_lowercase()),
                        degraded,
                    }
                },
            )
            .await
    }
}
