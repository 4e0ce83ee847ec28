// crates/sigil-gather/src/retry.rs
//
// Retry with endpoint rotation. Upstream gateways fail in two ways: a
// transient signature (rate limit, dead backend) that a sibling endpoint
// can serve, and everything else, which retrying the same endpoint may
// still fix. Exhausted retries degrade the result instead of failing the
// whole gather.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use sigil_core::SigilError;

/// A rotating pool of equivalent upstream endpoints.
#[derive(Debug, Clone, Default)]
pub struct EndpointPool {
    endpoints: Vec<String>,
    cursor: Arc<AtomicUsize>,
}

impl EndpointPool {
    pub fn new(endpoints: Vec<String>) -> Self {
        Self {
            endpoints,
            cursor: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// The endpoint the next request should use, if any are configured.
    pub fn current(&self) -> Option<String> {
        if self.endpoints.is_empty() {
            return None;
        }
        let idx = self.cursor.load(Ordering::Relaxed) % self.endpoints.len();
        Some(self.endpoints[idx].clone())
    }

    /// Advance to the next endpoint.
    pub fn rotate(&self) {
        if !self.endpoints.is_empty() {
            self.cursor.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

/// Attempt count and backoff schedule for one retried operation.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            initial_backoff: Duration::from_millis(200),
        }
    }
}

/// Whether an error message matches a known transient upstream signature.
pub fn is_transient(message: &str) -> bool {
    let msg = message.to_lowercase();
    ["rate limit", "429", "no backend", "healthy", "timed out", "timeout"]
        .iter()
        .any(|sig| msg.contains(sig))
}

/// Run `op` up to `policy.attempts` times with doubling backoff, rotating
/// the endpoint pool on transient failures.
///
/// Returns the value (if any attempt succeeded) and a degraded flag: set
/// when the first attempt did not succeed, even if a retry later did.
pub async fn retry_with_rotation<T, F, Fut>(
    pool: &EndpointPool,
    policy: &RetryPolicy,
    mut op: F,
) -> (Option<T>, bool)
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<T, SigilError>>,
{
    let mut backoff = policy.initial_backoff;
    for attempt in 0..policy.attempts.max(1) {
        match op(pool.current()).await {
            Ok(value) => return (Some(value), attempt > 0),
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(
                    "gather attempt {}/{} failed: {}",
                    attempt + 1,
                    policy.attempts,
                    message
                );
                if is_transient(&message) {
                    pool.rotate();
                }
                if attempt + 1 < policy.attempts {
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
            }
        }
    }
    (None, true)
}
