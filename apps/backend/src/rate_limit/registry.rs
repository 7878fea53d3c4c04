use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use super::bucket::TokenBucket;
use super::config::RateLimitConfig;
use crate::clock::SharedClock;

/// Per-principal buckets, created on first use.
///
/// The existence check and insert for a key run under that key's shard write
/// lock, so concurrent first requests from one principal share one bucket.
/// Lookups of existing keys only take the shard read lock.
#[derive(Debug)]
pub struct PrincipalLimiterRegistry {
    config: RateLimitConfig,
    clock: SharedClock,
    buckets: DashMap<String, Arc<TokenBucket>>,
    created: AtomicU64,
}

impl PrincipalLimiterRegistry {
    pub fn new(config: RateLimitConfig, clock: SharedClock) -> Self {
        Self {
            config,
            clock,
            buckets: DashMap::new(),
            created: AtomicU64::new(0),
        }
    }

    pub fn limiter_for(&self, principal_id: &str) -> Arc<TokenBucket> {
        if let Some(existing) = self.buckets.get(principal_id) {
            return Arc::clone(existing.value());
        }

        let entry = self
            .buckets
            .entry(principal_id.to_owned())
            .or_insert_with(|| {
                self.created.fetch_add(1, Ordering::Relaxed);
                debug!(principal_id, "creating rate limit bucket");
                Arc::new(TokenBucket::new(self.config, Arc::clone(&self.clock)))
            });
        Arc::clone(entry.value())
    }

    /// Number of principals currently tracked.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Buckets ever created, including evicted ones.
    pub fn created_total(&self) -> u64 {
        self.created.load(Ordering::Relaxed)
    }

    /// Drop buckets with no admission check for at least `max_idle`.
    ///
    /// Buckets still referenced outside the registry are kept. Returns the
    /// number removed.
    pub fn evict_idle(&self, max_idle: time::Duration) -> usize {
        let now = self.clock.now();
        let mut removed = 0usize;

        self.buckets.retain(|_, bucket| {
            let idle = now - bucket.last_activity();
            let keep = Arc::strong_count(bucket) > 1 || idle < max_idle;
            if !keep {
                removed += 1;
            }
            keep
        });

        if removed > 0 {
            debug!(removed, remaining = self.buckets.len(), "evicted idle rate limit buckets");
        }
        removed
    }
}
