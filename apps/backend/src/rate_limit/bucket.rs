//! Continuous-refill token bucket.

use std::time::Duration;

use parking_lot::Mutex;
use time::OffsetDateTime;

use super::config::RateLimitConfig;
use crate::clock::SharedClock;

/// Longest wait a rejection ever reports.
pub const MAX_RETRY_AFTER: Duration = Duration::from_secs(24 * 60 * 60);

/// Result of a single admission check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Admission {
    /// One token consumed; `remaining` whole tokens are left.
    Admitted { remaining: u32 },
    /// Nothing consumed; a token becomes available after `retry_after`.
    Rejected { retry_after: Duration },
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted { .. })
    }
}

#[derive(Debug)]
struct BucketState {
    tokens: f64,
    last_refill: OffsetDateTime,
}

/// Token bucket admitting one request per token.
///
/// Refill and decrement happen under one lock, so checks against the same
/// bucket are serialized.
#[derive(Debug)]
pub struct TokenBucket {
    config: RateLimitConfig,
    clock: SharedClock,
    state: Mutex<BucketState>,
}

impl TokenBucket {
    /// A new bucket starts full.
    pub fn new(config: RateLimitConfig, clock: SharedClock) -> Self {
        let now = clock.now();
        Self {
            state: Mutex::new(BucketState {
                tokens: f64::from(config.capacity),
                last_refill: now,
            }),
            config,
            clock,
        }
    }

    pub fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// Try to take one token. Never blocks and never queues.
    pub fn allow(&self) -> bool {
        self.check().is_admitted()
    }

    pub fn check(&self) -> Admission {
        let now = self.clock.now();
        let mut state = self.state.lock();
        self.refill(&mut state, now);

        if state.tokens >= 1.0 {
            state.tokens -= 1.0;
            Admission::Admitted {
                remaining: state.tokens.floor() as u32,
            }
        } else {
            let deficit = 1.0 - state.tokens;
            Admission::Rejected {
                retry_after: retry_after(deficit / self.config.refill_per_second),
            }
        }
    }

    /// Tokens available right now, without consuming or moving the refill mark.
    pub fn available(&self) -> f64 {
        let now = self.clock.now();
        let state = self.state.lock();
        self.replenished(&state, now)
    }

    /// Time of the last admission check.
    pub fn last_activity(&self) -> OffsetDateTime {
        self.state.lock().last_refill
    }

    fn replenished(&self, state: &BucketState, now: OffsetDateTime) -> f64 {
        // A clock stepping backwards adds nothing.
        let elapsed = (now - state.last_refill).as_seconds_f64().max(0.0);
        (state.tokens + elapsed * self.config.refill_per_second)
            .min(f64::from(self.config.capacity))
    }

    fn refill(&self, state: &mut BucketState, now: OffsetDateTime) {
        state.tokens = self.replenished(state, now);
        if now > state.last_refill {
            state.last_refill = now;
        }
    }
}

/// Wait for `secs`, saturated to `MAX_RETRY_AFTER`.
fn retry_after(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs)
        .map(|d| d.min(MAX_RETRY_AFTER))
        .unwrap_or(MAX_RETRY_AFTER)
}
