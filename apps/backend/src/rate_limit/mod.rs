//! Request-rate admission: one global bucket plus one bucket per principal.

pub mod bucket;
pub mod config;
pub mod registry;

use std::sync::Arc;

pub use bucket::{Admission, TokenBucket};
pub use config::RateLimitConfig;
pub use registry::PrincipalLimiterRegistry;

use crate::clock::SharedClock;

/// Limiters owned by the application state and handed to the middleware.
#[derive(Debug, Clone)]
pub struct RateLimits {
    pub global: Arc<TokenBucket>,
    pub principals: Arc<PrincipalLimiterRegistry>,
}

impl RateLimits {
    /// Global gate and per-principal gates share one configuration.
    pub fn new(config: RateLimitConfig, clock: SharedClock) -> Self {
        Self::split(config, config, clock)
    }

    pub fn split(global: RateLimitConfig, principal: RateLimitConfig, clock: SharedClock) -> Self {
        Self {
            global: Arc::new(TokenBucket::new(global, Arc::clone(&clock))),
            principals: Arc::new(PrincipalLimiterRegistry::new(principal, clock)),
        }
    }
}

/// Which gate refused a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitScope {
    Global,
    Principal,
}

impl std::fmt::Display for LimitScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LimitScope::Global => f.write_str("global"),
            LimitScope::Principal => f.write_str("principal"),
        }
    }
}
