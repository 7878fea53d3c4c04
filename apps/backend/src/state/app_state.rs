use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::auth::{TokenIssuer, TokenValidator};
use crate::clock::SharedClock;
use crate::rate_limit::RateLimits;
use crate::repos::{NoteStore, UserStore};

/// Application state shared by every worker.
///
/// Built once by `StateBuilder`; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub security: SecurityConfig,
    pub clock: SharedClock,
    pub issuer: TokenIssuer,
    pub validator: TokenValidator,
    pub users: Arc<dyn UserStore>,
    pub notes: Arc<dyn NoteStore>,
    pub rate_limits: RateLimits,
}

impl AppState {
    pub fn new(
        security: SecurityConfig,
        clock: SharedClock,
        users: Arc<dyn UserStore>,
        notes: Arc<dyn NoteStore>,
        rate_limits: RateLimits,
    ) -> Self {
        Self {
            issuer: TokenIssuer::new(&security, Arc::clone(&clock)),
            validator: TokenValidator::new(&security, Arc::clone(&clock)),
            security,
            clock,
            users,
            notes,
            rate_limits,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("security", &self.security)
            .field("principals_tracked", &self.rate_limits.principals.len())
            .finish_non_exhaustive()
    }
}
