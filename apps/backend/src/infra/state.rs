use std::sync::Arc;

use crate::clock::{SharedClock, SystemClock};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::rate_limit::{RateLimitConfig, RateLimits};
use crate::repos::{InMemoryNoteStore, InMemoryUserStore, NoteStore, UserStore};
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security: Option<SecurityConfig>,
    clock: Option<SharedClock>,
    rate_limit: RateLimitConfig,
    global_rate_limit: Option<RateLimitConfig>,
    users: Option<Arc<dyn UserStore>>,
    notes: Option<Arc<dyn NoteStore>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security: None,
            clock: None,
            rate_limit: RateLimitConfig::default(),
            global_rate_limit: None,
            users: None,
            notes: None,
        }
    }

    /// Security and rate limits from process configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new()
            .with_security(config.security.clone())
            .with_rate_limit(config.rate_limit)
    }

    pub fn with_security(mut self, security: SecurityConfig) -> Self {
        self.security = Some(security);
        self
    }

    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.rate_limit = config;
        self
    }

    /// Give the global gate its own limits instead of sharing the
    /// per-principal ones.
    pub fn with_global_rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.global_rate_limit = Some(config);
        self
    }

    pub fn with_user_store(mut self, users: Arc<dyn UserStore>) -> Self {
        self.users = Some(users);
        self
    }

    pub fn with_note_store(mut self, notes: Arc<dyn NoteStore>) -> Self {
        self.notes = Some(notes);
        self
    }

    /// Unset parts default to the system clock, in-memory stores and a
    /// random signing secret.
    pub fn build(self) -> Result<AppState, AppError> {
        let security = match self.security {
            Some(security) => security,
            None => SecurityConfig::new(random_secret())?,
        };
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let users = self
            .users
            .unwrap_or_else(|| Arc::new(InMemoryUserStore::new()));
        let notes = self
            .notes
            .unwrap_or_else(|| Arc::new(InMemoryNoteStore::new()));
        let rate_limits = RateLimits::split(
            self.global_rate_limit.unwrap_or(self.rate_limit),
            self.rate_limit,
            Arc::clone(&clock),
        );

        Ok(AppState::new(security, clock, users, notes, rate_limits))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

fn random_secret() -> String {
    format!("{}{}", uuid::Uuid::new_v4().simple(), uuid::Uuid::new_v4().simple())
}
