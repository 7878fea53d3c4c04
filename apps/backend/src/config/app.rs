use std::env;
use std::str::FromStr;

use time::Duration;

use crate::error::AppError;
use crate::rate_limit::config::{DEFAULT_CAPACITY, DEFAULT_REFILL_PER_SECOND};
use crate::rate_limit::RateLimitConfig;
use crate::state::security_config::SecurityConfig;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_IDLE_TTL_SECS: u64 = 600;
/// Longest idle TTL accepted: 30 days.
pub const MAX_IDLE_TTL_SECS: u64 = 30 * 24 * 60 * 60;
/// Upper bound on how often idle buckets are swept.
pub const MAX_EVICTION_PERIOD_SECS: u64 = 60;

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub security: SecurityConfig,
    pub rate_limit: RateLimitConfig,
    /// `None` disables idle eviction
    pub rate_limit_idle_ttl: Option<std::time::Duration>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let secret = get("BACKEND_JWT_SECRET")
            .ok_or_else(|| AppError::config("BACKEND_JWT_SECRET must be set"))?;
        let access_ttl = parse_or(&get, "ACCESS_TOKEN_TTL_SECS", 86_400i64)?;
        let refresh_ttl = parse_or(&get, "REFRESH_TOKEN_TTL_SECS", 604_800i64)?;
        let security = SecurityConfig::new(secret)?
            .with_ttls(Duration::seconds(access_ttl), Duration::seconds(refresh_ttl))?;

        let rate_limit = RateLimitConfig::new(
            parse_or(&get, "RATE_LIMIT_CAPACITY", DEFAULT_CAPACITY)?,
            parse_or(&get, "RATE_LIMIT_REFILL_PER_SEC", DEFAULT_REFILL_PER_SECOND)?,
        )?;
        let idle_secs: u64 = parse_or(&get, "RATE_LIMIT_IDLE_TTL_SECS", DEFAULT_IDLE_TTL_SECS)?;
        if idle_secs > MAX_IDLE_TTL_SECS {
            return Err(AppError::config(format!(
                "RATE_LIMIT_IDLE_TTL_SECS must be at most {MAX_IDLE_TTL_SECS}, got {idle_secs}"
            )));
        }

        Ok(Self {
            host: get("BACKEND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(&get, "BACKEND_PORT", DEFAULT_PORT)?,
            security,
            rate_limit,
            rate_limit_idle_ttl: (idle_secs > 0).then(|| std::time::Duration::from_secs(idle_secs)),
        })
    }

    /// Sweep period for idle buckets: the TTL, capped at one minute.
    pub fn eviction_period(&self) -> Option<std::time::Duration> {
        self.rate_limit_idle_ttl
            .map(|ttl| ttl.min(std::time::Duration::from_secs(MAX_EVICTION_PERIOD_SECS)))
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|e| AppError::config(format!("{key}: invalid value '{raw}': {e}"))),
    }
}
