use jsonwebtoken::Algorithm;
use time::Duration;

use crate::error::AppError;

pub const DEFAULT_ACCESS_TOKEN_TTL: Duration = Duration::hours(24);
pub const DEFAULT_REFRESH_TOKEN_TTL: Duration = Duration::hours(168);
/// Longest lifetime either token kind may be given.
pub const MAX_TOKEN_TTL: Duration = Duration::days(3650);

/// Signing secret and token lifetimes, loaded once at startup.
#[derive(Clone)]
pub struct SecurityConfig {
    /// HS256 secret for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    pub algorithm: Algorithm,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
}

impl SecurityConfig {
    /// Build a config with default lifetimes. An empty secret is a
    /// configuration error.
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Result<Self, AppError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.is_empty() {
            return Err(AppError::config("JWT signing secret must not be empty"));
        }
        Ok(Self {
            jwt_secret,
            algorithm: Algorithm::HS256,
            access_token_ttl: DEFAULT_ACCESS_TOKEN_TTL,
            refresh_token_ttl: DEFAULT_REFRESH_TOKEN_TTL,
        })
    }

    pub fn with_ttls(mut self, access: Duration, refresh: Duration) -> Result<Self, AppError> {
        if !access.is_positive() || !refresh.is_positive() {
            return Err(AppError::config("token lifetimes must be positive"));
        }
        if access > MAX_TOKEN_TTL || refresh > MAX_TOKEN_TTL {
            return Err(AppError::config(format!(
                "token lifetimes must not exceed {} days",
                MAX_TOKEN_TTL.whole_days()
            )));
        }
        self.access_token_ttl = access;
        self.refresh_token_ttl = refresh;
        Ok(self)
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            jwt_secret: b"unit-test-secret".to_vec(),
            algorithm: Algorithm::HS256,
            access_token_ttl: DEFAULT_ACCESS_TOKEN_TTL,
            refresh_token_ttl: DEFAULT_REFRESH_TOKEN_TTL,
        }
    }
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .finish()
    }
}
