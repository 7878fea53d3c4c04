use serde::Serialize;
use time::Duration;
use uuid::Uuid;

use super::claims::{Claims, Identity, TokenKind};
use super::codec::TokenCodec;
use super::error::TokenError;
use crate::clock::SharedClock;
use crate::state::security_config::SecurityConfig;

/// Access and refresh token returned to signup/login/refresh callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Builds signed token pairs for an identity.
///
/// Pure construction: persisting the refresh token is the caller's job.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    codec: TokenCodec,
    clock: SharedClock,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(security: &SecurityConfig, clock: SharedClock) -> Self {
        Self {
            codec: TokenCodec::new(security),
            clock,
            access_ttl: security.access_token_ttl,
            refresh_ttl: security.refresh_token_ttl,
        }
    }

    pub fn issue(&self, identity: &Identity) -> Result<TokenPair, TokenError> {
        if identity.subject_id.trim().is_empty() {
            return Err(TokenError::MissingSubject);
        }

        let iat = self.clock.now().unix_timestamp();
        let access = self.claims(identity, TokenKind::Access, iat, self.access_ttl)?;
        let refresh = self.claims(identity, TokenKind::Refresh, iat, self.refresh_ttl)?;

        Ok(TokenPair {
            access_token: self.codec.sign(&access)?,
            refresh_token: self.codec.sign(&refresh)?,
        })
    }

    fn claims(
        &self,
        identity: &Identity,
        kind: TokenKind,
        iat: i64,
        ttl: Duration,
    ) -> Result<Claims, TokenError> {
        let ttl_secs = ttl.whole_seconds();
        let exp = iat
            .checked_add(ttl_secs)
            .ok_or(TokenError::ExpiryOutOfRange { iat, ttl_secs })?;
        Ok(Claims {
            sub: identity.subject_id.clone(),
            email: identity.email.clone(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            kind,
            jti: Uuid::new_v4().to_string(),
            iat,
            exp,
        })
    }
}
