use super::claims::{Claims, TokenKind};
use super::codec::TokenCodec;
use super::error::TokenError;
use crate::clock::SharedClock;
use crate::state::security_config::SecurityConfig;

/// Outcome of inspecting a bearer string.
///
/// `Expired` is kept apart from `Rejected` so callers can tell "refresh
/// possible" from "log in again".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenState {
    Accepted(Claims),
    Expired(Claims),
    Rejected(TokenError),
}

impl TokenState {
    pub fn into_result(self) -> Result<Claims, TokenError> {
        match self {
            TokenState::Accepted(claims) => Ok(claims),
            TokenState::Expired(claims) => Err(TokenError::Expired {
                expired_at: claims.exp,
            }),
            TokenState::Rejected(err) => Err(err),
        }
    }
}

/// Checks signature, kind and expiry of incoming tokens.
#[derive(Debug, Clone)]
pub struct TokenValidator {
    codec: TokenCodec,
    clock: SharedClock,
}

impl TokenValidator {
    pub fn new(security: &SecurityConfig, clock: SharedClock) -> Self {
        Self {
            codec: TokenCodec::new(security),
            clock,
        }
    }

    /// Decode `token` and classify it against `expected` kind and the clock.
    pub fn inspect(&self, token: &str, expected: TokenKind) -> TokenState {
        let claims = match self.codec.parse(token) {
            Ok(claims) => claims,
            Err(err) => return TokenState::Rejected(err),
        };

        if claims.kind != expected {
            return TokenState::Rejected(TokenError::WrongKind {
                expected,
                found: claims.kind,
            });
        }
        if claims.sub.is_empty() {
            return TokenState::Rejected(TokenError::Malformed("empty subject".to_string()));
        }

        if claims.exp < self.clock.now().unix_timestamp() {
            TokenState::Expired(claims)
        } else {
            TokenState::Accepted(claims)
        }
    }

    /// Validate an access token.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.inspect(token, TokenKind::Access).into_result()
    }

    /// Validate a refresh token.
    pub fn validate_refresh(&self, token: &str) -> Result<Claims, TokenError> {
        self.inspect(token, TokenKind::Refresh).into_result()
    }
}
