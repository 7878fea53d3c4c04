use thiserror::Error;

use super::claims::TokenKind;

/// Failures of the token codec, issuer and validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The bearer string could not be decoded into claims.
    #[error("malformed token: {0}")]
    Malformed(String),
    /// The signature does not verify against the configured secret.
    #[error("token signature does not verify")]
    BadSignature,
    /// The token decoded and verified, but `exp` lies in the past.
    #[error("token expired at {expired_at}")]
    Expired { expired_at: i64 },
    /// A refresh token was presented where an access token is required, or
    /// the other way round.
    #[error("expected {expected} token, got {found} token")]
    WrongKind { expected: TokenKind, found: TokenKind },
    /// Refusing to issue a token without a subject.
    #[error("token subject must not be empty")]
    MissingSubject,
    /// `iat + ttl` does not fit in a timestamp.
    #[error("token expiry out of range: issued at {iat}, lifetime {ttl_secs}s")]
    ExpiryOutOfRange { iat: i64, ttl_secs: i64 },
    /// Signing failed; the signing key is misconfigured.
    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl TokenError {
    /// True when the client can recover by refreshing instead of logging in.
    pub fn is_expired(&self) -> bool {
        matches!(self, TokenError::Expired { .. })
    }
}
