//! Error codes for the notes backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes. Every code is
//! SCREAMING_SNAKE_CASE and maps 1:1 to the string in HTTP responses.

use core::fmt;

/// Centralized error codes for the notes backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Token could not be decoded, or is the wrong kind for this endpoint
    UnauthorizedInvalidJwt,
    /// Token signature does not verify against the signing secret
    UnauthorizedBadSignature,
    /// Token has expired; the client may refresh
    UnauthorizedExpiredJwt,
    /// Email or password is wrong
    InvalidCredentials,
    /// Refresh token is no longer the current one for its account
    RefreshTokenRevoked,
    /// Access denied
    Forbidden,
    /// Note is neither owned by the caller nor sharable
    NoteAccessDenied,

    // Request Validation
    /// Invalid email address
    InvalidEmail,
    /// Password does not meet the policy
    InvalidPassword,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Note not found
    NoteNotFound,
    /// User not found
    UserNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Email already registered
    UniqueEmail,
    /// Owner already has a note with this header
    NoteHeaderConflict,
    /// Generic conflict
    Conflict,

    // Admission
    /// Global or per-principal rate limit exceeded
    RateLimitExceeded,

    // System Errors
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Every code, for uniqueness checks.
    pub const ALL: &'static [ErrorCode] = &[
        Self::Unauthorized,
        Self::UnauthorizedMissingBearer,
        Self::UnauthorizedInvalidJwt,
        Self::UnauthorizedBadSignature,
        Self::UnauthorizedExpiredJwt,
        Self::InvalidCredentials,
        Self::RefreshTokenRevoked,
        Self::Forbidden,
        Self::NoteAccessDenied,
        Self::InvalidEmail,
        Self::InvalidPassword,
        Self::ValidationError,
        Self::BadRequest,
        Self::NoteNotFound,
        Self::UserNotFound,
        Self::NotFound,
        Self::UniqueEmail,
        Self::NoteHeaderConflict,
        Self::Conflict,
        Self::RateLimitExceeded,
        Self::Internal,
        Self::ConfigError,
    ];

    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Authentication & Authorization
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedBadSignature => "UNAUTHORIZED_BAD_SIGNATURE",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::RefreshTokenRevoked => "REFRESH_TOKEN_REVOKED",
            Self::Forbidden => "FORBIDDEN",
            Self::NoteAccessDenied => "NOTE_ACCESS_DENIED",

            // Request Validation
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            // Resource Not Found
            Self::NoteNotFound => "NOTE_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // Conflicts
            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::NoteHeaderConflict => "NOTE_HEADER_CONFLICT",
            Self::Conflict => "CONFLICT",

            // Admission
            Self::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",

            // System Errors
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
