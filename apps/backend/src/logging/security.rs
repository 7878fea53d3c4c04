use tracing::warn;

use crate::logging::pii::Redacted;
use crate::rate_limit::LimitScope;
use crate::trace_ctx;

/// A bearer token was missing or did not validate.
pub fn auth_failed(code: &str, path: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_AUTH_FAILED",
        %trace_id,
        code,
        path,
        "Bearer authentication failed"
    );
}

/// Credentials or a refresh token were refused.
pub fn login_failed(reason: &str, email: Option<&str>) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        email = %email.map(Redacted).unwrap_or(Redacted("")),
        reason,
        "Authentication failure"
    );
}

pub fn rate_limit_hit(scope: LimitScope, principal: Option<&str>, path: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_RATE_LIMIT_HIT",
        %trace_id,
        %scope,
        principal = principal.unwrap_or("-"),
        path,
        "Rate limit exceeded"
    );
}
