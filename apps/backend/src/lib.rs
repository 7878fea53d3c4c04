#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod clock;
pub mod config;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod rate_limit;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod trace_ctx;

// Re-exports for public API
pub use auth::{Claims, TokenIssuer, TokenKind, TokenPair, TokenValidator};
pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use config::AppConfig;
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::current_user::CurrentUser;
pub use infra::state::{build_state, StateBuilder};
pub use middleware::{Authenticate, RateLimit, RequestTrace, StructuredLogger, TraceSpan};
pub use rate_limit::{PrincipalLimiterRegistry, RateLimitConfig, TokenBucket};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
