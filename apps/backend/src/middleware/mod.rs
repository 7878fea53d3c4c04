pub mod authenticate;
pub mod rate_limit;
pub mod request_trace;
pub mod structured_logger;
pub mod trace_span;

pub use authenticate::Authenticate;
pub use rate_limit::RateLimit;
pub use request_trace::{RequestTrace, TraceId};
pub use structured_logger::StructuredLogger;
pub use trace_span::TraceSpan;
