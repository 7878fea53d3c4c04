use crate::error::AppError;

pub const DEFAULT_CAPACITY: u32 = 5;
pub const DEFAULT_REFILL_PER_SECOND: f64 = 1.0;
/// Slowest accepted refill: one token a day.
pub const MIN_REFILL_PER_SECOND: f64 = 1.0 / 86_400.0;

/// Token-bucket parameters, shared by the global gate and every principal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimitConfig {
    /// Burst size; also the starting token count
    pub capacity: u32,
    /// Sustained rate in tokens per second
    pub refill_per_second: f64,
}

impl RateLimitConfig {
    pub fn new(capacity: u32, refill_per_second: f64) -> Result<Self, AppError> {
        if capacity == 0 {
            return Err(AppError::config("rate limit capacity must be at least 1"));
        }
        if !refill_per_second.is_finite() || refill_per_second < MIN_REFILL_PER_SECOND {
            return Err(AppError::config(format!(
                "rate limit refill must be at least {MIN_REFILL_PER_SECOND} tokens per second, got {refill_per_second}"
            )));
        }
        Ok(Self {
            capacity,
            refill_per_second,
        })
    }

    /// Seconds a drained bucket needs to become full again.
    pub fn full_refill_secs(&self) -> f64 {
        f64::from(self.capacity) / self.refill_per_second
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            refill_per_second: DEFAULT_REFILL_PER_SECOND,
        }
    }
}
