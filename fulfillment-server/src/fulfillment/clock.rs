//! Injectable time source
//!
//! Status-change timestamps come from an explicit clock dependency instead of
//! an ambient global, so transitions are deterministic under test.

/// Time source for status-change timestamps
pub trait Clock: Send + Sync {
    /// Current time as Unix millis
    fn now_millis(&self) -> i64;
}

/// Wall-clock time
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}
