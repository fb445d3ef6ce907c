//! Wall-clock abstraction
//!
//! Token expiry is stored as epoch milliseconds and compared against
//! [`Clock::now_millis`]. Production code uses [`SystemClock`]; tests drive
//! [`crate::testing::MockClock`] by hand.

use std::sync::Arc;

use chrono::Utc;

/// Source of the current wall-clock time
pub trait Clock: Send + Sync + 'static {
    /// Milliseconds since the UNIX epoch
    fn now_millis(&self) -> i64;
}

/// Real system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Implement Clock for Arc<T> where T: Clock for convenient cloning
impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}
