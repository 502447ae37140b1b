//! Factory for hits stamped with the current time.
//!
//! [`Hit`] itself never reads a clock. A `HitRecorder` owns a [`Clock`] and
//! the default key and cost, and produces hits with the time rounded to
//! [`PRECISION`](crate::domain::precision::PRECISION).

use crate::application::ports::Clock;
use crate::domain::hit::{Hit, DEFAULT_COST};
use crate::domain::precision::ensure_precision;
use crate::infrastructure::clock::SystemClock;
use std::sync::Arc;

/// Creates hits with default key, cost and a fresh timestamp.
///
/// Cloning is cheap; clones share the same clock.
///
/// # Example
/// ```
/// use throttled_rate::{HitRecorder, Rate};
///
/// let recorder = HitRecorder::new().with_key("api");
///
/// let hit = recorder.hit();
/// assert_eq!(hit.key(), "api");
/// assert_eq!(hit.cost(), 1);
///
/// let heavy = recorder.hit_with_cost(10);
/// let rate = Rate::from_hits([hit, heavy]);
/// assert_eq!(rate.hits(), 11);
/// ```
#[derive(Debug, Clone)]
pub struct HitRecorder {
    clock: Arc<dyn Clock>,
    key: String,
    cost: i64,
}

impl HitRecorder {
    /// Create a recorder using the system clock, an empty key and a cost of 1.
    pub fn new() -> Self {
        Self {
            clock: Arc::new(SystemClock::new()),
            key: String::new(),
            cost: DEFAULT_COST,
        }
    }

    /// Use a custom clock.
    ///
    /// Primarily useful for testing with a mock clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Set the key given to hits that don't name one.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Set the cost given to hits that don't name one.
    pub fn with_cost(mut self, cost: i64) -> Self {
        self.cost = cost;
        self
    }

    /// Current time from the recorder's clock, rounded to precision.
    pub fn now(&self) -> f64 {
        ensure_precision(self.clock.now())
    }

    /// A hit with the default key and cost, stamped now.
    pub fn hit(&self) -> Hit {
        Hit::new(self.key.clone(), self.now(), self.cost)
    }

    /// A hit with the default key and the given cost, stamped now.
    pub fn hit_with_cost(&self, cost: i64) -> Hit {
        Hit::new(self.key.clone(), self.now(), cost)
    }

    /// A hit for a specific key and cost, stamped now.
    pub fn hit_for(&self, key: impl Into<String>, cost: i64) -> Hit {
        Hit::new(key, self.now(), cost)
    }
}

impl Default for HitRecorder {
    fn default() -> Self {
        Self::new()
    }
}
