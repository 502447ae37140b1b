//! A single recorded occurrence of a rate-limited event.
//!
//! Hits are the raw input of the rate model. A throttling layer creates one
//! per event, keeps the recent ones for a key, and periodically folds them
//! into a [`Rate`](crate::domain::rate::Rate).

use std::cmp::Ordering;

/// Cost of a hit when none is given.
pub const DEFAULT_COST: i64 = 1;

/// One timestamped, weighted event.
///
/// Hits are ordered by [`time`](Hit::time) alone; see [`Hit::cmp_time`].
/// Equality (`==`) is structural and compares all three fields.
///
/// # Example
/// ```
/// use throttled_rate::Hit;
///
/// let early = Hit::new("login", 1.0, 1);
/// let late = Hit::new("login", 2.0, 5);
///
/// assert!(early.is_before(&late));
/// assert!(late.is_after(&early));
///
/// let hits = [late.clone(), early.clone()];
/// let first = hits.iter().min_by(|a, b| a.cmp_time(b)).unwrap();
/// assert_eq!(first, &early);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hit {
    /// Bucket this hit belongs to. Not used by the rate model itself.
    #[cfg_attr(feature = "serde", serde(default))]
    key: String,
    /// Seconds since the Unix epoch.
    time: f64,
    /// Weight of the event. Zero and negative weights are accepted.
    #[cfg_attr(feature = "serde", serde(default = "default_cost"))]
    cost: i64,
}

#[cfg(feature = "serde")]
fn default_cost() -> i64 {
    DEFAULT_COST
}

impl Hit {
    /// Create a hit from all of its fields.
    ///
    /// No validation is performed. To stamp a hit with the current time use
    /// [`HitRecorder`](crate::application::recorder::HitRecorder).
    ///
    /// # Arguments
    /// * `key` - Bucket identifier, `""` by convention when unused
    /// * `time` - Seconds since the Unix epoch
    /// * `cost` - Weight of the event, [`DEFAULT_COST`] by convention
    pub fn new(key: impl Into<String>, time: f64, cost: i64) -> Self {
        Self {
            key: key.into(),
            time,
            cost,
        }
    }

    /// Bucket identifier.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Seconds since the Unix epoch.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Weight of the event.
    pub fn cost(&self) -> i64 {
        self.cost
    }

    /// Compare two hits by timestamp only.
    ///
    /// Uses IEEE 754 total ordering so it can drive `min_by` / `max_by` and
    /// sorts without panicking on unusual values.
    pub fn cmp_time(&self, other: &Hit) -> Ordering {
        self.time.total_cmp(&other.time)
    }

    /// True if this hit happened strictly before `other`.
    pub fn is_before(&self, other: &Hit) -> bool {
        self.time < other.time
    }

    /// True if this hit happened strictly after `other`.
    pub fn is_after(&self, other: &Hit) -> bool {
        self.time > other.time
    }
}
