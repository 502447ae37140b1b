//! Configured limits that measured rates are checked against.

use crate::domain::comparison::Operand;
use crate::domain::rate::Rate;
use std::fmt;

/// A configured limit: either a full rate or a bare hits-per-second number.
///
/// Thresholds only describe the limit. Deciding what to do when a rate
/// exceeds it is left to the caller.
///
/// With the `serde` feature a threshold deserializes from either form:
///
/// ```text
/// 2.5                            -> Threshold::PerSecond(2.5)
/// {"hits": 100, "interval": 60}  -> Threshold::Rate(..)
/// ```
///
/// # Example
/// ```
/// use throttled_rate::{Rate, Threshold};
///
/// let limit = Threshold::Rate(Rate::new(100, 60.0));
/// let current = Rate::new(5, 1.0);
///
/// assert!(current.exceeds(&limit));
/// assert!(Rate::new(1, 1.0).within(&limit));
/// assert!(current.within(&Threshold::PerSecond(5.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Threshold {
    /// Limit expressed as hits over an interval
    Rate(Rate),
    /// Limit expressed directly in hits per second
    PerSecond(f64),
}

impl Threshold {
    /// Hits per second allowed by this threshold.
    pub fn ratio(&self) -> f64 {
        match self {
            Threshold::Rate(rate) => rate.ratio(),
            Threshold::PerSecond(limit) => *limit,
        }
    }
}

impl From<Rate> for Threshold {
    fn from(rate: Rate) -> Self {
        Threshold::Rate(rate)
    }
}

impl From<f64> for Threshold {
    fn from(limit: f64) -> Self {
        Threshold::PerSecond(limit)
    }
}

impl From<Threshold> for Operand {
    fn from(threshold: Threshold) -> Self {
        match threshold {
            Threshold::Rate(rate) => Operand::Rate(rate),
            Threshold::PerSecond(limit) => Operand::Number(limit),
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Rate(rate) => write!(f, "{}", rate),
            Threshold::PerSecond(limit) => write!(f, "{} hits/s", limit),
        }
    }
}

impl Rate {
    /// True if this rate is strictly above the threshold.
    pub fn exceeds(&self, threshold: &Threshold) -> bool {
        self.ratio() > threshold.ratio()
    }

    /// True if this rate is at or below the threshold.
    ///
    /// A NaN threshold is neither exceeded nor respected.
    pub fn within(&self, threshold: &Threshold) -> bool {
        self.ratio() <= threshold.ratio()
    }
}
