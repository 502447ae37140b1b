//! Domain layer - pure value types with no external dependencies.
//!
//! This layer contains the rate model itself:
//! - Time precision and rounding
//! - Hits (single timestamped events)
//! - Rates and their derivation from hits
//! - Comparisons against rates, numbers and configured thresholds
//!
//! Nothing here reads a clock or performs I/O.

pub mod comparison;
pub mod hit;
pub mod precision;
pub mod rate;
pub mod threshold;
