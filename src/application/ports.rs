//! Ports (interfaces) for the application layer.
//!
//! In hexagonal architecture, ports define the interfaces that the application
//! layer needs. Infrastructure adapters implement these ports.

use std::fmt::Debug;

/// Port for obtaining the current wall-clock time.
///
/// This abstraction lets hits be stamped without the domain depending on a
/// system clock. Infrastructure provides concrete implementations
/// (SystemClock, MockClock).
pub trait Clock: Send + Sync + Debug {
    /// Seconds since the Unix epoch, with sub-second precision.
    ///
    /// Values are not rounded; callers apply
    /// [`ensure_precision`](crate::domain::precision::ensure_precision).
    fn now(&self) -> f64;
}
