//! # throttled-rate
//!
//! Measurement primitives for rate limiting: hits and the rates derived from them.
//!
//! A throttling layer records a [`Hit`] for every event it sees, keeps the recent
//! hits for each key, and periodically folds them into a [`Rate`] which it compares
//! against a configured limit. This crate covers the measurement half of that loop.
//! Storing hits, choosing a window and deciding whether to admit or reject a request
//! are left to the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use throttled_rate::{Hit, HitRecorder, Rate, Threshold};
//!
//! // Stamp hits with the system clock (key "", cost 1 by default)
//! let recorder = HitRecorder::new().with_key("login");
//! let mut window = vec![recorder.hit(), recorder.hit_with_cost(2)];
//!
//! // Or build them directly from known timestamps
//! window.push(Hit::new("login", 0.0, 1));
//!
//! let current = Rate::from_hits(&window);
//! let limit = Threshold::Rate(Rate::new(100, 60.0));
//!
//! if current.exceeds(&limit) {
//!     // reject, delay, or log; the policy is yours
//! }
//! ```
//!
//! ## The Rate Model
//!
//! - [`Rate::ratio`] is `max(hits, 0) / max(interval, PRECISION)`: always finite and
//!   never negative, even for zero intervals or negative hit counts.
//! - [`Rate::from_hits`] sums hit costs and measures the span from the earliest to the
//!   latest hit. A non-positive total yields a zero interval.
//! - A single hit has a zero span, so it reads as `cost / PRECISION` hits per second.
//!   Short windows therefore report high rates rather than undefined ones.
//! - Every timestamp and derived interval is rounded to [`PRECISION`] (10 ms) with
//!   [`ensure_precision`], so clock jitter below that resolution is ignored.
//!
//! ## Comparisons
//!
//! Rates compare by ratio, against other rates or bare hits-per-second numbers:
//!
//! ```rust
//! # use throttled_rate::Rate;
//! assert!(Rate::new(10, 2.0) > Rate::new(10, 5.0));
//! assert!(Rate::new(4, 2.0) == 2.0_f64);
//! ```
//!
//! Values whose type is only known at runtime go through [`Operand`], and anything
//! that is neither a rate nor a number is rejected with
//! [`ComparisonError::TypeMismatch`]:
//!
//! ```rust
//! # use throttled_rate::{ComparisonError, Operand, Rate};
//! let rate = Rate::new(1, 1.0);
//! assert_eq!(rate.try_eq(Operand::of(&1_u32)), Ok(true));
//! assert!(matches!(
//!     rate.try_eq(Operand::of(&"1/s")),
//!     Err(ComparisonError::TypeMismatch { .. })
//! ));
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Hit`], [`Rate`] and [`Threshold`]
//! - `test-helpers`: exposes `infrastructure::mocks` (a settable clock and a
//!   capturing tracing layer)
//!
//! ## Diagnostics
//!
//! The crate emits `tracing` events (`trace` for every derived rate, `debug` for
//! rejected comparisons) and never installs a subscriber itself.

// Domain layer - pure value types
pub mod domain;

// Application layer - clock port and hit factory
pub mod application;

// Infrastructure layer - clock adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    comparison::{ComparisonError, Operand},
    hit::{Hit, DEFAULT_COST},
    precision::{ensure_precision, DECIMAL_PLACES, PRECISION},
    rate::Rate,
    threshold::Threshold,
};

pub use application::{ports::Clock, recorder::HitRecorder};

pub use infrastructure::clock::SystemClock;
