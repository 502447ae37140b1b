//! Rates: hit counts normalized over an interval.
//!
//! A [`Rate`] is what a throttling layer compares against its configured
//! limit. It is derived from recorded hits with [`Rate::from_hits`], or built
//! directly when describing the limit itself.

use crate::domain::hit::Hit;
use crate::domain::precision::{ensure_precision, PRECISION};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::time::Duration;

/// A number of hits observed over an interval.
///
/// Rates compare and test equal by [`ratio`](Rate::ratio) alone, both with
/// other rates and with bare numbers interpreted as hits per second.
///
/// # Example
/// ```
/// use throttled_rate::Rate;
///
/// let fast = Rate::new(10, 2.0); // 5 hits/s
/// let slow = Rate::new(10, 5.0); // 2 hits/s
///
/// assert!(fast > slow);
/// assert!(slow == 2.0_f64);
/// assert!(Rate::new(4, 2.0) == 2_i64);
/// ```
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rate {
    hits: i64,
    interval: f64,
}

impl Rate {
    /// Create a rate of `hits` over `interval` seconds.
    ///
    /// Never fails. A zero, negative or non-finite interval is floored to
    /// [`PRECISION`] when the ratio is computed.
    pub fn new(hits: i64, interval: f64) -> Self {
        Self { hits, interval }
    }

    /// Create a rate of `hits` over a `Duration`.
    pub fn per(hits: i64, interval: Duration) -> Self {
        Self::new(hits, interval.as_secs_f64())
    }

    /// Total weighted hit count.
    pub fn hits(&self) -> i64 {
        self.hits
    }

    /// Length of the observed span in seconds.
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Hits per second.
    ///
    /// Computed as `max(hits, 0) / max(interval, PRECISION)`. The result is
    /// always finite and non-negative.
    pub fn ratio(&self) -> f64 {
        let hits = self.hits.max(0) as f64;
        // f64::max discards NaN, so a NaN interval falls back to PRECISION.
        let interval = self.interval.max(PRECISION);
        hits / interval
    }

    /// Derive a rate from a sequence of hits.
    ///
    /// Sums the costs, and when the total is positive measures the span
    /// between the earliest and latest hit (rounded to [`PRECISION`]). With a
    /// zero or negative total the interval is `0`. The input is consumed in a
    /// single pass and may be given in any order.
    ///
    /// A lone hit yields a zero interval, so its ratio is `cost / PRECISION`:
    /// an isolated hit reads as a very high instantaneous rate.
    ///
    /// # Example
    /// ```
    /// use throttled_rate::{Hit, Rate};
    ///
    /// let hits = vec![
    ///     Hit::new("", 2.0, 2),
    ///     Hit::new("", 0.0, 3),
    ///     Hit::new("", 5.0, 1),
    /// ];
    ///
    /// let rate = Rate::from_hits(&hits);
    /// assert_eq!(rate.hits(), 6);
    /// assert_eq!(rate.interval(), 5.0);
    /// assert_eq!(rate.ratio(), 1.2);
    ///
    /// assert_eq!(Rate::from_hits(Vec::<Hit>::new()).ratio(), 0.0);
    /// ```
    pub fn from_hits<I>(hits: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<Hit>,
    {
        let span = hits.into_iter().fold(HitSpan::default(), |mut span, hit| {
            span.record(hit.borrow());
            span
        });

        let interval = match span.bounds {
            Some((earliest, latest)) if span.cost > 0 => ensure_precision(latest - earliest),
            _ => 0.0,
        };

        tracing::trace!(
            cost = span.cost,
            count = span.count,
            interval,
            "derived rate from hits"
        );

        Self::new(span.cost, interval)
    }
}

/// Running accumulators for [`Rate::from_hits`].
#[derive(Debug, Default)]
struct HitSpan {
    cost: i64,
    count: usize,
    /// Earliest and latest timestamps seen so far.
    bounds: Option<(f64, f64)>,
}

impl HitSpan {
    fn record(&mut self, hit: &Hit) {
        self.cost = self.cost.saturating_add(hit.cost());
        self.count += 1;

        let time = hit.time();
        self.bounds = Some(match self.bounds {
            None => (time, time),
            Some((earliest, latest)) => (
                min_by_total(earliest, time),
                max_by_total(latest, time),
            ),
        });
    }
}

fn min_by_total(a: f64, b: f64) -> f64 {
    match b.total_cmp(&a) {
        Ordering::Less => b,
        _ => a,
    }
}

fn max_by_total(a: f64, b: f64) -> f64 {
    match b.total_cmp(&a) {
        Ordering::Greater => b,
        _ => a,
    }
}

impl FromIterator<Hit> for Rate {
    fn from_iter<T: IntoIterator<Item = Hit>>(iter: T) -> Self {
        Rate::from_hits(iter)
    }
}

impl<'a> FromIterator<&'a Hit> for Rate {
    fn from_iter<T: IntoIterator<Item = &'a Hit>>(iter: T) -> Self {
        Rate::from_hits(iter)
    }
}

impl PartialEq for Rate {
    fn eq(&self, other: &Rate) -> bool {
        self.ratio() == other.ratio()
    }
}

impl PartialOrd for Rate {
    fn partial_cmp(&self, other: &Rate) -> Option<Ordering> {
        self.ratio().partial_cmp(&other.ratio())
    }
}

/// Comparisons between rates and bare hits-per-second numbers, both ways.
macro_rules! impl_numeric_comparisons {
    ($($num:ty),* $(,)?) => {
        $(
            impl PartialEq<$num> for Rate {
                fn eq(&self, other: &$num) -> bool {
                    self.ratio() == *other as f64
                }
            }

            impl PartialOrd<$num> for Rate {
                fn partial_cmp(&self, other: &$num) -> Option<Ordering> {
                    self.ratio().partial_cmp(&(*other as f64))
                }
            }

            impl PartialEq<Rate> for $num {
                fn eq(&self, other: &Rate) -> bool {
                    *self as f64 == other.ratio()
                }
            }

            impl PartialOrd<Rate> for $num {
                fn partial_cmp(&self, other: &Rate) -> Option<Ordering> {
                    (*self as f64).partial_cmp(&other.ratio())
                }
            }
        )*
    };
}

impl_numeric_comparisons!(f64, f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} hits / {}s", self.hits, self.interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::mocks::MockCaptureLayer;
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;

    fn hit(time: f64, cost: i64) -> Hit {
        Hit::new("", time, cost)
    }

    #[test]
    fn test_ratio_basic() {
        assert_eq!(Rate::new(10, 2.0).ratio(), 5.0);
        assert_eq!(Rate::new(6, 5.0).ratio(), 1.2);
        assert_eq!(Rate::new(0, 3.0).ratio(), 0.0);
    }

    #[test]
    fn test_ratio_floors_interval() {
        assert_eq!(Rate::new(1, 0.0).ratio(), 1.0 / PRECISION);
        assert_eq!(Rate::new(1, 0.001).ratio(), 1.0 / PRECISION);
        assert_eq!(Rate::new(1, -4.0).ratio(), 1.0 / PRECISION);
        assert_eq!(Rate::new(1, f64::NAN).ratio(), 1.0 / PRECISION);
    }

    #[test]
    fn test_ratio_clamps_negative_hits() {
        assert_eq!(Rate::new(-5, 1.0).ratio(), 0.0);
        assert_eq!(Rate::new(i64::MIN, 0.0).ratio(), 0.0);
    }

    #[test]
    fn test_ratio_always_finite() {
        for rate in [
            Rate::new(i64::MAX, 0.0),
            Rate::new(i64::MAX, f64::INFINITY),
            Rate::new(1, f64::NEG_INFINITY),
            Rate::new(-1, f64::NAN),
        ] {
            let ratio = rate.ratio();
            assert!(ratio.is_finite(), "{} has non-finite ratio", rate);
            assert!(ratio >= 0.0, "{} has negative ratio", rate);
        }
    }

    #[test]
    fn test_per_duration() {
        let rate = Rate::per(30, Duration::from_secs(60));
        assert_eq!(rate.interval(), 60.0);
        assert_eq!(rate.ratio(), 0.5);
    }

    #[test]
    fn test_from_hits_empty() {
        let rate = Rate::from_hits(Vec::<Hit>::new());
        assert_eq!(rate.hits(), 0);
        assert_eq!(rate.interval(), 0.0);
        assert_eq!(rate.ratio(), 0.0);
        assert_eq!(rate, Rate::new(0, 0.0));
    }

    #[test]
    fn test_from_hits_single() {
        let rate = Rate::from_hits([hit(42.0, 3)]);
        assert_eq!(rate.hits(), 3);
        assert_eq!(rate.interval(), 0.0);
        assert_eq!(rate.ratio(), 3.0 / PRECISION);
    }

    #[test]
    fn test_from_hits_any_order() {
        let a = hit(0.0, 3);
        let b = hit(2.0, 2);
        let c = hit(5.0, 1);

        let orders = [
            [&a, &b, &c],
            [&a, &c, &b],
            [&b, &a, &c],
            [&b, &c, &a],
            [&c, &a, &b],
            [&c, &b, &a],
        ];
        for order in orders {
            let rate = Rate::from_hits(order);
            assert_eq!(rate.hits(), 6);
            assert_eq!(rate.interval(), 5.0);
            assert_eq!(rate.ratio(), 1.2);
        }
    }

    #[test]
    fn test_from_hits_non_positive_cost_skips_interval() {
        let rate = Rate::from_hits([hit(0.0, 2), hit(10.0, -2)]);
        assert_eq!(rate.hits(), 0);
        assert_eq!(rate.interval(), 0.0);

        let rate = Rate::from_hits([hit(0.0, -3), hit(10.0, 1)]);
        assert_eq!(rate.hits(), -2);
        assert_eq!(rate.interval(), 0.0);
        assert_eq!(rate.ratio(), 0.0);
    }

    #[test]
    fn test_from_hits_rounds_interval() {
        let rate = Rate::from_hits([hit(1.0, 1), hit(1.004, 1)]);
        assert_eq!(rate.interval(), 0.0);

        let rate = Rate::from_hits([hit(0.1, 1), hit(0.3, 1)]);
        assert_eq!(rate.interval(), 0.2);

        // 0.735 is stored just below the tie and must round down.
        let rate = Rate::from_hits([hit(0.0, 1), hit(0.735, 1)]);
        assert_eq!(rate.interval(), 0.73);
        assert_eq!(rate.ratio(), 2.0 / 0.73);
    }

    #[test]
    fn test_from_hits_emits_trace_event() {
        let capture = MockCaptureLayer::new();
        let subscriber = tracing_subscriber::registry().with(capture.clone());

        tracing::subscriber::with_default(subscriber, || {
            Rate::from_hits([hit(0.0, 3), hit(2.0, 2), hit(5.0, 1)]);
        });

        let events = capture.get_captured();
        assert_eq!(events.len(), 1);

        let event = &events[0];
        assert_eq!(event.level, Level::TRACE);
        assert_eq!(event.target, "throttled_rate::domain::rate");
        assert_eq!(event.message, "derived rate from hits");
        assert_eq!(event.fields.get("cost").map(String::as_str), Some("6"));
        assert_eq!(event.fields.get("count").map(String::as_str), Some("3"));
        assert_eq!(event.fields.get("interval").map(String::as_str), Some("5.0"));
    }

    #[test]
    fn test_from_hits_single_use_iterator() {
        let rate = Rate::from_hits((0..5).map(|i| hit(i as f64, 1)));
        assert_eq!(rate.hits(), 5);
        assert_eq!(rate.interval(), 4.0);
    }

    #[test]
    fn test_from_hits_saturates_cost() {
        let rate = Rate::from_hits([hit(0.0, i64::MAX), hit(1.0, i64::MAX)]);
        assert_eq!(rate.hits(), i64::MAX);
        assert!(rate.ratio().is_finite());
    }

    #[test]
    fn test_collect_into_rate() {
        let hits = vec![hit(1.0, 1), hit(3.0, 1)];
        let by_ref: Rate = hits.iter().collect();
        let owned: Rate = hits.into_iter().collect();

        assert_eq!(by_ref.hits(), 2);
        assert_eq!(by_ref.interval(), 2.0);
        assert_eq!(owned.ratio(), by_ref.ratio());
    }

    #[test]
    fn test_rate_ordering() {
        assert!(Rate::new(10, 2.0) > Rate::new(10, 5.0));
        assert!(Rate::new(10, 5.0) < Rate::new(10, 2.0));
        assert_eq!(Rate::new(2, 1.0), Rate::new(4, 2.0));
        assert_eq!(
            Rate::new(1, 1.0).partial_cmp(&Rate::new(1, 1.0)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn test_numeric_comparisons() {
        let rate = Rate::new(4, 2.0);
        assert!(rate == 2_i64);
        assert!(rate == 2.0_f64);
        assert!(rate == 2_u32);
        assert!(rate > 1.5_f64);
        assert!(rate < 3_i32);
        assert!(2.0_f64 == rate);
        assert!(1_usize < rate);
        assert!(rate != f64::NAN);
        assert_eq!(rate.partial_cmp(&f64::NAN), None);
    }

    #[test]
    fn test_idempotent_with_direct_construction() {
        let hits = vec![hit(3.5, 2), hit(1.25, 4), hit(9.75, 1)];
        let derived = Rate::from_hits(&hits);
        let direct = Rate::new(7, ensure_precision(9.75 - 1.25));
        assert_eq!(derived, direct);
        assert_eq!(derived.hits(), direct.hits());
    }

    #[test]
    fn test_display() {
        assert_eq!(Rate::new(6, 5.0).to_string(), "6 hits / 5s");
    }
}
