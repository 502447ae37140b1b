//! Time precision shared by every time value in the crate.
//!
//! Repeated wall-clock reads carry floating-point jitter well below the
//! resolution that matters for rate limiting. Every timestamp and every
//! derived interval is rounded to [`PRECISION`] seconds before use, so two
//! reads a few microseconds apart compare equal and intervals never divide
//! by a vanishingly small number.

/// Smallest time step, in seconds, that the rate model distinguishes.
pub const PRECISION: f64 = 1e-2;

/// Number of decimal places kept by [`ensure_precision`].
///
/// Equal to `ceil(-log10(PRECISION))`.
pub const DECIMAL_PLACES: i32 = 2;

/// Round a time value (in seconds) to [`DECIMAL_PLACES`] decimal places.
///
/// Rounds the exact binary value of `seconds`, with ties going to the even
/// digit. `0.735` is stored just below the halfway point and rounds down.
/// Non-finite values are returned unchanged.
///
/// # Example
/// ```
/// use throttled_rate::ensure_precision;
///
/// assert_eq!(ensure_precision(1.234), 1.23);
/// assert_eq!(ensure_precision(1.236), 1.24);
/// assert_eq!(ensure_precision(0.735), 0.73);
/// assert_eq!(ensure_precision(5.0 - 0.0), 5.0);
/// ```
pub fn ensure_precision(seconds: f64) -> f64 {
    if !seconds.is_finite() {
        return seconds;
    }
    // Float formatting rounds the exact decimal expansion; scaling by 100
    // first would round twice.
    format!("{:.*}", DECIMAL_PLACES as usize, seconds)
        .parse()
        .unwrap_or(seconds)
}
