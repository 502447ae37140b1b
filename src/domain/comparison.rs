//! Comparing rates against operands whose type is only known at runtime.
//!
//! Statically typed code compares a [`Rate`] with `<`, `>` and `==` directly
//! against another rate or any built-in number. Limits that arrive through a
//! dynamic path (plugin values, `dyn Any`, loosely typed configuration) are
//! wrapped in an [`Operand`] first. Only rates and numbers can be compared;
//! anything else fails with [`ComparisonError::TypeMismatch`].

use crate::domain::rate::Rate;
use crate::domain::threshold::Threshold;
use std::any::{type_name, Any};
use std::cmp::Ordering;

/// Short name of the left-hand operand in comparison errors.
const RATE_TYPE_NAME: &str = "Rate";

/// Error returned when a rate is compared against an unsupported value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonError {
    /// The right-hand operand is neither a rate nor a number
    TypeMismatch {
        /// Type of the left-hand operand
        left: &'static str,
        /// Type of the right-hand operand
        right: &'static str,
    },
}

impl std::fmt::Display for ComparisonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComparisonError::TypeMismatch { left, right } => {
                write!(f, "can't compare {} with {}", left, right)
            }
        }
    }
}

impl std::error::Error for ComparisonError {}

/// Right-hand side of a rate comparison, tagged by kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    /// Another rate; compared ratio to ratio
    Rate(Rate),
    /// A bare hits-per-second threshold
    Number(f64),
    /// Any other value, identified by its type name
    Other(&'static str),
}

impl Operand {
    /// Classify an arbitrary value.
    ///
    /// Rates and the built-in numeric types map to [`Operand::Rate`] and
    /// [`Operand::Number`], thresholds map to whichever form they hold, and an
    /// existing operand is returned as-is. Everything else becomes
    /// [`Operand::Other`].
    ///
    /// # Example
    /// ```
    /// use throttled_rate::{Operand, Rate};
    ///
    /// assert_eq!(Operand::of(&2.5_f64), Operand::Number(2.5));
    /// assert_eq!(Operand::of(&7_u8), Operand::Number(7.0));
    /// assert!(matches!(Operand::of(&Rate::new(1, 1.0)), Operand::Rate(_)));
    /// assert_eq!(Operand::of(&"fast"), Operand::Other("&str"));
    /// ```
    pub fn of<T: Any>(value: &T) -> Self {
        let value = value as &dyn Any;

        if let Some(rate) = value.downcast_ref::<Rate>() {
            return Operand::Rate(*rate);
        }
        if let Some(threshold) = value.downcast_ref::<Threshold>() {
            return Operand::from(*threshold);
        }
        if let Some(operand) = value.downcast_ref::<Operand>() {
            return *operand;
        }
        if let Some(number) = as_number(value) {
            return Operand::Number(number);
        }
        Operand::Other(type_name::<T>())
    }

    /// Name of the operand's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Operand::Rate(_) => RATE_TYPE_NAME,
            Operand::Number(_) => type_name::<f64>(),
            Operand::Other(name) => name,
        }
    }
}

fn as_number(value: &dyn Any) -> Option<f64> {
    macro_rules! downcast_number {
        ($($num:ty),*) => {
            $(
                if let Some(n) = value.downcast_ref::<$num>() {
                    return Some(*n as f64);
                }
            )*
        };
    }

    downcast_number!(f64, f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
    None
}

impl From<Rate> for Operand {
    fn from(rate: Rate) -> Self {
        Operand::Rate(rate)
    }
}

impl From<&Rate> for Operand {
    fn from(rate: &Rate) -> Self {
        Operand::Rate(*rate)
    }
}

macro_rules! impl_operand_from_number {
    ($($num:ty),*) => {
        $(
            impl From<$num> for Operand {
                fn from(number: $num) -> Self {
                    Operand::Number(number as f64)
                }
            }
        )*
    };
}

impl_operand_from_number!(f64, f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Rate {
    /// Compare this rate's ratio with an operand.
    ///
    /// Returns `Ok(None)` when the operand is a NaN threshold.
    ///
    /// # Errors
    /// Returns [`ComparisonError::TypeMismatch`] if the operand is neither a
    /// rate nor a number.
    pub fn try_partial_cmp(
        &self,
        other: impl Into<Operand>,
    ) -> Result<Option<Ordering>, ComparisonError> {
        let other = other.into();
        let threshold = match other {
            Operand::Rate(rate) => rate.ratio(),
            Operand::Number(number) => number,
            Operand::Other(name) => {
                let left = RATE_TYPE_NAME;
                tracing::debug!(left, right = name, "rejected rate comparison");
                return Err(ComparisonError::TypeMismatch { left, right: name });
            }
        };
        Ok(self.ratio().partial_cmp(&threshold))
    }

    /// `self == other`, comparing by ratio.
    ///
    /// # Errors
    /// See [`Rate::try_partial_cmp`].
    pub fn try_eq(&self, other: impl Into<Operand>) -> Result<bool, ComparisonError> {
        Ok(self.try_partial_cmp(other)? == Some(Ordering::Equal))
    }

    /// `self < other`, comparing by ratio.
    ///
    /// # Errors
    /// See [`Rate::try_partial_cmp`].
    pub fn try_lt(&self, other: impl Into<Operand>) -> Result<bool, ComparisonError> {
        Ok(self.try_partial_cmp(other)? == Some(Ordering::Less))
    }

    /// `self > other`, comparing by ratio.
    ///
    /// # Errors
    /// See [`Rate::try_partial_cmp`].
    pub fn try_gt(&self, other: impl Into<Operand>) -> Result<bool, ComparisonError> {
        Ok(self.try_partial_cmp(other)? == Some(Ordering::Greater))
    }
}
