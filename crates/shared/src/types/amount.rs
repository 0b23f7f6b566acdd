//! Fixed-scale decimal amount for ledger lines and report totals.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` and pins it to two fractional digits,
//! so equality and summation are exact and every total prints the same way.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a decimal cannot be represented as an [`Amount`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// The value carries more fractional digits than the ledger scale.
    #[error("Amount {value} has more than {scale} fractional digits", scale = Amount::SCALE)]
    TooPrecise {
        /// The rejected value.
        value: Decimal,
    },

    /// The value does not fit in the minor-unit storage range.
    #[error("Amount {value} is out of range")]
    OutOfRange {
        /// The rejected value.
        value: Decimal,
    },
}

/// An exact decimal amount with a fixed scale of two fractional digits.
///
/// Values are never rounded: inputs with more precision are rejected.
/// Serializes as a decimal string (e.g. `"100.00"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Number of fractional digits carried by every amount.
    pub const SCALE: u32 = 2;

    /// Zero, at ledger scale.
    pub const ZERO: Self = Self(Decimal::from_parts(0, 0, 0, false, Self::SCALE));

    /// Creates an amount from a decimal, normalising it to ledger scale.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::TooPrecise`] if the value has significant digits
    /// beyond the second fractional place, and [`AmountError::OutOfRange`] if
    /// it is too large to carry two fractional digits.
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        let mut normalized = value.normalize();
        if normalized.scale() > Self::SCALE {
            return Err(AmountError::TooPrecise { value });
        }
        // rescale keeps a smaller scale when the mantissa would overflow.
        normalized.rescale(Self::SCALE);
        if normalized.scale() != Self::SCALE {
            return Err(AmountError::OutOfRange { value });
        }
        Ok(Self(normalized))
    }

    /// Creates an amount from a count of minor units (cents).
    #[must_use]
    pub fn from_minor_units(units: i64) -> Self {
        Self(Decimal::new(units, Self::SCALE))
    }

    /// Returns the amount as a count of minor units (cents).
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::OutOfRange`] if the value exceeds `i64`.
    pub fn to_minor_units(self) -> Result<i64, AmountError> {
        i64::try_from(self.0.mantissa()).map_err(|_| AmountError::OutOfRange { value: self.0 })
    }

    /// Returns the underlying decimal.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl std::str::FromStr for Amount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s).map_err(|e| format!("Invalid amount '{s}': {e}"))?;
        Self::new(value).map_err(|e| e.to_string())
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Sums of same-scale decimals keep that scale, so the invariant survives arithmetic.
impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
