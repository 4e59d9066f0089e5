//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In binary floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  OUR SOLUTION: exact decimal arithmetic (rust_decimal)              │
//! │    0.10 + 0.20 = 0.30, always                                       │
//! │                                                                     │
//! │  Rounding happens in exactly two places, both explicit:             │
//! │    • normalized()  - 7 significant digits, half-even (cart totals)  │
//! │    • round_cents() - 2 decimal places, half-up (average ticket)     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use trolley_core::money::Money;
//!
//! let price = Money::from_major_minor(10, 99); // 10.99
//! let line_total = price * 3;                  // 32.97
//! assert_eq!(line_total, Money::from_major_minor(32, 97));
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::TOTAL_SIGNIFICANT_DIGITS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the session currency.
///
/// ## Design Decisions
/// - **Exact decimal**: wraps [`rust_decimal::Decimal`]; no binary floats
///   anywhere in the math
/// - **Single field tuple struct**: zero-cost abstraction, serializes as the
///   bare decimal string (`"10.99"`)
/// - **Explicit rounding**: arithmetic never rounds on its own; callers pick
///   [`Money::normalized`] or [`Money::round_cents`] where the rules demand it
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Money(Decimal);

impl Money {
    /// Wraps a raw decimal amount.
    #[inline]
    pub fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use trolley_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10, 99); // 10.99
    /// let refund = Money::from_major_minor(-5, 50); // -5.50, not -4.50
    /// assert_eq!(price + refund, Money::from_major_minor(5, 49));
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    pub fn from_major_minor(major: i64, minor: u32) -> Self {
        let minor = i64::from(minor);
        let units = if major < 0 {
            major * 100 - minor
        } else {
            major * 100 + minor
        };
        Money(Decimal::new(units, 2))
    }

    /// Zero money value.
    #[inline]
    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Normalizes a computed total to 7 significant digits, rounding half to
    /// even (banker's rounding).
    ///
    /// Cart totals have always been carried in DECIMAL32-style arithmetic;
    /// this keeps aggregate numbers bit-for-bit compatible with that scheme.
    ///
    /// ## Example
    /// ```rust
    /// use trolley_core::money::Money;
    ///
    /// let total = Money::new("123456.75".parse().unwrap());
    /// // 8 significant digits in, 7 out; the dropped 5 is exactly halfway,
    /// // so the 7th digit rounds to even: 123456.8
    /// assert_eq!(total.normalized(), Money::new("123456.8".parse().unwrap()));
    /// ```
    pub fn normalized(&self) -> Self {
        // round_sf returns None only when the requested precision cannot be
        // represented; the unrounded value is the correct fallback then.
        self.0
            .round_sf_with_strategy(TOTAL_SIGNIFICANT_DIGITS, RoundingStrategy::MidpointNearestEven)
            .map(Money)
            .unwrap_or(*self)
    }

    /// Rounds to 2 decimal places with half-up rounding (0-4 down, 5-9 up).
    ///
    /// ## Example
    /// ```rust
    /// use trolley_core::money::Money;
    ///
    /// let raw = Money::new("13.005".parse().unwrap());
    /// assert_eq!(raw.round_cents(), Money::from_major_minor(13, 1));
    /// ```
    pub fn round_cents(&self) -> Self {
        Money(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Divides by another amount, returning `None` on a zero divisor.
    ///
    /// ## Example
    /// ```rust
    /// use trolley_core::money::Money;
    ///
    /// let total = Money::from_major_minor(65, 0);
    /// let per_unit = total.checked_div(Money::new(5.into())).unwrap();
    /// assert_eq!(per_unit, Money::from_major_minor(13, 0));
    /// assert!(total.checked_div(Money::zero()).is_none());
    /// ```
    pub fn checked_div(&self, divisor: Money) -> Option<Money> {
        self.0.checked_div(divisor.0).map(Money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the plain decimal amount at its natural scale.
///
/// ## Note
/// This is for logs and debugging. Currency symbols and localization belong
/// to whatever layer renders receipts.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by an integer quantity (line totals).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }
}

/// Summation for totals across line items and carts.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
