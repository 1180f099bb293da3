//! # Money Module
//!
//! Provides the `Money` type for handling prices and discounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CHAINED DISCOUNTS WITH FLOATS                                          │
//! │                                                                         │
//! │    subtotal 130.00                                                      │
//! │    - pair 5%   →  126.00                                                │
//! │    - member 10% → 113.39999999999999  ❌ drift                          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (satang)                             │
//! │    13000 - 400 = 12600                                                  │
//! │    12600 * 10 / 100 = 1260 → total 11340  ✅ exact                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use foodshop_core::money::Money;
//!
//! let price = Money::from_major(40); // 40.00 THB
//! let pair = price * 2;              // 80.00 THB
//! let discount = pair.percentage(5); // 4.00 THB
//! assert_eq!((pair - discount).minor(), 7600);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// Currency label used by [`fmt::Display`].
pub const DEFAULT_CURRENCY_UNIT: &str = "THB";

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value counted in hundredths of the currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction never has to special-case underflow
/// - **Single field tuple struct**: zero-cost wrapper around the minor units
/// - **Copy**: money is a plain value, passed around freely
///
/// ## Where Money Flows
/// ```text
/// MenuItem.price ──► OrderLine.unit_price ──► OrderLine.line_total
///                                                   │
///                                                   ▼
///                     subtotal ──► - pair discount ──► - member discount ──► total
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units (satang).
    ///
    /// ```rust
    /// use foodshop_core::money::Money;
    ///
    /// let m = Money::from_minor(760); // 7.60
    /// assert_eq!(m.minor(), 760);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// Menu prices are whole units, so this is how the catalog is seeded.
    ///
    /// ```rust
    /// use foodshop_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(50).minor(), 5000);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion, truncated toward zero.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the fractional portion (always 0-99).
    ///
    /// ```rust
    /// use foodshop_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(-550).minor_part(), 50);
    /// ```
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ```rust
    /// use foodshop_core::money::Money;
    ///
    /// let line_total = Money::from_major(40).multiply_quantity(3);
    /// assert_eq!(line_total, Money::from_major(120));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Like [`multiply_quantity`](Self::multiply_quantity), `None` on overflow.
    ///
    /// ```rust
    /// use foodshop_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(50).checked_multiply_quantity(2), Some(Money::from_major(100)));
    /// assert_eq!(Money::from_major(50).checked_multiply_quantity(i64::MAX), None);
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(minor) => Some(Money(minor)),
            None => None,
        }
    }

    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(minor) => Some(Money(minor)),
            None => None,
        }
    }

    /// Returns `percent`% of this amount, truncated toward zero.
    ///
    /// ## Rounding
    /// Integer division drops the remainder, so for the positive amounts
    /// quoted by the shop this is a floor. Sub-satang fractions are dropped.
    ///
    /// ```text
    /// 76.00 × 10%  = 7600 × 10 / 100 = 760   → 7.60
    /// 0.99  × 10%  = 99 × 10 / 100   = 9     → 0.09 (0.099 truncated)
    /// ```
    ///
    /// ```rust
    /// use foodshop_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(7600).percentage(10).minor(), 760);
    /// assert_eq!(Money::from_minor(99).percentage(10).minor(), 9);
    /// ```
    pub fn percentage(&self, percent: u32) -> Money {
        // i128 keeps the intermediate product from overflowing
        let part = self.0 as i128 * percent as i128 / 100;
        Money(part as i64)
    }

    /// Formats the amount with an explicit currency label.
    ///
    /// ## Negative Amounts
    /// The sign is rendered once, in front of the whole amount, and both
    /// parts are printed as absolute values. A plain
    /// `"{major}.{minor:02}"` would print -5 satang as `0.05` and lose the
    /// sign, since `major()` is 0 there.
    ///
    /// ```rust
    /// use foodshop_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(6840).display_with("THB"), "68.40 THB");
    /// assert_eq!(Money::from_minor(-5).display_with("THB"), "-0.05 THB");
    /// assert_eq!(Money::from_minor(-550).display_with("THB"), "-5.50 THB");
    /// ```
    pub fn display_with(&self, unit: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}.{:02} {}",
            sign,
            self.major().abs(),
            self.minor_part(),
            unit
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_with(DEFAULT_CURRENCY_UNIT))
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

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
