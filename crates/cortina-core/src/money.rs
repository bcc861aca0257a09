//! # Money Module
//!
//! Provides the `Money` type for quoted amounts.
//!
//! ## Whole Currency Units
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHERE FLOATS STOP                                                      │
//! │                                                                         │
//! │  Catalog prices and quantities are fractional:                          │
//! │    3.6 MT × $28,450.50/MT = $102,421.80                                 │
//! │                                                                         │
//! │  Quoted amounts are not. Line totals, subtotal, tax and total are       │
//! │  whole currency units held in an i64:                                   │
//! │    $102,421.80 → Money(102_422)                                         │
//! │                                                                         │
//! │  Crossing from f64 to Money happens in exactly one place:               │
//! │  `Money::round_from`, using round-half-to-even.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cortina_core::money::Money;
//!
//! let line = Money::round_from(102_421.80);
//! assert_eq!(line.units(), 102_422);
//!
//! let doubled = line + line;
//! assert_eq!(doubled.to_string(), "$204,844");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in whole currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction (`total - tax`) never needs a check
/// - **Saturating**: sums clamp at the i64 bounds instead of wrapping
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **No minor units**: quotes are issued in whole pesos
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Rounds a fractional amount to the nearest whole unit.
    ///
    /// Ties go to the even neighbour (`2.5 → 2`, `3.5 → 4`), so a long
    /// run of half-unit amounts does not drift upwards. Non-finite input
    /// yields zero.
    ///
    /// ## Example
    /// ```rust
    /// use cortina_core::money::Money;
    ///
    /// assert_eq!(Money::round_from(10.4).units(), 10);
    /// assert_eq!(Money::round_from(10.5).units(), 10);
    /// assert_eq!(Money::round_from(11.5).units(), 12);
    /// ```
    pub fn round_from(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money::zero();
        }
        Money(amount.round_ties_even() as i64)
    }

    /// Returns the value in whole units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Tax charged on top of this amount (tax-exclusive pricing).
    ///
    /// `round(amount × bps / 10000)`, integer arithmetic, ties to even.
    ///
    /// ## Example
    /// ```rust
    /// use cortina_core::money::Money;
    /// use cortina_core::types::TaxRate;
    ///
    /// let net = Money::from_units(100_000);
    /// assert_eq!(net.calculate_tax(TaxRate::from_bps(1900)).units(), 19_000);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let tax = div_round_half_even(self.0 as i128 * rate.bps() as i128, 10_000);
        Money::clamp_from(tax)
    }

    /// Tax already contained in this amount (tax-inclusive pricing).
    ///
    /// Backs the tax out of a gross total:
    /// `round(total × rate / (1 + rate))` = `round(total × bps / (10000 + bps))`.
    ///
    /// ## User Workflow
    /// ```text
    /// Curtain total (tax included): $119,000
    ///      │
    ///      ▼
    /// tax_included(19%) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Tax: $19,000      Net: $100,000
    /// ```
    pub fn tax_included(&self, rate: TaxRate) -> Money {
        let denominator = 10_000 + rate.bps() as i128;
        let tax = div_round_half_even(self.0 as i128 * rate.bps() as i128, denominator);
        Money::clamp_from(tax)
    }

    #[inline]
    fn clamp_from(wide: i128) -> Self {
        Money(wide.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }
}

/// Integer division rounding to nearest, ties to even. `d` must be positive.
fn div_round_half_even(n: i128, d: i128) -> i128 {
    let q = n.div_euclid(d);
    let r = n.rem_euclid(d);
    match (2 * r).cmp(&d) {
        std::cmp::Ordering::Less => q,
        std::cmp::Ordering::Greater => q + 1,
        std::cmp::Ordering::Equal => {
            if q % 2 == 0 {
                q
            } else {
                q + 1
            }
        }
    }
}

/// Groups digits in threes: 1234567 → "1,234,567".
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Quote-style display: `$1,234,567`, `-$500`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}", sign, group_thousands(self.0.unsigned_abs()))
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// Arithmetic saturates at the i64 bounds; `round_from` already clamps
// absurd line amounts there, so sums of them must not wrap or panic.

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_units(0).to_string(), "$0");
        assert_eq!(Money::from_units(999).to_string(), "$999");
        assert_eq!(Money::from_units(1_000).to_string(), "$1,000");
        assert_eq!(Money::from_units(1_234_567).to_string(), "$1,234,567");
        assert_eq!(Money::from_units(-45_500).to_string(), "-$45,500");
    }

    #[test]
    fn test_round_from_ties_to_even() {
        assert_eq!(Money::round_from(0.5).units(), 0);
        assert_eq!(Money::round_from(1.5).units(), 2);
        assert_eq!(Money::round_from(2.5).units(), 2);
        assert_eq!(Money::round_from(2.51).units(), 3);
        assert_eq!(Money::round_from(-2.5).units(), -2);
    }

    #[test]
    fn test_round_from_non_finite_is_zero() {
        assert!(Money::round_from(f64::NAN).is_zero());
        assert!(Money::round_from(f64::INFINITY).is_zero());
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_units(1_000);
        let b = Money::from_units(500);
        assert_eq!((a + b).units(), 1_500);
        assert_eq!((a - b).units(), 500);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.units(), 2_000);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_units(i64::MAX);
        assert_eq!((max + Money::from_units(1)).units(), i64::MAX);
        assert_eq!((Money::from_units(i64::MIN) - Money::from_units(1)).units(), i64::MIN);

        let total: Money = [max, max, max].iter().sum();
        assert_eq!(total.units(), i64::MAX);

        let mut running = max;
        running += max;
        assert_eq!(running.units(), i64::MAX);
    }

    #[test]
    fn test_tax_exclusive() {
        let rate = TaxRate::from_bps(1900);
        assert_eq!(Money::from_units(100_000).calculate_tax(rate).units(), 19_000);
        // 50 × 0.19 = 9.5 → 10 (ties to even)
        assert_eq!(Money::from_units(50).calculate_tax(rate).units(), 10);
        // 150 × 0.19 = 28.5 → 28
        assert_eq!(Money::from_units(150).calculate_tax(rate).units(), 28);
    }

    #[test]
    fn test_tax_included() {
        let rate = TaxRate::from_bps(1900);
        assert_eq!(Money::from_units(119_000).tax_included(rate).units(), 19_000);
        // 100_000 × 19 / 119 = 15966.38… → 15966
        assert_eq!(Money::from_units(100_000).tax_included(rate).units(), 15_966);
        assert!(Money::zero().tax_included(rate).is_zero());
    }

    #[test]
    fn test_zero_rate_has_no_tax() {
        let amount = Money::from_units(12_345);
        assert!(amount.tax_included(TaxRate::zero()).is_zero());
        assert!(amount.calculate_tax(TaxRate::zero()).is_zero());
    }

    #[test]
    fn test_div_round_half_even() {
        assert_eq!(div_round_half_even(5, 2), 2);
        assert_eq!(div_round_half_even(7, 2), 4);
        assert_eq!(div_round_half_even(-5, 2), -2);
        assert_eq!(div_round_half_even(10, 3), 3);
        assert_eq!(div_round_half_even(11, 3), 4);
    }
}
