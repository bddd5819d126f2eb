//! # Money Module
//!
//! Provides the `Money` type for prices and booking totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    1200 × 1.3 = 1560.0000000000002                                      │
//! │                                                                         │
//! │  OUR SOLUTION: integer units + basis-point factors                      │
//! │    1200 × 13000 / 10000 = 1560 exactly                                  │
//! │    Rounding happens once, at the end, half-up                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog prices are whole currency units (R1200 per night), so `Money`
//! stores whole units.
//!
//! ## Usage
//! ```rust
//! use hotelbook_core::money::Money;
//!
//! let per_night = Money::from_units(1200);
//! let three_nights = per_night * 3u32;
//! assert_eq!(three_nights.units(), 3600);
//!
//! // Deluxe multiplier 1.3× expressed as 13000 basis points
//! assert_eq!(per_night.scale_bps(13000).units(), 1560);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

/// Basis points in 1.0×.
pub const BPS_SCALE: i128 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole currency units.
///
/// ## Where Money is Used
/// ```text
/// BookableItem.base_price_per_night ──► × room multiplier ──► room unit price
///                                                  │
///                     × rooms × nights (round once)▼
///                                             room total ─┐
/// AddOn.price_per_night × nights ──────────► add-ons total┴─► grand total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Largest representable amount; saturating arithmetic stops here.
    pub const MAX: Money = Money(i64::MAX);

    pub const MIN: Money = Money(i64::MIN);

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies by a basis-point factor and rounds half-up once.
    ///
    /// ## Implementation
    /// `(amount × bps + 5000) / 10000` in i128, so large room totals cannot
    /// overflow before the division.
    ///
    /// ## Example
    /// ```rust
    /// use hotelbook_core::money::Money;
    ///
    /// // 950 × 1.3 = 1235
    /// assert_eq!(Money::from_units(950).scale_bps(13000).units(), 1235);
    /// // 333 × 1.3 = 432.9 → 433
    /// assert_eq!(Money::from_units(333).scale_bps(13000).units(), 433);
    /// // 5 × 1.3 = 6.5 → 7 (half-up)
    /// assert_eq!(Money::from_units(5).scale_bps(13000).units(), 7);
    /// ```
    pub fn scale_bps(&self, bps: u32) -> Money {
        self.mul_scaled(1, bps)
    }

    /// Multiplies by a quantity and a basis-point factor, rounding half-up
    /// once at the end.
    ///
    /// Saturates at the `i64` bounds instead of overflowing.
    ///
    /// ## Example
    /// ```rust
    /// use hotelbook_core::money::Money;
    ///
    /// // 333 × 10 × 1.3 = 4329
    /// assert_eq!(Money::from_units(333).mul_scaled(10, 13000).units(), 4329);
    /// assert_eq!(Money::from_units(i64::MAX).mul_scaled(3, 13000), Money::MAX);
    /// ```
    pub fn mul_scaled(&self, quantity: i64, bps: u32) -> Money {
        // i64 × i64 always fits in i128; only the bps factor can overflow it
        let product = self.0 as i128 * quantity as i128;
        match product.checked_mul(bps as i128) {
            Some(scaled) => {
                let half = BPS_SCALE / 2;
                let rounded = if scaled >= 0 {
                    (scaled + half) / BPS_SCALE
                } else {
                    (scaled - half) / BPS_SCALE
                };
                Money::from_i128_saturating(rounded)
            }
            None if product < 0 => Money::MIN,
            None => Money::MAX,
        }
    }

    /// Clamps a wide intermediate amount into the `Money` range.
    pub fn from_i128_saturating(units: i128) -> Money {
        Money(units.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }

    #[inline]
    pub const fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Formats with an explicit currency symbol, e.g. `R1200` or `$1200`.
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}{}", sign, symbol, self.0.unsigned_abs())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money the way the booking screens do: `R3600`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("R"))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
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

/// Multiplication by a count (rooms, nights). Saturates at the `i64` bounds.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

/// Saturates like the quote calculator's totals.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Money::saturating_add)
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
        assert_eq!(Money::from_units(3600).to_string(), "R3600");
        assert_eq!(Money::from_units(0).to_string(), "R0");
        assert_eq!(Money::from_units(-150).to_string(), "-R150");
        assert_eq!(Money::from_units(250).format_with("$"), "$250");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(1000);
        let b = Money::from_units(500);

        assert_eq!((a + b).units(), 1500);
        assert_eq!((a - b).units(), 500);
        assert_eq!((a * 3u32).units(), 3000);
        assert_eq!((a * 2i64).units(), 2000);
    }

    #[test]
    fn test_sum() {
        let prices = [Money::from_units(150), Money::from_units(500)];
        let total: Money = prices.iter().sum();
        assert_eq!(total.units(), 650);

        let empty: Vec<Money> = Vec::new();
        assert!(empty.into_iter().sum::<Money>().is_zero());

        let huge = [Money::MAX, Money::from_units(1)];
        assert_eq!(huge.iter().sum::<Money>(), Money::MAX);
    }

    #[test]
    fn test_scale_identity() {
        assert_eq!(Money::from_units(1200).scale_bps(10_000).units(), 1200);
    }

    #[test]
    fn test_scale_rounds_half_up() {
        // 1 × 1.5 = 1.5 → 2
        assert_eq!(Money::from_units(1).scale_bps(15_000).units(), 2);
        // 1 × 1.3 = 1.3 → 1
        assert_eq!(Money::from_units(1).scale_bps(13_000).units(), 1);
    }

    /// Rounding once on the full room total can differ from rounding the
    /// unit price first; the calculator relies on the former.
    #[test]
    fn test_round_once_differs_from_round_each() {
        let base = Money::from_units(333);
        let rounded_unit = base.scale_bps(13_000); // 432.9 → 433
        let per_unit_then_multiply = rounded_unit * 10u32; // 4330
        let multiply_then_round = (base * 10u32).scale_bps(13_000); // 4329

        assert_eq!(per_unit_then_multiply.units(), 4330);
        assert_eq!(multiply_then_round.units(), 4329);
        assert_eq!(base.mul_scaled(10, 13_000).units(), 4329);
    }

    #[test]
    fn test_huge_products_saturate() {
        let big = Money::from_units(i64::MAX / 2);
        assert_eq!(big * 3u32, Money::MAX);
        assert_eq!(Money::from_units(-5) * i64::MAX, Money::MIN);
        assert_eq!(big.scale_bps(u32::MAX), Money::MAX);
        assert_eq!(big.mul_scaled(i64::MAX, u32::MAX), Money::MAX);
        assert_eq!(Money::from_units(-1).mul_scaled(i64::MAX, u32::MAX), Money::MIN);
        assert_eq!(Money::MAX.saturating_add(Money::from_units(1)), Money::MAX);
        assert_eq!(Money::MIN.format_with("R"), "-R9223372036854775808");
    }
}
