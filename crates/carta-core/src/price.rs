//! # Price Module
//!
//! Provides the `Price` type used for every amount the engine derives.
//!
//! ## Why Not Integer Cents?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MENU PRICES ARE PLAIN NUMBERS                                          │
//! │                                                                         │
//! │  Catalog data carries prices such as 20, 2, 3.5 as plain numbers.      │
//! │  The engine adds, subtracts and multiplies them and hands the result   │
//! │  to a display layer that owns rounding and currency formatting.        │
//! │                                                                         │
//! │    base 20 - olives 2 + red peppers 3 = 21 per unit                    │
//! │    21 × amount 2                      = 42 total                       │
//! │                                                                         │
//! │  No rounding, no floor at zero: a negative result is passed through.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use carta_core::price::Price;
//!
//! let base = Price::from_amount(20.0);
//! let unit = base - Price::from_amount(2.0) + Price::from_amount(3.0);
//! assert_eq!(unit.amount(), 21.0);
//! assert_eq!(unit.multiply_quantity(2).amount(), 42.0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

/// Tolerance used when comparing derived prices.
///
/// Adding then subtracting the same delta can leave a residue in the last
/// bits of an `f64`; comparisons in the engine and its tests go through
/// [`Price::approx_eq`] with this epsilon.
pub const PRICE_EPSILON: f64 = 1e-9;

// =============================================================================
// Price Type
// =============================================================================

/// A monetary amount in the catalog's own unit.
///
/// ## Design Decisions
/// - **f64**: catalog prices are real numbers, the display layer rounds
/// - **Transparent serde**: serialises as a bare JSON number
/// - **Signed**: option deltas and refunded defaults may push it below zero
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Price(f64);

impl Price {
    /// Creates a price from a plain amount.
    ///
    /// ## Example
    /// ```rust
    /// use carta_core::price::Price;
    ///
    /// let price = Price::from_amount(9.5);
    /// assert_eq!(price.amount(), 9.5);
    /// ```
    #[inline]
    pub const fn from_amount(amount: f64) -> Self {
        Price(amount)
    }

    /// Returns the plain amount.
    #[inline]
    pub const fn amount(&self) -> f64 {
        self.0
    }

    /// Returns a zero price.
    #[inline]
    pub const fn zero() -> Self {
        Price(0.0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    /// Checks that the amount is neither `NaN` nor infinite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Multiplies a unit price by an amount of items.
    ///
    /// ## Example
    /// ```rust
    /// use carta_core::price::Price;
    ///
    /// let unit = Price::from_amount(21.0);
    /// assert_eq!(unit.multiply_quantity(3).amount(), 63.0);
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Self {
        Price(self.0 * f64::from(qty))
    }

    /// Compares two prices within [`PRICE_EPSILON`].
    ///
    /// ## Example
    /// ```rust
    /// use carta_core::price::Price;
    ///
    /// let a = Price::from_amount(0.1) + Price::from_amount(0.2);
    /// assert!(a.approx_eq(Price::from_amount(0.3)));
    /// ```
    #[inline]
    pub fn approx_eq(&self, other: Price) -> bool {
        (self.0 - other.0).abs() < PRICE_EPSILON
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Prints the bare amount (`21`, `10.5`). Currency formatting belongs to
/// the display layer.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<f64> for Price {
    fn from(amount: f64) -> Self {
        Price(amount)
    }
}

impl Add for Price {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Price(self.0 + other.0)
    }
}

impl AddAssign for Price {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Price {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Price(self.0 - other.0)
    }
}

impl SubAssign for Price {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by an item amount.
impl Mul<u32> for Price {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_amount() {
        let price = Price::from_amount(10.5);
        assert_eq!(price.amount(), 10.5);
        assert_eq!(Price::from(3.0), Price::from_amount(3.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Price::from_amount(42.0)), "42");
        assert_eq!(format!("{}", Price::from_amount(10.5)), "10.5");
        assert_eq!(format!("{}", Price::from_amount(-2.0)), "-2");
    }

    #[test]
    fn test_arithmetic() {
        let a = Price::from_amount(10.0);
        let b = Price::from_amount(4.0);

        assert_eq!((a + b).amount(), 14.0);
        assert_eq!((a - b).amount(), 6.0);
        assert_eq!((a * 3).amount(), 30.0);

        let mut c = a;
        c += b;
        c -= Price::from_amount(1.0);
        assert_eq!(c.amount(), 13.0);
    }

    #[test]
    fn test_negative_is_not_clamped() {
        let price = Price::from_amount(1.0) - Price::from_amount(3.0);
        assert!(price.is_negative());
        assert_eq!(price.amount(), -2.0);
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Price::zero().is_zero());
        assert!(Price::default().is_zero());
        assert!(!Price::from_amount(f64::NAN).is_finite());
        assert!(!Price::from_amount(f64::INFINITY).is_finite());
        assert!(Price::from_amount(5.0).is_finite());
    }

    #[test]
    fn test_approx_eq_absorbs_float_residue() {
        let sum = Price::from_amount(0.1) + Price::from_amount(0.2);
        assert_ne!(sum.amount(), 0.3);
        assert!(sum.approx_eq(Price::from_amount(0.3)));
        assert!(!sum.approx_eq(Price::from_amount(0.31)));
    }

    #[test]
    fn test_serializes_as_bare_number() {
        let json = serde_json::to_string(&Price::from_amount(21.5)).unwrap();
        assert_eq!(json, "21.5");
        let back: Price = serde_json::from_str("7").unwrap();
        assert_eq!(back.amount(), 7.0);
    }
}
