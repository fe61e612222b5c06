//! # Quantity Stepper
//!
//! Holds the amount of items being configured and keeps it within bounds.
//!
//! ```text
//!   [ − ]   2   [ + ]        min 1 ─────────────── max 9
//!     │         │
//!     │         └── increment(): 2 → 3 (stays at max)
//!     └──────────── decrement(): 2 → 1 (stays at min)
//! ```
//!
//! Pricing trusts whatever amount it is given; this type is where an amount
//! is checked.

use crate::validation::{validate_amount_bounds, validate_quantity, ValidationResult};
use crate::{DEFAULT_AMOUNT, MAX_AMOUNT, MIN_AMOUNT};

/// Current amount plus the bounds it must stay within.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityStepper {
    value: u32,
    min: u32,
    max: u32,
}

impl QuantityStepper {
    /// Creates a stepper starting at `initial`.
    ///
    /// ## Example
    /// ```rust
    /// use carta_core::QuantityStepper;
    ///
    /// let stepper = QuantityStepper::new(1, 1, 9).unwrap();
    /// assert_eq!(stepper.value(), 1);
    /// assert!(QuantityStepper::new(12, 1, 9).is_err());
    /// ```
    pub fn new(initial: u32, min: u32, max: u32) -> ValidationResult<Self> {
        validate_amount_bounds(min, max)?;
        let value = validate_quantity(i64::from(initial), min, max)?;
        Ok(QuantityStepper { value, min, max })
    }

    /// Current amount.
    #[inline]
    pub fn value(&self) -> u32 {
        self.value
    }

    #[inline]
    pub fn min(&self) -> u32 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Sets the amount. Out-of-range input is rejected and the current
    /// amount is kept.
    pub fn set(&mut self, value: i64) -> ValidationResult<u32> {
        self.value = validate_quantity(value, self.min, self.max)?;
        Ok(self.value)
    }

    /// Adds one, unless already at the maximum.
    pub fn increment(&mut self) -> u32 {
        if self.value < self.max {
            self.value += 1;
        }
        self.value
    }

    /// Removes one, unless already at the minimum.
    pub fn decrement(&mut self) -> u32 {
        if self.value > self.min {
            self.value -= 1;
        }
        self.value
    }
}

impl Default for QuantityStepper {
    fn default() -> Self {
        QuantityStepper {
            value: DEFAULT_AMOUNT,
            min: MIN_AMOUNT,
            max: MAX_AMOUNT,
        }
    }
}
