//! # Validation Module
//!
//! Input validation utilities for Carta.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Validation Happens                           │
//! │                                                                         │
//! │  Catalog load (fail fast)                                              │
//! │  ├── Structure: serde rejects missing fields (e.g. `options`)          │
//! │  └── THIS MODULE: ids, names, finite / non-negative prices             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Quantity stepper                                                      │
//! │  └── THIS MODULE: amount within configured bounds                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Pricing & snapshots                                                   │
//! │  └── No validation: inputs are trusted, unknown selections ignored     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use carta_core::validation::{validate_identifier, validate_quantity};
//!
//! assert!(validate_identifier("option", "redPeppers").is_ok());
//! assert_eq!(validate_quantity(3, 1, 9).unwrap(), 3);
//! ```

use crate::catalog::CatalogItem;
use crate::error::{CatalogError, CatalogResult, ValidationError};
use crate::price::Price;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a catalog identifier (product, group or option id).
///
/// ## Rules
/// - Must not be empty
/// - Must not contain whitespace: ids are joined into preview image keys
///   such as `toppings-olives`
pub fn validate_identifier(field: &str, id: &str) -> ValidationResult<()> {
    if id.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if id.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("'{}' must not contain whitespace", id),
        });
    }

    Ok(())
}

/// Validates a product display name.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an amount coming from the quantity stepper.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must lie within `min..=max`
///
/// ## Returns
/// The amount as `u32`, ready for pricing.
///
/// ## Example
/// ```rust
/// use carta_core::validation::validate_quantity;
///
/// assert!(validate_quantity(1, 1, 9).is_ok());
/// assert!(validate_quantity(0, 1, 9).is_err());
/// assert!(validate_quantity(10, 1, 9).is_err());
/// ```
pub fn validate_quantity(qty: i64, min: u32, max: u32) -> ValidationResult<u32> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    if qty < i64::from(min) || qty > i64::from(max) {
        return Err(ValidationError::OutOfRange {
            field: "amount".to_string(),
            min: i64::from(min),
            max: i64::from(max),
        });
    }

    u32::try_from(qty).map_err(|_| ValidationError::OutOfRange {
        field: "amount".to_string(),
        min: i64::from(min),
        max: i64::from(max),
    })
}

/// Validates stepper bounds.
///
/// ## Rules
/// - `min` must be at least 1
/// - `min` must not exceed `max`
pub fn validate_amount_bounds(min: u32, max: u32) -> ValidationResult<()> {
    if min == 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount.min".to_string(),
        });
    }

    if min > max {
        return Err(ValidationError::OutOfRange {
            field: "amount.min".to_string(),
            min: 1,
            max: i64::from(max),
        });
    }

    Ok(())
}

// =============================================================================
// Catalog Validators
// =============================================================================

fn check_price(
    item: &CatalogItem,
    field: String,
    price: Price,
    allow_negative: bool,
) -> CatalogResult<()> {
    if !price.is_finite() || (!allow_negative && price.is_negative()) {
        return Err(CatalogError::InvalidPrice {
            item: item.id.clone(),
            field,
            value: price.amount(),
        });
    }
    Ok(())
}

/// Validates a whole item descriptor.
///
/// ## Rules
/// - Product, group and option ids are valid identifiers
/// - Name is not blank
/// - Base price is finite and non-negative
/// - Option prices are finite (negative deltas are allowed)
pub fn validate_catalog_item(item: &CatalogItem) -> CatalogResult<()> {
    validate_identifier("id", &item.id)?;
    validate_item_name(&item.name)?;
    check_price(item, "price".to_string(), item.base_price, false)?;

    for (group_id, group) in &item.option_groups {
        validate_identifier("group id", group_id)?;

        for (option_id, option) in &group.options {
            validate_identifier("option id", option_id)?;
            check_price(
                item,
                format!("price of {}.{}", group_id, option_id),
                option.price_delta,
                true,
            )?;
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
