//! # Error Types
//!
//! Domain-specific error types for carta-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  carta-core errors (this file)                                         │
//! │  ├── CatalogError     - Malformed or unknown catalog data              │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  carta-cli errors (separate crate)                                     │
//! │  └── CliError         - Config, I/O and argument failures              │
//! │                                                                         │
//! │  Flow: ValidationError → CatalogError → CliError → exit status         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pricing and snapshot building never fail: once a [`crate::CatalogItem`]
//! exists it is well formed, and unknown selections are ignored rather than
//! reported.

use thiserror::Error;

// =============================================================================
// Catalog Error
// =============================================================================

/// Catalog data contract violations.
///
/// These indicate an authoring bug upstream of the engine. They are raised
/// when catalog data is loaded, never while pricing.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog document is not valid JSON or misses a required field
    /// (for example a group without an `options` map).
    #[error("Malformed catalog data: {0}")]
    Parse(#[from] serde_json::Error),

    /// A price is negative where it must not be, or not a finite number.
    ///
    /// ## When This Occurs
    /// - Base price below zero
    /// - `NaN` or infinite option price
    #[error("Invalid {field} for {item}: {value}")]
    InvalidPrice {
        item: String,
        field: String,
        value: f64,
    },

    /// Product id is not present in the catalog.
    #[error("Product not found: {0}")]
    UnknownProduct(String),

    /// Two catalog entries share one id.
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. whitespace inside an identifier).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CatalogError.
pub type CatalogResult<T> = Result<T, CatalogError>;
