//! # CLI Error Type
//!
//! Unified error type for the command-line front-end.
//!
//! ```text
//! ValidationError ──┐
//! CatalogError ─────┼──► CliError ──► "error: ..." on stderr, exit 1
//! io / toml / json ─┘
//! ```

use thiserror::Error;

use carta_core::{CatalogError, ValidationError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration values are inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file is not valid TOML.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config could not be written back.
    #[error("Failed to save config: {0}")]
    ConfigSave(#[from] toml::ser::Error),

    /// No catalog given on the command line, in the environment or config.
    #[error("No catalog configured. Pass --catalog or set CARTA_CATALOG.")]
    MissingCatalog,

    // =========================================================================
    // Input Errors
    // =========================================================================
    /// A `--select` argument is not `group=option`.
    #[error("Invalid selection '{0}', expected group=option")]
    InvalidSelection(String),

    /// Catalog data is malformed or the product is unknown.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Amount or another input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // =========================================================================
    // I/O Errors
    // =========================================================================
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
