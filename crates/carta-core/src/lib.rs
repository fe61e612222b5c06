//! # carta-core: Menu Item Configuration & Pricing
//!
//! This crate is the **heart** of Carta. It turns a catalog item plus a
//! customer's option choices into a live price, the set of preview images
//! to show, and a frozen cart snapshot, all as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Carta Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Front-end / carta-cli                           │   │
//! │  │    Menu ──► Option form ──► Amount stepper ──► Cart             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ raw form state, amount                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ carta-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │ selection │  │  pricing  │  │ snapshot  │  │   │
//! │  │   │ CatalogItem│ │ Selections│  │ evaluate  │  │CartProduct│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   configurator: per-instance state, CartSink hand-off           │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO UI TOOLKIT • PURE FUNCTIONS                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Item descriptors and the menu catalog
//! - [`selection`] - Raw form state → normalized selections
//! - [`pricing`] - Price and image visibility derivation
//! - [`snapshot`] - Cart snapshots
//! - [`configurator`] - Per-instance configuration state and cart hand-off
//! - [`quantity`] - Amount stepper
//! - [`price`] - The `Price` amount type
//! - [`error`] / [`validation`] - Domain errors and input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use carta_core::{CartProduct, Catalog, ProductConfigurator, QuantityStepper, RawFormState};
//!
//! let catalog = Catalog::from_json(r#"{ "products": { "pizza": {
//!     "name": "Nonna Alba's Pizza", "price": 20,
//!     "params": { "toppings": { "label": "Toppings", "options": {
//!         "olives": { "label": "Olives", "price": 2, "default": true },
//!         "redPeppers": { "label": "Red peppers", "price": 3 }
//!     } } }
//! } } }"#).unwrap();
//!
//! let item = catalog.get("pizza").unwrap();
//! let mut pizza = ProductConfigurator::new(item, QuantityStepper::default());
//!
//! let mut form = RawFormState::new();
//! form.insert("toppings".into(), vec!["redPeppers".into()]);
//! pizza.apply_form(&form);
//! let shown = pizza.set_amount(2).unwrap();
//! assert_eq!(shown.total.amount(), 42.0);
//!
//! let mut cart: Vec<CartProduct> = Vec::new();
//! pizza.add_to_cart(&mut cart);
//! assert_eq!(cart[0].params["toppings"].options["redPeppers"], "Red peppers");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod configurator;
pub mod error;
pub mod price;
pub mod pricing;
pub mod quantity;
pub mod selection;
pub mod snapshot;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{Catalog, CatalogItem, GroupKind, ItemOption, OptionGroup};
pub use configurator::{CartSink, ProductConfigurator};
pub use error::{CatalogError, CatalogResult, ValidationError};
pub use price::Price;
pub use pricing::{evaluate, image_key, PriceEvaluation};
pub use quantity::QuantityStepper;
pub use selection::{RawFormState, Selections};
pub use snapshot::{
    build_cart_product, cart_product_params, CartProduct, CartProductParam, UnitPriceBasis,
};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Amount a freshly shown item starts at.
pub const DEFAULT_AMOUNT: u32 = 1;

/// Smallest amount the stepper accepts.
pub const MIN_AMOUNT: u32 = 1;

/// Largest amount the stepper accepts.
///
/// ## Business Reason
/// Guards against accidental over-ordering from a single menu entry.
pub const MAX_AMOUNT: u32 = 9;
