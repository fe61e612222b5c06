//! # Cart
//!
//! Collects configured products handed over by [`ProductConfigurator`].
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Configurator action      Cart call               Cart state change     │
//! │  ───────────────────      ─────────               ─────────────────     │
//! │                                                                         │
//! │  add_to_cart(&mut cart) ─► deliver(snapshot) ───► lines.push(snapshot)  │
//! │                                                                         │
//! │  Show totals ────────────► CartTotals::from ────► (read only)           │
//! │                                                                         │
//! │  Clear ──────────────────► clear() ─────────────► lines.clear()         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines are never merged: two pizzas with different toppings are two lines.
//!
//! [`ProductConfigurator`]: carta_core::ProductConfigurator

use serde::{Deserialize, Serialize};
use tracing::debug;

use carta_core::{CartProduct, CartSink, Price};

/// The order being assembled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartProduct>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total amount of items across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|line| line.amount).sum()
    }

    /// Sum of all line prices.
    pub fn subtotal(&self) -> Price {
        self.lines
            .iter()
            .fold(Price::zero(), |acc, line| acc + line.price)
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl CartSink for Cart {
    fn deliver(&mut self, product: CartProduct) {
        debug!(product_id = %product.id, amount = product.amount, "Cart received product");
        self.lines.push(product);
    }
}

/// Cart totals summary for output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: u32,
    pub subtotal: Price,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
        }
    }
}
