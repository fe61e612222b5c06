//! # Cart Snapshots
//!
//! Builds the immutable summary of a configured item that is handed to the
//! cart when the customer adds it to the order.
//!
//! ## Snapshot Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CatalogItem + Selections + amount + PriceEvaluation                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  build_cart_product() ← THIS MODULE                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartProduct (frozen)                                                  │
//! │  {                                                                      │
//! │    id, name, amount, priceSingle, price,                               │
//! │    params: { toppings: { label: "Toppings",                            │
//! │                          options: { redPeppers: "Red peppers" } } }    │
//! │  }                                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Cart owns it from here on                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Unit Price Basis
//! `priceSingle` has historically carried the item's *base* price, not the
//! per-unit price after option adjustments. [`UnitPriceBasis::Base`] keeps
//! that behavior and is the default; [`UnitPriceBasis::Adjusted`] records the
//! evaluated unit price instead.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::CatalogItem;
use crate::error::ValidationError;
use crate::price::Price;
use crate::pricing::PriceEvaluation;
use crate::selection::Selections;

// =============================================================================
// Unit Price Basis
// =============================================================================

/// Which price ends up in a snapshot's `priceSingle` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum UnitPriceBasis {
    /// The catalog base price, defaults included.
    #[default]
    Base,
    /// The evaluated per-unit price for the current selections.
    Adjusted,
}

impl fmt::Display for UnitPriceBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitPriceBasis::Base => write!(f, "base"),
            UnitPriceBasis::Adjusted => write!(f, "adjusted"),
        }
    }
}

impl FromStr for UnitPriceBasis {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "base" => Ok(UnitPriceBasis::Base),
            "adjusted" | "unit" => Ok(UnitPriceBasis::Adjusted),
            other => Err(ValidationError::InvalidFormat {
                field: "unit_price_basis".to_string(),
                reason: format!("unknown value '{}', expected base or adjusted", other),
            }),
        }
    }
}

// =============================================================================
// Cart Product
// =============================================================================

/// Chosen options of one group, by label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartProductParam {
    /// Group label, e.g. "Toppings".
    pub label: String,

    /// Selected option id → option label, in menu order. Empty when
    /// nothing is selected.
    pub options: IndexMap<String, String>,
}

/// Frozen summary of a configured item, owned by the cart once emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartProduct {
    pub id: String,
    pub name: String,

    /// Number of items on this line.
    pub amount: u32,

    /// Single-item price, see [`UnitPriceBasis`].
    pub price_single: Price,

    /// Price of the whole line.
    pub price: Price,

    /// Every option group of the item in menu order, with only its
    /// selected options.
    pub params: IndexMap<String, CartProductParam>,
}

/// Collects the selected option labels of every group.
///
/// Groups and options follow the menu order. Groups without selections are
/// kept with an empty `options` map so consumers can iterate all groups.
pub fn cart_product_params(
    item: &CatalogItem,
    selections: &Selections,
) -> IndexMap<String, CartProductParam> {
    item.option_groups
        .iter()
        .map(|(group_id, group)| {
            let options = group
                .options
                .iter()
                .filter(|(option_id, _)| selections.is_selected(group_id, option_id))
                .map(|(option_id, option)| (option_id.clone(), option.label.clone()))
                .collect();

            (
                group_id.clone(),
                CartProductParam {
                    label: group.label.clone(),
                    options,
                },
            )
        })
        .collect()
}

/// Builds the snapshot handed to the cart.
///
/// Pure: the result depends only on the arguments.
pub fn build_cart_product(
    item: &CatalogItem,
    selections: &Selections,
    amount: u32,
    evaluation: &PriceEvaluation,
    basis: UnitPriceBasis,
) -> CartProduct {
    let price_single = match basis {
        UnitPriceBasis::Base => item.base_price,
        UnitPriceBasis::Adjusted => evaluation.unit_price,
    };

    CartProduct {
        id: item.id.clone(),
        name: item.name.clone(),
        amount,
        price_single,
        price: evaluation.total,
        params: cart_product_params(item, selections),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
