//! # Pricing & Visibility Engine
//!
//! Derives the live price of a configured item and the set of preview
//! images that should be shown for the current selections.
//!
//! ## Reconciliation Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The base price already includes every default option.                 │
//! │                                                                         │
//! │                      │  default option      │  non-default option       │
//! │  ────────────────────┼──────────────────────┼─────────────────────────  │
//! │  selected            │  unchanged           │  + price_delta            │
//! │  not selected        │  − price_delta       │  unchanged                │
//! │                                                                         │
//! │  unit price = base ± deltas        total = unit price × amount          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every option is visited on every evaluation; nothing is diffed against
//! the previous result.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{CatalogItem, ItemOption};
use crate::price::Price;
use crate::selection::Selections;

/// Result of one evaluation, handed to the display layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceEvaluation {
    /// Price of a single configured item (before the amount multiply).
    pub unit_price: Price,

    /// `unit_price × amount`.
    pub total: Price,

    /// Preview image keys (`group-option`) to show. Exactly the selected
    /// options, regardless of price.
    pub visible_images: BTreeSet<String>,
}

/// Builds the preview image key of an option.
///
/// ## Example
/// ```rust
/// use carta_core::pricing::image_key;
///
/// assert_eq!(image_key("toppings", "redPeppers"), "toppings-redPeppers");
/// ```
#[inline]
pub fn image_key(group_id: &str, option_id: &str) -> String {
    format!("{}-{}", group_id, option_id)
}

/// Price effect of one option given whether it is selected.
#[inline]
fn option_adjustment(option: &ItemOption, selected: bool) -> Price {
    match (selected, option.is_default) {
        (true, false) => option.price_delta,
        (false, true) => Price::zero() - option.price_delta,
        _ => Price::zero(),
    }
}

/// Evaluates an item's price and image visibility.
///
/// `quantity` is trusted to be at least 1; the quantity stepper owns that
/// check. Negative results are returned as is.
///
/// ## Example
/// ```rust
/// use carta_core::{evaluate, CatalogItem, Selections};
///
/// let item = CatalogItem::from_json("pizza", r#"{
///     "name": "Pizza", "price": 20,
///     "params": { "toppings": { "label": "Toppings", "options": {
///         "olives": { "label": "Olives", "price": 2, "default": true },
///         "redPeppers": { "label": "Red peppers", "price": 3 }
///     } } }
/// }"#).unwrap();
///
/// let mut selections = Selections::new();
/// selections.select(&item, "toppings", "redPeppers");
///
/// let result = evaluate(&item, &selections, 2);
/// assert_eq!(result.unit_price.amount(), 21.0);
/// assert_eq!(result.total.amount(), 42.0);
/// assert!(result.visible_images.contains("toppings-redPeppers"));
/// ```
pub fn evaluate(item: &CatalogItem, selections: &Selections, quantity: u32) -> PriceEvaluation {
    let mut unit_price = item.base_price;
    let mut visible_images = BTreeSet::new();

    for (group_id, _, option_id, option) in item.iter_options() {
        let selected = selections.is_selected(group_id, option_id);

        unit_price += option_adjustment(option, selected);

        if selected {
            visible_images.insert(image_key(group_id, option_id));
        }
    }

    PriceEvaluation {
        unit_price,
        total: unit_price.multiply_quantity(quantity),
        visible_images,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::RawFormState;

    fn pizza() -> CatalogItem {
        CatalogItem::from_json(
            "pizza",
            r#"{
                "name": "Nonna Alba's Pizza",
                "price": 20,
                "params": {
                    "toppings": {
                        "label": "Toppings",
                        "options": {
                            "olives": { "label": "Olives", "price": 2, "default": true },
                            "redPeppers": { "label": "Red peppers", "price": 3 }
                        }
                    }
                }
            }"#,
        )
        .unwrap()
    }

    fn select(item: &CatalogItem, picks: &[(&str, &str)]) -> Selections {
        let mut selections = Selections::new();
        for (group_id, option_id) in picks {
            selections.select(item, group_id, option_id);
        }
        selections
    }

    #[test]
    fn test_concrete_scenario() {
        let item = pizza();
        let selections = select(&item, &[("toppings", "redPeppers")]);

        let result = evaluate(&item, &selections, 2);

        assert_eq!(result.unit_price.amount(), 21.0);
        assert_eq!(result.total.amount(), 42.0);
        assert_eq!(
            result.visible_images,
            BTreeSet::from(["toppings-redPeppers".to_string()])
        );
    }

    #[test]
    fn test_defaults_cost_nothing_extra() {
        let item = pizza();
        let result = evaluate(&item, &Selections::defaults(&item), 3);

        assert_eq!(result.unit_price, item.base_price);
        assert_eq!(result.total.amount(), 60.0);
        assert_eq!(
            result.visible_images,
            BTreeSet::from(["toppings-olives".to_string()])
        );
    }

    #[test]
    fn test_selected_default_and_unselected_extra_leave_price() {
        let item = pizza();
        let result = evaluate(&item, &select(&item, &[("toppings", "olives")]), 1);
        assert_eq!(result.unit_price.amount(), 20.0);
    }

    #[test]
    fn test_deselecting_default_refunds() {
        let item = pizza();
        let result = evaluate(&item, &Selections::new(), 1);
        assert_eq!(result.unit_price.amount(), 18.0);
        assert!(result.visible_images.is_empty());
    }

    #[test]
    fn test_selecting_everything() {
        let item = pizza();
        let selections = select(&item, &[("toppings", "olives"), ("toppings", "redPeppers")]);
        let result = evaluate(&item, &selections, 1);

        assert_eq!(result.unit_price.amount(), 23.0);
        assert_eq!(result.visible_images.len(), 2);
    }

    #[test]
    fn test_negative_price_is_not_clamped() {
        let item = CatalogItem::from_json(
            "promo",
            r#"{
                "name": "Promo",
                "price": 1,
                "params": { "extras": { "label": "Extras", "options": {
                    "box": { "label": "Box", "price": 5, "default": true }
                } } }
            }"#,
        )
        .unwrap();

        let result = evaluate(&item, &Selections::new(), 2);
        assert_eq!(result.unit_price.amount(), -4.0);
        assert_eq!(result.total.amount(), -8.0);
    }

    #[test]
    fn test_unknown_form_values_are_not_selected() {
        let item = pizza();
        let mut raw = RawFormState::new();
        raw.insert("toppings".into(), vec!["pineapple".into()]);
        raw.insert("size".into(), vec!["large".into()]);

        let result = evaluate(&item, &Selections::read(&item, &raw), 1);
        assert_eq!(result.unit_price.amount(), 18.0);
        assert!(result.visible_images.is_empty());
    }

    #[test]
    fn test_item_without_groups() {
        let item = CatalogItem::from_json("cake", r#"{ "name": "Cake", "price": 9 }"#).unwrap();
        let result = evaluate(&item, &Selections::new(), 4);
        assert_eq!(result.total.amount(), 36.0);
    }

    #[test]
    fn test_image_key() {
        assert_eq!(image_key("crust", "thin"), "crust-thin");
    }

    #[test]
    fn test_evaluation_serializes_camel_case() {
        let item = pizza();
        let result = evaluate(&item, &Selections::defaults(&item), 1);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["unitPrice"], 20.0);
        assert_eq!(json["total"], 20.0);
        assert_eq!(json["visibleImages"][0], "toppings-olives");
    }
}
