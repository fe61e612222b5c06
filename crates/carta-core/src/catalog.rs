//! # Catalog Types
//!
//! Static descriptors for the menu: what an item costs, which option groups
//! it offers and which options are already baked into the base price.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Types                                   │
//! │                                                                         │
//! │  Catalog                                                                │
//! │  └── products: id ──► Arc<CatalogItem>                                  │
//! │                       ├── name, base_price                             │
//! │                       └── option_groups: id ──► OptionGroup            │
//! │                                                 ├── label, kind        │
//! │                                                 └── options: id ──►    │
//! │                                                     ItemOption         │
//! │                                                     ├── label          │
//! │                                                     ├── price_delta    │
//! │                                                     └── is_default     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Document Format
//! Catalog documents keep the menu data shape used by the front-end:
//! ```json
//! {
//!   "products": {
//!     "pizza": {
//!       "name": "Nonna Alba's Pizza",
//!       "price": 20,
//!       "params": {
//!         "toppings": {
//!           "label": "Toppings",
//!           "type": "checkboxes",
//!           "options": {
//!             "olives": { "label": "Olives", "price": 2, "default": true },
//!             "redPeppers": { "label": "Red peppers", "price": 3 }
//!           }
//!         }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Products, groups and options keep the order of the document. A repeated
//! id at any of these levels rejects the document.
//!
//! Descriptors are immutable once loaded and are shared between item
//! instances through `Arc`.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::{CatalogError, CatalogResult};
use crate::price::Price;
use crate::validation::validate_catalog_item;

// =============================================================================
// Item Option
// =============================================================================

/// A single selectable option inside a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemOption {
    /// Label shown to the customer and copied into cart snapshots.
    pub label: String,

    /// Surcharge when picked, or refund when a default is removed.
    #[serde(rename = "price", default)]
    pub price_delta: Price,

    /// Whether the option's cost is already included in the base price.
    #[serde(rename = "default", default)]
    pub is_default: bool,
}

// =============================================================================
// Option Group
// =============================================================================

/// How a group is presented. Informational only: the engine does not
/// enforce how many options a group may have selected, and a `type` it
/// does not know is read as [`GroupKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    /// Any number of options.
    #[default]
    Checkboxes,
    /// One option out of many.
    Radios,
    /// Drop-down list.
    Select,
    /// Any presentation the engine has no name for.
    #[serde(other)]
    Other,
}

/// A named set of options, e.g. "Toppings".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OptionGroup {
    pub label: String,

    #[serde(rename = "type", default)]
    pub kind: GroupKind,

    /// Required. A group without an options map is malformed data and
    /// fails deserialization.
    #[serde(deserialize_with = "unique_keys")]
    pub options: IndexMap<String, ItemOption>,
}

impl OptionGroup {
    /// Looks up an option by id.
    #[inline]
    pub fn option(&self, option_id: &str) -> Option<&ItemOption> {
        self.options.get(option_id)
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// A purchasable menu item and its configurable option groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogItem {
    /// Stable identifier. Inside a [`Catalog`] document it comes from the
    /// product's map key.
    #[serde(default)]
    pub id: String,

    /// Display name.
    pub name: String,

    /// Price with every default option included.
    #[serde(rename = "price")]
    pub base_price: Price,

    #[serde(rename = "params", default, deserialize_with = "unique_keys")]
    pub option_groups: IndexMap<String, OptionGroup>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Preview image names, one per option that has a visual.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl CatalogItem {
    /// Parses and validates a single item descriptor.
    ///
    /// ## Example
    /// ```rust
    /// use carta_core::CatalogItem;
    ///
    /// let item = CatalogItem::from_json(
    ///     "salad",
    ///     r#"{ "name": "Salad", "price": 9, "params": {} }"#,
    /// ).unwrap();
    /// assert_eq!(item.id, "salad");
    /// assert_eq!(item.base_price.amount(), 9.0);
    /// ```
    pub fn from_json(id: &str, json: &str) -> CatalogResult<Self> {
        let mut item: CatalogItem = serde_json::from_str(json)?;
        item.id = id.to_string();
        validate_catalog_item(&item)?;
        Ok(item)
    }

    /// Looks up an option group by id.
    #[inline]
    pub fn group(&self, group_id: &str) -> Option<&OptionGroup> {
        self.option_groups.get(group_id)
    }

    /// Looks up an option by group and option id.
    pub fn option(&self, group_id: &str, option_id: &str) -> Option<&ItemOption> {
        self.group(group_id).and_then(|group| group.option(option_id))
    }

    /// Iterates every `(group id, group, option id, option)` combination.
    pub fn iter_options(&self) -> impl Iterator<Item = (&str, &OptionGroup, &str, &ItemOption)> {
        self.option_groups.iter().flat_map(|(group_id, group)| {
            group.options.iter().map(move |(option_id, option)| {
                (group_id.as_str(), group, option_id.as_str(), option)
            })
        })
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// On-disk shape of a catalog document.
///
/// Products are read as entries so a repeated id reaches
/// [`Catalog::from_items`] instead of silently replacing the first one.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(deserialize_with = "entries")]
    products: Vec<(String, CatalogItem)>,
}

/// The full menu: every product descriptor, keyed by id, in menu order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: IndexMap<String, Arc<CatalogItem>>,
}

impl Catalog {
    /// Parses a catalog document and validates every product.
    ///
    /// Any malformed product rejects the whole document.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let document: CatalogDocument = serde_json::from_str(json)?;

        let catalog = Self::from_items(document.products.into_iter().map(|(id, mut item)| {
            item.id = id;
            item
        }))?;

        info!(count = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Builds a catalog from already constructed items.
    ///
    /// ## Errors
    /// - [`CatalogError::DuplicateProduct`] when two items share an id
    /// - validation errors for malformed items
    pub fn from_items(items: impl IntoIterator<Item = CatalogItem>) -> CatalogResult<Self> {
        let mut products = IndexMap::new();
        for item in items {
            validate_catalog_item(&item)?;
            if products.contains_key(&item.id) {
                return Err(CatalogError::DuplicateProduct(item.id));
            }
            debug!(
                product_id = %item.id,
                groups = item.option_groups.len(),
                "Catalog product loaded"
            );
            products.insert(item.id.clone(), Arc::new(item));
        }
        Ok(Catalog { products })
    }

    /// Returns a shared handle to a product descriptor.
    pub fn get(&self, product_id: &str) -> CatalogResult<Arc<CatalogItem>> {
        self.products
            .get(product_id)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownProduct(product_id.to_string()))
    }

    /// Iterates products in menu order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<CatalogItem>> {
        self.products.values()
    }

    /// Returns the number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Checks if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Map Readers
// =============================================================================

/// Reads a JSON object as ordered `(key, value)` entries, repeats included.
fn entries<'de, D, V>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct EntriesVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
        type Value = Vec<(String, V)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map keyed by id")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some(entry) = access.next_entry::<String, V>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor(PhantomData))
}

/// Reads a JSON object into an ordered map, rejecting repeated keys.
fn unique_keys<'de, D, V>(deserializer: D) -> Result<IndexMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    let mut map = IndexMap::new();
    for (key, value) in entries(deserializer)? {
        if map.contains_key(&key) {
            return Err(<D::Error as de::Error>::custom(format!("duplicate id `{key}`")));
        }
        map.insert(key, value);
    }
    Ok(map)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const MENU: &str = r#"{
        "products": {
            "pizza": {
                "class": "small",
                "name": "Nonna Alba's Pizza",
                "price": 20,
                "description": "Homemade pizza",
                "images": ["pizza-toppings-olives.jpg"],
                "params": {
                    "toppings": {
                        "label": "Toppings",
                        "type": "checkboxes",
                        "options": {
                            "olives": { "label": "Olives", "price": 2, "default": true },
                            "redPeppers": { "label": "Red peppers", "price": 3 }
                        }
                    },
                    "crust": {
                        "label": "Pizza crust",
                        "type": "radios",
                        "options": {
                            "standard": { "label": "standard", "price": 0, "default": true },
                            "thin": { "label": "thin", "price": 0 }
                        }
                    }
                }
            },
            "cake": {
                "name": "Zio Stefano's Doughnut",
                "price": 9
            }
        }
    }"#;

    #[test]
    fn test_catalog_from_json() {
        let catalog = Catalog::from_json(MENU).unwrap();
        assert_eq!(catalog.len(), 2);

        let pizza = catalog.get("pizza").unwrap();
        assert_eq!(pizza.id, "pizza");
        assert_eq!(pizza.base_price.amount(), 20.0);
        assert_eq!(pizza.group("crust").unwrap().kind, GroupKind::Radios);

        let olives = pizza.option("toppings", "olives").unwrap();
        assert!(olives.is_default);
        assert_eq!(olives.price_delta.amount(), 2.0);

        let peppers = pizza.option("toppings", "redPeppers").unwrap();
        assert!(!peppers.is_default);
    }

    #[test]
    fn test_item_without_params_has_no_groups() {
        let catalog = Catalog::from_json(MENU).unwrap();
        let cake = catalog.get("cake").unwrap();
        assert!(cake.option_groups.is_empty());
        assert_eq!(cake.iter_options().count(), 0);
    }

    #[test]
    fn test_unknown_product() {
        let catalog = Catalog::from_json(MENU).unwrap();
        let err = catalog.get("calzone").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownProduct(id) if id == "calzone"));
    }

    #[test]
    fn test_group_without_options_fails_fast() {
        let json = r#"{
            "products": {
                "pizza": {
                    "name": "Pizza",
                    "price": 20,
                    "params": { "toppings": { "label": "Toppings" } }
                }
            }
        }"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_negative_base_price_rejected() {
        let err = CatalogItem::from_json("x", r#"{ "name": "X", "price": -1 }"#).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPrice { .. }));
    }

    #[test]
    fn test_shared_handles_point_to_same_descriptor() {
        let catalog = Catalog::from_json(MENU).unwrap();
        let a = catalog.get("pizza").unwrap();
        let b = catalog.get("pizza").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_iter_options_visits_every_option() {
        let catalog = Catalog::from_json(MENU).unwrap();
        let pizza = catalog.get("pizza").unwrap();
        let keys: Vec<_> = pizza
            .iter_options()
            .map(|(group_id, _, option_id, _)| format!("{group_id}/{option_id}"))
            .collect();
        assert_eq!(
            keys,
            vec![
                "toppings/olives",
                "toppings/redPeppers",
                "crust/standard",
                "crust/thin"
            ]
        );
    }

    #[test]
    fn test_from_items_rejects_duplicate_ids() {
        let item =
            CatalogItem::from_json("cake", r#"{ "name": "Doughnut", "price": 9 }"#).unwrap();
        let result = Catalog::from_items(vec![item.clone(), item]);
        assert!(matches!(result, Err(CatalogError::DuplicateProduct(id)) if id == "cake"));
    }

    #[test]
    fn test_products_keep_menu_order() {
        let catalog = Catalog::from_json(MENU).unwrap();
        let ids: Vec<&str> = catalog.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["pizza", "cake"]);
    }

    #[test]
    fn test_repeated_product_id_in_document_rejected() {
        let json = r#"{
            "products": {
                "pizza": { "name": "First", "price": 20 },
                "pizza": { "name": "Second", "price": 99 }
            }
        }"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateProduct(id) if id == "pizza"));
    }

    #[test]
    fn test_repeated_option_id_rejected() {
        let json = r#"{
            "name": "Pizza",
            "price": 20,
            "params": { "toppings": { "label": "Toppings", "options": {
                "olives": { "label": "Olives", "price": 2 },
                "olives": { "label": "Black olives", "price": 3 }
            } } }
        }"#;
        let err = CatalogItem::from_json("pizza", json).unwrap_err();
        assert!(matches!(&err, CatalogError::Parse(_)));
        assert!(err.to_string().contains("duplicate id `olives`"));
    }

    #[test]
    fn test_unknown_group_type_is_tolerated() {
        let json = r#"{
            "name": "Pizza",
            "price": 20,
            "params": { "toppings": { "label": "Toppings", "type": "multiselect", "options": {
                "olives": { "label": "Olives", "price": 2 }
            } } }
        }"#;
        let item = CatalogItem::from_json("pizza", json).unwrap();
        assert_eq!(item.group("toppings").unwrap().kind, GroupKind::Other);
    }
}
