//! # Selection Reader
//!
//! Turns raw form state into the normalized selection mapping the pricing
//! engine consumes.
//!
//! ```text
//! raw form state                       selections
//! ──────────────                       ──────────
//! "toppings" → ["olives", "cheese?"]   toppings → {olives}
//! "crust"    → ["thin"]           ──►  crust    → {thin}
//! "coupon"   → ["SPRING"]              (dropped: not a group)
//! ```
//!
//! Selections are rebuilt from scratch on every interaction. Only ids known
//! to the item's descriptor ever make it into a [`Selections`] value.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::catalog::CatalogItem;

/// Raw control state of a configuration form: control name → values.
///
/// Multi-select controls (checkboxes) carry several values; unrelated
/// controls may sit next to the option groups.
pub type RawFormState = BTreeMap<String, Vec<String>>;

/// Normalized selections: group id → selected option ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selections(BTreeMap<String, BTreeSet<String>>);

impl Selections {
    /// Creates an empty selection (nothing picked anywhere).
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads raw form state against an item descriptor.
    ///
    /// Unknown control names and unknown option ids are dropped silently.
    /// A recognized control with no valid values still yields an (empty)
    /// entry for its group.
    ///
    /// ## Example
    /// ```rust
    /// use carta_core::{CatalogItem, RawFormState, Selections};
    ///
    /// let item = CatalogItem::from_json("pizza", r#"{
    ///     "name": "Pizza", "price": 20,
    ///     "params": { "toppings": { "label": "Toppings", "options": {
    ///         "olives": { "label": "Olives", "price": 2, "default": true }
    ///     } } }
    /// }"#).unwrap();
    ///
    /// let mut raw = RawFormState::new();
    /// raw.insert("toppings".into(), vec!["olives".into(), "anchovies".into()]);
    /// raw.insert("newsletter".into(), vec!["yes".into()]);
    ///
    /// let selections = Selections::read(&item, &raw);
    /// assert!(selections.is_selected("toppings", "olives"));
    /// assert!(!selections.is_selected("toppings", "anchovies"));
    /// assert!(selections.group("newsletter").is_none());
    /// ```
    pub fn read(item: &CatalogItem, raw: &RawFormState) -> Self {
        let mut groups = BTreeMap::new();
        let mut dropped = 0usize;

        for (control, values) in raw {
            let Some(group) = item.group(control) else {
                debug!(
                    product_id = %item.id,
                    control = %control,
                    "Ignoring unrelated form control"
                );
                dropped += values.len();
                continue;
            };

            let selected: BTreeSet<String> = values
                .iter()
                .filter(|value| {
                    let known = group.options.contains_key(value.as_str());
                    if !known {
                        dropped += 1;
                    }
                    known
                })
                .cloned()
                .collect();

            groups.insert(control.clone(), selected);
        }

        if dropped > 0 {
            debug!(product_id = %item.id, dropped, "Dropped unknown form values");
        }

        Selections(groups)
    }

    /// Selections matching a freshly rendered form: every default option
    /// checked, nothing else.
    pub fn defaults(item: &CatalogItem) -> Self {
        let mut groups: BTreeMap<String, BTreeSet<String>> = item
            .option_groups
            .keys()
            .map(|group_id| (group_id.clone(), BTreeSet::new()))
            .collect();

        for (group_id, _, option_id, option) in item.iter_options() {
            if option.is_default {
                if let Some(set) = groups.get_mut(group_id) {
                    set.insert(option_id.to_string());
                }
            }
        }

        Selections(groups)
    }

    /// Checks whether an option is selected. Absent groups count as
    /// nothing selected.
    pub fn is_selected(&self, group_id: &str, option_id: &str) -> bool {
        self.0
            .get(group_id)
            .is_some_and(|options| options.contains(option_id))
    }

    /// Returns the selected option ids of a group.
    pub fn group(&self, group_id: &str) -> Option<&BTreeSet<String>> {
        self.0.get(group_id)
    }

    /// Selects an option if the descriptor knows it.
    ///
    /// Returns `true` when the selection changed.
    pub fn select(&mut self, item: &CatalogItem, group_id: &str, option_id: &str) -> bool {
        if item.option(group_id, option_id).is_none() {
            return false;
        }
        self.0
            .entry(group_id.to_string())
            .or_default()
            .insert(option_id.to_string())
    }

    /// Deselects an option. Returns `true` when the selection changed.
    pub fn deselect(&mut self, group_id: &str, option_id: &str) -> bool {
        self.0
            .get_mut(group_id)
            .is_some_and(|options| options.remove(option_id))
    }

    /// Total number of selected options across all groups.
    pub fn selected_count(&self) -> usize {
        self.0.values().map(BTreeSet::len).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
