//! # Product Configurator
//!
//! Per-instance state of one menu item being configured, and the wiring
//! between form changes, pricing and the cart.
//!
//! ## Interaction Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Form change ─────► apply_form(raw) ──┐                                 │
//! │                                       │                                 │
//! │  Amount change ───► set_amount(n) ────┼──► evaluate() ──► PriceEvaluation│
//! │                     increment/decrement                  (price text,   │
//! │                                                           images)       │
//! │                                                                         │
//! │  "Add to order" ──► add_to_cart(sink)                                   │
//! │                       ├── evaluate()                                    │
//! │                       ├── build_cart_product()                          │
//! │                       └── sink.deliver(snapshot)   exactly once         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything runs synchronously on the caller's thread. The descriptor is
//! shared read-only; selections and amount belong to this instance alone.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::catalog::CatalogItem;
use crate::pricing::{evaluate, PriceEvaluation};
use crate::quantity::QuantityStepper;
use crate::selection::{RawFormState, Selections};
use crate::snapshot::{build_cart_product, CartProduct, UnitPriceBasis};
use crate::validation::ValidationResult;

// =============================================================================
// Cart Sink
// =============================================================================

/// Receiver of configured items.
///
/// Called once per "add to order" action, on the caller's thread. The sink
/// takes ownership of the snapshot.
pub trait CartSink {
    fn deliver(&mut self, product: CartProduct);
}

impl CartSink for Vec<CartProduct> {
    fn deliver(&mut self, product: CartProduct) {
        self.push(product);
    }
}

/// Forwards snapshots over a channel. A dropped receiver loses the
/// snapshot and logs a warning.
impl CartSink for Sender<CartProduct> {
    fn deliver(&mut self, product: CartProduct) {
        if let Err(err) = self.send(product) {
            warn!(product_id = %err.0.id, "Cart receiver is gone, snapshot dropped");
        }
    }
}

// =============================================================================
// Product Configurator
// =============================================================================

/// One item instance being configured by one customer.
#[derive(Debug, Clone)]
pub struct ProductConfigurator {
    item: Arc<CatalogItem>,
    selections: Selections,
    amount: QuantityStepper,
    unit_price_basis: UnitPriceBasis,
}

impl ProductConfigurator {
    /// Starts a configuration with the item's default options selected.
    pub fn new(item: Arc<CatalogItem>, amount: QuantityStepper) -> Self {
        let selections = Selections::defaults(&item);
        ProductConfigurator {
            item,
            selections,
            amount,
            unit_price_basis: UnitPriceBasis::default(),
        }
    }

    /// Chooses which price snapshots record as `priceSingle`.
    pub fn with_unit_price_basis(mut self, basis: UnitPriceBasis) -> Self {
        self.unit_price_basis = basis;
        self
    }

    pub fn item(&self) -> &Arc<CatalogItem> {
        &self.item
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    /// Current amount from the stepper.
    pub fn amount(&self) -> u32 {
        self.amount.value()
    }

    /// Evaluates the current configuration.
    pub fn evaluate(&self) -> PriceEvaluation {
        evaluate(&self.item, &self.selections, self.amount.value())
    }

    /// Replaces the selections with the given form state and re-evaluates.
    pub fn apply_form(&mut self, raw: &RawFormState) -> PriceEvaluation {
        self.selections = Selections::read(&self.item, raw);
        let evaluation = self.evaluate();
        debug!(
            product_id = %self.item.id,
            selected = self.selections.selected_count(),
            total = %evaluation.total,
            "Form change re-evaluated"
        );
        evaluation
    }

    /// Sets the amount and re-evaluates. An invalid amount leaves the
    /// configuration untouched.
    pub fn set_amount(&mut self, value: i64) -> ValidationResult<PriceEvaluation> {
        self.amount.set(value)?;
        Ok(self.evaluate())
    }

    pub fn increment_amount(&mut self) -> PriceEvaluation {
        self.amount.increment();
        self.evaluate()
    }

    pub fn decrement_amount(&mut self) -> PriceEvaluation {
        self.amount.decrement();
        self.evaluate()
    }

    /// Builds the snapshot for the current configuration without sending it.
    pub fn snapshot(&self) -> CartProduct {
        let evaluation = self.evaluate();
        build_cart_product(
            &self.item,
            &self.selections,
            self.amount.value(),
            &evaluation,
            self.unit_price_basis,
        )
    }

    /// Re-evaluates, builds the snapshot and delivers it to `sink` once.
    ///
    /// Returns the evaluation so the caller can refresh the display.
    pub fn add_to_cart<S>(&self, sink: &mut S) -> PriceEvaluation
    where
        S: CartSink + ?Sized,
    {
        let evaluation = self.evaluate();
        let product = build_cart_product(
            &self.item,
            &self.selections,
            self.amount.value(),
            &evaluation,
            self.unit_price_basis,
        );

        info!(
            product_id = %product.id,
            amount = product.amount,
            price = %product.price,
            "Adding configured product to cart"
        );
        sink.deliver(product);

        evaluation
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn pizza() -> Arc<CatalogItem> {
        Arc::new(
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
            .unwrap(),
        )
    }

    fn form(values: &[&str]) -> RawFormState {
        let mut raw = RawFormState::new();
        raw.insert(
            "toppings".to_string(),
            values.iter().map(|v| v.to_string()).collect(),
        );
        raw
    }

    #[test]
    fn test_starts_at_defaults() {
        let configurator = ProductConfigurator::new(pizza(), QuantityStepper::default());
        let evaluation = configurator.evaluate();

        assert_eq!(configurator.amount(), 1);
        assert_eq!(evaluation.total.amount(), 20.0);
        assert!(evaluation.visible_images.contains("toppings-olives"));
    }

    #[test]
    fn test_form_and_amount_changes_re_evaluate() {
        let mut configurator = ProductConfigurator::new(pizza(), QuantityStepper::default());

        let evaluation = configurator.apply_form(&form(&["redPeppers"]));
        assert_eq!(evaluation.total.amount(), 21.0);

        let evaluation = configurator.set_amount(2).unwrap();
        assert_eq!(evaluation.total.amount(), 42.0);

        let evaluation = configurator.increment_amount();
        assert_eq!(evaluation.total.amount(), 63.0);

        let evaluation = configurator.decrement_amount();
        assert_eq!(evaluation.total.amount(), 42.0);
    }

    #[test]
    fn test_invalid_amount_keeps_previous() {
        let mut configurator = ProductConfigurator::new(pizza(), QuantityStepper::default());
        configurator.set_amount(3).unwrap();

        assert!(configurator.set_amount(0).is_err());
        assert_eq!(configurator.amount(), 3);
    }

    #[test]
    fn test_add_to_cart_delivers_exactly_once() {
        let mut configurator = ProductConfigurator::new(pizza(), QuantityStepper::default());
        configurator.apply_form(&form(&["redPeppers"]));
        configurator.set_amount(2).unwrap();

        let mut cart: Vec<CartProduct> = Vec::new();
        let evaluation = configurator.add_to_cart(&mut cart);

        assert_eq!(cart.len(), 1);
        assert_eq!(evaluation.total.amount(), 42.0);
        assert_eq!(cart[0].price.amount(), 42.0);
        assert_eq!(cart[0].price_single.amount(), 20.0);
        assert_eq!(cart[0].amount, 2);
        assert!(cart[0].params["toppings"].options.contains_key("redPeppers"));
    }

    #[test]
    fn test_add_to_cart_over_channel() {
        let mut configurator = ProductConfigurator::new(pizza(), QuantityStepper::default())
            .with_unit_price_basis(UnitPriceBasis::Adjusted);
        configurator.apply_form(&form(&["olives", "redPeppers"]));

        let (mut tx, rx) = mpsc::channel();
        configurator.add_to_cart(&mut tx);
        let product = rx.try_recv().unwrap();
        assert_eq!(product.id, "pizza");
        assert_eq!(product.price_single.amount(), 23.0);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_add_to_cart_through_trait_object() {
        let configurator = ProductConfigurator::new(pizza(), QuantityStepper::default());
        let mut cart: Vec<CartProduct> = Vec::new();
        {
            let sink: &mut dyn CartSink = &mut cart;
            configurator.add_to_cart(sink);
        }
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_snapshot_is_independent_of_later_changes() {
        let mut configurator = ProductConfigurator::new(pizza(), QuantityStepper::default());
        let before = configurator.snapshot();

        configurator.apply_form(&form(&[]));
        let after = configurator.snapshot();

        assert!(before.params["toppings"].options.contains_key("olives"));
        assert!(after.params["toppings"].options.is_empty());
        assert_eq!(after.price.amount(), 18.0);
    }

    #[test]
    fn test_shared_descriptor_between_instances() {
        let item = pizza();
        let mut first = ProductConfigurator::new(Arc::clone(&item), QuantityStepper::default());
        let second = ProductConfigurator::new(Arc::clone(&item), QuantityStepper::default());

        first.apply_form(&form(&["redPeppers"]));

        assert_eq!(first.evaluate().total.amount(), 21.0);
        assert_eq!(second.evaluate().total.amount(), 20.0);
        assert!(Arc::ptr_eq(first.item(), second.item()));
    }
}
