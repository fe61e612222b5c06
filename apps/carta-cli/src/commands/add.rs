use std::io::Write;

use clap::Args;
use serde::Serialize;

use carta_core::{CartProduct, Catalog};

use crate::cart::{Cart, CartTotals};
use crate::commands::{configure, ConfigureArgs};
use crate::config::CartaConfig;
use crate::error::CliResult;

#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    #[command(flatten)]
    configure: ConfigureArgs,
}

/// What `add` prints: the frozen line and the cart it landed in.
#[derive(Debug, Serialize)]
struct AddOutput<'a> {
    product: &'a CartProduct,
    cart: CartTotals,
}

pub(crate) fn run(
    args: AddArgs,
    catalog: &Catalog,
    config: &CartaConfig,
    out: &mut impl Write,
) -> CliResult<()> {
    let configurator = configure(&args.configure, catalog, config)?;

    let mut cart = Cart::new();
    configurator.add_to_cart(&mut cart);

    if let Some(product) = cart.lines.last() {
        let output = AddOutput {
            product,
            cart: CartTotals::from(&cart),
        };
        serde_json::to_writer_pretty(&mut *out, &output)?;
        writeln!(out)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::{catalog, configure_args};
    use carta_core::UnitPriceBasis;

    fn add(select: &[&str], amount: Option<i64>, config: &CartaConfig) -> serde_json::Value {
        let args = AddArgs {
            configure: configure_args("pizza", select, amount),
        };
        let mut out = Vec::new();
        run(args, &catalog(), config, &mut out).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn test_add_prints_snapshot_and_totals() {
        let value = add(&["toppings=redPeppers"], Some(2), &CartaConfig::default());

        let product = &value["product"];
        assert_eq!(product["id"], "pizza");
        assert_eq!(product["name"], "Nonna Alba's Pizza");
        assert_eq!(product["amount"], 2);
        assert_eq!(product["priceSingle"], 20.0);
        assert_eq!(product["price"], 42.0);
        assert_eq!(
            product["params"]["toppings"],
            serde_json::json!({ "label": "Toppings", "options": { "redPeppers": "Red peppers" } })
        );

        assert_eq!(value["cart"]["lineCount"], 1);
        assert_eq!(value["cart"]["totalQuantity"], 2);
        assert_eq!(value["cart"]["subtotal"], 42.0);
    }

    #[test]
    fn test_add_honours_configured_unit_price_basis() {
        let mut config = CartaConfig::default();
        config.cart.unit_price_basis = UnitPriceBasis::Adjusted;

        let value = add(&["toppings=redPeppers"], Some(2), &config);
        assert_eq!(value["product"]["priceSingle"], 21.0);
        assert_eq!(value["product"]["price"], 42.0);
    }
}
