use std::io::Write;

use clap::Args;

use carta_core::Catalog;

use crate::commands::{configure, ConfigureArgs};
use crate::config::CartaConfig;
use crate::error::CliResult;

#[derive(Debug, Args)]
pub(crate) struct PriceArgs {
    #[command(flatten)]
    configure: ConfigureArgs,

    /// Print the evaluation as JSON
    #[arg(long)]
    json: bool,
}

pub(crate) fn run(
    args: PriceArgs,
    catalog: &Catalog,
    config: &CartaConfig,
    out: &mut impl Write,
) -> CliResult<()> {
    let configurator = configure(&args.configure, catalog, config)?;
    let evaluation = configurator.evaluate();

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &evaluation)?;
        writeln!(out)?;
        return Ok(());
    }

    let images = if evaluation.visible_images.is_empty() {
        "none".to_string()
    } else {
        evaluation
            .visible_images
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    };

    writeln!(out, "{} x{}", configurator.item().name, configurator.amount())?;
    writeln!(out, "unit price: {}", evaluation.unit_price)?;
    writeln!(out, "total: {}", evaluation.total)?;
    writeln!(out, "images: {images}")?;

    Ok(())
}
