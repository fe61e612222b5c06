use std::io::Write;

use clap::Args;

use carta_core::Catalog;

use crate::error::CliResult;

#[derive(Debug, Args)]
pub(crate) struct ListArgs {
    /// Also print each option group with its option deltas
    #[arg(long)]
    options: bool,
}

pub(crate) fn run(args: ListArgs, catalog: &Catalog, out: &mut impl Write) -> CliResult<()> {
    if catalog.is_empty() {
        writeln!(out, "catalog has no products")?;
        return Ok(());
    }

    for item in catalog.iter() {
        writeln!(out, "{}\t{}\t{}", item.id, item.base_price, item.name)?;

        if !args.options {
            continue;
        }

        for (group_id, group) in &item.option_groups {
            writeln!(out, "  {group_id} ({})", group.label)?;
            for (option_id, option) in &group.options {
                let marker = if option.is_default { "*" } else { " " };
                writeln!(
                    out,
                    "   {marker} {option_id}\t{}\t{}",
                    option.price_delta, option.label
                )?;
            }
        }
    }

    Ok(())
}
