//! # Commands
//!
//! `clap` definitions and dispatch for the `carta` binary.
//!
//! ```text
//! carta [--config FILE] [--catalog FILE] <COMMAND>
//!
//!   list          products with base prices
//!   price         evaluate one configuration
//!   add           evaluate, add to a cart, print the snapshot
//!   init-config   write the effective configuration to disk
//! ```
//!
//! Commands write to the given `Write` so their output can be captured.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use carta_core::{Catalog, CatalogItem, ProductConfigurator, RawFormState};

use crate::config::CartaConfig;
use crate::error::{CliError, CliResult};

mod add;
mod init_config;
mod list;
mod price;

#[derive(Debug, Parser)]
#[command(name = "carta", about = "Configure and price menu items", long_about = None)]
pub struct Cli {
    /// Path to carta.toml; the platform config directory when omitted
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog document (JSON)
    #[arg(long, global = true, env = "CARTA_CATALOG")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    List(list::ListArgs),
    Price(price::PriceArgs),
    Add(add::AddArgs),
    InitConfig(init_config::InitConfigArgs),
}

impl Cli {
    /// Runs the command with `CARTA_*` overrides from the process environment.
    pub fn run(self, out: &mut impl Write) -> CliResult<()> {
        self.run_with(out, |key| std::env::var(key).ok())
    }

    /// Runs the command, reading `CARTA_*` overrides through `lookup`.
    pub fn run_with<F>(self, out: &mut impl Write, lookup: F) -> CliResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = CartaConfig::load_with(self.config.clone(), lookup)?;

        match self.command {
            Commands::InitConfig(args) => init_config::run(args, &config, self.config, out),
            Commands::List(args) => {
                let catalog = load_catalog(self.catalog.as_deref(), &config)?;
                list::run(args, &catalog, out)
            }
            Commands::Price(args) => {
                let catalog = load_catalog(self.catalog.as_deref(), &config)?;
                price::run(args, &catalog, &config, out)
            }
            Commands::Add(args) => {
                let catalog = load_catalog(self.catalog.as_deref(), &config)?;
                add::run(args, &catalog, &config, out)
            }
        }
    }
}

// =============================================================================
// Shared Helpers
// =============================================================================

/// Product id, selections and amount shared by `price` and `add`.
#[derive(Debug, Args)]
pub(crate) struct ConfigureArgs {
    /// Product id from the catalog
    product: String,

    /// Selected options as group=option[,option...]; repeatable
    #[arg(short, long = "select", value_name = "GROUP=OPTIONS")]
    select: Vec<String>,

    /// Amount to order
    #[arg(short, long)]
    amount: Option<i64>,

    /// Start from an empty selection instead of the defaults
    #[arg(long)]
    clear: bool,
}

/// Reads the catalog from the command line path, falling back to the config.
pub(crate) fn load_catalog(cli_path: Option<&Path>, config: &CartaConfig) -> CliResult<Catalog> {
    let path = cli_path
        .or(config.catalog.path.as_deref())
        .ok_or(CliError::MissingCatalog)?;

    debug!(?path, "Reading catalog");
    let contents = std::fs::read_to_string(path)?;
    Ok(Catalog::from_json(&contents)?)
}

/// Parses `group=option[,option...]` arguments into raw form state.
///
/// Repeated groups accumulate. Ids are not checked here; unknown ones are
/// dropped when the form is read against the item.
pub(crate) fn parse_selections(args: &[String]) -> CliResult<RawFormState> {
    let mut raw = RawFormState::new();

    for arg in args {
        let (group, options) = arg
            .split_once('=')
            .ok_or_else(|| CliError::InvalidSelection(arg.clone()))?;

        let group = group.trim();
        if group.is_empty() {
            return Err(CliError::InvalidSelection(arg.clone()));
        }

        let values = raw.entry(group.to_string()).or_default();
        values.extend(
            options
                .split(',')
                .map(str::trim)
                .filter(|option| !option.is_empty())
                .map(str::to_string),
        );
    }

    Ok(raw)
}

/// Builds a configurator for `args` with the configured stepper and basis.
///
/// Without `--select` or `--clear` the item's defaults stay selected.
pub(crate) fn configure(
    args: &ConfigureArgs,
    catalog: &Catalog,
    config: &CartaConfig,
) -> CliResult<ProductConfigurator> {
    let item: Arc<CatalogItem> = catalog.get(&args.product)?;
    let mut configurator = ProductConfigurator::new(item, config.stepper()?)
        .with_unit_price_basis(config.cart.unit_price_basis);

    if args.clear || !args.select.is_empty() {
        let raw = parse_selections(&args.select)?;
        configurator.apply_form(&raw);
    }

    if let Some(amount) = args.amount {
        configurator.set_amount(amount)?;
    }

    Ok(configurator)
}
