//! # carta-cli: Command-Line Front-End
//!
//! Drives [`carta_core`] from a terminal: loads the catalog document, turns
//! `--select group=option` arguments into raw form state, and prints prices
//! or cart snapshots.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize Tracing                                                  │
//! │     • tracing-subscriber with env filter, logs on stderr                │
//! │     • Default: info,carta=debug, override with RUST_LOG                 │
//! │                                                                         │
//! │  2. Parse Arguments (clap)                                              │
//! │                                                                         │
//! │  3. Load Configuration                                                  │
//! │     • defaults → carta.toml → CARTA_* environment                       │
//! │                                                                         │
//! │  4. Load Catalog ──────────────► --catalog, CARTA_CATALOG, [catalog]    │
//! │                                                                         │
//! │  5. Run Command ───────────────► stdout                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod cart;
pub mod commands;
pub mod config;
pub mod error;

pub use cart::{Cart, CartTotals};
pub use commands::Cli;
pub use config::CartaConfig;
pub use error::{CliError, CliResult};

/// Parses the process arguments and runs the selected command.
pub fn run(out: &mut impl Write) -> CliResult<()> {
    init_tracing();

    let cli = Cli::parse();
    info!(version = env!("CARGO_PKG_VERSION"), "Starting carta");

    cli.run(out)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=carta_core=trace` - Trace the pricing core
///
/// Logs go to stderr so command output on stdout stays parseable.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,carta=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
