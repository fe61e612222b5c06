//! # Configuration
//!
//! Settings for the amount stepper, cart snapshots and catalog location.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CARTA_AMOUNT_DEFAULT=1   CARTA_AMOUNT_MIN=1   CARTA_AMOUNT_MAX=9   │
//! │     CARTA_UNIT_PRICE_BASIS=adjusted                                    │
//! │     CARTA_CATALOG=./menu.json                                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/carta/carta.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.carta.carta/carta.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     amount 1 (1..=9), unit price basis "base"                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # carta.toml
//! [catalog]
//! path = "menu.json"
//!
//! [amount]
//! default = 1
//! min = 1
//! max = 9
//!
//! [cart]
//! unit_price_basis = "base"  # base | adjusted
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use carta_core::validation::{validate_amount_bounds, validate_quantity};
use carta_core::{QuantityStepper, UnitPriceBasis, DEFAULT_AMOUNT, MAX_AMOUNT, MIN_AMOUNT};

use crate::error::{CliError, CliResult};

// =============================================================================
// Sections
// =============================================================================

/// Where the catalog document lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Bounds and starting value of the amount stepper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmountSettings {
    #[serde(default = "default_amount")]
    pub default: u32,

    #[serde(default = "default_min")]
    pub min: u32,

    #[serde(default = "default_max")]
    pub max: u32,
}

fn default_amount() -> u32 {
    DEFAULT_AMOUNT
}

fn default_min() -> u32 {
    MIN_AMOUNT
}

fn default_max() -> u32 {
    MAX_AMOUNT
}

impl Default for AmountSettings {
    fn default() -> Self {
        AmountSettings {
            default: default_amount(),
            min: default_min(),
            max: default_max(),
        }
    }
}

/// Cart snapshot settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartSettings {
    /// Which price snapshots record as `priceSingle`.
    #[serde(default)]
    pub unit_price_basis: UnitPriceBasis,
}

// =============================================================================
// Carta Config
// =============================================================================

/// Complete front-end configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartaConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub amount: AmountSettings,

    #[serde(default)]
    pub cart: CartSettings,
}

impl CartaConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (carta.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Same as [`CartaConfig::load`], reading `CARTA_*` overrides through
    /// `lookup` instead of the process environment.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> CliResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> CliResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| CliError::InvalidConfig("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        validate_amount_bounds(self.amount.min, self.amount.max)?;
        validate_quantity(
            i64::from(self.amount.default),
            self.amount.min,
            self.amount.max,
        )
        .map_err(|_| {
            CliError::InvalidConfig(format!(
                "amount.default {} is outside {}..={}",
                self.amount.default, self.amount.min, self.amount.max
            ))
        })?;
        Ok(())
    }

    /// Applies `CARTA_*` overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("CARTA_CATALOG") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog.path = Some(PathBuf::from(path));
        }

        for (key, slot) in [
            ("CARTA_AMOUNT_DEFAULT", &mut self.amount.default),
            ("CARTA_AMOUNT_MIN", &mut self.amount.min),
            ("CARTA_AMOUNT_MAX", &mut self.amount.max),
        ] {
            if let Some(value) = lookup(key) {
                match value.parse::<u32>() {
                    Ok(parsed) => *slot = parsed,
                    Err(_) => warn!(key, value = %value, "Ignoring non-numeric override"),
                }
            }
        }

        if let Some(basis) = lookup("CARTA_UNIT_PRICE_BASIS") {
            match basis.parse::<UnitPriceBasis>() {
                Ok(parsed) => {
                    debug!(basis = %basis, "Overriding unit price basis from environment");
                    self.cart.unit_price_basis = parsed;
                }
                Err(_) => warn!(basis = %basis, "Unknown unit price basis in environment"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "carta", "carta")
            .map(|dirs| dirs.config_dir().join("carta.toml"))
    }

    /// A stepper at the configured default amount.
    pub fn stepper(&self) -> CliResult<QuantityStepper> {
        Ok(QuantityStepper::new(
            self.amount.default,
            self.amount.min,
            self.amount.max,
        )?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
