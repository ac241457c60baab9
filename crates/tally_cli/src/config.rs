//! Playground configuration
//!
//! `tally number --config tally.toml` reads:
//!
//! ```toml
//! step = 0.5
//!
//! [number]
//! digits = 1
//! min = 0
//! decoration = "$xxx"
//! ```
//!
//! Command-line flags override values from the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tally_core::NumberConfig;

/// Settings for `tally number`
#[derive(Debug, Deserialize, Serialize)]
pub struct PlaygroundConfig {
    #[serde(default)]
    pub number: NumberConfig,
    /// Offset used by `:inc` / `:dec` without an argument
    #[serde(default = "default_step")]
    pub step: f64,
}

fn default_step() -> f64 {
    1.0
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            number: NumberConfig::default(),
            step: default_step(),
        }
    }
}

/// Flag values that override the file
#[derive(Debug, Default)]
pub struct Overrides {
    pub digits: Option<i32>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub decoration: Option<String>,
    pub decoration_symbol: Option<String>,
    pub ignore_overflow: bool,
    pub default_value: Option<f64>,
    pub step: Option<f64>,
}

impl PlaygroundConfig {
    /// Load configuration from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: PlaygroundConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        let mut number = self.number;
        if let Some(digits) = overrides.digits {
            number = number.digits(digits);
        }
        if let Some(min) = overrides.min {
            number = number.min(min);
        }
        if let Some(max) = overrides.max {
            number = number.max(max);
        }
        if let Some(decoration) = overrides.decoration {
            number = number.decoration(decoration);
        }
        if let Some(symbol) = overrides.decoration_symbol {
            number = number.decoration_symbol(symbol);
        }
        if overrides.ignore_overflow {
            number = number.ignore_overflow(true);
        }
        if let Some(value) = overrides.default_value {
            number = number.default_value(value);
        }
        self.number = number;

        if let Some(step) = overrides.step {
            self.step = step;
        }
        self
    }
}
