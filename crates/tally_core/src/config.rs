//! Number input configuration
//!
//! [`NumberConfig`] is a fully enumerated option set with explicit defaults.
//! It is built once (with the builder methods or from TOML) and handed to a
//! [`NumberEngine`](crate::NumberEngine), which never mutates it.
//!
//! ```toml
//! digits = 0
//! min = 0
//! max = 9
//! ignore_overflow = true
//! ```

use serde::{Deserialize, Deserializer, Serialize};

use crate::decoration::Decoration;
use crate::error::{ConfigError, Result};

/// Default number of decimal places
pub const DEFAULT_DIGITS: u32 = 2;

/// Largest precision an f64 can round to without losing integer digits
pub const MAX_DIGITS: u32 = 15;

/// Default slot marker inside a decoration template
pub const DEFAULT_DECORATION_SYMBOL: &str = "xxx";

/// Configuration for a numeric input
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberConfig {
    /// Decimal precision; `0` disables the fractional part entirely
    #[serde(deserialize_with = "deserialize_digits")]
    pub digits: u32,
    /// Inclusive lower bound
    pub min: Option<f64>,
    /// Inclusive upper bound
    pub max: Option<f64>,
    /// Template wrapped around the display, e.g. `"$xxx kg"`
    pub decoration: Option<String>,
    /// Marker for the numeric slot inside `decoration`
    pub decoration_symbol: String,
    /// Reject out-of-range edits instead of clamping them
    pub ignore_overflow: bool,
    /// Initial value
    pub default_value: Option<f64>,
}

impl Default for NumberConfig {
    fn default() -> Self {
        Self {
            digits: DEFAULT_DIGITS,
            min: None,
            max: None,
            decoration: None,
            decoration_symbol: DEFAULT_DECORATION_SYMBOL.to_string(),
            ignore_overflow: false,
            default_value: None,
        }
    }
}

/// Negative precision from a config file means "no fractional part"
fn deserialize_digits<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let digits = i64::deserialize(deserializer)?;
    if digits < 0 {
        tracing::warn!(digits, "negative precision clamped to 0");
    }
    Ok(digits.clamp(0, u32::MAX as i64) as u32)
}

impl NumberConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML configuration
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the decimal precision (negative values clamp to 0)
    pub fn digits(mut self, digits: i32) -> Self {
        if digits < 0 {
            tracing::warn!(digits, "negative precision clamped to 0");
        }
        self.digits = digits.max(0) as u32;
        self
    }

    /// Set the inclusive lower bound
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the inclusive upper bound
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Set the decoration template
    pub fn decoration(mut self, template: impl Into<String>) -> Self {
        self.decoration = Some(template.into());
        self
    }

    /// Set the marker used for the numeric slot in the decoration
    pub fn decoration_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.decoration_symbol = symbol.into();
        self
    }

    /// Reject out-of-range edits instead of clamping
    pub fn ignore_overflow(mut self, ignore: bool) -> Self {
        self.ignore_overflow = ignore;
        self
    }

    /// Set the initial value
    pub fn default_value(mut self, value: f64) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Check the configuration for values the engine cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.digits > MAX_DIGITS {
            return Err(ConfigError::PrecisionTooLarge {
                digits: self.digits,
                max: MAX_DIGITS,
            });
        }

        for bound in [self.min, self.max].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(ConfigError::NonFiniteBound(bound));
            }
        }

        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(ConfigError::InvertedBounds { min, max });
            }
        }

        self.build_decoration()?;
        Ok(())
    }

    /// Build the decoration described by this config, if any
    pub fn build_decoration(&self) -> Result<Option<Decoration>> {
        self.decoration
            .as_deref()
            .map(|template| Decoration::new(template, self.decoration_symbol.as_str()))
            .transpose()
    }

    /// The bound `value` lies beyond, if any; `true` marks the lower bound
    pub fn violated_bound(&self, value: f64) -> Option<(f64, bool)> {
        match (self.min, self.max) {
            (Some(min), _) if value < min => Some((min, true)),
            (_, Some(max)) if value > max => Some((max, false)),
            _ => None,
        }
    }
}
