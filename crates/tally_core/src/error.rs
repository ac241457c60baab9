//! Configuration error types
//!
//! Keystrokes never fail; only building an engine from a bad configuration does.

use thiserror::Error;

/// Errors raised while validating a [`NumberConfig`](crate::NumberConfig)
/// or constructing the pieces derived from it.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `min` is greater than `max`
    #[error("Inverted bounds: min {min} is greater than max {max}")]
    InvertedBounds { min: f64, max: f64 },

    /// A bound is NaN or infinite
    #[error("Bound must be a finite number, got {0}")]
    NonFiniteBound(f64),

    /// Requested precision cannot be represented by an f64
    #[error("Precision of {digits} digits exceeds the maximum of {max}")]
    PrecisionTooLarge { digits: u32, max: u32 },

    /// The decoration symbol is the empty string
    #[error("Decoration symbol must not be empty")]
    EmptyDecorationSymbol,

    /// The decoration template must contain the symbol exactly once
    #[error("Decoration '{template}' must contain '{symbol}' exactly once, found {found}")]
    DecorationSymbolCount {
        template: String,
        symbol: String,
        found: usize,
    },

    /// Failed to compile the numeric grammar
    #[error("Invalid numeric grammar: {0}")]
    Grammar(#[from] regex::Error),

    /// Failed to parse a TOML configuration
    #[error("Failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
