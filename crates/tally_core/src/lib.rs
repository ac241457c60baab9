//! Tally Core
//!
//! Headless state for numeric and masked text inputs:
//!
//! - **Number engine**: turns free-form keystroke text into a rounded,
//!   bounded value plus the exact text to display
//! - **Decorations**: fixed affixes such as `"$xxx kg"` around the number
//! - **Pattern masks**: templates such as `xx/xx/xxxx` split into editable
//!   slots and fixed literals
//!
//! Nothing here renders. Widgets hold an engine and feed it keystrokes.
//!
//! # Example
//!
//! ```rust
//! use tally_core::{NumberConfig, NumberEngine};
//!
//! let config = NumberConfig::new().min(0.0).decoration("$xxx kg");
//! let mut engine = NumberEngine::new(config).unwrap();
//!
//! engine.update_value("12");
//! assert_eq!(engine.display(), "$12 kg");
//!
//! // Typing a minus when negatives are impossible snaps to the bound
//! engine.update_value("-");
//! assert_eq!(engine.value(), Some(0.0));
//! ```

pub mod config;
pub mod decoration;
pub mod engine;
pub mod error;
pub mod numeric;
pub mod pattern;

pub use config::{NumberConfig, DEFAULT_DECORATION_SYMBOL, DEFAULT_DIGITS, MAX_DIGITS};
pub use decoration::Decoration;
pub use engine::{EditOutcome, NumberEngine, NumberState, RejectReason, StepOrder};
pub use error::{ConfigError, Result};
pub use numeric::{format_number, round_to, NumericGrammar, Token};
pub use pattern::{PatternInput, PatternKey, PatternSegment, MASK_CHAR, PLACEHOLDER_CHAR};
