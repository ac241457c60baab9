//! Tally Widget Library
//!
//! Input widgets built on `tally_core` engines.
//!
//! # Architecture
//!
//! Each input owns exactly one engine. Children never look their engine up;
//! they receive a [`NumberHandle`] when they are constructed:
//!
//! 1. **NumberInput** creates the engine and hands out handles
//! 2. **NumberField** and **NumberAction** hold a handle and forward
//!    keystrokes and clicks into the shared edit pipeline
//! 3. **PinCode** owns one engine per digit cell and reports the complete pin
//!
//! # Example
//!
//! ```rust
//! use tally_core::NumberConfig;
//! use tally_widgets::prelude::*;
//!
//! let input = NumberInput::new(NumberConfig::new().digits(0)).unwrap();
//! let field = input.field();
//! let mut plus = input.increase_button().offset(5.0);
//!
//! field.input("10");
//! plus.click();
//! assert_eq!(field.text(), "15");
//! ```

pub mod handle;
pub mod number_input;
pub mod pin_code;

pub use handle::NumberHandle;
pub use number_input::{NumberAction, NumberField, NumberInput, DEFAULT_OFFSET};
pub use pin_code::{cell_config, CellId, PinCode, DEFAULT_PIN_LENGTH};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::handle::NumberHandle;
    pub use crate::number_input::{NumberAction, NumberField, NumberInput};
    pub use crate::pin_code::{CellId, PinCode};
    pub use tally_core::{PatternInput, StepOrder};
}
