//! Number input with stepper buttons
//!
//! [`NumberInput`] owns one engine. The text field and the increase/decrease
//! buttons it hands out each hold a clone of its [`NumberHandle`], so every
//! piece edits the same state through the same pipeline.
//!
//! # Example
//!
//! ```rust
//! use tally_core::NumberConfig;
//! use tally_widgets::NumberInput;
//!
//! let input = NumberInput::new(NumberConfig::new().min(0.0).max(3.0)).unwrap();
//! let field = input.field().placeholder("Qty");
//! let mut plus = input.increase_button();
//!
//! assert_eq!(field.shown_text(), "Qty");
//! plus.click();
//! plus.click();
//! assert_eq!(field.text(), "2");
//!
//! field.input("10");
//! assert_eq!(input.handle().value(), Some(3.0));
//! ```

use std::fmt;

use tally_core::{EditOutcome, NumberConfig, NumberEngine, Result, StepOrder};

use crate::handle::NumberHandle;

/// Default step applied by stepper buttons
pub const DEFAULT_OFFSET: f64 = 1.0;

/// Root of a number input; owns the engine
#[derive(Clone, Debug)]
pub struct NumberInput {
    handle: NumberHandle,
}

impl NumberInput {
    /// Create an input from a config
    pub fn new(config: NumberConfig) -> Result<Self> {
        Ok(Self {
            handle: NumberHandle::from_config(config)?,
        })
    }

    /// Create an input that reports every edit to `on_value_change`
    pub fn with_on_value_change<F>(config: NumberConfig, on_value_change: F) -> Result<Self>
    where
        F: FnMut(Option<f64>) + 'static,
    {
        let engine = NumberEngine::new(config)?.on_value_change(on_value_change);
        Ok(Self {
            handle: NumberHandle::new(engine),
        })
    }

    /// Handle shared with every child widget
    pub fn handle(&self) -> NumberHandle {
        self.handle.clone()
    }

    /// Text field bound to this input
    pub fn field(&self) -> NumberField {
        NumberField::new(self.handle())
    }

    /// Button that increases the value by [`DEFAULT_OFFSET`]
    pub fn increase_button(&self) -> NumberAction {
        NumberAction::new(self.handle(), StepOrder::Increase)
    }

    /// Button that decreases the value by [`DEFAULT_OFFSET`]
    pub fn decrease_button(&self) -> NumberAction {
        NumberAction::new(self.handle(), StepOrder::Decrease)
    }
}

/// Text field consumer of a number input
#[derive(Clone, Debug)]
pub struct NumberField {
    handle: NumberHandle,
    placeholder: String,
}

impl NumberField {
    pub fn new(handle: NumberHandle) -> Self {
        Self {
            handle,
            placeholder: String::new(),
        }
    }

    /// Set the placeholder shown while the display is empty
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Submit the field's full text after a keystroke
    pub fn input(&self, text: &str) -> EditOutcome {
        self.handle.update_value(text)
    }

    /// The engine's display text
    pub fn text(&self) -> String {
        self.handle.display()
    }

    /// Display text, or the placeholder when empty
    pub fn shown_text(&self) -> String {
        let display = self.handle.display();
        if display.is_empty() {
            self.placeholder.clone()
        } else {
            display
        }
    }

    pub fn is_placeholder_shown(&self) -> bool {
        self.handle.display().is_empty()
    }
}

/// Stepper button consumer of a number input
pub struct NumberAction {
    handle: NumberHandle,
    order: StepOrder,
    offset: f64,
    on_click: Option<Box<dyn FnMut()>>,
}

impl fmt::Debug for NumberAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumberAction")
            .field("order", &self.order)
            .field("offset", &self.offset)
            .finish()
    }
}

impl NumberAction {
    pub fn new(handle: NumberHandle, order: StepOrder) -> Self {
        Self {
            handle,
            order,
            offset: DEFAULT_OFFSET,
            on_click: None,
        }
    }

    /// Set the amount added or removed per click
    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Run after the step has been applied
    pub fn on_click<F>(mut self, callback: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_click = Some(Box::new(callback));
        self
    }

    pub fn order(&self) -> StepOrder {
        self.order
    }

    /// Apply the step
    pub fn click(&mut self) -> EditOutcome {
        let outcome = self.handle.step(self.order, self.offset);
        if let Some(callback) = self.on_click.as_mut() {
            callback();
        }
        outcome
    }
}
