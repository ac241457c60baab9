//! Number engine - keystroke text to a validated (value, display) pair
//!
//! Every edit runs the same pipeline:
//!
//! 1. Strip decoration literals from the raw text
//! 2. Classify the remainder against the numeric grammar
//! 3. Resolve partial tokens (`.`, `-`, `-0`, `-0.`)
//! 4. Round complete numbers and apply the bounds / overflow policy
//! 5. Re-apply the decoration and notify the change hook
//!
//! Malformed input never errors. The edit is absorbed and the previous state
//! is re-notified unchanged.
//!
//! # Example
//!
//! ```rust
//! use tally_core::{NumberConfig, NumberEngine};
//!
//! let mut engine = NumberEngine::new(NumberConfig::new().max(9000.0)).unwrap();
//!
//! engine.update_value("1000");
//! assert_eq!(engine.value(), Some(1000.0));
//!
//! engine.update_value("10000");
//! assert_eq!(engine.value(), Some(9000.0));
//! assert_eq!(engine.display(), "9000");
//! ```

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::NumberConfig;
use crate::decoration::Decoration;
use crate::error::Result;
use crate::numeric::{format_number, round_inward, round_to, NumericGrammar, Token};

/// Current value and display text of an input
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberState {
    /// Rounded value, `None` while no complete number is entered
    pub value: Option<f64>,
    /// Text shown to the user, decorated
    pub display: String,
}

/// Direction of a stepper action
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepOrder {
    #[default]
    Increase,
    Decrease,
}

/// Why an edit was absorbed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// Text does not match the numeric grammar
    Malformed,
    /// Value is out of bounds and overflow is ignored
    Overflow,
}

/// Result of a single edit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// State was replaced with the edited value
    Accepted,
    /// State was replaced with the nearest bound
    Clamped,
    /// State is unchanged
    Rejected(RejectReason),
}

impl EditOutcome {
    /// Whether the state was left unchanged
    pub fn is_rejected(&self) -> bool {
        matches!(self, EditOutcome::Rejected(_))
    }
}

/// Resolved edit before decoration
enum Edit {
    Set {
        value: Option<f64>,
        display: String,
        clamped: bool,
    },
    Reject(RejectReason),
}

impl Edit {
    fn set(value: Option<f64>, display: impl Into<String>) -> Self {
        Edit::Set {
            value,
            display: display.into(),
            clamped: false,
        }
    }
}

type ValueCallback = Box<dyn FnMut(Option<f64>)>;

/// Owns one input's numeric state and the rules that edit it
pub struct NumberEngine {
    config: NumberConfig,
    grammar: NumericGrammar,
    decoration: Option<Decoration>,
    state: NumberState,
    on_value_change: Option<ValueCallback>,
}

impl fmt::Debug for NumberEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumberEngine")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("has_on_value_change", &self.on_value_change.is_some())
            .finish()
    }
}

impl NumberEngine {
    /// Create an engine, validating the configuration
    pub fn new(config: NumberConfig) -> Result<Self> {
        config.validate()?;

        let grammar = NumericGrammar::new(config.digits)?;
        let decoration = config.build_decoration()?;

        let mut engine = Self {
            config,
            grammar,
            decoration,
            state: NumberState::default(),
            on_value_change: None,
        };
        engine.state = engine.initial_state();
        Ok(engine)
    }

    /// Attach the change hook, called after every edit with the final value
    ///
    /// The hook must not re-enter this engine.
    pub fn on_value_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(Option<f64>) + 'static,
    {
        self.on_value_change = Some(Box::new(callback));
        self
    }

    pub fn config(&self) -> &NumberConfig {
        &self.config
    }

    pub fn state(&self) -> &NumberState {
        &self.state
    }

    pub fn value(&self) -> Option<f64> {
        self.state.value
    }

    pub fn display(&self) -> &str {
        &self.state.display
    }

    /// Apply raw keystroke text
    pub fn update_value(&mut self, raw: &str) -> EditOutcome {
        let text = match &self.decoration {
            Some(decoration) => decoration.strip(raw),
            None => Cow::Borrowed(raw),
        };

        let outcome = match self.resolve(&text) {
            Edit::Set {
                value,
                display,
                clamped,
            } => {
                self.state = NumberState {
                    value,
                    display: self.decorate(display),
                };
                if clamped {
                    EditOutcome::Clamped
                } else {
                    EditOutcome::Accepted
                }
            }
            Edit::Reject(reason) => {
                tracing::trace!(input = raw, ?reason, "edit rejected");
                EditOutcome::Rejected(reason)
            }
        };

        self.notify();
        outcome
    }

    /// Move the value by `offset` through the regular edit pipeline
    pub fn step(&mut self, order: StepOrder, offset: f64) -> EditOutcome {
        let current = self.state.value.unwrap_or(0.0);
        let candidate = match order {
            StepOrder::Increase => current + offset,
            StepOrder::Decrease => current - offset,
        };

        let text = format_number(round_to(candidate, self.config.digits));
        self.update_value(&text)
    }

    pub fn increase(&mut self, offset: f64) -> EditOutcome {
        self.step(StepOrder::Increase, offset)
    }

    pub fn decrease(&mut self, offset: f64) -> EditOutcome {
        self.step(StepOrder::Decrease, offset)
    }

    /// Empty the input
    pub fn clear(&mut self) -> EditOutcome {
        self.update_value("")
    }

    /// Assign a value programmatically, as if its canonical text was typed
    pub fn set_value(&mut self, value: Option<f64>) -> EditOutcome {
        match value {
            Some(value) => {
                let text = format_number(round_to(value, self.config.digits));
                self.update_value(&text)
            }
            None => self.clear(),
        }
    }

    fn initial_state(&self) -> NumberState {
        match self.config.default_value {
            Some(value) if value.is_finite() => {
                let value = self.snap_into_bounds(round_to(value, self.config.digits));
                NumberState {
                    value: Some(value),
                    display: self.decorate(format_number(value)),
                }
            }
            _ => NumberState::default(),
        }
    }

    fn resolve(&self, text: &str) -> Edit {
        match self.grammar.classify(text) {
            Token::Empty => Edit::set(None, ""),
            Token::Malformed => Edit::Reject(RejectReason::Malformed),
            Token::Dot => self.bounded(0.0, "0."),
            Token::Minus => match self.config.min {
                // Negatives are impossible, so the sign snaps to the bound
                Some(min) if min >= 0.0 => self.clamp_to(min, true),
                _ => Edit::set(None, "-"),
            },
            Token::NegativeZero { trailing_dot } => {
                self.bounded(0.0, if trailing_dot { "-0." } else { "-0" })
            }
            Token::Number {
                value,
                trailing_dot,
            } => {
                let rounded = round_to(value, self.config.digits);
                if trailing_dot {
                    self.bounded(rounded, text)
                } else {
                    self.bounded(rounded, format_number(rounded))
                }
            }
        }
    }

    fn bounded(&self, value: f64, display: impl Into<String>) -> Edit {
        match self.config.violated_bound(value) {
            Some((bound, lower)) => self.overflow(bound, lower),
            None => Edit::set(Some(value), display),
        }
    }

    fn overflow(&self, bound: f64, lower: bool) -> Edit {
        if self.config.ignore_overflow {
            return Edit::Reject(RejectReason::Overflow);
        }
        self.clamp_to(bound, lower)
    }

    fn clamp_to(&self, bound: f64, lower: bool) -> Edit {
        let value = round_inward(bound, self.config.digits, lower);
        tracing::debug!(bound, value, "value clamped to bound");
        Edit::Set {
            value: Some(value),
            display: format_number(value),
            clamped: true,
        }
    }

    fn snap_into_bounds(&self, value: f64) -> f64 {
        match self.config.violated_bound(value) {
            Some((bound, lower)) => round_inward(bound, self.config.digits, lower),
            None => value,
        }
    }

    fn decorate(&self, display: String) -> String {
        match &self.decoration {
            Some(decoration) if !display.is_empty() => decoration.apply(&display),
            _ => display,
        }
    }

    fn notify(&mut self) {
        let value = self.state.value;
        if let Some(callback) = self.on_value_change.as_mut() {
            callback(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn engine(config: NumberConfig) -> NumberEngine {
        NumberEngine::new(config).unwrap()
    }

    #[test]
    fn test_empty_input() {
        let mut engine = engine(NumberConfig::new().default_value(4.0));
        assert_eq!(engine.update_value(""), EditOutcome::Accepted);
        assert_eq!(engine.value(), None);
        assert_eq!(engine.display(), "");
    }

    #[test]
    fn test_valid_numbers_round_to_precision() {
        let mut engine = engine(NumberConfig::new());
        for (text, expected) in [("12", 12.0), ("-3.5", -3.5), ("0.07", 0.07), (".5", 0.5)] {
            engine.update_value(text);
            assert_eq!(engine.value(), Some(expected), "input {text:?}");
        }
    }

    #[test]
    fn test_display_is_canonical() {
        let mut engine = engine(NumberConfig::new());
        engine.update_value("007");
        assert_eq!(engine.display(), "7");
        engine.update_value("1.50");
        assert_eq!(engine.display(), "1.5");
        assert_eq!(engine.value(), Some(1.5));
    }

    #[test]
    fn test_trailing_dot_kept() {
        let mut engine = engine(NumberConfig::new());
        engine.update_value("12.");
        assert_eq!(engine.value(), Some(12.0));
        assert_eq!(engine.display(), "12.");
    }

    #[test]
    fn test_malformed_is_noop() {
        let mut engine = engine(NumberConfig::new());
        engine.update_value("1.2");
        let before = engine.state().clone();

        for text in ["1.234", "1.2a", "abc", "1..2", "--1"] {
            assert_eq!(
                engine.update_value(text),
                EditOutcome::Rejected(RejectReason::Malformed)
            );
            assert_eq!(engine.state(), &before);
        }
    }

    #[test]
    fn test_zero_digits_rejects_dot() {
        let mut engine = engine(NumberConfig::new().digits(0));
        engine.update_value("4");
        assert!(engine.update_value("4.").is_rejected());
        assert!(engine.update_value(".").is_rejected());
        assert_eq!(engine.value(), Some(4.0));
    }

    #[test]
    fn test_lone_dot() {
        let mut engine = engine(NumberConfig::new());
        engine.update_value(".");
        assert_eq!(engine.value(), Some(0.0));
        assert_eq!(engine.display(), "0.");
    }

    #[test]
    fn test_lone_minus() {
        let mut engine = engine(NumberConfig::new());
        engine.update_value("-");
        assert_eq!(engine.value(), None);
        assert_eq!(engine.display(), "-");
    }

    #[test]
    fn test_minus_clamps_when_negatives_disallowed() {
        let mut engine = engine(NumberConfig::new().min(0.0));
        assert_eq!(engine.update_value("-"), EditOutcome::Clamped);
        assert_eq!(engine.value(), Some(0.0));
        assert_eq!(engine.display(), "0");
    }

    #[test]
    fn test_minus_clamps_even_when_ignoring_overflow() {
        let mut engine = engine(NumberConfig::new().min(0.0).max(9.0).ignore_overflow(true));
        engine.update_value("-");
        assert_eq!(engine.value(), Some(0.0));
    }

    #[test]
    fn test_negative_zero_kept_verbatim() {
        let mut engine = engine(NumberConfig::new());
        engine.update_value("-0");
        assert_eq!(engine.value(), Some(0.0));
        assert_eq!(engine.display(), "-0");

        engine.update_value("-0.");
        assert_eq!(engine.display(), "-0.");

        engine.update_value("-0.5");
        assert_eq!(engine.value(), Some(-0.5));
        assert_eq!(engine.display(), "-0.5");
    }

    #[test]
    fn test_minus_dot_reads_as_negative_zero() {
        let mut engine = engine(NumberConfig::new());
        engine.update_value("-.");
        assert_eq!(engine.value(), Some(0.0));
        assert_eq!(engine.display(), "-0.");
    }

    #[test]
    fn test_partial_zero_respects_bounds() {
        let mut engine = engine(NumberConfig::new().min(5.0));
        assert_eq!(engine.update_value("."), EditOutcome::Clamped);
        assert_eq!(engine.value(), Some(5.0));
        assert_eq!(engine.display(), "5");
    }

    #[test]
    fn test_clamp_to_max() {
        let mut engine = engine(NumberConfig::new().max(9000.0));
        assert_eq!(engine.update_value("1000"), EditOutcome::Accepted);
        assert_eq!(engine.value(), Some(1000.0));

        assert_eq!(engine.update_value("10000"), EditOutcome::Clamped);
        assert_eq!(engine.value(), Some(9000.0));
        assert_eq!(engine.display(), "9000");
    }

    #[test]
    fn test_clamp_to_min() {
        let mut engine = engine(NumberConfig::new().min(-10.0));
        engine.update_value("-25");
        assert_eq!(engine.value(), Some(-10.0));
        assert_eq!(engine.display(), "-10");
    }

    #[test]
    fn test_bound_itself_accepted() {
        let mut engine = engine(NumberConfig::new().min(0.0).max(10.0));
        assert_eq!(engine.update_value("0."), EditOutcome::Accepted);
        assert_eq!(engine.display(), "0.");
        assert_eq!(engine.update_value("10"), EditOutcome::Accepted);
    }

    #[test]
    fn test_clamp_stays_inside_unrepresentable_bound() {
        let mut engine = engine(NumberConfig::new().digits(0).min(0.4).max(9.6));
        engine.update_value("0");
        assert_eq!(engine.value(), Some(1.0));
        engine.update_value("12");
        assert_eq!(engine.value(), Some(9.0));
    }

    #[test]
    fn test_ignore_overflow() {
        let mut engine = engine(NumberConfig::new().digits(0).min(0.0).max(9.0).ignore_overflow(true));
        engine.update_value("9");
        assert_eq!(
            engine.update_value("99"),
            EditOutcome::Rejected(RejectReason::Overflow)
        );
        assert_eq!(engine.value(), Some(9.0));
        assert_eq!(engine.display(), "9");
    }

    #[test]
    fn test_ignore_overflow_below_min() {
        let mut engine = engine(NumberConfig::new().min(0.0).ignore_overflow(true));
        engine.update_value("3.5");
        assert_eq!(
            engine.update_value("-5"),
            EditOutcome::Rejected(RejectReason::Overflow)
        );
        assert_eq!(engine.value(), Some(3.5));
        assert_eq!(engine.display(), "3.5");
    }

    #[test]
    fn test_overlong_input_rejected() {
        let mut engine = engine(NumberConfig::new());
        engine.update_value("12");

        let outcome = engine.update_value(&"1".repeat(400));
        assert_eq!(outcome, EditOutcome::Rejected(RejectReason::Malformed));
        assert_eq!(engine.value(), Some(12.0));
        assert_eq!(engine.display(), "12");

        assert_eq!(engine.increase(1.0), EditOutcome::Accepted);
        assert_eq!(engine.value(), Some(13.0));
    }

    #[test]
    fn test_step_increase_and_decrease() {
        let mut engine = engine(NumberConfig::new());
        engine.increase(1.0);
        assert_eq!(engine.value(), Some(1.0));
        engine.step(StepOrder::Increase, 0.25);
        assert_eq!(engine.value(), Some(1.25));
        engine.decrease(2.0);
        assert_eq!(engine.value(), Some(-0.75));
        assert_eq!(engine.display(), "-0.75");
    }

    #[test]
    fn test_step_rounds() {
        let mut engine = engine(NumberConfig::new().digits(1));
        engine.update_value("0.1");
        engine.increase(0.2);
        assert_eq!(engine.value(), Some(0.3));
        assert_eq!(engine.display(), "0.3");
    }

    #[test]
    fn test_step_respects_bounds() {
        let mut engine = engine(NumberConfig::new().min(0.0).max(3.0));
        engine.update_value("3");
        assert_eq!(engine.increase(1.0), EditOutcome::Clamped);
        assert_eq!(engine.value(), Some(3.0));

        engine.update_value("0");
        engine.decrease(1.0);
        assert_eq!(engine.value(), Some(0.0));
    }

    #[test]
    fn test_step_ignores_overflow() {
        let mut engine = engine(NumberConfig::new().max(3.0).ignore_overflow(true));
        engine.update_value("2.5");
        assert!(engine.increase(1.0).is_rejected());
        assert_eq!(engine.value(), Some(2.5));
    }

    #[test]
    fn test_decrease_ignores_overflow() {
        let mut engine = engine(NumberConfig::new().min(1.0).ignore_overflow(true));
        engine.update_value("1.5");
        assert_eq!(
            engine.decrease(1.0),
            EditOutcome::Rejected(RejectReason::Overflow)
        );
        assert_eq!(engine.value(), Some(1.5));
        assert_eq!(engine.display(), "1.5");
    }

    #[test]
    fn test_decoration() {
        let mut engine = engine(NumberConfig::new().decoration("$xxx kg"));
        engine.update_value("12");
        assert_eq!(engine.display(), "$12 kg");
        assert_eq!(engine.value(), Some(12.0));

        engine.update_value("$13 kg");
        assert_eq!(engine.value(), Some(13.0));
        assert_eq!(engine.display(), "$13 kg");

        engine.update_value("");
        assert_eq!(engine.display(), "");
    }

    #[test]
    fn test_decorated_partial_tokens() {
        let mut engine = engine(NumberConfig::new().decoration("$xxx kg"));
        engine.update_value(".");
        assert_eq!(engine.display(), "$0. kg");
        engine.update_value("-");
        assert_eq!(engine.display(), "$- kg");
    }

    #[test]
    fn test_decorated_clamp() {
        let mut engine = engine(NumberConfig::new().max(100.0).decoration("xxx%"));
        engine.update_value("150%");
        assert_eq!(engine.value(), Some(100.0));
        assert_eq!(engine.display(), "100%");
    }

    #[test]
    fn test_resubmitting_display_is_idempotent() {
        let configs = [
            NumberConfig::new(),
            NumberConfig::new().digits(0).min(0.0),
            NumberConfig::new().decoration("$xxx kg").max(50.0),
        ];
        let inputs = ["", "-", ".", "-0", "-0.", "12.", "3.14", "7", "-8.5", "999"];

        for config in configs {
            let mut engine = engine(config);
            for text in inputs {
                engine.update_value(text);
                let before = engine.state().clone();
                let display = before.display.clone();
                engine.update_value(&display);
                assert_eq!(engine.state(), &before, "re-submitting {display:?}");
            }
        }
    }

    #[test]
    fn test_default_value() {
        let rounded = engine(NumberConfig::new().default_value(3.14159));
        assert_eq!(rounded.value(), Some(3.14));
        assert_eq!(rounded.display(), "3.14");

        let clamped = engine(NumberConfig::new().max(1.0).default_value(5.0));
        assert_eq!(clamped.value(), Some(1.0));

        let decorated = engine(NumberConfig::new().decoration("$xxx").default_value(2.0));
        assert_eq!(decorated.display(), "$2");
    }

    #[test]
    fn test_set_value_and_clear() {
        let mut engine = engine(NumberConfig::new().digits(1));
        engine.set_value(Some(2.46));
        assert_eq!(engine.value(), Some(2.5));
        engine.set_value(None);
        assert_eq!(engine.value(), None);
        engine.set_value(Some(1.0));
        engine.clear();
        assert_eq!(engine.display(), "");
    }

    #[test]
    fn test_change_hook_sees_every_edit() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut engine = engine(NumberConfig::new().max(5.0))
            .on_value_change(move |value| sink.borrow_mut().push(value));

        engine.update_value("3");
        engine.update_value("3x");
        engine.update_value("7");
        engine.update_value("");

        assert_eq!(*seen.borrow(), vec![Some(3.0), Some(3.0), Some(5.0), None]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(NumberEngine::new(NumberConfig::new().min(2.0).max(1.0)).is_err());
        assert!(NumberEngine::new(NumberConfig::new().decoration("kg")).is_err());
    }
}
