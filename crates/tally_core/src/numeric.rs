//! Numeric grammar, rounding and formatting
//!
//! The grammar accepts every prefix a user passes through while typing a
//! number at a given precision: an optional leading `-`, digits, and at most
//! one `.` followed by up to `digits` fractional digits. With zero digits the
//! fractional group is not accepted at all.

use regex::Regex;

use crate::error::Result;

/// Round half away from zero at `digits` decimal places
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    // Collapse -0.0 so it never reaches a display
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Round a bound to `digits` places without leaving the bounded range
///
/// Lower bounds round up and upper bounds round down, so a clamped value is
/// always representable and still inside `[min, max]`.
pub fn round_inward(bound: f64, digits: u32, lower: bool) -> f64 {
    let rounded = round_to(bound, digits);
    if (lower && rounded < bound) || (!lower && rounded > bound) {
        let factor = 10f64.powi(digits as i32);
        let step = if lower { 1.0 } else { -1.0 };
        return (rounded * factor + step).round() / factor;
    }
    rounded
}

/// Canonical text for a value; negative zero prints as `0`
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Classification of a piece of candidate numeric text
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token {
    /// Nothing entered
    Empty,
    /// Does not match the grammar
    Malformed,
    /// A lone `.`
    Dot,
    /// A lone `-`
    Minus,
    /// `-0`, `-0.` or `-.`, kept verbatim while the user keeps typing
    NegativeZero { trailing_dot: bool },
    /// A complete number, possibly ending in `.`
    Number { value: f64, trailing_dot: bool },
}

/// Compiled grammar for one precision
#[derive(Clone, Debug)]
pub struct NumericGrammar {
    regex: Regex,
}

impl NumericGrammar {
    /// Build the grammar for `digits` decimal places
    pub fn new(digits: u32) -> Result<Self> {
        let pattern = if digits == 0 {
            r"^-?[0-9]*$".to_string()
        } else {
            format!(r"^-?[0-9]*(\.[0-9]{{0,{digits}}})?$")
        };

        Ok(Self {
            regex: Regex::new(&pattern)?,
        })
    }

    /// Whether the whole text is an accepted prefix
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Classify stripped input text
    pub fn classify(&self, text: &str) -> Token {
        if text.is_empty() {
            return Token::Empty;
        }
        if !self.matches(text) {
            return Token::Malformed;
        }

        match text {
            "." => Token::Dot,
            "-" => Token::Minus,
            "-0" => Token::NegativeZero {
                trailing_dot: false,
            },
            "-0." | "-." => Token::NegativeZero { trailing_dot: true },
            _ => {
                let trailing_dot = text.ends_with('.');
                let body = text.strip_suffix('.').unwrap_or(text);
                // Overlong digit runs parse to infinity
                match body.parse::<f64>() {
                    Ok(value) if value.is_finite() => Token::Number {
                        value,
                        trailing_dot,
                    },
                    _ => Token::Malformed,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.234, 2), 1.23);
        assert_eq!(round_to(1.235, 0), 1.0);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(0.1 + 0.2, 2), 0.3);
        assert_eq!(round_to(f64::MAX, 2), f64::MAX);
        assert!(round_to(-0.4, 0).is_sign_positive());
    }

    #[test]
    fn test_round_inward() {
        assert_eq!(round_inward(0.4, 0, true), 1.0);
        assert_eq!(round_inward(0.6, 0, true), 1.0);
        assert_eq!(round_inward(9.6, 0, false), 9.0);
        assert_eq!(round_inward(9.4, 0, false), 9.0);
        assert_eq!(round_inward(-0.25, 1, true), -0.2);
        assert_eq!(round_inward(5.0, 2, true), 5.0);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1000.0), "1000");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-12.25), "-12.25");
    }

    #[test]
    fn test_grammar_prefixes() {
        let grammar = NumericGrammar::new(2).unwrap();
        for text in ["", "-", ".", "-.", "0.", "12", "-12.", "12.3", "12.34", ".5"] {
            assert!(grammar.matches(text), "{text:?} should match");
        }
        for text in ["12.345", "1.2.3", "--1", "1-", "a", "1e5", " 1", "+1"] {
            assert!(!grammar.matches(text), "{text:?} should not match");
        }
    }

    #[test]
    fn test_grammar_without_digits() {
        let grammar = NumericGrammar::new(0).unwrap();
        assert!(grammar.matches("-42"));
        assert!(!grammar.matches("4."));
        assert!(!grammar.matches("."));
    }

    #[test]
    fn test_classify() {
        let grammar = NumericGrammar::new(2).unwrap();
        assert_eq!(grammar.classify(""), Token::Empty);
        assert_eq!(grammar.classify("x"), Token::Malformed);
        assert_eq!(grammar.classify("."), Token::Dot);
        assert_eq!(grammar.classify("-"), Token::Minus);
        assert_eq!(
            grammar.classify("-0"),
            Token::NegativeZero {
                trailing_dot: false
            }
        );
        assert_eq!(
            grammar.classify("-."),
            Token::NegativeZero { trailing_dot: true }
        );
        assert_eq!(
            grammar.classify("12."),
            Token::Number {
                value: 12.0,
                trailing_dot: true
            }
        );
        assert_eq!(
            grammar.classify("-.5"),
            Token::Number {
                value: -0.5,
                trailing_dot: false
            }
        );
        assert_eq!(grammar.classify(&"9".repeat(400)), Token::Malformed);
    }
}
