//! Decoration templates
//!
//! A decoration wraps the numeric display in fixed text, e.g. `"$xxx kg"`
//! renders `12` as `"$12 kg"`. Raw input has every literal piece of the
//! template removed before it reaches the numeric grammar, so re-submitting a
//! rendered display yields the same number.
//!
//! Literal pieces are removed wherever they occur. A literal that contains
//! digits will therefore also eat those digits from the typed number.

use std::borrow::Cow;

use smallvec::SmallVec;

use crate::error::{ConfigError, Result};

/// A template with a single numeric slot
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoration {
    template: String,
    symbol: String,
    /// Non-empty literal pieces, longest first
    literals: SmallVec<[String; 2]>,
}

impl Decoration {
    /// Create a decoration; `symbol` must occur exactly once in `template`
    pub fn new(template: impl Into<String>, symbol: impl Into<String>) -> Result<Self> {
        let template = template.into();
        let symbol = symbol.into();

        if symbol.is_empty() {
            return Err(ConfigError::EmptyDecorationSymbol);
        }

        let found = template.matches(symbol.as_str()).count();
        if found != 1 {
            return Err(ConfigError::DecorationSymbolCount {
                template,
                symbol,
                found,
            });
        }

        let mut literals: SmallVec<[String; 2]> = template
            .split(symbol.as_str())
            .filter(|piece| !piece.is_empty())
            .map(str::to_string)
            .collect();
        // Longer literals first so a short one never splits a long one
        literals.sort_by(|a, b| b.len().cmp(&a.len()));

        Ok(Self {
            template,
            symbol,
            literals,
        })
    }

    /// The slot marker
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Remove every literal piece of the template from `raw`
    pub fn strip<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        let mut text = Cow::Borrowed(raw);
        for literal in &self.literals {
            if text.contains(literal.as_str()) {
                text = Cow::Owned(text.replace(literal.as_str(), ""));
            }
        }
        text
    }

    /// Wrap a display in the template; empty displays stay empty
    pub fn apply(&self, display: &str) -> String {
        if display.is_empty() {
            return String::new();
        }
        self.template.replacen(self.symbol.as_str(), display, 1)
    }
}
