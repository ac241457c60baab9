//! Pattern masks
//!
//! A template such as `xx/xx/xxxx` splits into editable slots (runs of `x`)
//! and fixed literals (everything else). Editable slots show `_` for every
//! position that has not been filled yet.
//!
//! # Example
//!
//! ```rust
//! use tally_core::PatternInput;
//!
//! let mut date = PatternInput::new("xx/xx/xxxx");
//! date.handle_key("1", 0);
//! date.handle_key("2", 0);
//! assert_eq!(date.value(), "12/__/____");
//! ```

use serde::Serialize;
use smallvec::SmallVec;

/// Marks an editable position in a template
pub const MASK_CHAR: char = 'x';

/// Shown for an unfilled editable position
pub const PLACEHOLDER_CHAR: char = '_';

/// A contiguous editable or literal span of a pattern
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PatternSegment {
    /// Whether keystrokes may change this segment
    pub editable: bool,
    /// Current text; `_` marks unfilled editable positions
    pub display: String,
    /// Fixed width in characters
    pub count: usize,
}

impl PatternSegment {
    fn editable(count: usize) -> Self {
        Self {
            editable: true,
            display: placeholder(count),
            count,
        }
    }

    fn literal(text: String) -> Self {
        let count = text.chars().count();
        Self {
            editable: false,
            display: text,
            count,
        }
    }

    /// The characters typed so far
    pub fn filled(&self) -> &str {
        if !self.editable {
            return "";
        }
        self.display.trim_end_matches(PLACEHOLDER_CHAR)
    }

    /// Number of typed characters
    pub fn filled_len(&self) -> usize {
        self.filled().chars().count()
    }

    /// Whether every position is typed
    pub fn is_full(&self) -> bool {
        !self.editable || self.filled_len() == self.count
    }

    fn set_filled(&mut self, filled: &str) {
        let len = filled.chars().count();
        let mut display = String::with_capacity(self.count);
        display.push_str(filled);
        display.extend(std::iter::repeat(PLACEHOLDER_CHAR).take(self.count - len));
        self.display = display;
    }
}

fn placeholder(count: usize) -> String {
    std::iter::repeat(PLACEHOLDER_CHAR).take(count).collect()
}

/// A keystroke as the pattern sees it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternKey {
    Backspace,
    Char(char),
    /// Navigation and other named keys
    Ignored,
}

impl PatternKey {
    /// Classify a key name (`"Backspace"`, `"7"`, `"ArrowLeft"`, ...)
    pub fn from_key_name(key: &str) -> Self {
        if key == "Backspace" {
            return PatternKey::Backspace;
        }

        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_control() && c != PLACEHOLDER_CHAR => PatternKey::Char(c),
            _ => PatternKey::Ignored,
        }
    }
}

/// Segments derived from one template, edited in place
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PatternInput {
    template: String,
    segments: SmallVec<[PatternSegment; 8]>,
}

impl PatternInput {
    /// Split a template into segments
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let mut segments: SmallVec<[PatternSegment; 8]> = SmallVec::new();

        let mut run = String::new();
        let mut run_is_mask = false;
        for c in template.chars() {
            let is_mask = c == MASK_CHAR;
            if !run.is_empty() && is_mask != run_is_mask {
                segments.push(Self::segment_for(&run, run_is_mask));
                run.clear();
            }
            run_is_mask = is_mask;
            run.push(c);
        }
        if !run.is_empty() {
            segments.push(Self::segment_for(&run, run_is_mask));
        }

        Self { template, segments }
    }

    fn segment_for(run: &str, is_mask: bool) -> PatternSegment {
        if is_mask {
            PatternSegment::editable(run.chars().count())
        } else {
            PatternSegment::literal(run.to_string())
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn segments(&self) -> &[PatternSegment] {
        &self.segments
    }

    /// Apply a named key to one segment; returns whether anything changed
    pub fn handle_key(&mut self, key: &str, segment_index: usize) -> bool {
        self.apply(PatternKey::from_key_name(key), segment_index)
    }

    /// Apply a classified key to one segment
    pub fn apply(&mut self, key: PatternKey, segment_index: usize) -> bool {
        let Some(segment) = self.segments.get_mut(segment_index) else {
            tracing::trace!(segment_index, "key for missing segment");
            return false;
        };
        if !segment.editable {
            return false;
        }

        match key {
            PatternKey::Backspace => {
                let filled = segment.filled();
                let Some((last, _)) = filled.char_indices().last() else {
                    return false;
                };
                let kept = filled[..last].to_string();
                segment.set_filled(&kept);
                true
            }
            PatternKey::Char(c) => {
                if segment.is_full() {
                    return false;
                }
                let mut filled = segment.filled().to_string();
                filled.push(c);
                segment.set_filled(&filled);
                true
            }
            PatternKey::Ignored => false,
        }
    }

    /// Full masked text, literals included
    pub fn value(&self) -> String {
        self.segments
            .iter()
            .map(|segment| segment.display.as_str())
            .collect()
    }

    /// Only the typed characters
    pub fn raw_value(&self) -> String {
        self.segments.iter().map(PatternSegment::filled).collect()
    }

    /// Whether every editable segment is full
    pub fn is_complete(&self) -> bool {
        self.segments.iter().all(PatternSegment::is_full)
    }

    /// Reset every editable segment to placeholders
    pub fn reset(&mut self) {
        for segment in self.segments.iter_mut().filter(|s| s.editable) {
            segment.display = placeholder(segment.count);
        }
    }
}
