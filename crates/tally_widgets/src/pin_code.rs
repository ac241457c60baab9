//! Pin code entry
//!
//! A pin code is a row of single-digit cells. Each cell is its own number
//! engine restricted to `0..=9` with overflow ignored, so typing a second
//! digit into a filled cell is absorbed. When an edit leaves every cell
//! filled, the completion callback receives the concatenated pin.
//!
//! Moving focus between cells is left to the host.
//!
//! # Example
//!
//! ```rust
//! use tally_widgets::PinCode;
//!
//! let mut pin = PinCode::new(4).unwrap();
//! let cells = pin.cells();
//! for (cell, digit) in cells.iter().zip(["1", "9", "8", "4"]) {
//!     pin.input(*cell, digit);
//! }
//! assert_eq!(pin.pin().as_deref(), Some("1984"));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use slotmap::{new_key_type, SecondaryMap, SlotMap};
use smallvec::SmallVec;
use tally_core::{EditOutcome, NumberConfig, NumberEngine, Result};

use crate::handle::NumberHandle;

/// Default number of cells
pub const DEFAULT_PIN_LENGTH: usize = 4;

new_key_type! {
    /// Identifier for one pin cell
    pub struct CellId;
}

type CompletionCallback = Box<dyn FnMut(&str)>;

/// Config used by every pin cell
pub fn cell_config() -> NumberConfig {
    NumberConfig::new()
        .digits(0)
        .min(0.0)
        .max(9.0)
        .ignore_overflow(true)
}

/// Row state shared with every cell's change hook
#[derive(Default)]
struct PinRow {
    digits: SecondaryMap<CellId, Option<u8>>,
    /// Cell ids in display order
    order: SmallVec<[CellId; 8]>,
    on_completion: Option<CompletionCallback>,
}

impl PinRow {
    fn pin(&self) -> Option<String> {
        self.order
            .iter()
            .map(|id| {
                self.digits
                    .get(*id)
                    .copied()
                    .flatten()
                    .map(|d| char::from(b'0' + d))
            })
            .collect::<Option<String>>()
            .filter(|pin| !pin.is_empty())
    }
}

/// Record a cell's new value and report the pin if a digit change filled the row
fn record_digit(row: &RefCell<PinRow>, id: CellId, value: Option<f64>) {
    let digit = value.map(|d| d as u8);
    let pin = {
        let mut row = row.borrow_mut();
        let previous = row.digits.insert(id, digit).flatten();
        if digit.is_none() || previous == digit {
            return;
        }
        row.pin()
    };
    let Some(pin) = pin else {
        return;
    };

    tracing::debug!(len = pin.len(), "pin code complete");
    // Released while it runs so the callback may inspect the row
    let callback = row.borrow_mut().on_completion.take();
    if let Some(mut callback) = callback {
        callback(&pin);
        let mut row = row.borrow_mut();
        if row.on_completion.is_none() {
            row.on_completion = Some(callback);
        }
    }
}

/// A row of single-digit cells
pub struct PinCode {
    cells: SlotMap<CellId, NumberHandle>,
    row: Rc<RefCell<PinRow>>,
}

impl fmt::Debug for PinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinCode")
            .field("values", &self.values())
            .finish()
    }
}

impl PinCode {
    /// Create a pin code with `len` cells
    pub fn new(len: usize) -> Result<Self> {
        let mut pin = Self {
            cells: SlotMap::with_key(),
            row: Rc::new(RefCell::new(PinRow::default())),
        };
        for _ in 0..len {
            pin.add_cell()?;
        }
        Ok(pin)
    }

    /// Run whenever a digit change leaves every cell filled
    ///
    /// Edits made through a cell's [`NumberHandle`] count too. The callback
    /// must not read the cells themselves, since the editing cell is still
    /// borrowed; use the pin it receives.
    pub fn on_completion<F>(self, callback: F) -> Self
    where
        F: FnMut(&str) + 'static,
    {
        self.row.borrow_mut().on_completion = Some(Box::new(callback));
        self
    }

    /// Append a cell at the end of the row
    pub fn add_cell(&mut self) -> Result<CellId> {
        let engine = NumberEngine::new(cell_config())?;
        let row = Rc::clone(&self.row);
        let id = self.cells.insert_with_key(|id| {
            NumberHandle::new(engine.on_value_change(move |value| record_digit(&row, id, value)))
        });

        let mut row = self.row.borrow_mut();
        row.digits.insert(id, None);
        row.order.push(id);
        Ok(id)
    }

    /// Remove a cell; returns whether it existed
    pub fn remove_cell(&mut self, id: CellId) -> bool {
        if self.cells.remove(id).is_none() {
            return false;
        }
        let mut row = self.row.borrow_mut();
        row.digits.remove(id);
        row.order.retain(|cell| *cell != id);
        true
    }

    /// Cell ids in display order
    pub fn cells(&self) -> Vec<CellId> {
        self.row.borrow().order.to_vec()
    }

    pub fn len(&self) -> usize {
        self.row.borrow().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Handle to a cell's engine, for binding a field to it
    pub fn handle(&self, id: CellId) -> Option<NumberHandle> {
        self.cells.get(id).cloned()
    }

    /// Position of a cell in the row
    pub fn index_of(&self, id: CellId) -> Option<usize> {
        self.row.borrow().order.iter().position(|cell| *cell == id)
    }

    /// Submit a cell's text; `None` for an unknown cell
    pub fn input(&mut self, id: CellId, text: &str) -> Option<EditOutcome> {
        Some(self.cells.get(id)?.update_value(text))
    }

    /// Empty a cell
    pub fn clear(&mut self, id: CellId) -> Option<EditOutcome> {
        Some(self.cells.get(id)?.clear())
    }

    /// Empty every cell
    pub fn reset(&mut self) {
        for handle in self.cells.values() {
            handle.clear();
        }
    }

    pub fn value(&self, id: CellId) -> Option<u8> {
        self.cells
            .get(id)?
            .value()
            .map(|digit| digit as u8)
    }

    /// Every cell's digit in display order
    pub fn values(&self) -> Vec<Option<u8>> {
        self.cells().into_iter().map(|id| self.value(id)).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.pin().is_some()
    }

    /// The entered pin once every cell is filled
    pub fn pin(&self) -> Option<String> {
        self.row.borrow().pin()
    }
}
