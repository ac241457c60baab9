//! Explicit engine handles
//!
//! A [`NumberHandle`] is the one way widgets reach the engine they belong to.
//! It is created by the owning input and passed to every field and button at
//! construction, instead of being looked up from ambient context.
//!
//! Handles are cheap to clone and share one engine. Edits made through any
//! clone raise a shared dirty flag so the host knows to re-render.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use tally_core::{EditOutcome, NumberConfig, NumberEngine, NumberState, Result, StepOrder};

/// Shared, single-threaded handle to a [`NumberEngine`]
#[derive(Clone, Debug)]
pub struct NumberHandle {
    engine: Rc<RefCell<NumberEngine>>,
    dirty: Rc<Cell<bool>>,
}

impl NumberHandle {
    /// Wrap an existing engine
    pub fn new(engine: NumberEngine) -> Self {
        Self {
            engine: Rc::new(RefCell::new(engine)),
            dirty: Rc::new(Cell::new(false)),
        }
    }

    /// Build an engine from a config and wrap it
    pub fn from_config(config: NumberConfig) -> Result<Self> {
        Ok(Self::new(NumberEngine::new(config)?))
    }

    /// Borrow the engine for reading
    ///
    /// Panics if called from inside the engine's own change hook.
    pub fn engine(&self) -> Ref<'_, NumberEngine> {
        self.engine.borrow()
    }

    pub fn value(&self) -> Option<f64> {
        self.engine.borrow().value()
    }

    pub fn display(&self) -> String {
        self.engine.borrow().display().to_string()
    }

    pub fn state(&self) -> NumberState {
        self.engine.borrow().state().clone()
    }

    /// Feed raw keystroke text to the engine
    pub fn update_value(&self, raw: &str) -> EditOutcome {
        self.edit(|engine| engine.update_value(raw))
    }

    /// Step the value through the engine
    pub fn step(&self, order: StepOrder, offset: f64) -> EditOutcome {
        self.edit(|engine| engine.step(order, offset))
    }

    pub fn clear(&self) -> EditOutcome {
        self.edit(NumberEngine::clear)
    }

    pub fn set_value(&self, value: Option<f64>) -> EditOutcome {
        self.edit(|engine| engine.set_value(value))
    }

    /// Check if an edit changed the state and clear the flag
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }

    /// Whether two handles share one engine
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.engine, &other.engine)
    }

    fn edit(&self, f: impl FnOnce(&mut NumberEngine) -> EditOutcome) -> EditOutcome {
        let outcome = f(&mut *self.engine.borrow_mut());
        if !outcome.is_rejected() {
            self.dirty.set(true);
        }
        outcome
    }
}
