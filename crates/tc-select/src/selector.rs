//! `Selector<T>` — a runtime-switchable choice from a fixed set of options.
//!
//! # Staleness contract
//!
//! A selector is read by behavior factories at the instant they build a
//! behavior.  The built behavior keeps whatever it resolved; changing the
//! selection afterwards only affects behaviors built later.  Nothing in this
//! crate re-reads a selector on a behavior's behalf.
//!
//! # Sharing
//!
//! `Selector<T>` is a cheap handle (`Arc` inside).  Clones observe the same
//! selection, so the composition root can hand one clone to a factory and
//! another to the [`SelectorRegistry`][crate::SelectorRegistry] that the
//! configuration surface writes through.

use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::{SelectError, SelectResult};

/// Bound for values a selector can hold.
pub trait SelectorValue: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}

impl<T: Clone + PartialEq + fmt::Debug + Send + Sync + 'static> SelectorValue for T {}

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Options<T> {
    /// `(label, value)` in insertion order.  Never empty.
    entries:  Vec<(String, T)>,
    selected: usize,
}

/// A named, labelled set of options with exactly one selected.
pub struct Selector<T: SelectorValue> {
    name:      Arc<str>,
    options:   Arc<RwLock<Options<T>>>,
    listeners: Arc<Mutex<Vec<Listener<T>>>>,
}

impl<T: SelectorValue> Clone for Selector<T> {
    fn clone(&self) -> Self {
        Self {
            name:      Arc::clone(&self.name),
            options:   Arc::clone(&self.options),
            listeners: Arc::clone(&self.listeners),
        }
    }
}

impl<T: SelectorValue> Selector<T> {
    /// Create a selector whose domain starts with its mandatory default.
    pub fn new(name: impl Into<String>, default_label: impl Into<String>, default_value: T) -> Self {
        let name: String = name.into();
        Self {
            name:      Arc::from(name),
            options:   Arc::new(RwLock::new(Options {
                entries:  vec![(default_label.into(), default_value)],
                selected: 0,
            })),
            listeners: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Builder form of [`add_option`][Self::add_option].
    pub fn with_option(self, label: impl Into<String>, value: T) -> Self {
        self.add_option(label, value);
        self
    }

    /// Add an option to the domain.  Re-adding an existing label replaces
    /// its value in place.
    pub fn add_option(&self, label: impl Into<String>, value: T) {
        let label = label.into();
        let mut options = self.options.write();
        match options.entries.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = value,
            None => options.entries.push((label, value)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The currently selected value.
    pub fn get(&self) -> T {
        let options = self.options.read();
        options.entries[options.selected].1.clone()
    }

    /// Label of the currently selected option.
    pub fn selected_label(&self) -> String {
        let options = self.options.read();
        options.entries[options.selected].0.clone()
    }

    /// All option labels, in insertion order (default first).
    pub fn options(&self) -> Vec<String> {
        self.options.read().entries.iter().map(|(l, _)| l.clone()).collect()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.options.read().entries.iter().any(|(_, v)| v == value)
    }

    /// Select the option holding `value`.
    ///
    /// Values outside the domain are rejected with
    /// [`SelectError::InvalidOption`] and the previous selection is kept.
    pub fn set(&self, value: &T) -> SelectResult<()> {
        let index = self.options.read().entries.iter().position(|(_, v)| v == value);
        match index {
            Some(i) => {
                self.apply(i);
                Ok(())
            }
            None => Err(self.reject(format!("{value:?}"))),
        }
    }

    /// Select the option with `label`.  Same rejection rules as [`set`][Self::set].
    pub fn select(&self, label: &str) -> SelectResult<()> {
        let index = self.options.read().entries.iter().position(|(l, _)| l == label);
        match index {
            Some(i) => {
                self.apply(i);
                Ok(())
            }
            None => Err(self.reject(label.to_string())),
        }
    }

    /// Register a callback run after every change of selection.
    ///
    /// Callbacks run on the thread that made the change, after the new
    /// selection is visible, and may read the selector.
    pub fn on_change(&self, listener: impl Fn(&T) + Send + Sync + 'static) {
        self.listeners.lock().push(Arc::new(listener));
    }

    fn apply(&self, index: usize) {
        let value = {
            let mut options = self.options.write();
            if options.selected == index {
                return;
            }
            options.selected = index;
            tracing::debug!(selector = %self.name, option = %options.entries[index].0, "selection changed");
            options.entries[index].1.clone()
        };
        let listeners: Vec<Listener<T>> = self.listeners.lock().clone();
        for listener in listeners {
            listener(&value);
        }
    }

    fn reject(&self, option: String) -> SelectError {
        tracing::warn!(selector = %self.name, %option, "rejected selection outside the option set");
        SelectError::InvalidOption { selector: self.name.to_string(), option }
    }
}

impl<T: SelectorValue> fmt::Debug for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector")
            .field("name", &self.name)
            .field("selected", &self.selected_label())
            .field("options", &self.options())
            .finish()
    }
}
