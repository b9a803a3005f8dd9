//! Type-erased, heterogeneous selector registry.
//!
//! # Design
//!
//! Each published `Selector<T>` is stored behind a `Box<dyn ErasedSelector>`
//! in a `BTreeMap` keyed by selector name, so a configuration surface can
//! list and change every selector through strings alone while the
//! composition root keeps its typed handles.
//!
//! # Usage
//!
//! ```rust
//! use tc_select::{Selector, SelectorRegistry};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum DriveMode { Tank, Arcade }
//!
//! let mode = Selector::new("Drive Mode", "Tank", DriveMode::Tank)
//!     .with_option("Arcade", DriveMode::Arcade);
//!
//! let mut registry = SelectorRegistry::new();
//! registry.publish(&mode).unwrap();
//! registry.select("Drive Mode", "Arcade").unwrap();
//! assert_eq!(mode.get(), DriveMode::Arcade);
//! ```

use std::any::Any;
use std::collections::BTreeMap;

use crate::{SelectError, SelectResult, Selector, SelectorValue};

// ── Trait object ──────────────────────────────────────────────────────────────

/// String-level view of a `Selector<T>`.
///
/// Sealed: only `Selector<T>` implements it, so every erased entry keeps the
/// selector's domain invariant.
pub trait ErasedSelector: Send + Sync + 'static + sealed::Sealed {
    fn name(&self) -> &str;

    fn option_labels(&self) -> Vec<String>;

    fn selected_label(&self) -> String;

    fn select_label(&self, label: &str) -> SelectResult<()>;

    #[doc(hidden)]
    fn as_any(&self) -> &dyn Any;
}

mod sealed {
    pub trait Sealed {}
}

impl<T: SelectorValue> sealed::Sealed for Selector<T> {}

impl<T: SelectorValue> ErasedSelector for Selector<T> {
    fn name(&self) -> &str {
        Selector::name(self)
    }

    fn option_labels(&self) -> Vec<String> {
        self.options()
    }

    fn selected_label(&self) -> String {
        Selector::selected_label(self)
    }

    fn select_label(&self, label: &str) -> SelectResult<()> {
        self.select(label)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ── SelectorRegistry ──────────────────────────────────────────────────────────

/// Every selector exposed to the configuration surface, by name.
#[derive(Default)]
pub struct SelectorRegistry {
    map: BTreeMap<String, Box<dyn ErasedSelector>>,
}

impl SelectorRegistry {
    pub fn new() -> Self {
        Self { map: BTreeMap::new() }
    }

    /// Publish a clone of `selector` under its own name.
    ///
    /// Names must be unique: publishing a second selector with the same name
    /// fails with [`SelectError::DuplicateSelector`].
    pub fn publish<T: SelectorValue>(&mut self, selector: &Selector<T>) -> SelectResult<()> {
        let name = selector.name().to_string();
        if self.map.contains_key(&name) {
            return Err(SelectError::DuplicateSelector(name));
        }
        tracing::debug!(selector = %name, options = ?selector.options(), "selector published");
        self.map.insert(name, Box::new(selector.clone()));
        Ok(())
    }

    /// Typed handle to a published selector.
    ///
    /// Returns `None` if no selector has that name or it holds another type.
    pub fn get<T: SelectorValue>(&self, name: &str) -> Option<Selector<T>> {
        self.map
            .get(name)
            .and_then(|s| s.as_any().downcast_ref::<Selector<T>>())
            .cloned()
    }

    /// Change a selector by option label.
    pub fn select(&self, name: &str, label: &str) -> SelectResult<()> {
        self.entry(name)?.select_label(label)
    }

    pub fn options(&self, name: &str) -> SelectResult<Vec<String>> {
        Ok(self.entry(name)?.option_labels())
    }

    pub fn selected(&self, name: &str) -> SelectResult<String> {
        Ok(self.entry(name)?.selected_label())
    }

    /// Published selector names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    /// `(name, selected label)` for every selector, sorted by name.
    pub fn snapshot(&self) -> Vec<(String, String)> {
        self.map
            .iter()
            .map(|(name, s)| (name.clone(), s.selected_label()))
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn entry(&self, name: &str) -> SelectResult<&dyn ErasedSelector> {
        self.map
            .get(name)
            .map(|s| s.as_ref())
            .ok_or_else(|| SelectError::UnknownSelector(name.to_string()))
    }
}
