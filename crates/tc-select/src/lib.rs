//! `tc-select` — runtime-switchable selectors and their registry.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`selector`]   | `Selector<T>` handle, `SelectorValue` bound              |
//! | [`registry`]   | `SelectorRegistry`, `ErasedSelector` (sealed)            |
//! | [`preset`]     | `SelectorRegistry::apply_presets_csv` / `_reader`        |
//! | [`error`]      | `SelectError`, `SelectResult<T>`                         |
//!
//! Selectors are the only state in `tickcmd` that may be written from
//! outside the control loop (a configuration surface on another thread), so
//! unlike behaviors they are `Send + Sync`.

pub mod error;
pub mod preset;
pub mod registry;
pub mod selector;


pub use error::{SelectError, SelectResult};
pub use registry::{ErasedSelector, SelectorRegistry};
pub use selector::{Selector, SelectorValue};
