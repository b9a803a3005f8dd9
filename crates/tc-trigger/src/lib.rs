//! `tc-trigger` — polled conditions and edge detection.
//!
//! # Crate layout
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`condition`]   | `Condition` trait, `ConditionExt` combinators          |
//! | [`edge`]        | `EdgePolicy`, `Transition`, `EdgeDetector`             |
//! | [`trigger`]     | `Trigger` (named condition + detector)                 |
//!
//! # Polling model
//!
//! A trigger is polled exactly once per scheduler tick.  The condition is
//! evaluated, the detector compares it with the previous poll's value, and a
//! [`Transition`] is returned when the trigger's policy says it fires:
//!
//! ```text
//! tick      1      2      3      4      5      6
//! cond      F      F      T      T      F      T
//! Rising    -      -      fire   -      -      fire
//! Falling   -      -      -      -      fire   -
//! WhileHigh -      -      fire   fire   -      fire
//! ```

pub mod condition;
pub mod edge;
pub mod trigger;

#[cfg(test)]
mod tests;

pub use condition::{And, Condition, ConditionExt, Debounce, Not, Or};
pub use edge::{EdgeDetector, EdgePolicy, Transition};
pub use trigger::Trigger;
