//! CSV preset loader — apply saved selections to a registry.
//!
//! # CSV format
//!
//! One row per selector to change.  Rows are applied in file order.
//!
//! ```csv
//! selector,option
//! Drive Mode,Single Stick Arcade
//! Auto Pattern,Three Note
//! ```
//!
//! Both columns are option *labels*, exactly as shown by
//! [`SelectorRegistry::options`].  Application stops at the first row that
//! names an unknown selector or option; rows before it stay applied.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{SelectError, SelectResult, SelectorRegistry};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PresetRecord {
    selector: String,
    option:   String,
}

// ── Public API ────────────────────────────────────────────────────────────────

impl SelectorRegistry {
    /// Apply presets from a CSV file.  Returns the number of rows applied.
    pub fn apply_presets_csv(&self, path: &Path) -> SelectResult<usize> {
        let file = std::fs::File::open(path).map_err(SelectError::Io)?;
        self.apply_presets_reader(file)
    }

    /// Like [`apply_presets_csv`][Self::apply_presets_csv] but accepts any
    /// `Read` source.
    pub fn apply_presets_reader<R: Read>(&self, reader: R) -> SelectResult<usize> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut applied = 0;

        for result in csv_reader.deserialize::<PresetRecord>() {
            let row = result.map_err(|e| SelectError::Parse(e.to_string()))?;
            self.select(&row.selector, &row.option)?;
            applied += 1;
        }

        tracing::info!(applied, "selector presets applied");
        Ok(applied)
    }
}
