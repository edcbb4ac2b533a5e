//! The calibration form as seen by a UI layer.
//!
//! [`calibrate`] is one full recomputation over a snapshot of the form: it
//! extracts the value pairs, solves for the correction polynomial and renders
//! the parameter string together with the state of every row.
//! [`CalibrationTool`] keeps the rows between edits and recomputes after each.

use calibration_solver::{format_result, solve, Coefficients};
use thiserror::Error;
use tracing::debug;
use value_extractor::value_extractor::{extract_values, EntryStatus, RawEntry};

use crate::config::CalibrationConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationReport {
    /// `-c a:b:c`, `[not needed]`, `[error: ...]`, or empty when no row holds
    /// a usable pair yet.
    pub formatted: String,
    pub statuses: Vec<EntryStatus>,
    /// The simplified correction, when one was solved.
    pub coefficients: Option<Coefficients>,
}

pub fn calibrate(entries: &[RawEntry]) -> CalibrationReport {
    let extraction = extract_values(entries);

    if extraction.values.is_empty() {
        return CalibrationReport {
            formatted: String::new(),
            statuses: extraction.statuses,
            coefficients: None,
        };
    }

    let result = solve(&extraction.values);
    let formatted = format_result(&result);

    debug!(%formatted, "calibration recomputed");

    CalibrationReport {
        formatted,
        statuses: extraction.statuses,
        coefficients: result.ok().map(Coefficients::simplify),
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolError {
    #[error("no value set {slot}, the form has {count}")]
    NoSuchSlot { slot: usize, count: usize },
}

#[derive(Debug, Clone)]
pub struct CalibrationTool {
    config: CalibrationConfig,
    entries: Vec<RawEntry>,
}

impl CalibrationTool {
    pub fn new(config: CalibrationConfig) -> Self {
        let entries = vec![RawEntry::empty(); config.value_sets];

        CalibrationTool { config, entries }
    }

    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    pub fn entries(&self) -> &[RawEntry] {
        &self.entries
    }

    /// Replaces the text of row `slot` (zero based) and recomputes.
    pub fn set_entry(
        &mut self,
        slot: usize,
        actual: &str,
        measured: &str,
    ) -> Result<CalibrationReport, ToolError> {
        let count = self.entries.len();
        let entry = self
            .entries
            .get_mut(slot)
            .ok_or(ToolError::NoSuchSlot { slot, count })?;

        *entry = RawEntry::new(actual, measured);

        Ok(self.report())
    }

    pub fn clear_entry(&mut self, slot: usize) -> Result<CalibrationReport, ToolError> {
        self.set_entry(slot, "", "")
    }

    pub fn clear(&mut self) -> CalibrationReport {
        self.entries.fill(RawEntry::empty());

        self.report()
    }

    pub fn report(&self) -> CalibrationReport {
        calibrate(&self.entries)
    }
}
