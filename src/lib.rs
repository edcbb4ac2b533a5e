//! Sensor calibration from up to three (actual, measured) temperature pairs.
//!
//! The work is split across the workspace crates:
//!
//! - `value_extractor` validates the raw text of each form row.
//! - `calibration_solver` finds the exact offset, line or parabola through
//!   the valid pairs, simplifies it and renders the `-c a:b:c` parameter.
//! - `univariate_polynomial` evaluates the correction on readings.
//!
//! This crate ties them together for a UI layer and reads its configuration.

pub mod calibration_tool;
pub mod config;

pub use calibration_solver::{format_result, solve, CalibrationError, Coefficients, ParameterError};
pub use calibration_tool::{calibrate, CalibrationReport, CalibrationTool, ToolError};
pub use config::{CalibrationConfig, ConfigError};
pub use value_extractor::value_extractor::{EntryStatus, RawEntry, RawField, SlotRole, ValuePair};
