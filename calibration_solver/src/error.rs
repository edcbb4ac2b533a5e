use thiserror::Error;

/// A set of calibration points that has no unique correction polynomial.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationError {
    #[error("duplicate actual temperature")]
    DuplicateActual,
    #[error("duplicate measured temperature")]
    DuplicateMeasured,
    #[error("too many measurements")]
    TooManyMeasurements,
    /// The elimination step divided by zero or overflowed.
    #[error("degenerate measured temperatures")]
    DegenerateMeasured,
}

/// Failure to read a `-c a:b:c` parameter string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("parsing value failed: {0}")]
    InvalidValue(String),
    #[error("values must be finite: {0}")]
    NonFinite(String),
}
