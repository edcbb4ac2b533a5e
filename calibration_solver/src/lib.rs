pub mod coefficients;
pub mod error;
pub mod polynomial_solver;

pub use coefficients::{format_result, Coefficients};
pub use error::{CalibrationError, ParameterError};
pub use polynomial_solver::solve;
