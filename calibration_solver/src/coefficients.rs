use std::fmt;
use std::str::FromStr;

use tracing::debug;
use univariate_polynomial::univariate_polynomial_dense::UnivariatePoly;

use crate::error::{CalibrationError, ParameterError};

const PARAMETER_FLAG: &str = "-c";
const NOT_NEEDED: &str = "[not needed]";

/// Correction terms `[a0, a1, a2]` for `actual = a0 + a1*measured + a2*measured^2`.
///
/// Fewer than two terms carry an implicit linear term of one: `[a0]` is a
/// pure offset and the empty sequence is the identity mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coefficients {
    pub factors: Vec<f64>,
}

impl Coefficients {
    pub fn new(factors: Vec<f64>) -> Self {
        Coefficients { factors }
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Drops terms that do not change the mapping: a zero quadratic term,
    /// an identity linear term, and finally a zero offset.
    pub fn simplify(mut self) -> Self {
        while self.factors.len() > 2 && self.factors.last() == Some(&0.0) {
            self.factors.pop();
        }

        if self.factors.len() == 2 && self.factors[1] == 1.0 {
            self.factors.pop();
        }

        if self.factors.len() == 1 && self.factors[0] == 0.0 {
            self.factors.pop();
        }

        debug!(factors = ?self.factors, "coefficients simplified");

        self
    }

    pub fn to_polynomial(&self) -> UnivariatePoly<f64> {
        let factors = match self.factors.as_slice() {
            [] => vec![0.0, 1.0],
            [offset] => vec![*offset, 1.0],
            factors => factors.to_vec(),
        };

        UnivariatePoly::new(factors)
    }

    /// Applies the correction to a measured reading.
    pub fn calibrate(&self, measured: f64) -> f64 {
        self.to_polynomial().evaluate(measured)
    }

    /// Reads `a:b:c`, optionally prefixed with `-c`. Empty fields read as zero
    /// and a missing linear term reads as one, so the result always has at
    /// least two terms.
    pub fn from_parameter_string(parameters: &str) -> Result<Self, ParameterError> {
        let parameters = parameters.trim();

        if parameters == NOT_NEEDED {
            return Ok(Coefficients::new(vec![0.0, 1.0]));
        }

        let parameters = parameters
            .strip_prefix(PARAMETER_FLAG)
            .map(str::trim_start)
            .unwrap_or(parameters);

        let mut factors = parameters
            .split(':')
            .map(parse_factor)
            .collect::<Result<Vec<_>, _>>()?;

        if factors.len() < 2 {
            factors.push(1.0);
        }

        Ok(Coefficients::new(factors))
    }
}

fn parse_factor(field: &str) -> Result<f64, ParameterError> {
    let field = field.trim();

    if field.is_empty() {
        return Ok(0.0);
    }

    let value = field
        .parse::<f64>()
        .map_err(|_| ParameterError::InvalidValue(field.to_string()))?;

    if !value.is_finite() {
        return Err(ParameterError::NonFinite(field.to_string()));
    }

    Ok(value)
}

fn format_factor(value: f64) -> String {
    if value == 0.0 {
        // also folds negative zero
        "0".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        value.to_string()
    }
}

impl fmt::Display for Coefficients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.factors.is_empty() {
            return write!(f, "{NOT_NEEDED}");
        }

        let joined = self
            .factors
            .iter()
            .map(|factor| format_factor(*factor))
            .collect::<Vec<_>>()
            .join(":");

        write!(f, "{PARAMETER_FLAG} {joined}")
    }
}

impl FromStr for Coefficients {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Coefficients::from_parameter_string(s)
    }
}

/// Simplifies and renders a solver outcome as the display string.
pub fn format_result(result: &Result<Coefficients, CalibrationError>) -> String {
    match result {
        Ok(coefficients) => coefficients.clone().simplify().to_string(),
        Err(err) => format!("[error: {err}]"),
    }
}
