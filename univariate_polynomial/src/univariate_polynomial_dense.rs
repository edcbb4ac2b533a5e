use num_traits::Float;
use std::ops::{Add, Mul};

/// Dense polynomial `c0 + c1*x + c2*x^2 + ...` over a real float type.
///
/// An empty coefficient vector is the zero polynomial.
#[derive(Debug, Clone, PartialEq)]
pub struct UnivariatePoly<F: Float> {
    pub coefficient: Vec<F>,
}

impl<F: Float> UnivariatePoly<F> {
    pub fn new(coeff: Vec<F>) -> Self {
        UnivariatePoly { coefficient: coeff }
    }

    fn trim(&mut self) {
        while self.coefficient.last().is_some_and(|coeff| coeff.is_zero()) {
            self.coefficient.pop();
        }
    }

    /// Evaluates by accumulating powers of `x` term by term.
    pub fn evaluate(&self, x: F) -> F {
        let (value, _) = self
            .coefficient
            .iter()
            .fold((F::zero(), F::one()), |(value, power), coeff| {
                (value + *coeff * power, power * x)
            });

        value
    }

    pub fn scalar_mul(&self, scalar: F) -> Self {
        let coefficients = self
            .coefficient
            .iter()
            .map(|coeff| *coeff * scalar)
            .collect();

        let mut poly = UnivariatePoly::new(coefficients);

        poly.trim();

        poly
    }

    /// Lagrange interpolation through `points` given as `(x, y)`.
    ///
    /// The `x` values must be pairwise distinct, otherwise the result holds
    /// non-finite coefficients.
    pub fn interpolate(points: &[(F, F)]) -> UnivariatePoly<F> {
        let mut result = UnivariatePoly::new(vec![]);

        for (i, &(x_i, y_i)) in points.iter().enumerate() {
            let mut l_i = UnivariatePoly::new(vec![F::one()]);

            for (j, &(x_j, _)) in points.iter().enumerate() {
                if i != j {
                    let numerator = UnivariatePoly::new(vec![-x_j, F::one()]);

                    let denominator = x_i - x_j;

                    l_i = l_i * numerator.scalar_mul(F::one() / denominator);
                }
            }

            result = result + l_i.scalar_mul(y_i);
        }

        result.trim();

        result
    }
}

impl<F: Float> Add for UnivariatePoly<F> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let mut result = vec![F::zero(); self.coefficient.len().max(other.coefficient.len())];

        for (i, &coeff) in self.coefficient.iter().enumerate() {
            result[i] = result[i] + coeff;
        }

        for (i, &coeff) in other.coefficient.iter().enumerate() {
            result[i] = result[i] + coeff;
        }

        UnivariatePoly::new(result)
    }
}

impl<F: Float> Mul for UnivariatePoly<F> {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        if self.coefficient.is_empty() || other.coefficient.is_empty() {
            return UnivariatePoly::new(vec![]);
        }

        let mut coeffs = vec![F::zero(); self.coefficient.len() + other.coefficient.len() - 1];

        for (i, a) in self.coefficient.iter().enumerate() {
            for (j, b) in other.coefficient.iter().enumerate() {
                coeffs[i + j] = coeffs[i + j] + *a * *b;
            }
        }

        UnivariatePoly::new(coeffs)
    }
}
