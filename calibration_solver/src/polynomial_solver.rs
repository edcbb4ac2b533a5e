//! Exact interpolation of up to three calibration points.
//!
//! One point gives an offset, two a line and three a parabola mapping the
//! measured reading onto the actual temperature. Coinciding points collapse
//! onto the lower-degree case before duplicate values are reported.

use tracing::debug;
use value_extractor::value_extractor::ValuePair;

use crate::coefficients::Coefficients;
use crate::error::CalibrationError;

pub fn solve(values: &[ValuePair]) -> Result<Coefficients, CalibrationError> {
    let result = match values {
        [] => Ok(Coefficients::default()),
        [point] => Ok(solve_offset(point)),
        [first, second] => solve_linear(first, second),
        [first, second, third] => solve_quadratic(first, second, third),
        _ => Err(CalibrationError::TooManyMeasurements),
    };

    debug!(points = values.len(), ?result, "calibration solved");

    result
}

fn solve_offset(point: &ValuePair) -> Coefficients {
    Coefficients::new(vec![point.actual - point.measured])
}

fn solve_linear(
    first: &ValuePair,
    second: &ValuePair,
) -> Result<Coefficients, CalibrationError> {
    if first == second {
        return Ok(solve_offset(first));
    }

    let (ta1, tm1) = (first.actual, first.measured);
    let (ta2, tm2) = (second.actual, second.measured);

    if ta1 == ta2 {
        return Err(CalibrationError::DuplicateActual);
    }
    if tm1 == tm2 {
        return Err(CalibrationError::DuplicateMeasured);
    }

    let b = (ta2 - ta1) / (tm2 - tm1);
    let a = ta1 - b * tm1;

    finite(vec![a, b])
}

fn solve_quadratic(
    first: &ValuePair,
    second: &ValuePair,
    third: &ValuePair,
) -> Result<Coefficients, CalibrationError> {
    if first == second {
        return solve_linear(first, third);
    }
    if first == third || second == third {
        return solve_linear(first, second);
    }

    let (ta1, tm1) = (first.actual, first.measured);
    let (ta2, tm2) = (second.actual, second.measured);
    let (ta3, tm3) = (third.actual, third.measured);

    if ta1 == ta2 || ta1 == ta3 || ta2 == ta3 {
        return Err(CalibrationError::DuplicateActual);
    }
    if tm1 == tm2 || tm1 == tm3 || tm2 == tm3 {
        return Err(CalibrationError::DuplicateMeasured);
    }

    let tm1_2 = tm1 * tm1;
    let tm2_2 = tm2 * tm2;
    let tm3_2 = tm3 * tm3;

    let tm2_tm1 = tm2 - tm1;

    let o = (ta3 - ta1) * tm2_tm1 - (ta2 - ta1) * (tm3 - tm1);
    let u = (tm3_2 - tm1_2) * tm2_tm1 - (tm2_2 - tm1_2) * (tm3 - tm1);

    // u factors as (tm3 - tm1)(tm2 - tm1)(tm3 - tm2); only rounding can zero it here
    if u == 0.0 {
        return Err(CalibrationError::DegenerateMeasured);
    }

    let c = o / u;
    let b = (ta2 - ta1 - c * (tm2_2 - tm1_2)) / tm2_tm1;
    let a = ta1 - b * tm1 - c * tm1_2;

    finite(vec![a, b, c])
}

fn finite(factors: Vec<f64>) -> Result<Coefficients, CalibrationError> {
    if factors.iter().all(|factor| factor.is_finite()) {
        Ok(Coefficients::new(factors))
    } else {
        Err(CalibrationError::DegenerateMeasured)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use univariate_polynomial::univariate_polynomial_dense::UnivariatePoly;

    fn pair(actual: f64, measured: f64) -> ValuePair {
        ValuePair::new(actual, measured)
    }

    fn assert_passes_through(coefficients: &Coefficients, points: &[ValuePair]) {
        let poly = UnivariatePoly::new(coefficients.factors.clone());
        for point in points {
            let value = poly.evaluate(point.measured);
            assert!(
                (value - point.actual).abs() < 1e-9 * point.actual.abs().max(1.0),
                "{coefficients:?} misses {point:?} ({value})"
            );
        }
    }

    #[test]
    fn it_returns_no_coefficients_without_points() {
        assert_eq!(solve(&[]), Ok(Coefficients::default()));
    }

    #[test]
    fn it_solves_offset() {
        assert_eq!(
            solve(&[pair(20.0, 19.5)]),
            Ok(Coefficients::new(vec![0.5]))
        );
    }

    #[test]
    fn it_solves_line() {
        let points = [pair(10.0, 9.5), pair(30.0, 29.0)];

        let coefficients = solve(&points).unwrap();

        assert_eq!(coefficients.len(), 2);
        assert_passes_through(&coefficients, &points);
    }

    #[test]
    fn it_solves_parabola() {
        let points = [pair(-1.0, 1.0), pair(5.0, 2.0), pair(13.0, 3.0)];

        let coefficients = solve(&points).unwrap();

        assert_eq!(coefficients.len(), 3);
        assert_passes_through(&coefficients, &points);
        assert!((coefficients.factors[0] + 5.0).abs() < 1e-9);
        assert!((coefficients.factors[1] - 3.0).abs() < 1e-9);
        assert!((coefficients.factors[2] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn it_collapses_identical_pairs() {
        assert_eq!(
            solve(&[pair(20.0, 19.0), pair(20.0, 19.0)]),
            Ok(Coefficients::new(vec![1.0]))
        );
        assert_eq!(
            solve(&[pair(20.0, 19.0), pair(20.0, 19.0), pair(20.0, 19.0)]),
            Ok(Coefficients::new(vec![1.0]))
        );
    }

    #[test]
    fn it_collapses_repeated_point_in_three() {
        let line = solve(&[pair(10.0, 9.0), pair(30.0, 28.0)]);

        assert_eq!(
            solve(&[pair(10.0, 9.0), pair(10.0, 9.0), pair(30.0, 28.0)]),
            line
        );
        assert_eq!(
            solve(&[pair(10.0, 9.0), pair(30.0, 28.0), pair(10.0, 9.0)]),
            line
        );
        assert_eq!(
            solve(&[pair(10.0, 9.0), pair(30.0, 28.0), pair(30.0, 28.0)]),
            line
        );
    }

    #[test]
    fn it_reports_duplicate_actual() {
        assert_eq!(
            solve(&[pair(20.0, 19.0), pair(20.0, 18.0)]),
            Err(CalibrationError::DuplicateActual)
        );
        assert_eq!(
            solve(&[pair(10.0, 9.0), pair(20.0, 19.0), pair(20.0, 18.0)]),
            Err(CalibrationError::DuplicateActual)
        );
    }

    #[test]
    fn it_reports_duplicate_measured() {
        assert_eq!(
            solve(&[pair(20.0, 19.0), pair(21.0, 19.0)]),
            Err(CalibrationError::DuplicateMeasured)
        );
        assert_eq!(
            solve(&[pair(10.0, 9.0), pair(20.0, 19.0), pair(21.0, 9.0)]),
            Err(CalibrationError::DuplicateMeasured)
        );
    }

    #[test]
    fn it_reports_duplicate_actual_before_measured() {
        assert_eq!(
            solve(&[pair(10.0, 9.0), pair(10.0, 19.0), pair(21.0, 19.0)]),
            Err(CalibrationError::DuplicateActual)
        );
    }

    #[test]
    fn it_rejects_more_than_three_points() {
        let points = [
            pair(1.0, 1.0),
            pair(2.0, 2.0),
            pair(3.0, 3.0),
            pair(4.0, 4.0),
        ];

        assert_eq!(solve(&points), Err(CalibrationError::TooManyMeasurements));
    }

    #[test]
    fn it_reports_overflowing_solution() {
        assert_eq!(
            solve(&[pair(f64::MAX, 0.0), pair(0.0, f64::MIN_POSITIVE)]),
            Err(CalibrationError::DegenerateMeasured)
        );
    }

    #[test]
    fn it_reports_degenerate_quadratic() {
        // adjacent doubles this large square to values whose differences cancel
        let points = [
            pair(1.0, 1e16),
            pair(2.0, 1e16 + 2.0),
            pair(3.0, 1e16 + 4.0),
        ];

        let result = solve(&points);

        assert_eq!(result, Err(CalibrationError::DegenerateMeasured));
        assert_eq!(
            crate::coefficients::format_result(&result),
            "[error: degenerate measured temperatures]"
        );
    }

    #[test]
    fn it_matches_lagrange_interpolation() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let points: Vec<ValuePair> = (0..3)
                .map(|i| {
                    let offset = i as f64 * 20.0;
                    pair(
                        offset + rng.gen_range(0.0..10.0),
                        offset + rng.gen_range(0.0..10.0),
                    )
                })
                .collect();

            let coefficients = solve(&points).unwrap();
            let lagrange = UnivariatePoly::interpolate(
                &points
                    .iter()
                    .map(|point| (point.measured, point.actual))
                    .collect::<Vec<_>>(),
            );

            for x in [0.0, 15.0, 40.0, 60.0] {
                let expected = lagrange.evaluate(x);
                let actual = UnivariatePoly::new(coefficients.factors.clone()).evaluate(x);
                assert!((expected - actual).abs() < 1e-6 * expected.abs().max(1.0));
            }
        }
    }
}
