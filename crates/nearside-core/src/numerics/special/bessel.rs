use crate::domain::NearsideErrorCategory;
use num_complex::Complex64;

const SERIES_CUTOFF: f64 = 1.0;
const SERIES_MAX_ITER: usize = 160;
const SERIES_REL_TOL: f64 = 1.0e-17;
const MILLER_EXTRA_ORDERS: usize = 16;
const MILLER_RESCALE_THRESHOLD: f64 = 1.0e200;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RadialFunctionError {
    #[error("spherical Bessel argument must be finite and non-negative, got {argument}")]
    InvalidArgument { argument: f64 },
    #[error("spherical Neumann/Hankel functions are singular at the origin")]
    SingularArgument,
    #[error("spherical Neumann function overflowed at order {order} for argument {argument}")]
    Overflow { order: usize, argument: f64 },
}

impl RadialFunctionError {
    pub fn category(&self) -> NearsideErrorCategory {
        match self {
            Self::InvalidArgument { .. } | Self::SingularArgument => {
                NearsideErrorCategory::InputValidationError
            }
            Self::Overflow { .. } => NearsideErrorCategory::ComputationError,
        }
    }
}

/// Evaluates sequences `f_0(x) .. f_{len-1}(x)` of the radial functions used to
/// weight spherical-wave translation sums.
pub trait RadialFunctionApi {
    /// Standing-wave family `j_n(x)`.
    fn spherical_j(
        &self,
        argument: f64,
        len: usize,
    ) -> Result<Vec<Complex64>, RadialFunctionError>;
    /// Outgoing-wave family `h1_n(x) = j_n(x) + i y_n(x)`.
    fn spherical_h1(
        &self,
        argument: f64,
        len: usize,
    ) -> Result<Vec<Complex64>, RadialFunctionError>;
}

/// Real-argument spherical Bessel evaluator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SphericalBessel;

impl RadialFunctionApi for SphericalBessel {
    fn spherical_j(
        &self,
        argument: f64,
        len: usize,
    ) -> Result<Vec<Complex64>, RadialFunctionError> {
        Ok(spherical_j_sequence(argument, len)?
            .into_iter()
            .map(|value| Complex64::new(value, 0.0))
            .collect())
    }

    fn spherical_h1(
        &self,
        argument: f64,
        len: usize,
    ) -> Result<Vec<Complex64>, RadialFunctionError> {
        spherical_h1_sequence(argument, len)
    }
}

/// Spherical Bessel functions of the first kind, orders `0..len`.
pub fn spherical_j_sequence(argument: f64, len: usize) -> Result<Vec<f64>, RadialFunctionError> {
    check_argument(argument)?;
    if len == 0 {
        return Ok(Vec::new());
    }

    if argument == 0.0 {
        let mut values = vec![0.0; len];
        values[0] = 1.0;
        return Ok(values);
    }

    if argument < SERIES_CUTOFF {
        return Ok((0..len).map(|order| series_j(argument, order)).collect());
    }

    // Below the turning point `n < x` the upward recursion does not lose digits.
    if len as f64 <= argument {
        return Ok(upward_j(argument, len));
    }

    Ok(miller_j(argument, len))
}

/// Spherical Bessel functions of the second kind (Neumann), orders `0..len`.
pub fn spherical_y_sequence(argument: f64, len: usize) -> Result<Vec<f64>, RadialFunctionError> {
    check_argument(argument)?;
    if len == 0 {
        return Ok(Vec::new());
    }
    if argument == 0.0 {
        return Err(RadialFunctionError::SingularArgument);
    }

    let (sin_argument, cos_argument) = argument.sin_cos();
    let mut values = vec![0.0; len];
    values[0] = -cos_argument / argument;
    if len > 1 {
        values[1] = -cos_argument / (argument * argument) - sin_argument / argument;
    }

    // Upward recursion is stable for the Neumann family.
    for order in 2..len {
        let coefficient = (2 * order - 1) as f64;
        values[order] = coefficient * values[order - 1] / argument - values[order - 2];
    }

    if let Some(order) = values.iter().position(|value| !value.is_finite()) {
        return Err(RadialFunctionError::Overflow { order, argument });
    }

    Ok(values)
}

/// Spherical Hankel functions of the first kind `j_n + i y_n`, orders `0..len`.
pub fn spherical_h1_sequence(
    argument: f64,
    len: usize,
) -> Result<Vec<Complex64>, RadialFunctionError> {
    let j_values = spherical_j_sequence(argument, len)?;
    let y_values = spherical_y_sequence(argument, len)?;

    Ok(j_values
        .into_iter()
        .zip(y_values)
        .map(|(j, y)| Complex64::new(j, y))
        .collect())
}

fn check_argument(argument: f64) -> Result<(), RadialFunctionError> {
    if !argument.is_finite() || argument < 0.0 {
        return Err(RadialFunctionError::InvalidArgument { argument });
    }
    Ok(())
}

/// Power series `x^n / (2n+1)!! * sum_k (-x^2/2)^k / (k! (2n+3)(2n+5)...(2n+2k+1))`.
fn series_j(argument: f64, order: usize) -> f64 {
    let mut leading = 1.0;
    for k in 0..order {
        leading *= argument / (2 * k + 3) as f64;
    }

    let u = -0.5 * argument * argument;
    let mut term = 1.0;
    let mut sum = 1.0;
    for k in 1..=SERIES_MAX_ITER {
        term *= u / (k as f64 * (2 * (order + k) + 1) as f64);
        sum += term;
        if term.abs() <= SERIES_REL_TOL * sum.abs() {
            break;
        }
    }

    leading * sum
}

fn upward_j(argument: f64, len: usize) -> Vec<f64> {
    let (sin_argument, cos_argument) = argument.sin_cos();
    let mut values = vec![0.0; len];
    values[0] = sin_argument / argument;
    if len > 1 {
        values[1] = sin_argument / (argument * argument) - cos_argument / argument;
    }

    for order in 2..len {
        let coefficient = (2 * order - 1) as f64;
        values[order] = coefficient * values[order - 1] / argument - values[order - 2];
    }

    values
}

/// Miller's backward recursion normalized against the closed forms of `j_0`
/// and `j_1`. Only used when `len > argument`, so the start order stays
/// bounded by `len`.
fn miller_j(argument: f64, len: usize) -> Vec<f64> {
    let span = len.max(argument.ceil() as usize);
    let start = span + MILLER_EXTRA_ORDERS + (40.0 * span as f64).sqrt() as usize;

    let mut values = vec![0.0; start + 2];
    values[start] = 1.0;
    for order in (1..=start).rev() {
        let coefficient = (2 * order + 1) as f64;
        values[order - 1] = coefficient * values[order] / argument - values[order + 1];

        if values[order - 1].abs() > MILLER_RESCALE_THRESHOLD {
            for value in &mut values[order - 1..] {
                *value /= MILLER_RESCALE_THRESHOLD;
            }
        }
    }

    let (sin_argument, cos_argument) = argument.sin_cos();
    let j0 = sin_argument / argument;
    let j1 = sin_argument / (argument * argument) - cos_argument / argument;
    let scale = if j0.abs() >= j1.abs() {
        j0 / values[0]
    } else {
        j1 / values[1]
    };

    values.truncate(len);
    for value in &mut values {
        *value *= scale;
    }
    values
}

#[cfg(test)]
mod tests {
    use super::{
        RadialFunctionApi, RadialFunctionError, SphericalBessel, miller_j, series_j,
        spherical_h1_sequence, spherical_j_sequence, spherical_y_sequence, upward_j,
    };

    #[test]
    fn low_orders_match_closed_forms() {
        for argument in [0.25, 0.9, 1.0, 3.7, 10.0, 42.5] {
            let (s, c) = f64::sin_cos(argument);
            let x = argument;
            let expected_j = [
                s / x,
                s / (x * x) - c / x,
                (3.0 / (x * x) - 1.0) * s / x - 3.0 * c / (x * x),
            ];
            let expected_y = [
                -c / x,
                -c / (x * x) - s / x,
                (-3.0 / (x * x) + 1.0) * c / x - 3.0 * s / (x * x),
            ];

            let j = spherical_j_sequence(argument, 3).expect("valid argument");
            let y = spherical_y_sequence(argument, 3).expect("valid argument");
            for order in 0..3 {
                assert_scalar_close(
                    &format!("j_{order}({argument})"),
                    expected_j[order],
                    j[order],
                    1.0e-14,
                    1.0e-12,
                );
                assert_scalar_close(
                    &format!("y_{order}({argument})"),
                    expected_y[order],
                    y[order],
                    1.0e-14,
                    1.0e-12,
                );
            }
        }
    }

    #[test]
    fn sequences_satisfy_the_cross_product_wronskian() {
        // j_n y_{n-1} - j_{n-1} y_n = 1 / x^2
        for argument in [0.6, 2.5, 17.0, 60.0] {
            let len = 30;
            let j = spherical_j_sequence(argument, len).expect("valid argument");
            let y = spherical_y_sequence(argument, len).expect("valid argument");
            let expected = 1.0 / (argument * argument);
            for order in 1..len {
                let wronskian = j[order] * y[order - 1] - j[order - 1] * y[order];
                assert_scalar_close(
                    &format!("wronskian order={order} x={argument}"),
                    expected,
                    wronskian,
                    1.0e-14,
                    1.0e-10,
                );
            }
        }
    }

    #[test]
    fn backward_recursion_agrees_with_series_at_the_cutoff() {
        let argument = 1.0;
        let miller = miller_j(argument, 25);
        for (order, value) in miller.iter().enumerate() {
            let series = series_j(argument, order);
            assert_scalar_close(
                &format!("order={order}"),
                series,
                *value,
                1.0e-300,
                1.0e-12,
            );
        }
    }

    #[test]
    fn upward_recursion_matches_backward_recursion_below_the_turning_point() {
        for argument in [12.0, 57.5, 300.0] {
            let len = (argument as usize).min(40);
            let upward = upward_j(argument, len);
            let miller = miller_j(argument, len);
            for order in 0..len {
                assert_scalar_close(
                    &format!("j_{order}({argument})"),
                    miller[order],
                    upward[order],
                    1.0e-15,
                    1.0e-10,
                );
            }
        }
    }

    #[test]
    fn huge_arguments_only_allocate_the_requested_orders() {
        for argument in [1.0e8, 1.0e19, f64::MAX] {
            let j = spherical_j_sequence(argument, 3).expect("valid argument");
            assert_eq!(j.len(), 3);
            assert!(j.iter().all(|value| value.is_finite()), "{j:?}");
            assert!(j.iter().all(|value| value.abs() <= 1.0 / argument.sqrt()));
        }
    }

    #[test]
    fn high_orders_decay_instead_of_diverging() {
        let j = spherical_j_sequence(5.0, 80).expect("valid argument");
        assert!(j.iter().all(|value| value.is_finite()));
        assert!(j[79].abs() < 1.0e-60, "j_79(5) = {:e}", j[79]);
        assert!(j[79] > 0.0);
    }

    #[test]
    fn origin_is_regular_for_j_and_singular_for_h1() {
        assert_eq!(
            spherical_j_sequence(0.0, 4).expect("j is regular at the origin"),
            vec![1.0, 0.0, 0.0, 0.0]
        );
        assert_eq!(
            spherical_h1_sequence(0.0, 4),
            Err(RadialFunctionError::SingularArgument)
        );
    }

    #[test]
    fn rejects_negative_and_non_finite_arguments() {
        for argument in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                spherical_j_sequence(argument, 3),
                Err(RadialFunctionError::InvalidArgument { .. })
            ));
        }
    }

    #[test]
    fn neumann_overflow_is_reported_with_its_order() {
        let error = spherical_y_sequence(1.0e-3, 400).expect_err("y_n overflows");
        assert!(matches!(error, RadialFunctionError::Overflow { .. }));
    }

    #[test]
    fn hankel_combines_both_kinds() {
        let argument = 7.25;
        let h = SphericalBessel
            .spherical_h1(argument, 12)
            .expect("valid argument");
        let j = SphericalBessel
            .spherical_j(argument, 12)
            .expect("valid argument");
        let y = spherical_y_sequence(argument, 12).expect("valid argument");
        for order in 0..12 {
            assert_eq!(h[order].re, j[order].re);
            assert_eq!(h[order].im, y[order]);
            assert_eq!(j[order].im, 0.0);
        }
    }

    fn assert_scalar_close(label: &str, expected: f64, actual: f64, abs_tol: f64, rel_tol: f64) {
        let abs_diff = (actual - expected).abs();
        let rel_diff = abs_diff / expected.abs().max(f64::MIN_POSITIVE);
        assert!(
            abs_diff <= abs_tol || rel_diff <= rel_tol,
            "{label} expected={expected:.15e} actual={actual:.15e} abs_diff={abs_diff:.15e} rel_diff={rel_diff:.15e}",
        );
    }
}
