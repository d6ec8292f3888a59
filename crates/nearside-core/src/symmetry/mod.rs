//! Closed-form coefficient symmetries.
//!
//! Both operations only flip signs and swap the `+m` and `-m` columns, so they
//! never lose precision.

use crate::coefficients::{CoefficientError, VectorCoefficients, mode_indices};
use tracing::debug;

/// Coefficients of the field with its position vector negated (`r -> -r`).
///
/// Family 0 changes sign at odd degrees and family 1 at even degrees; the
/// result is its own inverse.
pub fn reciprocity<C>(coefficients: &C) -> Result<C, CoefficientError>
where
    C: VectorCoefficients,
{
    let mut result = coefficients.clone();
    for (degree, order) in mode_indices(0, coefficients.nmax(), coefficients.mmax()) {
        let [family0, family1] = coefficients.mode(degree, order)?;
        let value = if degree % 2 == 1 {
            [-family0, family1]
        } else {
            [family0, -family1]
        };
        result.set_mode(degree, order, value)?;
    }

    debug!(
        nmax = coefficients.nmax(),
        mmax = coefficients.mmax(),
        "applied reciprocity"
    );
    Ok(result)
}

/// Coefficients of the field rotated by 180 degrees about the y axis:
/// `c'(n, m) = (-1)^(n + m) c(n, -m)` for both families.
pub fn rotate_around_y_by_pi<C>(coefficients: &C) -> Result<C, CoefficientError>
where
    C: VectorCoefficients,
{
    let mut result = coefficients.clone();
    for (degree, order) in mode_indices(0, coefficients.nmax(), coefficients.mmax()) {
        let [family0, family1] = coefficients.mode(degree, -order)?;
        let value = if (degree + order.unsigned_abs() as usize) % 2 == 0 {
            [family0, family1]
        } else {
            [-family0, -family1]
        };
        result.set_mode(degree, order, value)?;
    }

    debug!(
        nmax = coefficients.nmax(),
        mmax = coefficients.mmax(),
        "rotated coefficients about y by pi"
    );
    Ok(result)
}
