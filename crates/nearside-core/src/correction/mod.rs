//! Per-mode probe correction and probe response.
//!
//! Row `n` of a translation array `R` fixes one 2x2 matrix per degree. The
//! inverse matrix removes the probe from measured coefficients, the forward
//! matrix applies it; the two are exact algebraic inverses of each other.

use crate::coefficients::{CoefficientError, VectorCoefficients};
use crate::common::config::CorrectionConfig;
use crate::common::constants::FOUR_PI;
use crate::domain::NearsideErrorCategory;
use crate::numerics::DenseComplexMatrix;
use crate::translation::{
    Region, TRANSLATION_COLUMNS, TranslationError, translate_mu_plus_minus_one_probe,
};
use num_complex::Complex64;
use tracing::{debug, warn};

const I: Complex64 = Complex64::new(0.0, 1.0);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CorrectionError {
    #[error("probe correction is degenerate at degree {degree}: |det| = {determinant:e}")]
    DegenerateMode { degree: usize, determinant: f64 },
    #[error("degree {degree} has no translation row (rows 1..{rows} are defined)")]
    DegreeOutOfRange { degree: usize, rows: usize },
    #[error("translation array covers degrees up to {available}, coefficients need {required}")]
    TranslationTooShort { required: usize, available: usize },
    #[error("translation array must have 4 columns, got {rows}x{cols}")]
    TranslationShape { rows: usize, cols: usize },
    #[error("degeneracy tolerance must be finite and non-negative, got {tolerance}")]
    InvalidTolerance { tolerance: f64 },
    #[error(transparent)]
    Coefficient(#[from] CoefficientError),
}

impl CorrectionError {
    pub fn category(&self) -> NearsideErrorCategory {
        match self {
            Self::DegenerateMode { .. } => NearsideErrorCategory::ComputationError,
            _ => NearsideErrorCategory::InputValidationError,
        }
    }
}

/// Matrix taking measured (probe-weighted) coefficients of degree `n` back to
/// the probe-free coefficients.
pub fn make_inverse_r_matrix(
    r: &DenseComplexMatrix,
    n: usize,
) -> Result<DenseComplexMatrix, CorrectionError> {
    make_inverse_r_matrix_with_tolerance(r, n, CorrectionConfig::default().degeneracy_tolerance)
}

pub fn make_inverse_r_matrix_with_tolerance(
    r: &DenseComplexMatrix,
    n: usize,
    tolerance: f64,
) -> Result<DenseComplexMatrix, CorrectionError> {
    CorrectionConfig::new(tolerance)?;
    let [r0, r1, r2, r3] = translation_row(r, n)?;

    let determinant = r0 * r3 - r1 * r2;
    let scale = (r0 * r3).norm().max((r1 * r2).norm());
    let magnitude = determinant.norm();
    if !magnitude.is_finite() || magnitude == 0.0 || magnitude <= tolerance * scale {
        return Err(CorrectionError::DegenerateMode {
            degree: n,
            determinant: magnitude,
        });
    }

    let f = ((2 * n + 1) as f64 / FOUR_PI).sqrt();
    let factor = I * f / (2.0 * determinant);

    Ok(matrix2([
        [(-r1 - r3) * factor, (-r1 + r3) * factor],
        [(r0 + r2) * factor, (r0 - r2) * factor],
    ]))
}

/// Matrix applying the probe response to probe-free coefficients of degree `n`.
pub fn make_forward_r_matrix(
    r: &DenseComplexMatrix,
    n: usize,
) -> Result<DenseComplexMatrix, CorrectionError> {
    let [r0, r1, r2, r3] = translation_row(r, n)?;

    let g = (FOUR_PI / (2 * n + 1) as f64).sqrt();
    let factor = I * g;

    Ok(matrix2([
        [(r0 - r2) * factor, (r1 - r3) * factor],
        [(-r0 - r2) * factor, (-r1 - r3) * factor],
    ]))
}

/// Removes the probe described by `r` from measured coefficients.
pub fn probe_correct<C>(coefficients: &C, r: &DenseComplexMatrix) -> Result<C, CorrectionError>
where
    C: VectorCoefficients,
{
    probe_correct_with_config(coefficients, r, &CorrectionConfig::default())
}

pub fn probe_correct_with_config<C>(
    coefficients: &C,
    r: &DenseComplexMatrix,
    config: &CorrectionConfig,
) -> Result<C, CorrectionError>
where
    C: VectorCoefficients,
{
    config.validate()?;
    let tolerance = config.degeneracy_tolerance;

    let corrected = apply_per_degree(coefficients, r, |n| {
        make_inverse_r_matrix_with_tolerance(r, n, tolerance)
    })
    .inspect_err(|error| {
        if let CorrectionError::DegenerateMode {
            degree,
            determinant,
        } = error
        {
            warn!(degree, determinant, "probe correction aborted on degenerate mode");
        }
    })?;

    debug!(
        nmax = coefficients.nmax(),
        mmax = coefficients.mmax(),
        "probe-corrected coefficient set"
    );
    Ok(corrected)
}

/// Simulates the response of the probe described by `r` to probe-free
/// coefficients.
pub fn probe_response<C>(coefficients: &C, r: &DenseComplexMatrix) -> Result<C, CorrectionError>
where
    C: VectorCoefficients,
{
    probe_response_with_config(coefficients, r, &CorrectionConfig::default())
}

/// The forward matrix never divides, so `config` is only validated.
pub fn probe_response_with_config<C>(
    coefficients: &C,
    r: &DenseComplexMatrix,
    config: &CorrectionConfig,
) -> Result<C, CorrectionError>
where
    C: VectorCoefficients,
{
    config.validate()?;

    let response = apply_per_degree(coefficients, r, |n| make_forward_r_matrix(r, n))?;

    debug!(
        nmax = coefficients.nmax(),
        mmax = coefficients.mmax(),
        "applied probe response to coefficient set"
    );
    Ok(response)
}

/// Translation array for a probe whose pattern only has azimuthal orders `±1`.
///
/// The probe's order `-1` and `+1` columns (degrees `1..=nmax`) become the
/// `nmax x 2` (magnetic, electric) arrays of
/// [`translate_mu_plus_minus_one_probe`].
pub fn translate_symmetric_probe<C>(
    nn: usize,
    probe: &C,
    kr: f64,
    region: Region,
) -> Result<DenseComplexMatrix, TranslationError>
where
    C: VectorCoefficients,
{
    if probe.mmax() < 1 {
        return Err(CoefficientError::MissingOrder {
            order: 1,
            mmax: probe.mmax(),
        }
        .into());
    }

    let negative = probe.column(-1)?;
    let positive = probe.column(1)?;

    let muneg1 = DenseComplexMatrix::from_fn(negative.ncols(), 2, |row, col| negative[(col, row)]);
    let mu1 = DenseComplexMatrix::from_fn(positive.ncols(), 2, |row, col| positive[(col, row)]);

    translate_mu_plus_minus_one_probe(nn, &muneg1, &mu1, kr, region)
}

fn apply_per_degree<C, F>(
    coefficients: &C,
    r: &DenseComplexMatrix,
    mut matrix_for_degree: F,
) -> Result<C, CorrectionError>
where
    C: VectorCoefficients,
    F: FnMut(usize) -> Result<DenseComplexMatrix, CorrectionError>,
{
    check_translation_shape(r)?;
    let nmax = coefficients.nmax();
    let available = r.nrows() - 1;
    if available < nmax {
        return Err(CorrectionError::TranslationTooShort {
            required: nmax,
            available,
        });
    }

    let mut result = coefficients.clone();
    for n in 1..=nmax {
        let matrix = matrix_for_degree(n)?;
        let limit = coefficients.max_order_at(n) as i32;
        for m in -limit..=limit {
            let [family0, family1] = coefficients.mode(n, m)?;
            result.set_mode(
                n,
                m,
                [
                    matrix[(0, 0)] * family0 + matrix[(0, 1)] * family1,
                    matrix[(1, 0)] * family0 + matrix[(1, 1)] * family1,
                ],
            )?;
        }
    }

    Ok(result)
}

fn check_translation_shape(r: &DenseComplexMatrix) -> Result<(), CorrectionError> {
    if r.ncols() != TRANSLATION_COLUMNS || r.nrows() == 0 {
        return Err(CorrectionError::TranslationShape {
            rows: r.nrows(),
            cols: r.ncols(),
        });
    }
    Ok(())
}

fn translation_row(
    r: &DenseComplexMatrix,
    n: usize,
) -> Result<[Complex64; TRANSLATION_COLUMNS], CorrectionError> {
    check_translation_shape(r)?;
    if n == 0 || n >= r.nrows() {
        return Err(CorrectionError::DegreeOutOfRange {
            degree: n,
            rows: r.nrows(),
        });
    }

    Ok([r[(n, 0)], r[(n, 1)], r[(n, 2)], r[(n, 3)]])
}

fn matrix2(entries: [[Complex64; 2]; 2]) -> DenseComplexMatrix {
    DenseComplexMatrix::from_fn(2, 2, |row, col| entries[row][col])
}
