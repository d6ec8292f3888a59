//! Measurement-level operations built on the correction kernels.

use crate::coefficients::{CoefficientError, VectorCoefficients, VectorCoefs};
use crate::common::constants::{PI2, SPEED_OF_LIGHT};
use crate::correction::{self, translate_symmetric_probe};
use crate::domain::NearsideResult;
use crate::numerics::DenseComplexMatrix;
use crate::translation::{Region, TranslationError};
use tracing::debug;

const HZ_PER_GHZ: f64 = 1.0e9;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OperationError {
    #[error("frequency must be finite and positive, got {frequency_ghz} GHz")]
    InvalidFrequency { frequency_ghz: f64 },
    #[error("measurement radius must be finite and positive, got {radius_meters} m")]
    InvalidRadius { radius_meters: f64 },
}

/// Electrical size `k r` of a measurement sphere of `radius_meters` at
/// `frequency_ghz`.
pub fn wavenumber_radius(frequency_ghz: f64, radius_meters: f64) -> Result<f64, OperationError> {
    if !frequency_ghz.is_finite() || frequency_ghz <= 0.0 {
        return Err(OperationError::InvalidFrequency { frequency_ghz });
    }
    if !radius_meters.is_finite() || radius_meters <= 0.0 {
        return Err(OperationError::InvalidRadius { radius_meters });
    }

    let wavenumber = PI2 * frequency_ghz * HZ_PER_GHZ / SPEED_OF_LIGHT;
    Ok(wavenumber * radius_meters)
}

/// A measurement probe described by its own vector coefficients.
///
/// Only the `m = +-1` columns take part in the translation, so the probe must
/// store at least order 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Probe<C = VectorCoefs> {
    coefficients: C,
}

impl<C> Probe<C>
where
    C: VectorCoefficients,
{
    pub fn new(coefficients: C) -> Result<Self, CoefficientError> {
        if coefficients.mmax() < 1 {
            return Err(CoefficientError::MissingOrder {
                order: 1,
                mmax: coefficients.mmax(),
            });
        }
        Ok(Self { coefficients })
    }

    pub fn coefficients(&self) -> &C {
        &self.coefficients
    }

    pub fn into_coefficients(self) -> C {
        self.coefficients
    }

    /// Translation array covering target degrees `1..=nn`.
    pub fn translate(
        &self,
        nn: usize,
        kr: f64,
        region: Region,
    ) -> Result<DenseComplexMatrix, TranslationError> {
        translate_symmetric_probe(nn, &self.coefficients, kr, region)
    }
}

/// Removes `probe` from coefficients measured on a sphere of electrical size
/// `kr`.
pub fn probe_correct<C, P>(
    coefficients: &C,
    probe: &Probe<P>,
    kr: f64,
    region: Region,
) -> NearsideResult<C>
where
    C: VectorCoefficients,
    P: VectorCoefficients,
{
    let r = probe.translate(coefficients.nmax(), kr, region)?;
    let corrected = correction::probe_correct(coefficients, &r)?;
    debug!(
        nmax = coefficients.nmax(),
        kr,
        region = region.as_str(),
        "probe-corrected measurement"
    );
    Ok(corrected)
}

/// Coefficients `probe` would measure on a sphere of electrical size `kr`.
pub fn probe_response<C, P>(
    coefficients: &C,
    probe: &Probe<P>,
    kr: f64,
    region: Region,
) -> NearsideResult<C>
where
    C: VectorCoefficients,
    P: VectorCoefficients,
{
    let r = probe.translate(coefficients.nmax(), kr, region)?;
    Ok(correction::probe_response(coefficients, &r)?)
}
