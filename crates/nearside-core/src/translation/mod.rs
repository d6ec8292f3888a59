//! Translation of a probe's spherical-wave coefficients to the measurement
//! sphere.

mod bc;

pub use bc::bc;

use crate::coefficients::CoefficientError;
use crate::common::constants::SQRT_PI;
use crate::domain::NearsideErrorCategory;
use crate::numerics::DenseComplexMatrix;
use crate::numerics::special::{
    RadialFunctionApi, RadialFunctionError, SphericalBessel, Wigner3jError,
};
use num_complex::Complex64;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use tracing::debug;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Number of coupling terms stored per translated degree.
pub const TRANSLATION_COLUMNS: usize = 4;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TranslationError {
    #[error("region must be either external or internal, got '{value}'")]
    InvalidRegion { value: String },
    #[error("translation coefficients require degrees >= 1, got nu={nu}, n={n}")]
    ZeroDegree { nu: usize, n: usize },
    #[error(
        "probe coefficient arrays must both be Mx2, got mu=-1 {negative:?} and mu=+1 {positive:?}"
    )]
    ProbeShapeMismatch {
        negative: (usize, usize),
        positive: (usize, usize),
    },
    #[error("wigner 3j coupling failed for nu={nu}, n={n}: {source}")]
    Wigner3j {
        nu: usize,
        n: usize,
        #[source]
        source: Wigner3jError,
    },
    #[error("radial functions failed at kr={argument}: {source}")]
    RadialFunction {
        argument: f64,
        #[source]
        source: RadialFunctionError,
    },
    #[error(transparent)]
    Coefficient(#[from] CoefficientError),
}

impl TranslationError {
    pub fn category(&self) -> NearsideErrorCategory {
        match self {
            Self::Wigner3j { .. } => NearsideErrorCategory::ComputationError,
            Self::RadialFunction { source, .. } => source.category(),
            Self::InvalidRegion { .. }
            | Self::ZeroDegree { .. }
            | Self::ProbeShapeMismatch { .. }
            | Self::Coefficient(_) => NearsideErrorCategory::InputValidationError,
        }
    }
}

/// Which radial function family weights the translation sums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// Outgoing waves (`h1_n`), measurement sphere outside the source.
    #[default]
    External,
    /// Standing waves (`j_n`), measurement sphere inside the source region.
    Internal,
}

impl Region {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::External => "external",
            Self::Internal => "internal",
        }
    }

    /// Radial function values for orders `0..len` at `argument`.
    pub fn radial_sequence<R>(
        self,
        radial: &R,
        argument: f64,
        len: usize,
    ) -> Result<Vec<Complex64>, TranslationError>
    where
        R: RadialFunctionApi + ?Sized,
    {
        let values = match self {
            Self::External => radial.spherical_h1(argument, len),
            Self::Internal => radial.spherical_j(argument, len),
        };
        values.map_err(|source| TranslationError::RadialFunction { argument, source })
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

impl FromStr for Region {
    type Err = TranslationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "external" => Ok(Self::External),
            "internal" => Ok(Self::Internal),
            _ => Err(TranslationError::InvalidRegion {
                value: value.to_string(),
            }),
        }
    }
}

/// Legacy integer selector: `0` external, `1` internal.
impl TryFrom<i32> for Region {
    type Error = TranslationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::External),
            1 => Ok(Self::Internal),
            other => Err(TranslationError::InvalidRegion {
                value: other.to_string(),
            }),
        }
    }
}

/// Translation sums `(B, C)` coupling source degree `nu` to target degree `n`
/// at radial distance `x` (in wavenumbers).
pub fn bc_comp(
    nu: usize,
    n: usize,
    x: f64,
    region: Region,
) -> Result<(Complex64, Complex64), TranslationError> {
    bc_comp_with(&SphericalBessel, nu, n, x, region)
}

pub fn bc_comp_with<R>(
    radial: &R,
    nu: usize,
    n: usize,
    x: f64,
    region: Region,
) -> Result<(Complex64, Complex64), TranslationError>
where
    R: RadialFunctionApi + ?Sized,
{
    let weights = bc(nu, n)?;
    let h = region.radial_sequence(radial, x, weights.len())?;
    Ok(weighted_sums(nu, n, &weights, &h))
}

/// `B` collects even offsets from `|nu - n|`, `C` odd offsets, each with an
/// alternating `i^alpha` phase.
fn weighted_sums(nu: usize, n: usize, weights: &[f64], h: &[Complex64]) -> (Complex64, Complex64) {
    let lower = nu.abs_diff(n);
    let upper = nu + n;

    let mut b = ZERO;
    let mut phase = i_pow(lower);
    for alpha in (lower..=upper).step_by(2) {
        b += ((2 * alpha + 1) as f64).sqrt() * weights[alpha] * phase * h[alpha];
        phase = -phase;
    }

    let mut c = ZERO;
    let mut phase = i_pow(lower + 1);
    for alpha in ((lower + 1)..upper).step_by(2) {
        c += ((2 * alpha + 1) as f64).sqrt() * weights[alpha] * phase * h[alpha];
        phase = -phase;
    }

    (b * SQRT_PI, c * SQRT_PI)
}

fn i_pow(power: usize) -> Complex64 {
    match power % 4 {
        0 => Complex64::new(1.0, 0.0),
        1 => Complex64::new(0.0, 1.0),
        2 => Complex64::new(-1.0, 0.0),
        _ => Complex64::new(0.0, -1.0),
    }
}

/// Builds the `(nn + 1) x 4` translation array for a probe with azimuthal
/// orders `mu = +1` and `mu = -1`.
///
/// `muneg1` and `mu1` are `M x 2` arrays; row `i` holds probe degree `i + 1`,
/// column 0 the magnetic and column 1 the electric coefficient. Row `n` of the
/// result holds the four coupling sums for target degree `n`; row 0 is zero.
pub fn translate_mu_plus_minus_one_probe(
    nn: usize,
    muneg1: &DenseComplexMatrix,
    mu1: &DenseComplexMatrix,
    kr: f64,
    region: Region,
) -> Result<DenseComplexMatrix, TranslationError> {
    translate_mu_plus_minus_one_probe_with(&SphericalBessel, nn, muneg1, mu1, kr, region)
}

pub fn translate_mu_plus_minus_one_probe_with<R>(
    radial: &R,
    nn: usize,
    muneg1: &DenseComplexMatrix,
    mu1: &DenseComplexMatrix,
    kr: f64,
    region: Region,
) -> Result<DenseComplexMatrix, TranslationError>
where
    R: RadialFunctionApi + ?Sized,
{
    let negative = (muneg1.nrows(), muneg1.ncols());
    let positive = (mu1.nrows(), mu1.ncols());
    if negative != positive || positive.1 != 2 {
        return Err(TranslationError::ProbeShapeMismatch { negative, positive });
    }

    let probe_degrees = mu1.nrows();
    let mut translated = DenseComplexMatrix::zeros(nn + 1, TRANSLATION_COLUMNS);
    if nn == 0 || probe_degrees == 0 {
        return Ok(translated);
    }

    // One radial sequence long enough for the largest coupled degree.
    let h = region.radial_sequence(radial, kr, nn + probe_degrees + 1)?;

    let rows = (1..=nn)
        .into_par_iter()
        .map(|n| translation_row(n, muneg1, mu1, &h))
        .collect::<Result<Vec<_>, _>>()?;

    for (n, row) in (1..=nn).zip(rows) {
        for (column, value) in row.into_iter().enumerate() {
            translated[(n, column)] = value;
        }
    }

    debug!(
        nn,
        probe_degrees,
        kr,
        region = region.as_str(),
        "built probe translation array"
    );

    Ok(translated)
}

fn translation_row(
    n: usize,
    muneg1: &DenseComplexMatrix,
    mu1: &DenseComplexMatrix,
    h: &[Complex64],
) -> Result<[Complex64; TRANSLATION_COLUMNS], TranslationError> {
    let mut row = [ZERO; TRANSLATION_COLUMNS];

    for row_index in 0..mu1.nrows() {
        let m = row_index + 1;
        let weights = bc(m, n)?;
        let (b, c) = weighted_sums(m, n, &weights, h);

        let (pos_magnetic, pos_electric) = (mu1[(row_index, 0)], mu1[(row_index, 1)]);
        let (neg_magnetic, neg_electric) = (muneg1[(row_index, 0)], muneg1[(row_index, 1)]);

        row[0] += pos_magnetic * b + pos_electric * c;
        row[1] += -pos_magnetic * c - pos_electric * b;
        row[2] += neg_magnetic * b - neg_electric * c;
        row[3] += neg_magnetic * c - neg_electric * b;
    }

    Ok(row)
}
