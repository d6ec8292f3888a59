//! Vector spherical-wave coefficient storage.
//!
//! Modes are addressed by degree `n` and order `m` with `|m| <= min(n, mmax)`.
//! Each mode carries two complex values, one per coefficient family: family 0
//! holds the magnetic (TE-like) coefficient and family 1 the electric (TM-like)
//! one. Storage is column-major by order: the order-0 column covers degrees
//! `0..=nmax` (the degree-0 slot is never populated by vector fields), followed
//! by the `-k` and `+k` columns for `k = 1..=mmax`, each covering `k..=nmax`.

use crate::numerics::DenseComplexMatrix;
use num_complex::Complex64;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoefficientError {
    #[error("coefficient bounds require mmax <= nmax, got nmax={nmax}, mmax={mmax}")]
    InvalidBounds { nmax: usize, mmax: usize },
    #[error("mode (n={degree}, m={order}) is outside nmax={nmax}, mmax={mmax}")]
    ModeOutOfRange {
        degree: usize,
        order: i32,
        nmax: usize,
        mmax: usize,
    },
    #[error("order {order} column is not stored (mmax={mmax})")]
    MissingOrder { order: i32, mmax: usize },
    #[error("coefficient sets differ in shape: {left:?} vs {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
}

/// Capability required by the probe-correction and symmetry kernels.
pub trait VectorCoefficients: Clone {
    fn nmax(&self) -> usize;

    fn mmax(&self) -> usize;

    /// Both family values of mode `(n, m)`.
    fn mode(&self, degree: usize, order: i32) -> Result<[Complex64; 2], CoefficientError>;

    fn set_mode(
        &mut self,
        degree: usize,
        order: i32,
        value: [Complex64; 2],
    ) -> Result<(), CoefficientError>;

    /// The order-`m` column as a `2 x (nmax - |m| + 1)` matrix; row 0 is family 0,
    /// column `i` is degree `|m| + i`.
    fn column(&self, order: i32) -> Result<DenseComplexMatrix, CoefficientError> {
        let start = order.unsigned_abs() as usize;
        if start > self.mmax() {
            return Err(CoefficientError::MissingOrder {
                order,
                mmax: self.mmax(),
            });
        }

        let len = self.nmax() + 1 - start;
        let mut column = DenseComplexMatrix::zeros(2, len);
        for index in 0..len {
            let [family0, family1] = self.mode(start + index, order)?;
            column[(0, index)] = family0;
            column[(1, index)] = family1;
        }
        Ok(column)
    }

    /// Largest order magnitude stored at `degree`.
    fn max_order_at(&self, degree: usize) -> usize {
        degree.min(self.mmax())
    }
}

/// Every stored `(n, m)` pair with `n >= first_degree`, degree-major.
pub fn mode_indices(
    first_degree: usize,
    nmax: usize,
    mmax: usize,
) -> impl Iterator<Item = (usize, i32)> {
    (first_degree..=nmax).flat_map(move |degree| {
        let limit = degree.min(mmax) as i32;
        (-limit..=limit).map(move |order| (degree, order))
    })
}

/// Dense owned coefficient set.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorCoefs {
    nmax: usize,
    mmax: usize,
    families: [Vec<Complex64>; 2],
}

impl VectorCoefs {
    pub fn zeros(nmax: usize, mmax: usize) -> Result<Self, CoefficientError> {
        if mmax > nmax {
            return Err(CoefficientError::InvalidBounds { nmax, mmax });
        }

        let len = storage_len(nmax, mmax);
        Ok(Self {
            nmax,
            mmax,
            families: [vec![ZERO; len], vec![ZERO; len]],
        })
    }

    /// Builds a set by evaluating `value` at every vector mode (`n >= 1`).
    pub fn from_fn<F>(nmax: usize, mmax: usize, mut value: F) -> Result<Self, CoefficientError>
    where
        F: FnMut(usize, i32) -> [Complex64; 2],
    {
        let mut coefficients = Self::zeros(nmax, mmax)?;
        for (degree, order) in mode_indices(1, nmax, mmax) {
            coefficients.set_mode(degree, order, value(degree, order))?;
        }
        Ok(coefficients)
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nmax, self.mmax)
    }

    /// Entrywise `self - other`.
    pub fn difference(&self, other: &Self) -> Result<Self, CoefficientError> {
        self.check_same_shape(other)?;

        let mut result = self.clone();
        for (family, other_family) in result.families.iter_mut().zip(&other.families) {
            for (value, other_value) in family.iter_mut().zip(other_family) {
                *value -= *other_value;
            }
        }
        Ok(result)
    }

    /// Largest complex magnitude across both families.
    pub fn linf_norm(&self) -> f64 {
        self.families
            .iter()
            .flatten()
            .map(|value| value.norm())
            .fold(0.0, f64::max)
    }

    pub fn linf_distance(&self, other: &Self) -> Result<f64, CoefficientError> {
        self.check_same_shape(other)?;

        Ok(self
            .families
            .iter()
            .zip(&other.families)
            .flat_map(|(left, right)| left.iter().zip(right))
            .map(|(left, right)| (left - right).norm())
            .fold(0.0, f64::max))
    }

    fn check_same_shape(&self, other: &Self) -> Result<(), CoefficientError> {
        if self.shape() != other.shape() {
            return Err(CoefficientError::ShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(())
    }

    fn slot(&self, degree: usize, order: i32) -> Result<usize, CoefficientError> {
        let magnitude = order.unsigned_abs() as usize;
        if degree > self.nmax || magnitude > self.mmax || magnitude > degree {
            return Err(CoefficientError::ModeOutOfRange {
                degree,
                order,
                nmax: self.nmax,
                mmax: self.mmax,
            });
        }

        Ok(column_offset(self.nmax, order) + degree - magnitude)
    }
}

impl VectorCoefficients for VectorCoefs {
    fn nmax(&self) -> usize {
        self.nmax
    }

    fn mmax(&self) -> usize {
        self.mmax
    }

    fn mode(&self, degree: usize, order: i32) -> Result<[Complex64; 2], CoefficientError> {
        let slot = self.slot(degree, order)?;
        Ok([self.families[0][slot], self.families[1][slot]])
    }

    fn set_mode(
        &mut self,
        degree: usize,
        order: i32,
        value: [Complex64; 2],
    ) -> Result<(), CoefficientError> {
        let slot = self.slot(degree, order)?;
        self.families[0][slot] = value[0];
        self.families[1][slot] = value[1];
        Ok(())
    }
}

fn storage_len(nmax: usize, mmax: usize) -> usize {
    (nmax + 1) * (2 * mmax + 1) - mmax * (mmax + 1)
}

/// Offset of the first (lowest degree) entry of the order-`m` column.
fn column_offset(nmax: usize, order: i32) -> usize {
    let k = order.unsigned_abs() as usize;
    if k == 0 {
        return 0;
    }

    let negative = (nmax + 1) * (2 * k - 1) - (k - 1) * k;
    if order < 0 {
        negative
    } else {
        negative + nmax + 1 - k
    }
}
