pub mod bessel;
pub mod wigner;

pub use bessel::{
    RadialFunctionApi, RadialFunctionError, SphericalBessel, spherical_h1_sequence,
    spherical_j_sequence, spherical_y_sequence,
};
pub use wigner::{Wigner3jError, wigner3j_mzero_squared};

use faer::Mat;
use num_complex::Complex64;

pub type DenseComplexMatrix = Mat<Complex64>;
