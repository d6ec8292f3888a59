//! Physical and numeric constants shared by the translation and correction
//! kernels.

pub const PI: f64 = std::f64::consts::PI;
pub const PI2: f64 = 2.0 * PI;
pub const FOUR_PI: f64 = 4.0 * PI;
pub const SQRT_PI: f64 = 1.772_453_850_905_516_027_298_167_483_341_145_2_f64;

/// Speed of light in vacuum, m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Relative determinant magnitude below which a 2x2 correction matrix is
/// treated as singular.
pub const DEFAULT_DEGENERACY_TOLERANCE: f64 = 1.0e-13;
