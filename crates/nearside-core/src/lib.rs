//! Spherical near-field probe correction and mode translation.
//!
//! The crate turns a probe's spherical-wave coefficients into the translation
//! array `R`, uses `R` to remove (or simulate) the probe response on measured
//! vector coefficients, and applies the closed-form coefficient symmetries.

pub mod coefficients;
pub mod common;
pub mod correction;
pub mod domain;
pub mod numerics;
pub mod operations;
pub mod symmetry;
pub mod translation;

pub use coefficients::{CoefficientError, VectorCoefficients, VectorCoefs};
pub use common::config::CorrectionConfig;
pub use correction::{
    CorrectionError, make_forward_r_matrix, make_inverse_r_matrix, probe_correct,
    probe_correct_with_config, probe_response, probe_response_with_config,
    translate_symmetric_probe,
};
pub use domain::{NearsideError, NearsideErrorCategory, NearsideResult};
pub use operations::{Probe, wavenumber_radius};
pub use symmetry::{reciprocity, rotate_around_y_by_pi};
pub use translation::{
    Region, TranslationError, bc, bc_comp, translate_mu_plus_minus_one_probe,
};
