//! Runtime knobs for probe correction.

use super::constants::DEFAULT_DEGENERACY_TOLERANCE;
use crate::correction::CorrectionError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CorrectionConfig {
    /// A mode is degenerate when `|det| <= degeneracy_tolerance * max(|R0*R3|, |R1*R2|)`.
    pub degeneracy_tolerance: f64,
}

impl CorrectionConfig {
    pub fn new(degeneracy_tolerance: f64) -> Result<Self, CorrectionError> {
        let config = Self {
            degeneracy_tolerance,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CorrectionError> {
        if !self.degeneracy_tolerance.is_finite() || self.degeneracy_tolerance < 0.0 {
            return Err(CorrectionError::InvalidTolerance {
                tolerance: self.degeneracy_tolerance,
            });
        }

        Ok(())
    }
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            degeneracy_tolerance: DEFAULT_DEGENERACY_TOLERANCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CorrectionConfig;
    use crate::common::constants::DEFAULT_DEGENERACY_TOLERANCE;
    use crate::correction::CorrectionError;

    #[test]
    fn default_uses_shared_tolerance() {
        let config = CorrectionConfig::default();
        assert_eq!(config.degeneracy_tolerance, DEFAULT_DEGENERACY_TOLERANCE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_negative_and_non_finite_tolerances() {
        for tolerance in [-1.0e-12, f64::NAN, f64::INFINITY] {
            let error = CorrectionConfig::new(tolerance).expect_err("tolerance should be rejected");
            assert!(matches!(error, CorrectionError::InvalidTolerance { .. }));
        }
    }

    #[test]
    fn deserializes_camel_case_and_fills_defaults() {
        let config: CorrectionConfig =
            serde_json::from_str(r#"{"degeneracyTolerance": 1.0e-9}"#).expect("valid config");
        assert_eq!(config.degeneracy_tolerance, 1.0e-9);

        let defaulted: CorrectionConfig = serde_json::from_str("{}").expect("empty config");
        assert_eq!(defaulted, CorrectionConfig::default());
    }
}
