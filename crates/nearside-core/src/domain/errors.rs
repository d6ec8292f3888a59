use crate::coefficients::CoefficientError;
use crate::correction::CorrectionError;
use crate::numerics::special::{RadialFunctionError, Wigner3jError};
use crate::operations::OperationError;
use crate::translation::TranslationError;
use std::fmt::{Display, Formatter};

pub type NearsideResult<T> = Result<T, NearsideError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NearsideErrorCategory {
    InputValidationError,
    ComputationError,
}

impl NearsideErrorCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputValidationError => "InputValidationError",
            Self::ComputationError => "ComputationError",
        }
    }
}

impl Display for NearsideErrorCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NearsideError {
    #[error(transparent)]
    Wigner3j(#[from] Wigner3jError),
    #[error(transparent)]
    RadialFunction(#[from] RadialFunctionError),
    #[error(transparent)]
    Translation(#[from] TranslationError),
    #[error(transparent)]
    Correction(#[from] CorrectionError),
    #[error(transparent)]
    Coefficient(#[from] CoefficientError),
    #[error(transparent)]
    Operation(#[from] OperationError),
}

impl NearsideError {
    pub fn category(&self) -> NearsideErrorCategory {
        match self {
            Self::Wigner3j(_) => NearsideErrorCategory::ComputationError,
            Self::RadialFunction(error) => error.category(),
            Self::Translation(error) => error.category(),
            Self::Correction(error) => error.category(),
            Self::Coefficient(_) | Self::Operation(_) => {
                NearsideErrorCategory::InputValidationError
            }
        }
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.category(), self)
    }
}
