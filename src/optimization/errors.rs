//! Errors for the log-likelihood optimizer (configuration, cost evaluation,
//! solver outcome, and Argmin backend failures).
//!
//! Model layers implement [`LogLikelihood`](crate::optimization::loglik_optimizer::LogLikelihood)
//! and report their own failures through [`OptError::ModelError`] or through
//! the parameter-shape variants below; the INGARCH layer converts back into
//! its own error type at the `fit` boundary.
use argmin::core::{ArgminError, Error};

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- MLEOptions ----
    /// Simplex standard-deviation tolerance needs to be positive and finite.
    InvalidSdTolerance {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// At least one stopping rule must be provided.
    NoTolerancesProvided,

    /// Relative simplex step must be positive and finite.
    InvalidSimplexStep {
        value: f64,
        reason: &'static str,
    },

    /// Wall-clock timeout must be non-zero.
    InvalidTimeout,

    // ---- Cost function ----
    /// Cost function returned a non-finite value.
    NonFiniteCost {
        value: f64,
    },

    // ---- Optimizer outcome ----
    /// Estimated parameters must be finite.
    InvalidThetaHat {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Theta hat is missing
    MissingThetaHat,

    /// Initial simplex needs at least one coordinate.
    EmptyTheta,

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- Model errors ----
    /// Theta length does not match the model's parameter layout.
    ThetaLengthMismatch {
        expected: usize,
        actual: usize,
    },

    /// Optimizer input must have finite values.
    InvalidThetaInput {
        index: usize,
        value: f64,
    },

    /// Any other model-side failure raised inside `value`/`check`.
    ModelError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- MLEOptions ----
            OptError::InvalidSdTolerance { tol, reason } => {
                write!(f, "Invalid simplex standard-deviation tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::NoTolerancesProvided => {
                write!(f, "No tolerances provided")
            }
            OptError::InvalidSimplexStep { value, reason } => {
                write!(f, "Invalid simplex step {value}: {reason}")
            }
            OptError::InvalidTimeout => {
                write!(f, "Invalid optimizer timeout: must be greater than zero")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }

            // ---- Optimizer outcome ----
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Invalid estimated parameter at index {index}: {value}: {reason}")
            }
            OptError::MissingThetaHat => {
                write!(f, "Missing estimated parameters (theta hat)")
            }
            OptError::EmptyTheta => {
                write!(f, "Initial parameter vector is empty")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Model errors ----
            OptError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            OptError::InvalidThetaInput { index, value } => {
                write!(f, "Invalid theta input at index {index}: {value}, must be finite")
            }
            OptError::ModelError { text } => {
                write!(f, "Model error: {text}")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        // Errors raised by our own cost function travel through argmin boxed
        // as `OptError`; unwrap those first so callers see the original.
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(opt_err) => match opt_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Scope -------------------------------------------------------------
    // These tests cover:
    // - Round-tripping our own `OptError` through `argmin::core::Error`.
    // - Mapping of `ArgminError` variants into wrapper variants.
    // - `Display` text for a representative variant.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure an `OptError` boxed into an argmin `Error` (as happens when the
    // cost function fails mid-run) comes back out unchanged.
    //
    // Given
    // -----
    // - `OptError::ThetaLengthMismatch { expected: 4, actual: 3 }` converted
    //   `into()` an `argmin::core::Error`.
    //
    // Expect
    // ------
    // - `OptError::from(err)` equals the original variant.
    fn from_argmin_error_recovers_boxed_opt_error() {
        // Arrange
        let original = OptError::ThetaLengthMismatch { expected: 4, actual: 3 };
        let boxed: Error = original.clone().into();

        // Act
        let recovered = OptError::from(boxed);

        // Assert
        assert_eq!(recovered, original);
    }

    #[test]
    // Purpose
    // -------
    // Verify that argmin's own error kinds map onto the wrapper variants.
    //
    // Given
    // -----
    // - `ArgminError::InvalidParameter` with a message.
    //
    // Expect
    // ------
    // - `OptError::InvalidParameter` with the same text.
    fn from_argmin_error_maps_invalid_parameter() {
        // Arrange
        let err: Error = ArgminError::InvalidParameter { text: "bad tol".to_string() }.into();

        // Act
        let mapped = OptError::from(err);

        // Assert
        assert_eq!(mapped, OptError::InvalidParameter { text: "bad tol".to_string() });
    }

    #[test]
    // Purpose
    // -------
    // Check the human-readable message of a model error.
    //
    // Given
    // -----
    // - `OptError::ModelError { text: "boom" }`.
    //
    // Expect
    // ------
    // - Display renders `"Model error: boom"`.
    fn display_renders_model_error_text() {
        let err = OptError::ModelError { text: "boom".to_string() };
        assert_eq!(err.to_string(), "Model error: boom");
    }
}
