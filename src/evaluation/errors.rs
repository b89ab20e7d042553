//! Errors for model evaluation (metrics configuration, backtests, quality
//! gate, and the training pipeline).
//!
//! ## Conventions
//! - Percentages are expressed in percent (`8.0` means 8 %).
//! - Model-layer failures are wrapped as [`EvalError::Model`] so callers of
//!   the pipeline see a single error type.
use crate::ingarch::errors::IngarchError;

/// Result alias for evaluation operations.
pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Strict quality gate: the model's sMAPE lift over the baseline is below
    /// the threshold.
    QualityGateFailure { lift_pct: f64, threshold_pct: f64 },

    /// Gate threshold must be finite.
    InvalidThreshold { value: f64 },

    /// MASE seasonal period must be at least 1.
    InvalidSeasonalPeriod { period: usize },

    /// Moving-average window must be at least 1.
    InvalidWindow { window: usize },

    /// Error raised by the model layer (validation, artifacts, ...).
    Model(IngarchError),
}

impl std::error::Error for EvalError {}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::QualityGateFailure { lift_pct, threshold_pct } => write!(
                f,
                "Quality gate failed: sMAPE lift {lift_pct:.2}% is below the required {threshold_pct:.2}%"
            ),
            EvalError::InvalidThreshold { value } => {
                write!(f, "Quality gate threshold must be finite; got {value}")
            }
            EvalError::InvalidSeasonalPeriod { period } => {
                write!(f, "Seasonal period must be >= 1; got {period}")
            }
            EvalError::InvalidWindow { window } => {
                write!(f, "Moving-average window must be >= 1; got {window}")
            }
            EvalError::Model(err) => write!(f, "{err}"),
        }
    }
}

impl From<IngarchError> for EvalError {
    fn from(err: IngarchError) -> Self {
        EvalError::Model(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Model errors convert into `EvalError::Model` and keep their message.
    //
    // Given
    // -----
    // - `IngarchError::EmptySeries`.
    //
    // Expect
    // ------
    // - `EvalError::Model(EmptySeries)` displaying the original text.
    fn model_errors_wrap_transparently() {
        let err = EvalError::from(IngarchError::EmptySeries);

        assert_eq!(err, EvalError::Model(IngarchError::EmptySeries));
        assert_eq!(err.to_string(), IngarchError::EmptySeries.to_string());
    }
}
