//! Errors for conformal calibration.
//!
//! Coverage outside the target band is not an error: it is logged and
//! reported per fold. Only invalid configuration and unusable inputs fail.

/// Result alias for calibration operations.
pub type CalResult<T> = Result<T, CalibrationError>;

#[derive(Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// Seed quantiles must satisfy `0 < lower < upper < 1`.
    InvalidQuantiles { lower: f64, upper: f64 },

    /// Coverage band must satisfy `0 < low < high ≤ 1`.
    InvalidCoverageBand { low: f64, high: f64 },

    /// No folds were supplied.
    NoFolds,

    /// Every fold is empty (after dropping non-finite residuals).
    EmptyResiduals,

    /// Dates and medians differ in length.
    LengthMismatch { dates: usize, medians: usize },
}

impl std::error::Error for CalibrationError {}

impl std::fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalibrationError::InvalidQuantiles { lower, upper } => write!(
                f,
                "Seed quantiles must satisfy 0 < lower < upper < 1; got lower = {lower}, upper = {upper}"
            ),
            CalibrationError::InvalidCoverageBand { low, high } => write!(
                f,
                "Coverage band must satisfy 0 < low < high <= 1; got [{low}, {high}]"
            ),
            CalibrationError::NoFolds => write!(f, "No residual folds provided for calibration"),
            CalibrationError::EmptyResiduals => {
                write!(f, "All residual folds are empty; cannot calibrate")
            }
            CalibrationError::LengthMismatch { dates, medians } => {
                write!(f, "Got {dates} dates but {medians} median forecasts")
            }
        }
    }
}
