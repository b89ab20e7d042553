//! Errors for NB-INGARCH count models (input validation, options checks,
//! parameter layout, artifacts, and optimizer failures).
//!
//! ## Conventions
//! - **Indices are 0-based**.
//! - Counts must be **finite and non-negative**; timestamps strictly increasing.
//! - Optimizer/backend errors are normalized to
//!   [`IngarchError::OptimizationFailed`] with a human-readable status. They
//!   rarely reach callers: a failed MLE run falls back to the AR(1)
//!   estimator instead.
use crate::optimization::errors::OptError;

/// Crate-wide result alias for INGARCH operations that may produce [`IngarchError`].
pub type IngarchResult<T> = Result<T, IngarchError>;

/// Unified error type for NB-INGARCH modeling.
#[derive(Debug, Clone, PartialEq)]
pub enum IngarchError {
    // ---- Input/data validation ----
    /// Series is empty.
    EmptySeries,

    /// Timestamps and counts differ in length.
    LengthMismatch { timestamps: usize, counts: usize },

    /// A count is NaN/±inf.
    NonFiniteCount { index: usize, value: f64 },

    /// A count is < 0.
    NegativeCount { index: usize, value: f64 },

    /// Timestamp at `index` is not strictly after its predecessor.
    NonIncreasingTimestamps { index: usize },

    /// Exogenous matrix has the wrong number of rows.
    ExogRowMismatch { expected: usize, actual: usize },

    /// Exogenous matrix has the wrong number of columns.
    ExogColumnMismatch { expected: usize, actual: usize },

    /// Exogenous column names differ from the ones used at training time.
    ExogColumnNames { expected: Vec<String>, actual: Vec<String> },

    /// Forecast horizon must be at least one step.
    InvalidHorizon { horizon: usize },

    // ---- Options validation ----
    /// Floors must be finite and > 0.
    InvalidFloors { mean_floor: f64, dispersion_floor: f64, reason: &'static str },

    /// Degeneracy threshold (in-sample sMAPE, percent) must be finite and > 0.
    InvalidDegenerateThreshold { value: f64 },

    // ---- Parameter layout ----
    /// Theta length does not match `1 + p + n_exog + 1 + q`.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Theta entries must be finite.
    InvalidThetaInput { index: usize, value: f64 },

    // ---- Artifacts ----
    /// A serialized model artifact is internally inconsistent.
    InvalidArtifact { reason: String },

    // ---- Estimation / optimizer ----
    /// Optimizer failed; include a human-readable status/reason.
    OptimizationFailed { status: String },

    /// ---- Fallback ----
    UnknownError,
}

impl std::error::Error for IngarchError {}

impl std::fmt::Display for IngarchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            IngarchError::EmptySeries => {
                write!(f, "Input series is empty.")
            }
            IngarchError::LengthMismatch { timestamps, counts } => {
                write!(f, "Got {timestamps} timestamps but {counts} counts.")
            }
            IngarchError::NonFiniteCount { index, value } => {
                write!(f, "Count at index {index} is non-finite: {value}")
            }
            IngarchError::NegativeCount { index, value } => {
                write!(f, "Count at index {index} is negative: {value}")
            }
            IngarchError::NonIncreasingTimestamps { index } => {
                write!(f, "Timestamp at index {index} is not after the previous one.")
            }
            IngarchError::ExogRowMismatch { expected, actual } => {
                write!(f, "Exogenous matrix must have {expected} rows; got {actual}")
            }
            IngarchError::ExogColumnMismatch { expected, actual } => {
                write!(f, "Exogenous matrix must have {expected} columns; got {actual}")
            }
            IngarchError::ExogColumnNames { expected, actual } => {
                write!(f, "Exogenous columns {actual:?} do not match training columns {expected:?}")
            }
            IngarchError::InvalidHorizon { horizon } => {
                write!(f, "Forecast horizon must be >= 1; got {horizon}")
            }

            // ---- Options validation ----
            IngarchError::InvalidFloors { mean_floor, dispersion_floor, reason } => {
                write!(
                    f,
                    "Floors must be finite and > 0; got mean {mean_floor}, dispersion {dispersion_floor}. {reason}"
                )
            }
            IngarchError::InvalidDegenerateThreshold { value } => {
                write!(f, "Degeneracy sMAPE threshold must be finite and > 0; got: {value}")
            }

            // ---- Parameter layout ----
            IngarchError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            IngarchError::InvalidThetaInput { index, value } => {
                write!(f, "Invalid theta input at index {index}: {value}, must be finite")
            }

            // ---- Artifacts ----
            IngarchError::InvalidArtifact { reason } => {
                write!(f, "Invalid model artifact: {reason}")
            }

            // ---- Estimation / optimizer ----
            IngarchError::OptimizationFailed { status } => {
                write!(f, "Optimizer failed with status: {status}")
            }
            IngarchError::UnknownError => {
                write!(f, "An unknown error occurred in the INGARCH model.")
            }
        }
    }
}

impl From<OptError> for IngarchError {
    fn from(err: OptError) -> Self {
        match err {
            OptError::ThetaLengthMismatch { expected, actual } => {
                IngarchError::ThetaLengthMismatch { expected, actual }
            }
            OptError::InvalidThetaInput { index, value } => {
                IngarchError::InvalidThetaInput { index, value }
            }
            other => IngarchError::OptimizationFailed { status: other.to_string() },
        }
    }
}

impl From<IngarchError> for OptError {
    fn from(err: IngarchError) -> Self {
        match err {
            IngarchError::ThetaLengthMismatch { expected, actual } => {
                OptError::ThetaLengthMismatch { expected, actual }
            }
            IngarchError::InvalidThetaInput { index, value } => {
                OptError::InvalidThetaInput { index, value }
            }
            other => OptError::ModelError { text: other.to_string() },
        }
    }
}
