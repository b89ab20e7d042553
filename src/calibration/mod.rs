//! calibration: conformal prediction bands around point forecasts.
//!
//! Purpose
//! -------
//! Convert out-of-sample residuals into additive forecast bands with a
//! target empirical coverage, and report how well each fold is covered.
//!
//! Key behaviors
//! -------------
//! - [`ConformalCalibrator::calibrate`] pools residuals by fold, seeds the
//!   band at empirical quantiles, then widens or narrows it until coverage
//!   is inside the target band (or the edges run out).
//! - [`CalibrationResult::apply`] and
//!   [`CalibrationResult::calibrated_points`] place the band around median
//!   forecasts.
//!
//! Downstream usage
//! ----------------
//! Feed `BacktestReport::residuals` straight into the calibrator.

pub mod conformal;
pub mod errors;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::conformal::{
    CalibrationOptions, CalibrationResult, ConformalCalibrator, DEFAULT_COVERAGE_BAND,
    FoldCoverage, ForecastPoint, coverage_ratio,
};
pub use self::errors::{CalResult, CalibrationError};

pub mod prelude {
    pub use super::{
        CalibrationError, CalibrationOptions, CalibrationResult, ConformalCalibrator,
        ForecastPoint,
    };
}
