//! core: shared NB-INGARCH(p, q) data, parameters, and μ/φ recursions.
//!
//! Purpose
//! -------
//! Collect the numerical building blocks for Negative-Binomial INGARCH
//! count models: validated data containers, the parameter layout, floors,
//! the NB log-pmf, in-sample μ/φ recursions, out-of-sample forecasting,
//! start-value policies, fit options and progress hooks. The estimators in
//! `ingarch::models` are thin layers on top of these pieces.
//!
//! Key behaviors
//! -------------
//! - Hold counts and covariates in [`ObservationSeries`] / [`ExogenousMatrix`]
//!   with their invariants checked once at construction.
//! - Describe the model order and flat θ layout with [`ModelSpec`], and the
//!   named blocks with [`IngarchParams`].
//! - Evaluate the likelihood through [`log_likelihood`], reusing
//!   [`IngarchScratch`] buffers across optimizer evaluations.
//! - Produce point forecasts with [`forecast_recursion`] (multi-step) and
//!   [`one_step_ahead`] (in-sample).
//!
//! Invariants & assumptions
//! ------------------------
//! - Every realized μ_t and φ_t passes through [`Floors`]; the likelihood
//!   never sees a non-positive mean or dispersion.
//! - `nb_log_pmf` never fails: invalid inputs map to a large negative
//!   sentinel so the optimizer steers away from them.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based, oldest observation first.
//! - The first `max(p, q)` observations are burn-in and are excluded from
//!   the likelihood and from in-sample scoring.
//! - This module logs only when it sanitizes input (non-finite covariates).

pub mod data;
pub mod forecasts;
pub mod guards;
pub mod init;
pub mod likelihood;
pub mod options;
pub mod params;
pub mod progress;
pub mod recursion;
pub mod shape;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::{ExogenousMatrix, FitData, ObservationSeries, check_exog};
pub use self::forecasts::{forecast_recursion, one_step_ahead};
pub use self::guards::Floors;
pub use self::init::{Init, heuristic_theta};
pub use self::likelihood::nb_log_pmf;
pub use self::options::{DEFAULT_DEGENERATE_SMAPE_PCT, FitOptions};
pub use self::params::{IngarchParams, IngarchScratch, validate_theta};
pub use self::progress::{FitStage, FitState, NoProgress, ProgressEvent, ProgressSink};
pub use self::recursion::{conditional_dispersion, conditional_mean, forward_pass, log_likelihood};
pub use self::shape::ModelSpec;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use ingarch_forecast::ingarch::core::prelude::*;
//
// to import the main INGARCH core surface in a single line.

pub mod prelude {
    pub use super::data::{ExogenousMatrix, ObservationSeries};
    pub use super::forecasts::forecast_recursion;
    pub use super::guards::Floors;
    pub use super::init::Init;
    pub use super::options::FitOptions;
    pub use super::params::IngarchParams;
    pub use super::progress::{NoProgress, ProgressEvent, ProgressSink};
    pub use super::shape::ModelSpec;
}
