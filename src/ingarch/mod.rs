//! ingarch: Negative-Binomial INGARCH(p, q) count models.
//!
//! Purpose
//! -------
//! Model daily, non-negative, overdispersed counts with
//!
//! ```text
//! μ_t = max(β₀ + Σ β_i·y_{t−i} + γ·x_t, mean_floor)
//! φ_t = max(α₀ + Σ α_i·(y_{t−i} − μ_{t−i})² / μ_{t−i}, dispersion_floor)
//! y_t | past ~ NB(mean μ_t, dispersion φ_t),  Var = μ_t + φ_t·μ_t²
//! ```
//!
//! estimated by maximum likelihood, with a closed-form AR(1) estimator as a
//! safety net.
//!
//! Key behaviors
//! -------------
//! - [`core`] holds data containers, the parameter layout, floors, the NB
//!   log-pmf, recursions, forecasting, options and progress hooks.
//! - [`models`] holds the estimators and the [`FittedModel`] they produce.
//! - [`errors`] centralizes [`IngarchError`] and [`IngarchResult`].
//!
//! Conventions
//! -----------
//! - Estimation is synchronous and single-threaded per call; callers that
//!   want parallelism (e.g. backtest folds) build one model per task.
//! - Decisions that change the returned estimator (fallbacks, non-converged
//!   fits) are logged with `tracing` at `warn` level.
//!
//! Downstream usage
//! ----------------
//! 1. Build an [`ObservationSeries`] (and optionally an [`ExogenousMatrix`]).
//! 2. Choose a [`ModelSpec`] and [`FitOptions`].
//! 3. Call [`fit_guarded`] (or [`IngarchModel::fit`]) to get a
//!    [`FittedModel`], then `forecast(history, exog, horizon)`.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    ExogenousMatrix, FitOptions, Floors, IngarchParams, Init, ModelSpec, ObservationSeries,
    ProgressEvent, ProgressSink,
};
pub use self::errors::{IngarchError, IngarchResult};
pub use self::models::{
    EstimatorKind, FallbackFit, FallbackReason, FittedModel, IngarchModel, ModelArtifact,
    fit_guarded,
};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::{
        EstimatorKind, ExogenousMatrix, FallbackReason, FitOptions, FittedModel, Floors,
        IngarchError, IngarchModel, IngarchResult, Init, ModelArtifact, ModelSpec,
        ObservationSeries, fit_guarded,
    };
}
