//! numerical_stability: floors, clip ranges and sentinels for count likelihoods.
//!
//! Purpose
//! -------
//! Centralize the small numerical guards used by the NB-INGARCH recursion,
//! likelihood and fallback estimator so every layer clamps the same
//! quantities the same way.
//!
//! Key behaviors
//! -------------
//! - Export default floors for the conditional mean and dispersion.
//! - Export clip ranges for the Negative-Binomial `(r, prob)` pair and the
//!   finite log-likelihood sentinel used in place of `ln 0`.
//! - Provide NaN-aware scalar helpers (`clip`, `floor_at`, `safe_ratio`).
//!
//! Conventions
//! -----------
//! - Helpers are pure and allocation-free; they never log or touch global
//!   state and are safe inside tight inner loops.
//! - A `NaN` input collapses onto the bound (`f64::max`/`f64::min`
//!   semantics) instead of leaking into the recursion.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] cover NaN handling and bound
//!   behavior; recursion-level floor guarantees are property-tested in the
//!   INGARCH core.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    BURN_IN_DISPERSION, DISPERSION_FLOOR, DIVISION_EPS, LOGLIK_SENTINEL, MEAN_FLOOR, PROB_BOUNDS,
    R_BOUNDS, clip, floor_at, safe_ratio,
};

pub mod prelude {
    pub use super::transformations::{
        DISPERSION_FLOOR, LOGLIK_SENTINEL, MEAN_FLOOR, clip, floor_at, safe_ratio,
    };
}
