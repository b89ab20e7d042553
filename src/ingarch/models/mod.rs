//! models: NB-INGARCH estimation, the AR(1) fallback, and fitted models.
//!
//! Purpose
//! -------
//! Turn a validated series into a [`FittedModel`]. This layer sits on top of
//! `ingarch::core`, wiring the likelihood into the generic Nelder–Mead
//! optimizer and deciding when the closed-form fallback takes over.
//!
//! Key behaviors
//! -------------
//! - [`IngarchModel`] implements [`LogLikelihood`] and fits by maximum
//!   likelihood, falling back to [`FallbackFit`] on optimizer failure or
//!   very short series.
//! - [`fit_guarded`] adds the in-sample degeneracy check.
//! - [`FittedModel`] is the single prediction surface for both estimators;
//!   [`ModelArtifact`] is its serializable form.
//!
//! Invariants & assumptions
//! ------------------------
//! - `IngarchModel` owns `RefCell` scratch buffers and is not `Sync`; build
//!   one per fit (per thread). `FittedModel` holds no interior mutability.
//!
//! [`LogLikelihood`]: crate::optimization::loglik_optimizer::LogLikelihood

pub mod fallback;
pub mod fitted;
pub mod ingarch;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::fallback::{FallbackFit, FallbackReason};
pub use self::fitted::{EstimatorKind, FittedModel, IngarchFit, ModelArtifact};
pub use self::ingarch::{IngarchModel, MIN_MLE_OBSERVATIONS, fit_guarded};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use ingarch_forecast::ingarch::models::prelude::*;
//
// to import the main model surface in a single line.

pub mod prelude {
    pub use super::fallback::FallbackReason;
    pub use super::fitted::{EstimatorKind, FittedModel, ModelArtifact};
    pub use super::ingarch::{IngarchModel, fit_guarded};
}
