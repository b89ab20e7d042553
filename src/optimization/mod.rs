//! optimization: MLE stack, numerical guards, and unified error surface.
//!
//! Purpose
//! -------
//! Provide a cohesive optimization layer for model fitting, combining an
//! Argmin-backed log-likelihood optimizer, shared numerical guards, and a
//! single error/result surface. Callers implement a log-likelihood, choose
//! tolerances, and obtain fitted parameters and diagnostics without touching
//! backend solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **maximizing log-likelihoods** `ℓ(θ)`
//!   (`loglik_optimizer`) using a derivative-free Nelder–Mead simplex.
//! - Supply shared numerical constants and helpers (`numerical_stability`)
//!   for floors, clip ranges and sentinels.
//! - Normalize configuration issues, numerical failures, and backend solver
//!   errors into a single enum (`errors::OptError`) with a common result
//!   alias (`OptResult<T>`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Invalid configurations and model failures are reported as `OptError`,
//!   never as panics.
//! - Reaching an iteration cap is a normal outcome flagged through
//!   `OptimOutcome::converged`, not an error.
//!
//! Conventions
//! -----------
//! - All solvers conceptually maximize a log-likelihood `ℓ(θ)` by minimizing
//!   an internal cost `c(θ) = -ℓ(θ)`; user-facing APIs and outcomes are
//!   expressed in terms of `ℓ`.
//! - This module and its submodules avoid I/O and logging (apart from the
//!   opt-in `obs_slog` observer); higher layers report progress and
//!   diagnostics through `tracing`.
//!
//! Downstream usage
//! ----------------
//! - Model code implements `LogLikelihood` and calls `maximize` with a
//!   parameter guess, data payload, and `MLEOptions` to obtain an
//!   `OptimOutcome`.
//! - Front-ends can import the curated surface via
//!   `optimization::prelude::*`.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use ingarch_forecast::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
