//! loglik_optimizer: MLE-friendly, argmin-powered log-likelihood optimizer.
//!
//! Purpose
//! -------
//! Provide a high-level, Argmin-backed optimization layer for **maximizing
//! log-likelihoods** `ℓ(θ)`. Callers implement a single trait,
//! [`LogLikelihood`], and invoke [`maximize`] to run a derivative-free
//! Nelder–Mead simplex search with configurable tolerances, iteration caps
//! and wall-clock budget.
//!
//! Key behaviors
//! -------------
//! - Convert user-supplied log-likelihoods `ℓ(θ)` into Argmin-compatible
//!   cost functions `c(θ) = -ℓ(θ)` via [`adapter::ArgMinAdapter`].
//! - Expose a single, user-facing entrypoint [`maximize`] that:
//!   - validates the initial guess with [`LogLikelihood::check`],
//!   - builds the initial simplex via [`builders`],
//!   - executes the solver via [`run::run_nelder_mead`], and
//!   - normalizes results into an [`OptimOutcome`].
//! - Centralize optimizer configuration ([`Tolerances`], [`MLEOptions`]) and
//!   validation logic ([`validation`]) so downstream code can assume sane,
//!   finite inputs.
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer **always maximizes** a log-likelihood `ℓ(θ)` by minimizing
//!   a cost `c(θ) = -ℓ(θ)`; user code implements `ℓ(θ)`, **never** the cost.
//! - [`LogLikelihood::value`] must treat invalid inputs as recoverable
//!   [`OptError`](crate::optimization::errors::OptError) values, not panics.
//! - A non-finite `ℓ(θ)` aborts the run with `NonFiniteCost`; models that
//!   want the search to continue must map bad regions to a finite sentinel.
//! - Hitting `max_iter` or the timeout is **not** an error: the best vertex
//!   is returned with `converged = false`.
//!
//! Conventions
//! -----------
//! - Parameters live in the model's natural space as [`Theta`]
//!   (`Array1<f64>`); the simplex search is unconstrained.
//! - All user-facing diagnostics (including [`OptimOutcome::value`]) are
//!   expressed in terms of the log-likelihood `ℓ`.
//!
//! Downstream usage
//! ----------------
//! - Model crates implement [`LogLikelihood`] for their types, then call
//!   [`maximize`] with a model instance, an initial parameter vector, a data
//!   payload and an [`MLEOptions`] configuration.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover the sign convention in [`adapter`],
//!   simplex geometry in [`builders`], configuration invariants in
//!   [`traits`], and end-to-end toy maximizations in [`api`].
//! - Integration tests exercise [`maximize`] implicitly by fitting
//!   NB-INGARCH models on simulated counts.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, FnEvalMap, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use ingarch_forecast::optimization::loglik_optimizer::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Theta};
}
