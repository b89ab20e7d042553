//! loglik_optimizer::types: shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the core numeric types and solver aliases used by the
//! log-likelihood optimizer. By defining these in one place, the rest of
//! the optimization code can stay agnostic to `ndarray` and Argmin
//! generics.
//!
//! Key behaviors
//! -------------
//! - Define canonical aliases for parameter vectors and scalar costs
//!   (`Theta`, `Cost`).
//! - Provide a standard map type for Argmin function-evaluation counters
//!   (`FnEvalMap`).
//! - Expose the pre-wired Nelder–Mead solver alias and the matching
//!   Argmin iteration-state alias.
//!
//! Invariants & assumptions
//! ------------------------
//! - All optimizer vectors are represented as `ndarray` containers over
//!   `f64`.
//! - Nelder–Mead is derivative-free, so the gradient, Jacobian, Hessian
//!   and residual slots of the iteration state are unit types.
//!
//! Testing notes
//! -------------
//! - This module only defines type aliases and constants; correctness is
//!   exercised indirectly by tests in the surrounding optimizer modules.
use argmin::{core::IterState, solver::neldermead::NelderMead};
use ndarray::Array1;
use std::collections::HashMap;

/// Parameter vector `θ` for log-likelihood optimization.
///
/// Alias for `ndarray::Array1<f64>`, used as the canonical parameter type
/// throughout the optimizer.
pub type Theta = Array1<f64>;

/// Scalar objective value used by the optimizer.
///
/// In this crate, this is the cost `c(θ) = -ℓ(θ)` derived from a
/// log-likelihood `ℓ(θ)`.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps human-readable counter names (e.g., `"cost_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Nelder–Mead simplex solver specialized to this crate's numeric types.
pub type NelderMeadSolver = NelderMead<Theta, Cost>;

/// Argmin iteration state for derivative-free solvers over [`Theta`].
pub type SimplexState = IterState<Theta, (), (), (), (), Cost>;

/// Relative perturbation applied to each non-zero coordinate of `θ₀` when
/// building the initial simplex.
pub const DEFAULT_SIMPLEX_STEP: f64 = 0.05;

/// Absolute offset used for coordinates of `θ₀` that are exactly zero.
pub const DEFAULT_ZERO_STEP: f64 = 0.00025;
