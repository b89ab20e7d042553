//! Public API surface for log-likelihood maximization.
//!
//! - [`LogLikelihood`]: trait users implement for their model.
//! - [`MLEOptions`] and [`Tolerances`]: configuration for the optimizer.
//! - [`OptimOutcome`]: normalized result returned by the high-level `maximize` API.
//!
//! Convention: we *maximize* a user log-likelihood `ℓ(θ)` by minimizing the cost
//! `c(θ) = -ℓ(θ)` with a derivative-free Nelder–Mead simplex, so models only
//! need to evaluate `ℓ(θ)`.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Cost, FnEvalMap, Theta,
        types::{DEFAULT_SIMPLEX_STEP, DEFAULT_ZERO_STEP},
        validation::{validate_theta_hat, validate_value, verify_sd_tolerance, verify_simplex_step},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use std::time::Duration;

/// User-implemented log-likelihood interface.
///
/// You maximize `ℓ(θ)`; internally we minimize the cost `c(θ) = -ℓ(θ)`.
///
/// - `type Data`: per-model data carried into `value`/`check`.
///
/// Required:
/// - `value(&Theta, &Data) -> OptResult<Cost>`: evaluate `ℓ(θ)`.
///   - Errors: return a descriptive `OptError` for invalid inputs or model failures.
/// - `check(&Theta, &Data) -> OptResult<()>`: validation hook to reject
///   obviously invalid `θ`/`data` pairs. Called once before optimization.
pub trait LogLikelihood {
    type Data;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `tols: Tolerances`: simplex tolerance and iteration limit.
/// - `simplex_step: f64`: relative perturbation of each non-zero coordinate of
///   `θ₀` used to build the initial simplex.
/// - `zero_step: f64`: absolute offset for coordinates of `θ₀` equal to zero.
/// - `timeout: Option<Duration>`: wall-clock budget for a single run.
/// - `verbose: bool`: if `true`, attaches an observer (behind the `obs_slog`
///   feature) and prints progress.
///
/// Default:
/// - `tols`: `sd_tol = 1e-6`, `max_iter = 600`
/// - `simplex_step = 0.05`, `zero_step = 0.00025`
/// - `timeout = None`, `verbose = false`
#[derive(Debug, Clone, PartialEq)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub simplex_step: f64,
    pub zero_step: f64,
    pub timeout: Option<Duration>,
    pub verbose: bool,
}

impl MLEOptions {
    /// Create a new set of optimizer options.
    ///
    /// # Errors
    /// - [`OptError::InvalidSimplexStep`] for a non-positive or non-finite step.
    /// - [`OptError::InvalidTimeout`] for a zero timeout.
    pub fn new(
        tols: Tolerances, simplex_step: f64, zero_step: f64, timeout: Option<Duration>,
        verbose: bool,
    ) -> OptResult<Self> {
        verify_simplex_step(simplex_step)?;
        verify_simplex_step(zero_step)?;
        if timeout.is_some_and(|t| t.is_zero()) {
            return Err(OptError::InvalidTimeout);
        }
        Ok(Self { tols, simplex_step, zero_step, timeout, verbose })
    }

    /// Copy of `self` with a different iteration cap.
    ///
    /// # Errors
    /// Returns `OptError::InvalidMaxIter` if `max_iter == 0`.
    pub fn with_max_iter(&self, max_iter: usize) -> OptResult<Self> {
        let tols = Tolerances::new(self.tols.sd_tol, Some(max_iter))?;
        Ok(Self { tols, ..self.clone() })
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { sd_tol: Some(1e-6), max_iter: Some(600) },
            simplex_step: DEFAULT_SIMPLEX_STEP,
            zero_step: DEFAULT_ZERO_STEP,
            timeout: None,
            verbose: false,
        }
    }
}

/// Numerical tolerances and iteration limits used by the optimizer.
///
/// - `sd_tol`: terminate when the standard deviation of the simplex costs
///   falls below this threshold.
/// - `max_iter`: hard cap on the number of iterations.
///
/// Either field can be `None` but **at least one** must be provided
/// (see [`Tolerances::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub sd_tol: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - At least one of `sd_tol` or `max_iter` must be `Some`.
    /// - If provided, `sd_tol` must be **finite and strictly positive**.
    /// - If provided, `max_iter` must be `> 0`.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if both are `None`.
    /// - [`OptError::InvalidSdTolerance`] for non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(sd_tol: Option<f64>, max_iter: Option<usize>) -> OptResult<Self> {
        if sd_tol.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_sd_tolerance(sd_tol)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { sd_tol, max_iter })
    }
}

/// Canonical result returned by `maximize`.
///
/// - `theta_hat`: best parameter vector found.
/// - `value`: best **log-likelihood** value `ℓ(θ)` (not the cost).
/// - `converged`: `true` only if the simplex collapsed below `sd_tol` (or a
///   target cost was hit); iteration caps and timeouts report `false` while
///   still carrying the best point seen.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of optimizer iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
}

impl OptimOutcome {
    /// Build a validated [`OptimOutcome`] from raw solver state.
    ///
    /// Performs:
    /// - `theta_hat` check via `validate_theta_hat` (present and all finite).
    /// - `value` check via `validate_value` (finite).
    /// - Maps `TerminationStatus` into `(converged, status)`.
    ///
    /// # Errors
    /// - Propagates any validation errors for `theta_hat` or `value`.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus,
        iterations: u64, fn_evals: FnEvalMap,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let (converged, status) = match &termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            TerminationStatus::Terminated(reason) => (
                matches!(
                    reason,
                    TerminationReason::SolverConverged | TerminationReason::TargetCostReached
                ),
                format!("{reason:?}"),
            ),
        };
        let iterations = iterations as usize;
        Ok(Self { theta_hat, value, converged, status, iterations, fn_evals })
    }
}
