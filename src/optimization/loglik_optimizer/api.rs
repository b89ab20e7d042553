//! High-level entry point for maximizing a user-provided `LogLikelihood`.
//!
//! This validates the starting point, builds a Nelder–Mead simplex around it,
//! wraps the model in an `ArgMinAdapter` (which *minimizes* `-ℓ(θ)`), screens
//! every simplex vertex, and delegates the run to `run_nelder_mead`.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{build_nelder_mead, initial_simplex},
        run::run_nelder_mead,
        traits::{LogLikelihood, MLEOptions},
    },
};
use argmin::core::CostFunction;

/// Maximize a log-likelihood `ℓ(θ)` using the Nelder–Mead simplex method.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`.
/// - Builds the initial simplex from `theta0` and `opts`.
/// - Evaluates the cost at every simplex vertex before the solver starts.
///   Argmin's Nelder–Mead initialisation cannot report a failing cost, so a
///   vertex error is returned here instead.
/// - Wraps `(f, data)` in an `ArgMinAdapter` that exposes a *minimization*
///   problem `c(θ) = -ℓ(θ)` to `argmin`.
/// - Calls `run_nelder_mead`, which configures the executor (max iters,
///   timeout, optional observers) and returns an `OptimOutcome`.
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Propagates builder errors from `build_nelder_mead`.
/// - Returns the first vertex error (`ModelError`, `NonFiniteCost`, ...)
///   raised while screening the initial simplex.
/// - Propagates runtime errors from `run_nelder_mead` (including model errors
///   raised by `f.value` during the search).
///
/// # Example
/// ```
/// use ndarray::array;
/// use ingarch_forecast::optimization::{
///     errors::OptResult,
///     loglik_optimizer::{maximize, LogLikelihood, MLEOptions, Theta},
/// };
///
/// struct Parabola;
/// impl LogLikelihood for Parabola {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok(-(theta[0] - 1.0).powi(2) - (theta[1] + 2.0).powi(2))
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&Parabola, array![0.5, 0.5], &(), &MLEOptions::default())?;
/// assert!((out.theta_hat[0] - 1.0).abs() < 1e-2);
/// # Ok::<(), ingarch_forecast::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let solver = build_nelder_mead(&theta0, opts)?;
    let problem = ArgMinAdapter::new(f, data);
    screen_simplex(&problem, &initial_simplex(&theta0, opts)?)?;
    run_nelder_mead(theta0, opts, problem, solver)
}

// ---- Helper Methods ----

/// Evaluate the cost at each vertex; the first failure is returned as an
/// `OptError`.
fn screen_simplex<F: LogLikelihood>(
    problem: &ArgMinAdapter<'_, F>, vertices: &[Theta],
) -> OptResult<()> {
    for vertex in vertices {
        problem.cost(vertex).map_err(OptError::from)?;
    }
    Ok(())
}
