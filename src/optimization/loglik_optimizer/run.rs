//! Execution helper that runs an `argmin` solver on a log-likelihood problem and
//! returns a crate-friendly [`OptimOutcome`].
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        LogLikelihood, MLEOptions, OptimOutcome, Theta, adapter::ArgMinAdapter,
        types::SimplexState,
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::CostFunction;
use argmin::core::{Executor, State};

/// Run a derivative-free `argmin` optimization for a log-likelihood problem.
///
/// This wires up:
/// - the user model via [`ArgMinAdapter`],
/// - the chosen `Solver` (normally Nelder–Mead from
///   [`build_nelder_mead`](crate::optimization::loglik_optimizer::builders::build_nelder_mead)),
/// - initial parameter `theta0` (recorded on the state; the simplex carries
///   its own vertices),
/// - optional observers (behind the `obs_slog` feature),
/// - optional `max_iters` and wall-clock timeout,
///
/// then executes the solver and converts the result into [`OptimOutcome`].
///
/// # Feature flags
/// If the `obs_slog` feature is enabled and `opts.verbose == true`, a terminal
/// slog observer is attached with `ObserverMode::Always` and a one-time
/// pre-iteration line logs ℓ(θ₀).
///
/// # Errors
/// - Propagates any `argmin` runtime error (including errors raised by the
///   cost function) via `From<argmin::core::Error>`.
/// - Propagates any validation errors encountered when constructing
///   [`OptimOutcome`].
pub fn run_nelder_mead<'a, F, S>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: argmin::core::Solver<ArgMinAdapter<'a, F>, SimplexState>,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(theta0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }
    if let Some(timeout) = opts.timeout {
        optimizer = optimizer.timeout(timeout);
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    OptimOutcome::new(
        result.take_best_param(),
        -result.get_best_cost(),
        termination,
        iterations,
        function_counts,
    )
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state<F>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()>
where
    F: LogLikelihood,
{
    let ll0 = -problem.cost(theta0)?;
    eprintln!("init: ell(theta0) = {ll0:.6}, dim = {}", theta0.len());
    Ok(())
}
