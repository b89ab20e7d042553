//! loglik_optimizer::builders: Nelder–Mead solver construction helpers.
//!
//! Purpose
//! -------
//! Provide small, focused builders for the derivative-free Nelder–Mead
//! solver used by the log-likelihood optimizer. These helpers hide Argmin's
//! generic wiring and apply crate-level options (initial simplex geometry,
//! spread tolerance) so that higher-level code can request a configured
//! solver without touching Argmin-specific types.
//!
//! Key behaviors
//! -------------
//! - Build the initial simplex around `θ₀`: vertex 0 is `θ₀`, vertex `k + 1`
//!   scales coordinate `k` by `1 + simplex_step`, or sets it to `zero_step`
//!   when that coordinate is exactly zero.
//! - Apply the optional simplex standard-deviation tolerance from
//!   [`MLEOptions`].
//!
//! Invariants & assumptions
//! ------------------------
//! - `θ₀` has already been validated (non-empty, finite).
//! - For `d = θ₀.len()` the simplex always has `d + 1` affinely independent
//!   vertices because every perturbation is non-zero.
//!
//! Conventions
//! -----------
//! - The builders do **not** set `max_iters` or timeouts; these are runtime
//!   concerns applied by the runner (`run_nelder_mead`).
//! - Errors are always reported via [`OptResult`].
//!
//! Testing notes
//! -------------
//! - Unit tests verify simplex geometry (vertex count, zero-coordinate
//!   handling) and that invalid tolerances surface as `OptError`.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{NelderMeadSolver, Theta},
        validation::validate_theta0,
    },
};

/// Build the `d + 1` vertices of the initial simplex around `theta0`.
///
/// # Errors
/// Propagates [`validate_theta0`] failures.
pub fn initial_simplex(theta0: &Theta, opts: &MLEOptions) -> OptResult<Vec<Theta>> {
    validate_theta0(theta0)?;
    let mut vertices = Vec::with_capacity(theta0.len() + 1);
    vertices.push(theta0.clone());
    for k in 0..theta0.len() {
        let mut vertex = theta0.clone();
        vertex[k] = if vertex[k] != 0.0 {
            (1.0 + opts.simplex_step) * vertex[k]
        } else {
            opts.zero_step
        };
        vertices.push(vertex);
    }
    Ok(vertices)
}

/// Construct a Nelder–Mead solver around `theta0`.
///
/// Returns
/// -------
/// `OptResult<NelderMeadSolver>`
///   - `Ok(solver)` with the initial simplex and, if configured, the
///     simplex standard-deviation tolerance applied.
///   - `Err(e)` if `theta0` is invalid or Argmin rejects the tolerance.
pub fn build_nelder_mead(theta0: &Theta, opts: &MLEOptions) -> OptResult<NelderMeadSolver> {
    let vertices = initial_simplex(theta0, opts)?;
    let mut solver = NelderMeadSolver::new(vertices);
    if let Some(tol) = opts.tols.sd_tol {
        solver = solver.with_sd_tolerance(tol)?;
    }
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{errors::OptError, loglik_optimizer::traits::Tolerances};
    use ndarray::array;

    // ---- Scope -------------------------------------------------------------
    // These tests cover:
    // - Geometry of the initial simplex.
    // - Builder success with valid options and failure on empty `θ₀`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the simplex has `d + 1` vertices with the expected perturbations.
    //
    // Given
    // -----
    // - `θ₀ = [2.0, 0.0]`, default steps (5%, 0.00025).
    //
    // Expect
    // ------
    // - Vertices `[2, 0]`, `[2.1, 0]`, `[2, 0.00025]`.
    fn initial_simplex_perturbs_each_coordinate() {
        // Arrange
        let opts = MLEOptions::default();
        let theta0 = array![2.0, 0.0];

        // Act
        let simplex = initial_simplex(&theta0, &opts).expect("valid theta0");

        // Assert
        assert_eq!(simplex.len(), 3);
        assert_eq!(simplex[0], theta0);
        assert!((simplex[1][0] - 2.1).abs() < 1e-12);
        assert_eq!(simplex[1][1], 0.0);
        assert_eq!(simplex[2][0], 2.0);
        assert_eq!(simplex[2][1], 0.00025);
    }

    #[test]
    // Purpose
    // -------
    // Ensure the builder succeeds for a valid configuration.
    //
    // Given
    // -----
    // - Tolerances `(Some(1e-6), Some(50))` and `θ₀ = [0.3, 0.1, 0.05]`.
    //
    // Expect
    // ------
    // - `build_nelder_mead` returns `Ok(_)`.
    fn build_nelder_mead_accepts_valid_options() {
        let tols = Tolerances::new(Some(1e-6), Some(50)).expect("Tolerances should be valid");
        let opts = MLEOptions::new(tols, 0.05, 0.00025, None, false)
            .expect("MLEOptions should be valid");

        let solver = build_nelder_mead(&array![0.3, 0.1, 0.05], &opts);

        assert!(solver.is_ok(), "Builder should succeed with a finite starting point");
    }

    #[test]
    // Purpose
    // -------
    // Ensure an empty starting point is rejected before Argmin sees it.
    //
    // Given
    // -----
    // - `θ₀ = []`.
    //
    // Expect
    // ------
    // - `Err(OptError::EmptyTheta)`.
    fn build_nelder_mead_rejects_empty_theta() {
        let result = build_nelder_mead(&array![], &MLEOptions::default());
        assert!(matches!(result, Err(OptError::EmptyTheta)));
    }
}
