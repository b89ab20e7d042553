//! Validation helpers for log-likelihood optimization.
//!
//! This module centralizes common consistency checks used across the
//! optimizer interface:
//!
//! - **Tolerance checks**: [`verify_sd_tolerance`], [`verify_simplex_step`]
//!   ensure Nelder–Mead settings are finite and strictly positive.
//! - **Initial guesses**: [`validate_theta0`] enforces a non-empty, finite
//!   starting point before a simplex is built around it.
//! - **Parameter estimates**: [`validate_theta_hat`] ensures a candidate
//!   `theta_hat` exists and contains only finite values.
//! - **Objective values**: [`validate_value`] checks log-likelihood outputs
//!   for finiteness.
//!
//! These helpers standardize error reporting by returning domain-specific
//! [`OptError`] variants.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::Theta,
};

/// Validate the optional simplex standard-deviation tolerance.
///
/// - Accepts `None` (no stopping rule on simplex spread).
/// - If `Some`, the value must be **finite** and **strictly positive**.
///
/// # Errors
/// Returns [`OptError::InvalidSdTolerance`] if the value is non-finite or ≤ 0.0.
pub fn verify_sd_tolerance(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidSdTolerance { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidSdTolerance {
                tol,
                reason: "Tolerance must be positive.",
            });
        }
    }
    Ok(())
}

/// Validate a relative (or absolute) simplex step used to build the initial
/// Nelder–Mead simplex.
///
/// # Errors
/// Returns [`OptError::InvalidSimplexStep`] if the step is non-finite or ≤ 0.0.
pub fn verify_simplex_step(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::InvalidSimplexStep { value, reason: "Step must be finite." });
    }
    if value <= 0.0 {
        return Err(OptError::InvalidSimplexStep { value, reason: "Step must be positive." });
    }
    Ok(())
}

/// Validate an initial parameter vector.
///
/// # Errors
/// - [`OptError::EmptyTheta`] if `theta0` has no coordinates.
/// - [`OptError::InvalidThetaInput`] for the first non-finite entry.
pub fn validate_theta0(theta0: &Theta) -> OptResult<()> {
    if theta0.is_empty() {
        return Err(OptError::EmptyTheta);
    }
    for (index, &value) in theta0.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidThetaInput { index, value });
        }
    }
    Ok(())
}

/// Validate and unwrap an estimated parameter vector (`theta_hat`).
///
/// Accepts only a present vector with all **finite** entries.
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if no vector was provided.
/// - [`OptError::InvalidThetaHat`] if any element is non-finite.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    match theta_hat {
        Some(t) => {
            for (index, &value) in t.iter().enumerate() {
                if !value.is_finite() {
                    return Err(OptError::InvalidThetaHat {
                        index,
                        value,
                        reason: "Parameter estimates must be finite.",
                    });
                }
            }
            Ok(t)
        }
        None => Err(OptError::MissingThetaHat),
    }
}

/// Validate that a scalar log-likelihood value is finite.
///
/// Negative values are fine as long as they are finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // ---- Scope -------------------------------------------------------------
    // These tests cover:
    // - Acceptance/rejection rules of the tolerance and step validators.
    // - Theta validation for initial guesses and final estimates.
    //
    // They intentionally DO NOT cover solver behavior; see `api` tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure the simplex tolerance validator accepts `None` and positive
    // finite values, and rejects zero, negatives and non-finite values.
    //
    // Given
    // -----
    // - `None`, `Some(1e-8)`, `Some(0.0)`, `Some(-1.0)`, `Some(NaN)`.
    //
    // Expect
    // ------
    // - The first two succeed; the rest return `InvalidSdTolerance`.
    fn verify_sd_tolerance_enforces_positive_finite() {
        assert!(verify_sd_tolerance(None).is_ok());
        assert!(verify_sd_tolerance(Some(1e-8)).is_ok());
        for bad in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                verify_sd_tolerance(Some(bad)),
                Err(OptError::InvalidSdTolerance { .. })
            ));
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure `validate_theta0` rejects empty and non-finite starting points.
    //
    // Given
    // -----
    // - An empty vector and `[1.0, inf, 0.0]`.
    //
    // Expect
    // ------
    // - `EmptyTheta` and `InvalidThetaInput { index: 1, .. }` respectively.
    fn validate_theta0_rejects_empty_and_non_finite() {
        let empty: Theta = array![];
        assert_eq!(validate_theta0(&empty), Err(OptError::EmptyTheta));

        let bad = array![1.0, f64::INFINITY, 0.0];
        assert!(matches!(
            validate_theta0(&bad),
            Err(OptError::InvalidThetaInput { index: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify `validate_theta_hat` unwraps a finite vector and rejects a
    // missing one.
    //
    // Given
    // -----
    // - `Some([0.5, -0.5])` and `None`.
    //
    // Expect
    // ------
    // - The vector is returned unchanged; `None` yields `MissingThetaHat`.
    fn validate_theta_hat_unwraps_or_reports_missing() {
        let theta = array![0.5, -0.5];
        assert_eq!(validate_theta_hat(Some(theta.clone())), Ok(theta));
        assert_eq!(validate_theta_hat(None), Err(OptError::MissingThetaHat));
    }

    #[test]
    // Purpose
    // -------
    // Check simplex step validation.
    //
    // Given
    // -----
    // - Steps `0.05`, `0.0` and `inf`.
    //
    // Expect
    // ------
    // - Only `0.05` is accepted.
    fn verify_simplex_step_requires_positive_finite() {
        assert!(verify_simplex_step(0.05).is_ok());
        assert!(verify_simplex_step(0.0).is_err());
        assert!(verify_simplex_step(f64::INFINITY).is_err());
    }
}
