//! Negative-Binomial log-pmf in the (mean, dispersion) parameterization.
//!
//! With mean μ and dispersion φ the NB distribution has `Var[Y] = μ + φμ²`.
//! Converting to the (size, probability) form used by the pmf:
//!
//! ```text
//! r    = 1 / φ
//! prob = r / (r + μ)
//! ln P(Y = y) = lnΓ(y + r) − lnΓ(y + 1) − lnΓ(r) + r·ln(prob) + y·ln(1 − prob)
//! ```
//!
//! `r` is clipped to `[0.01, 1000]` and `prob` to `[1e-4, 1 − 1e-4]` before
//! evaluation. The function never fails: invalid inputs and non-finite
//! results are reported as [`LOGLIK_SENTINEL`].
use crate::optimization::numerical_stability::{LOGLIK_SENTINEL, PROB_BOUNDS, R_BOUNDS, clip};
use statrs::function::gamma::ln_gamma;

/// Log-probability of observing count `y` under NB(μ, φ).
///
/// Returns [`LOGLIK_SENTINEL`] when `μ <= 0`, `φ <= 0`, `y < 0`, any input is
/// non-finite, or the evaluated expression is non-finite.
pub fn nb_log_pmf(y: f64, mu: f64, phi: f64) -> f64 {
    if !(y.is_finite() && mu.is_finite() && phi.is_finite()) {
        return LOGLIK_SENTINEL;
    }
    if mu <= 0.0 || phi <= 0.0 || y < 0.0 {
        return LOGLIK_SENTINEL;
    }
    let r_raw = 1.0 / phi;
    let prob = clip(r_raw / (r_raw + mu), PROB_BOUNDS.0, PROB_BOUNDS.1);
    let r = clip(r_raw, R_BOUNDS.0, R_BOUNDS.1);
    let ll = ln_gamma(y + r) - ln_gamma(y + 1.0) - ln_gamma(r) + r * prob.ln() + y * (1.0 - prob).ln();
    if ll.is_finite() { ll } else { LOGLIK_SENTINEL }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ---- Scope -------------------------------------------------------------
    // These tests cover:
    // - Agreement with a hand-computed NB pmf in the unclipped regime.
    // - Sentinel behavior for invalid inputs.
    // - Normalization of the pmf over a truncated support.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Compare against the closed form for `y = 0`, which reduces to
    // `r · ln(prob)`.
    //
    // Given
    // -----
    // - `μ = 4`, `φ = 0.5` → `r = 2`, `prob = 1/3`.
    //
    // Expect
    // ------
    // - `ln P(0) = 2 · ln(1/3)`.
    fn nb_log_pmf_matches_closed_form_at_zero() {
        let ll = nb_log_pmf(0.0, 4.0, 0.5);
        assert_relative_eq!(ll, 2.0 * (1.0f64 / 3.0).ln(), epsilon = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // Ensure invalid inputs map to the sentinel instead of erroring.
    //
    // Given
    // -----
    // - `μ = 0`, `φ = -1`, `y = -1`, `μ = NaN`.
    //
    // Expect
    // ------
    // - All return `LOGLIK_SENTINEL`.
    fn nb_log_pmf_returns_sentinel_for_invalid_inputs() {
        assert_eq!(nb_log_pmf(3.0, 0.0, 0.1), LOGLIK_SENTINEL);
        assert_eq!(nb_log_pmf(3.0, 2.0, -1.0), LOGLIK_SENTINEL);
        assert_eq!(nb_log_pmf(-1.0, 2.0, 0.1), LOGLIK_SENTINEL);
        assert_eq!(nb_log_pmf(3.0, f64::NAN, 0.1), LOGLIK_SENTINEL);
    }

    #[test]
    // Purpose
    // -------
    // Check that the pmf sums to ~1 in a regime where no clipping applies.
    //
    // Given
    // -----
    // - `μ = 6`, `φ = 0.2` (r = 5), support `0..=200`.
    //
    // Expect
    // ------
    // - `Σ exp(ln P(y)) ≈ 1`.
    fn nb_log_pmf_is_normalized() {
        let total: f64 = (0..=200).map(|y| nb_log_pmf(y as f64, 6.0, 0.2).exp()).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-8);
    }
}
