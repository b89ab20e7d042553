//! Numerical stability constants and guards for count-model likelihoods.
//!
//! The NB-INGARCH recursion and likelihood operate on quantities that are
//! only meaningful inside narrow ranges: a conditional mean must stay strictly
//! positive, the dispersion must stay positive, and the Negative-Binomial
//! `(r, prob)` pair degenerates as `φ → 0` or `μ → ∞`. This module keeps the
//! floors, clip ranges and the "impossible" log-likelihood sentinel in one
//! place so every layer applies the same guards.
//!
//! # Provided items
//! - [`MEAN_FLOOR`], [`DISPERSION_FLOOR`]: default lower bounds for μ and φ.
//! - [`BURN_IN_DISPERSION`]: placeholder φ used for pre-burn-in slots.
//! - [`R_BOUNDS`], [`PROB_BOUNDS`]: clip ranges for the NB size/probability.
//! - [`LOGLIK_SENTINEL`]: finite stand-in for `ln 0`.
//! - [`DIVISION_EPS`]: guard for ratios with a near-zero denominator.
//! - [`clip`], [`floor_at`], [`safe_ratio`]: NaN-aware helpers.

/// Default lower bound for the conditional mean μ_t.
pub const MEAN_FLOOR: f64 = 0.01;

/// Default lower bound for the conditional dispersion φ_t.
pub const DISPERSION_FLOOR: f64 = 0.001;

/// Dispersion assigned to pre-burn-in slots before the floor is applied.
pub const BURN_IN_DISPERSION: f64 = 0.1;

/// Clip range for the Negative-Binomial size parameter `r = 1/φ`.
pub const R_BOUNDS: (f64, f64) = (0.01, 1000.0);

/// Clip range for the Negative-Binomial success probability `r / (r + μ)`.
pub const PROB_BOUNDS: (f64, f64) = (1e-4, 1.0 - 1e-4);

/// Log-likelihood contribution reported for impossible or invalid points.
///
/// Finite, and below any attainable valid contribution.
pub const LOGLIK_SENTINEL: f64 = -1e10;

/// Smallest denominator accepted by [`safe_ratio`].
pub const DIVISION_EPS: f64 = 1e-6;

/// Clamp `x` into `[lo, hi]`.
///
/// Unlike `f64::clamp`, a `NaN` input is mapped to `lo` instead of being
/// propagated, and no panic is possible for `lo > hi` (the upper bound wins).
pub fn clip(x: f64, lo: f64, hi: f64) -> f64 {
    x.max(lo).min(hi)
}

/// Apply a lower bound; `NaN` maps to the floor.
pub fn floor_at(x: f64, floor: f64) -> f64 {
    x.max(floor)
}

/// `num / max(den, DIVISION_EPS)`.
pub fn safe_ratio(num: f64, den: f64) -> f64 {
    num / den.max(DIVISION_EPS)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Scope -------------------------------------------------------------
    // NaN handling and bound behavior of the scalar guards.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure `clip` and `floor_at` never propagate NaN.
    //
    // Given
    // -----
    // - `NaN` inputs with bounds from `R_BOUNDS` and `MEAN_FLOOR`.
    //
    // Expect
    // ------
    // - Results equal the lower bound.
    fn guards_map_nan_to_lower_bound() {
        assert_eq!(clip(f64::NAN, R_BOUNDS.0, R_BOUNDS.1), R_BOUNDS.0);
        assert_eq!(floor_at(f64::NAN, MEAN_FLOOR), MEAN_FLOOR);
    }

    #[test]
    // Purpose
    // -------
    // Check clipping at both ends and pass-through inside the range.
    //
    // Given
    // -----
    // - Values below, inside and above `PROB_BOUNDS`.
    //
    // Expect
    // ------
    // - Clipped to the nearest bound or unchanged.
    fn clip_respects_both_bounds() {
        let (lo, hi) = PROB_BOUNDS;
        assert_eq!(clip(0.0, lo, hi), lo);
        assert_eq!(clip(0.5, lo, hi), 0.5);
        assert_eq!(clip(1.0, lo, hi), hi);
    }

    #[test]
    // Purpose
    // -------
    // `safe_ratio` guards a zero denominator.
    //
    // Given
    // -----
    // - `safe_ratio(1.0, 0.0)` and `safe_ratio(6.0, 3.0)`.
    //
    // Expect
    // ------
    // - `1 / DIVISION_EPS` and `2.0`.
    fn safe_ratio_guards_zero_denominator() {
        assert_eq!(safe_ratio(1.0, 0.0), 1.0 / DIVISION_EPS);
        assert_eq!(safe_ratio(6.0, 3.0), 2.0);
    }
}
