//! In-sample μ/φ recursions and the NB-INGARCH log-likelihood driver.
//!
//! Purpose
//! -------
//! Evaluate the conditional mean and conditional dispersion paths of an
//! NB-INGARCH(p, q) model over an observed series, and accumulate the
//! Negative-Binomial log-likelihood after burn-in.
//!
//! Key behaviors
//! -------------
//! - [`conditional_mean`]: `μ_t = max(β₀ + Σ β_i·y_{t−i} + γ·x_t, floor)`,
//!   dropping lags that fall before the start of the sample.
//! - [`conditional_dispersion`]: `φ_t = max(α₀ + Σ α_i·ε²_{t−i}/μ_{t−i}, floor)`,
//!   dropping lags before the sample start or with `μ ≤ 0`.
//! - [`forward_pass`]: fill μ, ε and φ buffers in one sweep; φ slots before
//!   burn-in hold the floored placeholder `max(0.1, floor)`.
//! - [`log_likelihood`]: run the forward pass into borrowed scratch buffers
//!   and sum `nb_log_pmf(y_t, μ_t, φ_t)` for `t ≥ max(p, q)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `theta` has already been validated against `spec` (length, finiteness).
//! - Every value written into the μ buffer is `≥ floors.mean`; every value
//!   written into the φ buffer is `≥ floors.dispersion`. Floors are applied
//!   at the write site, so no caller can observe an unfloored value.
//! - When `spec.n_exog > 0`, `exog` has one row per observation.
//!
//! Performance
//! -----------
//! - O(n · (p + q + k)) per evaluation, allocation-free once scratch buffers
//!   are sized.
use crate::{
    ingarch::core::{
        data::FitData, guards::Floors, likelihood::nb_log_pmf, params::IngarchScratch,
        shape::ModelSpec,
    },
    optimization::numerical_stability::BURN_IN_DISPERSION,
};
use ndarray::{ArrayView1, ArrayView2, ArrayViewMut1, s};

/// Conditional mean at observation `t` using actual lagged counts.
pub fn conditional_mean(
    theta: ArrayView1<f64>, spec: &ModelSpec, floors: &Floors, counts: ArrayView1<f64>,
    exog: Option<ArrayView2<f64>>, t: usize,
) -> f64 {
    let mut mu = theta[0];
    for (i, &beta) in theta.slice(s![spec.ar_range()]).iter().enumerate() {
        let lag = i + 1;
        if t >= lag {
            mu += beta * counts[t - lag];
        }
    }
    if let Some(x) = exog {
        if spec.n_exog > 0 {
            mu += x.row(t).dot(&theta.slice(s![spec.exog_range()]));
        }
    }
    floors.apply_mean(mu)
}

/// Conditional dispersion at observation `t` from lagged Pearson residuals.
pub fn conditional_dispersion(
    theta: ArrayView1<f64>, spec: &ModelSpec, floors: &Floors, mu: ArrayView1<f64>,
    resid: ArrayView1<f64>, t: usize,
) -> f64 {
    let mut phi = theta[spec.alpha0_index()];
    for (i, &alpha) in theta.slice(s![spec.arch_range()]).iter().enumerate() {
        let lag = i + 1;
        if t >= lag && mu[t - lag] > 0.0 {
            phi += alpha * resid[t - lag].powi(2) / mu[t - lag];
        }
    }
    floors.apply_dispersion(phi)
}

/// Fill μ, ε and φ over the whole sample.
///
/// The output views must have length `data.len()`.
pub fn forward_pass(
    theta: ArrayView1<f64>, spec: &ModelSpec, floors: &Floors, data: &FitData,
    mut mu_out: ArrayViewMut1<f64>, mut resid_out: ArrayViewMut1<f64>,
    mut phi_out: ArrayViewMut1<f64>,
) {
    let counts = data.counts.view();
    let exog = data.exog.as_ref().map(|x| x.view());
    let burn_in = spec.burn_in();
    let placeholder = floors.apply_dispersion(BURN_IN_DISPERSION);
    for t in 0..counts.len() {
        let mu_t = conditional_mean(theta, spec, floors, counts, exog, t);
        mu_out[t] = mu_t;
        resid_out[t] = counts[t] - mu_t;
        phi_out[t] = if t >= burn_in {
            conditional_dispersion(theta, spec, floors, mu_out.view(), resid_out.view(), t)
        } else {
            placeholder
        };
    }
}

/// NB log-likelihood of `data` at `theta`, summed from burn-in onward.
///
/// Uses (and grows if needed) the scratch buffers; after the call they hold
/// the μ, ε and φ paths at `theta` for the first `data.len()` slots.
pub fn log_likelihood(
    theta: ArrayView1<f64>, spec: &ModelSpec, floors: &Floors, data: &FitData,
    scratch: &IngarchScratch,
) -> f64 {
    let n = data.len();
    scratch.ensure_len(n);
    let mut mu = scratch.mu_buf.borrow_mut();
    let mut resid = scratch.resid_buf.borrow_mut();
    let mut phi = scratch.phi_buf.borrow_mut();
    forward_pass(
        theta,
        spec,
        floors,
        data,
        mu.slice_mut(s![..n]),
        resid.slice_mut(s![..n]),
        phi.slice_mut(s![..n]),
    );
    (spec.burn_in()..n).map(|t| nb_log_pmf(data.counts[t], mu[t], phi[t])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, array};
    use proptest::prelude::*;

    // ---- Scope -------------------------------------------------------------
    // These tests cover:
    // - Hand-checked μ/φ values for a tiny INGARCH(1,1).
    // - Exogenous contribution to μ.
    // - Floor guarantees over random parameter vectors (property test).
    // - Burn-in exclusion from the likelihood.
    // -------------------------------------------------------------------------

    fn counts_only(counts: Array1<f64>) -> FitData {
        FitData { counts, exog: None }
    }

    #[test]
    // Purpose
    // -------
    // Verify μ and φ against hand computation.
    //
    // Given
    // -----
    // - INGARCH(1,1), θ = [2, 0.5, 0.2, 0.1]; y = [4, 6, 2].
    //
    // Expect
    // ------
    // - μ = [2, 4, 5]; ε = [2, 2, −3];
    // - φ₀ = 0.1 (placeholder), φ₁ = 0.2 + 0.1·4/2 = 0.4, φ₂ = 0.2 + 0.1·4/4 = 0.3.
    fn forward_pass_matches_hand_computation() {
        // Arrange
        let spec = ModelSpec::new(1, 1, 0);
        let theta = array![2.0, 0.5, 0.2, 0.1];
        let data = counts_only(array![4.0, 6.0, 2.0]);
        let (mut mu, mut resid, mut phi) = (Array1::zeros(3), Array1::zeros(3), Array1::zeros(3));

        // Act
        forward_pass(
            theta.view(),
            &spec,
            &Floors::default(),
            &data,
            mu.view_mut(),
            resid.view_mut(),
            phi.view_mut(),
        );

        // Assert
        assert_eq!(mu, array![2.0, 4.0, 5.0]);
        assert_eq!(resid, array![2.0, 2.0, -3.0]);
        assert!((phi[0] - 0.1).abs() < 1e-12);
        assert!((phi[1] - 0.4).abs() < 1e-12);
        assert!((phi[2] - 0.3).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Check the exogenous term enters μ as a dot product with γ.
    //
    // Given
    // -----
    // - p = 0, q = 0, one regressor; θ = [1, 3, 0.1]; x_t = 2.
    //
    // Expect
    // ------
    // - μ_t = 1 + 3·2 = 7.
    fn conditional_mean_adds_exog_dot_product() {
        let spec = ModelSpec::new(0, 0, 1);
        let theta = array![1.0, 3.0, 0.1];
        let exog = array![[2.0]];
        let mu = conditional_mean(
            theta.view(),
            &spec,
            &Floors::default(),
            array![5.0].view(),
            Some(exog.view()),
            0,
        );
        assert_eq!(mu, 7.0);
    }

    #[test]
    // Purpose
    // -------
    // The likelihood excludes burn-in observations.
    //
    // Given
    // -----
    // - INGARCH(2,1) on 4 points, so burn-in = 2.
    //
    // Expect
    // ------
    // - ℓ equals the sum of `nb_log_pmf` over t = 2, 3 only.
    fn log_likelihood_skips_burn_in() {
        let spec = ModelSpec::new(2, 1, 0);
        let theta = array![3.0, 0.3, 0.1, 0.2, 0.05];
        let data = counts_only(array![4.0, 6.0, 2.0, 5.0]);
        let scratch = IngarchScratch::new(4);
        let floors = Floors::default();

        let ll = log_likelihood(theta.view(), &spec, &floors, &data, &scratch);

        let mu = scratch.mu_buf.borrow();
        let phi = scratch.phi_buf.borrow();
        let expected = nb_log_pmf(2.0, mu[2], phi[2]) + nb_log_pmf(5.0, mu[3], phi[3]);
        assert!((ll - expected).abs() < 1e-12);
    }

    proptest! {
        #[test]
        // Purpose
        // -------
        // φ_t and μ_t never drop below their floors, whatever θ the optimizer
        // explores (including large negative coefficients).
        //
        // Given
        // -----
        // - Random θ ∈ [−50, 50]⁴ for INGARCH(1,1) and random counts.
        //
        // Expect
        // ------
        // - min φ ≥ 0.001 and min μ ≥ 0.01.
        fn recursion_respects_floors(
            theta in proptest::collection::vec(-50.0f64..50.0, 4),
            counts in proptest::collection::vec(0.0f64..200.0, 5..60),
        ) {
            let spec = ModelSpec::new(1, 1, 0);
            let floors = Floors::default();
            let data = counts_only(Array1::from(counts));
            let scratch = IngarchScratch::new(data.len());

            let ll = log_likelihood(Array1::from(theta).view(), &spec, &floors, &data, &scratch);

            let n = data.len();
            let mu = scratch.mu_buf.borrow();
            let phi = scratch.phi_buf.borrow();
            prop_assert!(ll.is_finite());
            prop_assert!(mu.slice(s![..n]).iter().all(|&m| m >= floors.mean));
            prop_assert!(phi.slice(s![..n]).iter().all(|&p| p >= floors.dispersion));
        }
    }
}
