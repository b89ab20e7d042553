//! Forecast recursions for NB-INGARCH(p, q), both out-of-sample and one-step.
//!
//! Purpose
//! -------
//! Turn fitted parameters into point forecasts of the conditional mean. Two
//! flavors are provided:
//!
//! - [`forecast_recursion`]: multi-step path beyond the end of a history,
//!   feeding each forecast back in as the newest AR lag.
//! - [`one_step_ahead`]: in-sample conditional means `μ_t` computed against
//!   the actual lagged counts, used for holdout scoring and residuals.
//!
//! Key behaviors
//! -------------
//! - A rolling buffer holds exactly `p` lag values. It starts from the last
//!   `p` observations of the history, left-padded with the history mean when
//!   the history is shorter than `p` (or with `max(β₀, mean floor)` when the
//!   history is empty).
//! - `β₁` multiplies the newest buffer entry, `β_p` the oldest.
//! - Each step adds `γ · x_h`, floors the result at the mean floor, appends
//!   it to the buffer and drops the oldest entry.
//!
//! Invariants & assumptions
//! ------------------------
//! - `exog`, when present, has at least `horizon` rows and `γ.len()` columns;
//!   the model layer checks this before calling in.
//! - Every returned value is `≥ floors.mean > 0`.
//!
//! Conventions
//! -----------
//! - `path[h]` is the (h+1)-step-ahead forecast.
//! - The dispersion recursion plays no role in point forecasts.
use crate::ingarch::core::{
    guards::Floors, params::IngarchParams, recursion::conditional_mean,
};
use ndarray::{Array1, ArrayView1, ArrayView2, s};
use std::collections::VecDeque;

/// Multi-step conditional-mean path of length `horizon` after `history`.
pub fn forecast_recursion(
    params: &IngarchParams, floors: &Floors, history: ArrayView1<f64>,
    exog: Option<ArrayView2<f64>>, horizon: usize,
) -> Array1<f64> {
    let p = params.beta.len();
    let mut buffer = seed_buffer(params, floors, history, p);
    let mut path = Array1::zeros(horizon);

    for h in 0..horizon {
        let mut mu = params.beta0;
        for (i, &beta) in params.beta.iter().enumerate() {
            mu += beta * buffer[p - 1 - i];
        }
        if let Some(x) = exog {
            if !params.gamma.is_empty() {
                mu += x.row(h).dot(&params.gamma);
            }
        }
        let mu = floors.apply_mean(mu);
        path[h] = mu;
        if p > 0 {
            buffer.pop_front();
            buffer.push_back(mu);
        }
    }
    path
}

/// In-sample one-step-ahead conditional means for every observation.
///
/// `μ_t` uses the actual counts `y_{t−1}..y_{t−p}` (lags before the sample
/// start are dropped) and the covariates of row `t`.
pub fn one_step_ahead(
    params: &IngarchParams, floors: &Floors, counts: ArrayView1<f64>,
    exog: Option<ArrayView2<f64>>,
) -> Array1<f64> {
    let spec = params.spec();
    let theta = params.to_theta();
    Array1::from_iter(
        (0..counts.len()).map(|t| conditional_mean(theta.view(), &spec, floors, counts, exog, t)),
    )
}

fn seed_buffer(
    params: &IngarchParams, floors: &Floors, history: ArrayView1<f64>, p: usize,
) -> VecDeque<f64> {
    let n = history.len();
    let pad = match history.mean() {
        Some(mean) => mean,
        None => floors.apply_mean(params.beta0),
    };
    let take = n.min(p);
    let mut buffer: VecDeque<f64> = std::iter::repeat(pad).take(p - take).collect();
    buffer.extend(history.slice(s![n - take..]).iter().copied());
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // ---- Scope -------------------------------------------------------------
    // These tests cover:
    // - Lag ordering and feedback of forecasts into the buffer.
    // - Padding for short and empty histories.
    // - Exogenous shifts and the mean floor.
    // - Agreement of one-step means with the in-sample recursion.
    // -------------------------------------------------------------------------

    fn params(beta0: f64, beta: Array1<f64>, gamma: Array1<f64>) -> IngarchParams {
        IngarchParams { beta0, beta, gamma, alpha0: 0.1, alpha: array![0.05] }
    }

    #[test]
    // Purpose
    // -------
    // β₁ multiplies the newest value and forecasts feed back as lags.
    //
    // Given
    // -----
    // - β₀ = 1, β = [0.5, 0.25]; history [..., 8, 4].
    //
    // Expect
    // ------
    // - ŷ₁ = 1 + 0.5·4 + 0.25·8 = 5; ŷ₂ = 1 + 0.5·5 + 0.25·4 = 4.5.
    fn forecast_rolls_buffer_with_newest_first() {
        let params = params(1.0, array![0.5, 0.25], array![]);

        let path = forecast_recursion(
            &params,
            &Floors::default(),
            array![100.0, 8.0, 4.0].view(),
            None,
            2,
        );

        assert_eq!(path, array![5.0, 4.5]);
    }

    #[test]
    // Purpose
    // -------
    // Short histories are left-padded with their mean; empty histories with
    // the floored intercept.
    //
    // Given
    // -----
    // - β₀ = 2, β = [0.5, 0.5]; history [6] and an empty history.
    //
    // Expect
    // ------
    // - From [6]: buffer [6, 6] → ŷ₁ = 2 + 3 + 3 = 8.
    // - From []: buffer [2, 2] → ŷ₁ = 2 + 1 + 1 = 4.
    fn forecast_pads_short_history() {
        let params = params(2.0, array![0.5, 0.5], array![]);
        let floors = Floors::default();

        let from_one = forecast_recursion(&params, &floors, array![6.0].view(), None, 1);
        let from_none = forecast_recursion(&params, &floors, Array1::zeros(0).view(), None, 1);

        assert_eq!(from_one, array![8.0]);
        assert_eq!(from_none, array![4.0]);
    }

    #[test]
    // Purpose
    // -------
    // Exogenous rows shift each step, and the floor binds when μ goes negative.
    //
    // Given
    // -----
    // - p = 0, β₀ = 1, γ = [2]; exog rows [1], [−5].
    //
    // Expect
    // ------
    // - ŷ = [3, 0.01].
    fn forecast_applies_exog_and_floor() {
        let params = params(1.0, array![], array![2.0]);
        let exog = array![[1.0], [-5.0]];

        let path = forecast_recursion(
            &params,
            &Floors::default(),
            array![3.0].view(),
            Some(exog.view()),
            2,
        );

        assert_eq!(path, array![3.0, 0.01]);
    }

    #[test]
    // Purpose
    // -------
    // One-step means use actual lags rather than forecasts.
    //
    // Given
    // -----
    // - β₀ = 2, β = [0.5]; y = [4, 6, 2].
    //
    // Expect
    // ------
    // - μ = [2, 4, 5].
    fn one_step_uses_actual_lags() {
        let params = params(2.0, array![0.5], array![]);

        let mu = one_step_ahead(&params, &Floors::default(), array![4.0, 6.0, 2.0].view(), None);

        assert_eq!(mu, array![2.0, 4.0, 5.0]);
    }
}
