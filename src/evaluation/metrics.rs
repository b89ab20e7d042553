//! Forecast accuracy metrics: sMAPE, MASE, RMSE.
//!
//! Purpose
//! -------
//! Score point forecasts against actual counts, and select the in-sample
//! observations that are eligible for scoring.
//!
//! Key behaviors
//! -------------
//! - [`smape`]: symmetric MAPE in percent,
//!   `100 · mean(|y − ŷ| / ((|y| + |ŷ|) / 2))` over pairs whose denominator is
//!   non-zero.
//! - [`mase`]: mean absolute error scaled by the mean absolute seasonal
//!   difference of the actuals.
//! - [`rmse`]: root mean squared error.
//! - [`in_sample_pairs`]: keep pairs at `t ≥ burn_in` with a positive actual
//!   and a finite prediction.
//!
//! Edge cases
//! ----------
//! - Empty inputs give `NaN` for every metric.
//! - sMAPE is `0.0` when every denominator is zero (all actuals and forecasts
//!   are zero).
//! - MASE falls back to lag 1 when the window is not longer than the
//!   seasonal period, and is `NaN` when the scale is zero or cannot be
//!   computed (fewer than two actuals).
//!
//! Conventions
//! -----------
//! - Inputs are paired positionally; callers pass equal-length views.
use ndarray::{Array1, ArrayView1, s};
use serde::{Deserialize, Serialize};

/// Weekly seasonality of daily data.
pub const DEFAULT_SEASONAL_PERIOD: usize = 7;

/// Symmetric mean absolute percentage error, in percent.
pub fn smape(actual: ArrayView1<f64>, predicted: ArrayView1<f64>) -> f64 {
    if actual.is_empty() {
        return f64::NAN;
    }
    let mut total = 0.0;
    let mut used = 0usize;
    for (&y, &f) in actual.iter().zip(predicted.iter()) {
        let denom = (y.abs() + f.abs()) / 2.0;
        if denom != 0.0 {
            total += (y - f).abs() / denom;
            used += 1;
        }
    }
    if used == 0 { 0.0 } else { 100.0 * total / used as f64 }
}

/// Mean absolute scaled error with seasonal period `m` (clamped to at least 1).
pub fn mase(actual: ArrayView1<f64>, predicted: ArrayView1<f64>, m: usize) -> f64 {
    let n = actual.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = if m >= 1 && n > m { m } else { 1 };
    let mae = mean_abs_diff(actual, predicted);
    let scale = mean_abs_diff(actual.slice(s![m..]), actual.slice(s![..n - m]));
    if scale > 0.0 && scale.is_finite() { mae / scale } else { f64::NAN }
}

/// Root mean squared error.
pub fn rmse(actual: ArrayView1<f64>, predicted: ArrayView1<f64>) -> f64 {
    if actual.is_empty() {
        return f64::NAN;
    }
    let sse: f64 = actual.iter().zip(predicted.iter()).map(|(&y, &f)| (y - f).powi(2)).sum();
    (sse / actual.len() as f64).sqrt()
}

/// Pairs eligible for in-sample scoring: `t ≥ burn_in`, `y_t > 0`, finite `ŷ_t`.
pub fn in_sample_pairs(
    actual: ArrayView1<f64>, predicted: ArrayView1<f64>, burn_in: usize,
) -> (Array1<f64>, Array1<f64>) {
    let (ys, fs): (Vec<f64>, Vec<f64>) = actual
        .iter()
        .zip(predicted.iter())
        .skip(burn_in)
        .filter(|&(&y, &f)| y > 0.0 && f.is_finite())
        .map(|(&y, &f)| (y, f))
        .unzip();
    (Array1::from(ys), Array1::from(fs))
}

/// Mean of the finite values; `NaN` when there are none.
pub fn nan_mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 { f64::NAN } else { sum / count as f64 }
}

/// sMAPE, MASE and RMSE of one forecast window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastMetrics {
    pub smape: f64,
    pub mase: f64,
    pub rmse: f64,
}

impl ForecastMetrics {
    pub fn compute(actual: ArrayView1<f64>, predicted: ArrayView1<f64>, m: usize) -> Self {
        ForecastMetrics {
            smape: smape(actual, predicted),
            mase: mase(actual, predicted, m),
            rmse: rmse(actual, predicted),
        }
    }
}

fn mean_abs_diff(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return f64::NAN;
    }
    a.iter().zip(b.iter()).map(|(&x, &y)| (x - y).abs()).sum::<f64>() / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // ---- Scope -------------------------------------------------------------
    // These tests cover:
    // - Hand-computed values for each metric.
    // - Zero-denominator and empty-input edge cases.
    // - In-sample pair selection.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // sMAPE matches hand computation and skips zero denominators.
    //
    // Given
    // -----
    // - y = [10, 0, 20], ŷ = [12, 0, 20]: only the first pair has error.
    //
    // Expect
    // ------
    // - sMAPE = 100 · (2/11) / 2 (two usable pairs) ≈ 9.0909.
    // - All-zero input gives 0; empty input gives NaN.
    fn smape_masks_zero_denominators() {
        let value = smape(array![10.0, 0.0, 20.0].view(), array![12.0, 0.0, 20.0].view());

        assert_relative_eq!(value, 100.0 * (2.0 / 11.0) / 2.0, epsilon = 1e-12);
        assert_eq!(smape(array![0.0, 0.0].view(), array![0.0, 0.0].view()), 0.0);
        assert!(smape(Array1::zeros(0).view(), Array1::zeros(0).view()).is_nan());
    }

    #[test]
    // Purpose
    // -------
    // MASE uses the seasonal lag when the window allows it, lag 1 otherwise.
    //
    // Given
    // -----
    // - y = 1..=10, ŷ = y + 1 (MAE = 1).
    //
    // Expect
    // ------
    // - m = 7: scale = 7 → MASE = 1/7.
    // - m = 20 (window too short): lag-1 scale = 1 → MASE = 1.
    // - Constant actuals: NaN.
    fn mase_scales_by_seasonal_difference() {
        let y = Array1::from_iter((1..=10).map(f64::from));
        let f = &y + 1.0;

        assert_relative_eq!(mase(y.view(), f.view(), 7), 1.0 / 7.0, epsilon = 1e-12);
        assert_relative_eq!(mase(y.view(), f.view(), 20), 1.0, epsilon = 1e-12);
        assert!(mase(array![3.0, 3.0, 3.0].view(), array![1.0, 2.0, 3.0].view(), 1).is_nan());
    }

    #[test]
    // Purpose
    // -------
    // RMSE and the NaN-skipping mean.
    //
    // Given
    // -----
    // - Errors [3, −4]; values [1, NaN, 3].
    //
    // Expect
    // ------
    // - RMSE = √12.5; nan_mean = 2; nan_mean of only NaN is NaN.
    fn rmse_and_nan_mean() {
        assert_relative_eq!(
            rmse(array![0.0, 0.0].view(), array![3.0, -4.0].view()),
            12.5f64.sqrt(),
            epsilon = 1e-12
        );
        assert_eq!(nan_mean([1.0, f64::NAN, 3.0]), 2.0);
        assert!(nan_mean([f64::NAN]).is_nan());
    }

    #[test]
    // Purpose
    // -------
    // In-sample pairs drop burn-in, zero actuals and non-finite predictions.
    //
    // Given
    // -----
    // - y = [5, 6, 0, 7, 8], ŷ = [1, 2, 3, NaN, 4], burn_in = 1.
    //
    // Expect
    // ------
    // - Kept pairs: (6, 2) and (8, 4).
    fn in_sample_pairs_apply_mask() {
        let (y, f) = in_sample_pairs(
            array![5.0, 6.0, 0.0, 7.0, 8.0].view(),
            array![1.0, 2.0, 3.0, f64::NAN, 4.0].view(),
            1,
        );

        assert_eq!(y, array![6.0, 8.0]);
        assert_eq!(f, array![2.0, 4.0]);
    }
}
