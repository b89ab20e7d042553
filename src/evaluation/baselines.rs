//! Naive reference forecasters used to judge the model.
//!
//! Both baselines produce one prediction per observation using only earlier
//! actuals, and back-fill the leading positions that have no history:
//!
//! - [`Baseline::MovingAverage`]: `ŷ_t = mean(y_{t−w}..y_{t−1})`; positions
//!   `t < w` take the first available value `ŷ_w`. A series of length `≤ w`
//!   has no defined value and yields all-`NaN`.
//! - [`Baseline::Naive`]: `ŷ_t = y_{t−1}`, with `ŷ_0 = y_0`.
use crate::evaluation::errors::{EvalError, EvalResult};
use ndarray::{Array1, ArrayView1, s};
use serde::{Deserialize, Serialize};

/// Window of the weekly moving-average baseline.
pub const MA7_WINDOW: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Baseline {
    MovingAverage(usize),
    Naive,
}

impl Baseline {
    /// Moving average of width `window`.
    ///
    /// Errors
    /// ------
    /// - `EvalError::InvalidWindow` for `window == 0`.
    pub fn moving_average(window: usize) -> EvalResult<Self> {
        if window == 0 {
            return Err(EvalError::InvalidWindow { window });
        }
        Ok(Baseline::MovingAverage(window))
    }

    pub fn name(&self) -> String {
        match self {
            Baseline::MovingAverage(w) => format!("MA{w}"),
            Baseline::Naive => "Naive-1".to_string(),
        }
    }

    /// One prediction per element of `counts`.
    pub fn predict(&self, counts: ArrayView1<f64>) -> Array1<f64> {
        match *self {
            Baseline::MovingAverage(window) => moving_average(counts, window),
            Baseline::Naive => naive(counts),
        }
    }
}

fn moving_average(counts: ArrayView1<f64>, window: usize) -> Array1<f64> {
    let n = counts.len();
    let window = window.max(1);
    let mut preds = Array1::from_elem(n, f64::NAN);
    if n <= window {
        return preds;
    }
    let mut sum: f64 = counts.slice(s![..window]).sum();
    for t in window..n {
        preds[t] = sum / window as f64;
        sum += counts[t] - counts[t - window];
    }
    let first = preds[window];
    preds.slice_mut(s![..window]).fill(first);
    preds
}

fn naive(counts: ArrayView1<f64>) -> Array1<f64> {
    let n = counts.len();
    let mut preds = Array1::zeros(n);
    if n == 0 {
        return preds;
    }
    preds[0] = counts[0];
    preds.slice_mut(s![1..]).assign(&counts.slice(s![..n - 1]));
    preds
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // The moving average uses only past values and back-fills the head.
    //
    // Given
    // -----
    // - y = [1, 2, 3, 4, 5], window 2.
    //
    // Expect
    // ------
    // - ŷ = [1.5, 1.5, 1.5, 2.5, 3.5]; a window of 5 yields all NaN.
    fn moving_average_is_lagged_and_backfilled() {
        let y = array![1.0, 2.0, 3.0, 4.0, 5.0];

        let preds = Baseline::moving_average(2).expect("positive window").predict(y.view());
        let undefined = Baseline::MovingAverage(5).predict(y.view());

        assert_eq!(preds, array![1.5, 1.5, 1.5, 2.5, 3.5]);
        assert!(undefined.iter().all(|v| v.is_nan()));
        assert_eq!(Baseline::moving_average(0), Err(EvalError::InvalidWindow { window: 0 }));
    }

    #[test]
    // Purpose
    // -------
    // The naive baseline repeats yesterday and back-fills day one.
    //
    // Given
    // -----
    // - y = [4, 7, 1].
    //
    // Expect
    // ------
    // - ŷ = [4, 4, 7]; names are "MA7" and "Naive-1".
    fn naive_repeats_previous_value() {
        assert_eq!(Baseline::Naive.predict(array![4.0, 7.0, 1.0].view()), array![4.0, 4.0, 7.0]);
        assert_eq!(Baseline::MovingAverage(MA7_WINDOW).name(), "MA7");
        assert_eq!(Baseline::Naive.name(), "Naive-1");
    }
}
