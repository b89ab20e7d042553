//! Closed-form AR(1) fallback estimator.
//!
//! Used whenever maximum likelihood cannot produce a usable NB-INGARCH fit:
//! the optimizer fails outright, the fit is degenerate, or the series is too
//! short to estimate anything. Estimation is a through-the-origin regression
//! of `y_t` on `y_{t−1}` followed by an intercept correction:
//!
//! ```text
//! φ̂         = Σ y_t·y_{t−1} / max(Σ y_{t−1}², 1e-6)
//! intercept = mean(y_t) − φ̂ · mean(y_{t−1})
//! ```
//!
//! With fewer than three observations φ̂ is 0 and the intercept is the
//! sample mean (0 for an empty series). Predictions follow
//! `ŷ = max(intercept + φ̂ · prev, 0)`, so they are never negative.
use crate::{
    ingarch::core::shape::ModelSpec, optimization::numerical_stability::safe_ratio,
};
use ndarray::{Array1, ArrayView1, s};
use serde::{Deserialize, Serialize};

/// Why a fit ended up on the fallback path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FallbackReason {
    /// The optimizer or objective returned an error.
    OptimizerFailed,
    /// The MLE fit was valid but its in-sample sMAPE exceeded the threshold.
    Degenerate,
    /// Fewer than three observations; no MLE attempt was made.
    ShortSeries,
}

/// Fitted AR(1) fallback.
///
/// `spec` is the NB-INGARCH order that was requested, kept so the
/// model still validates covariates and burn-in the same way; the AR(1)
/// itself ignores covariates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackFit {
    pub spec: ModelSpec,
    pub phi: f64,
    pub intercept: f64,
    pub reason: FallbackReason,
}

impl FallbackFit {
    /// Estimate φ̂ and the intercept from `counts`.
    pub fn estimate(counts: ArrayView1<f64>, spec: ModelSpec, reason: FallbackReason) -> Self {
        let n = counts.len();
        if n < 3 {
            let intercept = counts.mean().unwrap_or(0.0);
            return FallbackFit { spec, phi: 0.0, intercept, reason };
        }
        let y_t = counts.slice(s![1..]);
        let y_lag = counts.slice(s![..n - 1]);
        let phi = safe_ratio(y_t.dot(&y_lag), y_lag.dot(&y_lag));
        let intercept = y_t.mean().unwrap_or(0.0) - phi * y_lag.mean().unwrap_or(0.0);
        FallbackFit { spec, phi, intercept, reason }
    }

    /// Geometric recursion of length `horizon` seeded from the last value of
    /// `history` (from the intercept when `history` is empty).
    pub fn forecast(&self, history: ArrayView1<f64>, horizon: usize) -> Array1<f64> {
        let mut prev = history.last().copied().unwrap_or(self.intercept);
        let mut path = Array1::zeros(horizon);
        for slot in path.iter_mut() {
            prev = self.step(prev);
            *slot = prev;
        }
        path
    }

    /// In-sample one-step predictions against actual lags; the first
    /// observation is predicted from the intercept alone.
    pub fn one_step_ahead(&self, counts: ArrayView1<f64>) -> Array1<f64> {
        Array1::from_iter((0..counts.len()).map(|t| {
            if t == 0 { self.intercept.max(0.0) } else { self.step(counts[t - 1]) }
        }))
    }

    fn step(&self, prev: f64) -> f64 {
        (self.intercept + self.phi * prev).max(0.0)
    }
}
