//! Starting values for NB-INGARCH maximum likelihood.
//!
//! Purpose
//! -------
//! Decide where the Nelder–Mead simplex starts. A good start matters more
//! for a derivative-free optimizer than for gradient methods, so the default
//! policy derives θ₀ from sample moments of the training counts.
//!
//! Key behaviors
//! -------------
//! - [`Init::Heuristic`] builds θ₀ from the data (see [`heuristic_theta`]).
//! - [`Init::Fixed`] carries a caller-supplied θ₀ (e.g. a warm start from a
//!   previous run), validated against the model layout when resolved.
//!
//! Heuristic
//! ---------
//! - β₀ = 0.3 · ȳ
//! - β_i = corr(y_{t}, y_{t−i}) clamped to `[0.05, 0.4]`; `0.1` when the lag
//!   leaves fewer than two pairs or the correlation is not finite.
//! - γ_j = 0.01
//! - α₀ = clamp(Var(y) / max(ȳ, 1) − 1, 0.05, 0.3) with the population
//!   variance.
//! - α_i = 0.03
use crate::{
    ingarch::{
        core::{params::validate_theta, shape::ModelSpec},
        errors::IngarchResult,
    },
    optimization::numerical_stability::clip,
};
use ndarray::{Array1, ArrayView1, s};
use serde::{Deserialize, Serialize};

const INTERCEPT_SHARE: f64 = 0.3;
const AR_BOUNDS: (f64, f64) = (0.05, 0.4);
/// Used when the lag correlation is undefined (short or constant series); a
/// NaN correlation does not fall through to the upper clamp of 0.4.
const AR_DEFAULT: f64 = 0.1;
const EXOG_START: f64 = 0.01;
const ALPHA0_BOUNDS: (f64, f64) = (0.05, 0.3);
const ARCH_START: f64 = 0.03;

/// Initialization policy for the optimizer's starting point.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Init {
    /// Moment-based starting values derived from the training counts.
    #[default]
    Heuristic,
    /// Explicit θ₀ in the flat layout `[β₀, β, γ, α₀, α]`.
    Fixed(Array1<f64>),
}

impl Init {
    /// Produce θ₀ for `spec` given the training counts.
    ///
    /// Errors
    /// ------
    /// - `ThetaLengthMismatch` / `InvalidThetaInput` when a fixed start does
    ///   not fit the layout of `spec`.
    pub fn resolve(&self, counts: ArrayView1<f64>, spec: &ModelSpec) -> IngarchResult<Array1<f64>> {
        match self {
            Init::Heuristic => Ok(heuristic_theta(counts, spec)),
            Init::Fixed(theta) => {
                validate_theta(theta.view(), spec)?;
                Ok(theta.clone())
            }
        }
    }
}

/// Moment-based θ₀ for `spec`.
pub fn heuristic_theta(counts: ArrayView1<f64>, spec: &ModelSpec) -> Array1<f64> {
    let mean = counts.mean().unwrap_or(0.0);
    let var = if counts.is_empty() { 0.0 } else { counts.var(0.0) };

    let mut theta = Array1::zeros(spec.n_params());
    theta[0] = INTERCEPT_SHARE * mean;
    for (i, slot) in spec.ar_range().enumerate() {
        theta[slot] = lag_correlation(counts, i + 1)
            .map(|rho| clip(rho, AR_BOUNDS.0, AR_BOUNDS.1))
            .unwrap_or(AR_DEFAULT);
    }
    theta.slice_mut(s![spec.exog_range()]).fill(EXOG_START);
    theta[spec.alpha0_index()] = clip(var / mean.max(1.0) - 1.0, ALPHA0_BOUNDS.0, ALPHA0_BOUNDS.1);
    theta.slice_mut(s![spec.arch_range()]).fill(ARCH_START);
    theta
}

/// Pearson correlation between `y[lag..]` and `y[..n-lag]`.
///
/// `None` when fewer than two pairs exist or either side is constant.
fn lag_correlation(y: ArrayView1<f64>, lag: usize) -> Option<f64> {
    let n = y.len();
    if n < lag + 2 {
        return None;
    }
    let lead = y.slice(s![lag..]);
    let lagged = y.slice(s![..n - lag]);
    let (m_lead, m_lagged) = (lead.mean()?, lagged.mean()?);
    let mut cov = 0.0;
    let mut v_lead = 0.0;
    let mut v_lagged = 0.0;
    for (&a, &b) in lead.iter().zip(lagged.iter()) {
        cov += (a - m_lead) * (b - m_lagged);
        v_lead += (a - m_lead).powi(2);
        v_lagged += (b - m_lagged).powi(2);
    }
    let rho = cov / (v_lead * v_lagged).sqrt();
    rho.is_finite().then_some(rho)
}
