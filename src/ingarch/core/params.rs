//! NB-INGARCH(p, q) parameterization and scratch workspace.
//!
//! This module provides the **model-space** parameter container
//! [`IngarchParams`] and a reusable scratch workspace [`IngarchScratch`] used
//! by the likelihood and in-sample recursion.
//!
//! ## Layout
//! The optimizer works directly on the flat vector
//! `θ = [β₀, β₁..β_p, γ₁..γ_k, α₀, α₁..α_q]` (see
//! [`ModelSpec`](crate::ingarch::core::shape::ModelSpec)). No transform is
//! applied: positivity of μ and φ is enforced by floors inside the
//! recursion, not by reparameterization, so any finite θ is admissible.
//!
//! ## Scratch buffers (sizes)
//! - `mu_buf`:    length `n` (conditional means μ_t)
//! - `resid_buf`: length `n` (raw residuals ε_t = y_t − μ_t)
//! - `phi_buf`:   length `n` (conditional dispersions φ_t)
//!
//! Buffers live behind `RefCell` so `LogLikelihood::value(&self, ..)` can
//! reuse them across optimizer evaluations without allocating.
use crate::ingarch::{
    core::shape::ModelSpec,
    errors::{IngarchError, IngarchResult},
};
use ndarray::{Array1, ArrayView1, s};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// Scratch workspace for in-sample recursions.
#[derive(Debug, Clone, PartialEq)]
pub struct IngarchScratch {
    /// Scratch buffer for μ.
    pub mu_buf: RefCell<Array1<f64>>,
    /// Scratch buffer for ε = y − μ.
    pub resid_buf: RefCell<Array1<f64>>,
    /// Scratch buffer for φ.
    pub phi_buf: RefCell<Array1<f64>>,
}

impl IngarchScratch {
    /// Construct a new [`IngarchScratch`] sized for a series of length `n`.
    pub fn new(n: usize) -> Self {
        IngarchScratch {
            mu_buf: RefCell::new(Array1::zeros(n)),
            resid_buf: RefCell::new(Array1::zeros(n)),
            phi_buf: RefCell::new(Array1::zeros(n)),
        }
    }

    /// Grow (never shrink) the buffers so they hold at least `n` values.
    pub fn ensure_len(&self, n: usize) {
        for buf in [&self.mu_buf, &self.resid_buf, &self.phi_buf] {
            if buf.borrow().len() < n {
                *buf.borrow_mut() = Array1::zeros(n);
            }
        }
    }
}

/// Model-space parameters of a fitted NB-INGARCH(p, q).
///
/// Plain data (`Send + Sync`), immutable after fitting, serializable as part
/// of a model artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngarchParams {
    /// Intercept of the conditional mean.
    pub beta0: f64,
    /// AR coefficients on lagged counts, `beta[i]` multiplies `y_{t-i-1}`.
    pub beta: Array1<f64>,
    /// Exogenous coefficients.
    pub gamma: Array1<f64>,
    /// Base dispersion.
    pub alpha0: f64,
    /// ARCH coefficients on lagged Pearson residuals.
    pub alpha: Array1<f64>,
}

impl IngarchParams {
    /// Split a flat θ into named blocks according to `spec`.
    ///
    /// Errors
    /// ------
    /// - `ThetaLengthMismatch` if `theta.len() != spec.n_params()`.
    /// - `InvalidThetaInput` for the first non-finite entry.
    pub fn from_theta(theta: ArrayView1<f64>, spec: &ModelSpec) -> IngarchResult<Self> {
        validate_theta(theta, spec)?;
        Ok(IngarchParams {
            beta0: theta[0],
            beta: theta.slice(s![spec.ar_range()]).to_owned(),
            gamma: theta.slice(s![spec.exog_range()]).to_owned(),
            alpha0: theta[spec.alpha0_index()],
            alpha: theta.slice(s![spec.arch_range()]).to_owned(),
        })
    }

    /// Flatten back into the optimizer layout.
    pub fn to_theta(&self) -> Array1<f64> {
        let mut theta = Vec::with_capacity(2 + self.beta.len() + self.gamma.len() + self.alpha.len());
        theta.push(self.beta0);
        theta.extend(self.beta.iter().copied());
        theta.extend(self.gamma.iter().copied());
        theta.push(self.alpha0);
        theta.extend(self.alpha.iter().copied());
        Array1::from(theta)
    }

    /// Spec implied by the block lengths.
    pub fn spec(&self) -> ModelSpec {
        ModelSpec::new(self.beta.len(), self.alpha.len(), self.gamma.len())
    }
}

/// Check θ length and finiteness against `spec`.
pub fn validate_theta(theta: ArrayView1<f64>, spec: &ModelSpec) -> IngarchResult<()> {
    if theta.len() != spec.n_params() {
        return Err(IngarchError::ThetaLengthMismatch {
            expected: spec.n_params(),
            actual: theta.len(),
        });
    }
    for (index, &value) in theta.iter().enumerate() {
        if !value.is_finite() {
            return Err(IngarchError::InvalidThetaInput { index, value });
        }
    }
    Ok(())
}
