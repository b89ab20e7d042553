//! Model order (p, q) and parameter layout for NB-INGARCH models.
//!
//! - `p`: number of **count lags** in the conditional mean (β₁…β_p).
//! - `q`: number of **Pearson-residual lags** in the dispersion (α₁…α_q).
//! - `n_exog`: number of exogenous regressors (γ₁…γ_k).
//!
//! The flat parameter vector is laid out as
//! `[β₀, β₁..β_p, γ₁..γ_k, α₀, α₁..α_q]`, so its length is
//! `1 + p + n_exog + 1 + q`.
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Order and regressor count of an NB-INGARCH(p, q) model.
///
/// `p = q = 0` is allowed and reduces to an i.i.d. Negative-Binomial model
/// with (optionally) exogenous mean shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelSpec {
    pub p: usize,
    pub q: usize,
    pub n_exog: usize,
}

impl ModelSpec {
    pub fn new(p: usize, q: usize, n_exog: usize) -> Self {
        ModelSpec { p, q, n_exog }
    }

    /// Number of leading observations excluded from the likelihood.
    pub fn burn_in(&self) -> usize {
        self.p.max(self.q)
    }

    /// Total number of free parameters.
    pub fn n_params(&self) -> usize {
        1 + self.p + self.n_exog + 1 + self.q
    }

    /// Slots of the AR coefficients β₁..β_p.
    pub fn ar_range(&self) -> Range<usize> {
        1..1 + self.p
    }

    /// Slots of the exogenous coefficients γ₁..γ_k.
    pub fn exog_range(&self) -> Range<usize> {
        1 + self.p..1 + self.p + self.n_exog
    }

    /// Slot of the base dispersion α₀.
    pub fn alpha0_index(&self) -> usize {
        1 + self.p + self.n_exog
    }

    /// Slots of the ARCH coefficients α₁..α_q.
    pub fn arch_range(&self) -> Range<usize> {
        let start = self.alpha0_index() + 1;
        start..start + self.q
    }
}

impl Default for ModelSpec {
    fn default() -> Self {
        ModelSpec { p: 1, q: 1, n_exog: 0 }
    }
}
