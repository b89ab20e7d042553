//! Fit options: estimation-time configuration for NB-INGARCH models.
//!
//! Purpose
//! -------
//! Bundle the knobs of a single fit (optimizer settings, floors, start
//! policy, and the degeneracy threshold) so public APIs take one validated
//! value instead of a list of loose arguments.
//!
//! Invariants & assumptions
//! ------------------------
//! - `mle_opts`, `floors` and `init` are validated by their own constructors.
//! - `degenerate_smape_pct` is finite and `> 0`; checked by
//!   [`FitOptions::new`].
//!
//! Downstream usage
//! ----------------
//! - The training pipeline derives a `FitOptions` per sampling mode by
//!   swapping only the iteration cap (see `MLEOptions::with_max_iter`).
use crate::{
    ingarch::{
        core::{guards::Floors, init::Init},
        errors::{IngarchError, IngarchResult},
    },
    optimization::loglik_optimizer::MLEOptions,
};

/// In-sample sMAPE (percent) above which a fit is treated as degenerate.
pub const DEFAULT_DEGENERATE_SMAPE_PCT: f64 = 95.0;

/// Estimation-time configuration for NB-INGARCH(p, q).
///
/// Fields
/// ------
/// - `mle_opts`: Nelder–Mead tolerances, iteration cap, simplex steps and
///   optional wall-clock timeout.
/// - `floors`: lower bounds applied to μ_t and φ_t.
/// - `init`: starting-point policy.
/// - `degenerate_smape_pct`: guarded fits fall back to AR(1) when the
///   in-sample sMAPE exceeds this value.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOptions {
    pub mle_opts: MLEOptions,
    pub floors: Floors,
    pub init: Init,
    pub degenerate_smape_pct: f64,
}

impl FitOptions {
    /// Construct validated fit options.
    ///
    /// Errors
    /// ------
    /// - `IngarchError::InvalidDegenerateThreshold` when the threshold is not
    ///   finite or not strictly positive.
    pub fn new(
        mle_opts: MLEOptions, floors: Floors, init: Init, degenerate_smape_pct: f64,
    ) -> IngarchResult<Self> {
        if !degenerate_smape_pct.is_finite() || degenerate_smape_pct <= 0.0 {
            return Err(IngarchError::InvalidDegenerateThreshold { value: degenerate_smape_pct });
        }
        Ok(FitOptions { mle_opts, floors, init, degenerate_smape_pct })
    }

    /// Copy of these options with a different iteration cap.
    ///
    /// Errors
    /// ------
    /// - Propagates `OptError::InvalidMaxIter` (as `OptimizationFailed`) when
    ///   `max_iter == 0`.
    pub fn with_max_iter(&self, max_iter: usize) -> IngarchResult<Self> {
        Ok(FitOptions { mle_opts: self.mle_opts.with_max_iter(max_iter)?, ..self.clone() })
    }
}

impl Default for FitOptions {
    fn default() -> Self {
        FitOptions {
            mle_opts: MLEOptions::default(),
            floors: Floors::default(),
            init: Init::default(),
            degenerate_smape_pct: DEFAULT_DEGENERATE_SMAPE_PCT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Threshold validation and the iteration-cap override.
    //
    // Given
    // -----
    // - Thresholds 0, NaN and 50; default options overridden to 300 iterations,
    //   and a zero cap.
    //
    // Expect
    // ------
    // - The first two are rejected; `with_max_iter` changes only the cap and
    //   rejects zero.
    fn fit_options_validate_threshold_and_override_cap() {
        let base = FitOptions::default();

        let zero = FitOptions::new(base.mle_opts.clone(), base.floors, Init::Heuristic, 0.0);
        let nan = FitOptions::new(base.mle_opts.clone(), base.floors, Init::Heuristic, f64::NAN);
        let ok = FitOptions::new(base.mle_opts.clone(), base.floors, Init::Heuristic, 50.0);
        let capped = base.with_max_iter(300).expect("positive cap");

        assert_eq!(zero, Err(IngarchError::InvalidDegenerateThreshold { value: 0.0 }));
        assert!(nan.is_err());
        assert!(ok.is_ok());
        assert_eq!(capped.mle_opts.tols.max_iter, Some(300));
        assert_eq!(capped.floors, base.floors);
        assert_eq!(capped.degenerate_smape_pct, DEFAULT_DEGENERATE_SMAPE_PCT);
        assert!(base.with_max_iter(0).is_err());
    }
}
