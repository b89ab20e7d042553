//! NB-INGARCH(p, q) maximum-likelihood estimator.
//!
//! This module wires an NB-INGARCH model order to the `LogLikelihood`
//! trait and drives the Nelder–Mead optimizer. The objective reuses
//! `RefCell` scratch buffers, so one [`IngarchModel`] evaluates many
//! candidate θ without allocating.
//!
//! Outcomes of [`IngarchModel::fit`]:
//! - the stopping rule fires: `FittedModel::Mle` with `converged = true`;
//! - the iteration cap or timeout is hit: the best point is kept,
//!   `converged = false`, and a warning is logged;
//! - the optimizer or objective errors out: the AR(1) fallback is fitted on
//!   the same counts and a warning is logged;
//! - fewer than three observations: the fallback is used without trying MLE.
//!
//! [`fit_guarded`] adds the degeneracy check on top: a fit whose in-sample
//! sMAPE exceeds `FitOptions::degenerate_smape_pct` is replaced by the
//! fallback.
use crate::{
    evaluation::metrics::{in_sample_pairs, smape},
    ingarch::{
        core::{
            data::{ExogenousMatrix, FitData, ObservationSeries},
            options::FitOptions,
            params::{IngarchParams, IngarchScratch, validate_theta},
            recursion::log_likelihood,
            shape::ModelSpec,
        },
        errors::{IngarchError, IngarchResult},
        models::{
            fallback::{FallbackFit, FallbackReason},
            fitted::{FittedModel, IngarchFit},
        },
    },
    optimization::{
        errors::OptResult,
        loglik_optimizer::{LogLikelihood, Theta, maximize},
    },
};
use tracing::{debug, info, warn};

/// Smallest series on which maximum likelihood is attempted.
pub const MIN_MLE_OBSERVATIONS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct IngarchModel {
    pub spec: ModelSpec,
    pub options: FitOptions,
    pub scratch_bufs: IngarchScratch,
}

impl IngarchModel {
    pub fn new(spec: ModelSpec, options: FitOptions, n: usize) -> IngarchModel {
        IngarchModel { spec, options, scratch_bufs: IngarchScratch::new(n) }
    }

    /// Estimate the model on `counts` (plus `exog` when the model has
    /// regressors).
    ///
    /// Errors
    /// ------
    /// - Covariate shape errors from [`FitData::new`].
    /// - `ThetaLengthMismatch` / `InvalidThetaInput` for a bad fixed start.
    ///
    /// Optimizer failures are not errors: they produce the fallback variant.
    pub fn fit(
        &self, series: &ObservationSeries, exog: Option<&ExogenousMatrix>,
    ) -> IngarchResult<FittedModel> {
        let data = FitData::new(series, exog, self.spec.n_exog)?;
        self.fit_data(&data)
    }

    /// Same as [`IngarchModel::fit`] on already-aligned data.
    pub fn fit_data(&self, data: &FitData) -> IngarchResult<FittedModel> {
        let counts = data.counts.view();
        if data.len() < MIN_MLE_OBSERVATIONS {
            info!(n = data.len(), "series too short for maximum likelihood; using AR(1) fallback");
            return Ok(FittedModel::Fallback(FallbackFit::estimate(
                counts,
                self.spec,
                FallbackReason::ShortSeries,
            )));
        }

        self.estimate_with(self, data)
    }

    /// Maximize `objective` from the configured start and map the outcome to
    /// a fitted model; optimizer errors other than a bad start fall back to
    /// AR(1).
    fn estimate_with<L>(&self, objective: &L, data: &FitData) -> IngarchResult<FittedModel>
    where
        L: LogLikelihood<Data = FitData>,
    {
        let counts = data.counts.view();
        let theta0 = self.options.init.resolve(counts, &self.spec)?;
        debug!(?theta0, spec = ?self.spec, "starting Nelder-Mead");
        match maximize(objective, theta0, data, &self.options.mle_opts) {
            Ok(outcome) => {
                if !outcome.converged {
                    warn!(
                        status = %outcome.status,
                        iterations = outcome.iterations,
                        "NB-INGARCH optimizer stopped before converging; keeping best parameters"
                    );
                }
                let params = IngarchParams::from_theta(outcome.theta_hat.view(), &self.spec)?;
                Ok(FittedModel::Mle(IngarchFit {
                    params,
                    floors: self.options.floors,
                    log_likelihood: outcome.value,
                    converged: outcome.converged,
                    iterations: outcome.iterations,
                }))
            }
            Err(err) => {
                let err = IngarchError::from(err);
                if matches!(
                    err,
                    IngarchError::ThetaLengthMismatch { .. } | IngarchError::InvalidThetaInput { .. }
                ) {
                    return Err(err);
                }
                warn!(error = %err, "NB-INGARCH estimation failed; using AR(1) fallback");
                Ok(FittedModel::Fallback(FallbackFit::estimate(
                    counts,
                    self.spec,
                    FallbackReason::OptimizerFailed,
                )))
            }
        }
    }
}

impl LogLikelihood for IngarchModel {
    type Data = FitData;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        Ok(log_likelihood(theta.view(), &self.spec, &self.options.floors, data, &self.scratch_bufs))
    }

    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        validate_theta(theta.view(), &self.spec)?;
        let exog_cols = data.exog.as_ref().map_or(0, |x| x.ncols());
        if exog_cols != self.spec.n_exog {
            return Err(IngarchError::ExogColumnMismatch {
                expected: self.spec.n_exog,
                actual: exog_cols,
            }
            .into());
        }
        Ok(())
    }
}

/// Fit with the degeneracy guard.
///
/// After an MLE fit, in-sample one-step predictions are scored with sMAPE on
/// observations past burn-in whose actual count is positive. When that score
/// is finite and above `options.degenerate_smape_pct`, the fit is replaced by
/// the AR(1) fallback (`FallbackReason::Degenerate`).
///
/// Errors
/// ------
/// - Same as [`IngarchModel::fit`].
pub fn fit_guarded(
    series: &ObservationSeries, exog: Option<&ExogenousMatrix>, spec: ModelSpec,
    options: &FitOptions,
) -> IngarchResult<FittedModel> {
    let model = IngarchModel::new(spec, options.clone(), series.len());
    let fitted = model.fit(series, exog)?;
    if !matches!(fitted, FittedModel::Mle(_)) {
        return Ok(fitted);
    }

    let counts = series.counts();
    let predicted = fitted.one_step_ahead(counts, exog)?;
    let (actual, predicted) = in_sample_pairs(counts, predicted.view(), spec.burn_in());
    let score = smape(actual.view(), predicted.view());
    if score.is_finite() && score > options.degenerate_smape_pct {
        warn!(
            smape = score,
            threshold = options.degenerate_smape_pct,
            "degenerate NB-INGARCH fit; replacing with AR(1) fallback"
        );
        return Ok(FittedModel::Fallback(FallbackFit::estimate(
            counts,
            spec,
            FallbackReason::Degenerate,
        )));
    }
    Ok(fitted)
}
