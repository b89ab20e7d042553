//! Fitted models: the tagged result of an estimation and its artifact form.
//!
//! Purpose
//! -------
//! Give callers one immutable value that can forecast, whether maximum
//! likelihood succeeded or the AR(1) fallback had to step in. The variant is
//! explicit ([`FittedModel::Mle`] vs [`FittedModel::Fallback`]) so reports
//! can say which estimator produced a forecast and why.
//!
//! Key behaviors
//! -------------
//! - [`FittedModel::forecast`] and [`FittedModel::one_step_ahead`] are the
//!   uniform prediction surface for both variants, with the same covariate
//!   checks.
//! - [`ModelArtifact`] is the serializable form of a fitted model together
//!   with the covariate column names used at training time;
//!   [`FittedModel::from_artifact`] validates it before use.
//!
//! Invariants & assumptions
//! ------------------------
//! - A `FittedModel` is plain data (`Send + Sync`) and never mutated after
//!   construction; sharing it across threads needs no locking.
//! - Forecasts are always `≥ 0`: the MLE path floors μ at the mean floor and
//!   the fallback clamps at zero.
//! - Covariates passed at prediction time must have `spec().n_exog`
//!   columns, even for the fallback (which ignores their values).
use crate::ingarch::{
    core::{
        data::{ExogenousMatrix, check_exog},
        forecasts::{forecast_recursion, one_step_ahead},
        guards::Floors,
        params::IngarchParams,
        progress::FitState,
        shape::ModelSpec,
    },
    errors::{IngarchError, IngarchResult},
    models::fallback::{FallbackFit, FallbackReason},
};
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

/// Which estimator produced a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EstimatorKind {
    NbIngarch,
    ArFallback,
}

/// Result of a maximum-likelihood NB-INGARCH fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngarchFit {
    pub params: IngarchParams,
    pub floors: Floors,
    /// Log-likelihood at the returned parameters.
    pub log_likelihood: f64,
    /// `false` when the optimizer stopped on its iteration cap or timeout.
    pub converged: bool,
    pub iterations: usize,
}

/// A fitted count model, either NB-INGARCH or the AR(1) fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FittedModel {
    Mle(IngarchFit),
    Fallback(FallbackFit),
}

impl FittedModel {
    pub fn spec(&self) -> ModelSpec {
        match self {
            FittedModel::Mle(fit) => fit.params.spec(),
            FittedModel::Fallback(fit) => fit.spec,
        }
    }

    pub fn kind(&self) -> EstimatorKind {
        match self {
            FittedModel::Mle(_) => EstimatorKind::NbIngarch,
            FittedModel::Fallback(_) => EstimatorKind::ArFallback,
        }
    }

    /// Terminal estimator state.
    pub fn state(&self) -> FitState {
        match self {
            FittedModel::Mle(fit) if fit.converged => FitState::Converged,
            FittedModel::Mle(_) => FitState::ConvergenceWarning,
            FittedModel::Fallback(_) => FitState::Fallback,
        }
    }

    /// Log-likelihood of the MLE fit; `None` for the fallback.
    pub fn log_likelihood(&self) -> Option<f64> {
        match self {
            FittedModel::Mle(fit) => Some(fit.log_likelihood),
            FittedModel::Fallback(_) => None,
        }
    }

    /// Whether the optimizer's stopping rule fired. Always `false` for the
    /// fallback.
    pub fn converged(&self) -> bool {
        matches!(self, FittedModel::Mle(fit) if fit.converged)
    }

    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        match self {
            FittedModel::Mle(_) => None,
            FittedModel::Fallback(fit) => Some(fit.reason),
        }
    }

    /// Point forecasts for `horizon` steps after `history`.
    ///
    /// `exog`, when the model has covariates, must hold one row per step.
    ///
    /// Errors
    /// ------
    /// - `InvalidHorizon` for `horizon == 0`.
    /// - `ExogColumnMismatch` / `ExogRowMismatch` when `exog` does not have
    ///   shape `horizon × n_exog` (or is missing while `n_exog > 0`).
    pub fn forecast(
        &self, history: ArrayView1<f64>, exog: Option<&ExogenousMatrix>, horizon: usize,
    ) -> IngarchResult<Array1<f64>> {
        if horizon == 0 {
            return Err(IngarchError::InvalidHorizon { horizon });
        }
        check_exog(exog, self.spec().n_exog, horizon)?;
        Ok(match self {
            FittedModel::Mle(fit) => forecast_recursion(
                &fit.params,
                &fit.floors,
                history,
                covariates(exog, &fit.params),
                horizon,
            ),
            FittedModel::Fallback(fit) => fit.forecast(history, horizon),
        })
    }

    /// In-sample one-step-ahead predictions for `counts`.
    ///
    /// Errors
    /// ------
    /// - Same covariate checks as [`FittedModel::forecast`], against
    ///   `counts.len()` rows.
    pub fn one_step_ahead(
        &self, counts: ArrayView1<f64>, exog: Option<&ExogenousMatrix>,
    ) -> IngarchResult<Array1<f64>> {
        check_exog(exog, self.spec().n_exog, counts.len())?;
        Ok(match self {
            FittedModel::Mle(fit) => {
                one_step_ahead(&fit.params, &fit.floors, counts, covariates(exog, &fit.params))
            }
            FittedModel::Fallback(fit) => fit.one_step_ahead(counts),
        })
    }

    /// Serializable form of this model, tagged with the training columns.
    ///
    /// Errors
    /// ------
    /// - `ExogColumnMismatch` if `exog_columns.len() != spec().n_exog`.
    pub fn to_artifact(&self, exog_columns: &[String]) -> IngarchResult<ModelArtifact> {
        let spec = self.spec();
        if exog_columns.len() != spec.n_exog {
            return Err(IngarchError::ExogColumnMismatch {
                expected: spec.n_exog,
                actual: exog_columns.len(),
            });
        }
        let (params, floors, fallback, iterations) = match self {
            FittedModel::Mle(fit) => (fit.params.to_theta().to_vec(), fit.floors, None, fit.iterations),
            FittedModel::Fallback(fit) => (Vec::new(), Floors::default(), Some(fit.clone()), 0),
        };
        Ok(ModelArtifact {
            spec,
            estimator: self.kind(),
            params,
            floors,
            exog_columns: exog_columns.to_vec(),
            fallback,
            log_likelihood: self.log_likelihood(),
            converged: self.converged(),
            iterations,
        })
    }

    /// Rebuild a model from an artifact after checking its consistency.
    ///
    /// Errors
    /// ------
    /// - `InvalidArtifact` when the estimator tag, parameter block, fallback
    ///   block and column list disagree with each other or with `spec`.
    /// - `InvalidFloors` / `InvalidThetaInput` for non-finite stored values.
    pub fn from_artifact(artifact: &ModelArtifact) -> IngarchResult<FittedModel> {
        let spec = artifact.spec;
        if artifact.exog_columns.len() != spec.n_exog {
            return Err(IngarchError::InvalidArtifact {
                reason: format!(
                    "{} exogenous columns recorded for a model with {} regressors",
                    artifact.exog_columns.len(),
                    spec.n_exog
                ),
            });
        }
        match (artifact.estimator, &artifact.fallback) {
            (EstimatorKind::NbIngarch, None) => {
                let theta = Array1::from(artifact.params.clone());
                if theta.len() != spec.n_params() {
                    return Err(IngarchError::InvalidArtifact {
                        reason: format!(
                            "expected {} parameters for {:?}, found {}",
                            spec.n_params(),
                            spec,
                            theta.len()
                        ),
                    });
                }
                let params = IngarchParams::from_theta(theta.view(), &spec)?;
                let floors = Floors::new(artifact.floors.mean, artifact.floors.dispersion)?;
                let log_likelihood = artifact.log_likelihood.ok_or_else(|| {
                    IngarchError::InvalidArtifact {
                        reason: "maximum-likelihood artifact without a log-likelihood".to_string(),
                    }
                })?;
                Ok(FittedModel::Mle(IngarchFit {
                    params,
                    floors,
                    log_likelihood,
                    converged: artifact.converged,
                    iterations: artifact.iterations,
                }))
            }
            (EstimatorKind::ArFallback, Some(fit)) => {
                if fit.spec != spec {
                    return Err(IngarchError::InvalidArtifact {
                        reason: format!("fallback spec {:?} differs from {:?}", fit.spec, spec),
                    });
                }
                if !fit.phi.is_finite() || !fit.intercept.is_finite() {
                    return Err(IngarchError::InvalidArtifact {
                        reason: "fallback coefficients must be finite".to_string(),
                    });
                }
                Ok(FittedModel::Fallback(fit.clone()))
            }
            (estimator, fallback) => Err(IngarchError::InvalidArtifact {
                reason: format!(
                    "estimator {estimator:?} inconsistent with fallback block present = {}",
                    fallback.is_some()
                ),
            }),
        }
    }
}

/// Serializable snapshot of a fitted model.
///
/// `params` holds the flat θ for the NB-INGARCH variant and is empty for the
/// fallback, whose coefficients live in `fallback`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub spec: ModelSpec,
    pub estimator: EstimatorKind,
    pub params: Vec<f64>,
    pub floors: Floors,
    pub exog_columns: Vec<String>,
    pub fallback: Option<FallbackFit>,
    pub log_likelihood: Option<f64>,
    pub converged: bool,
    pub iterations: usize,
}

impl ModelArtifact {
    /// Check that prediction-time covariates use the training columns, in
    /// the same order.
    ///
    /// Errors
    /// ------
    /// - `ExogColumnNames` on any difference.
    pub fn check_columns(&self, columns: &[String]) -> IngarchResult<()> {
        if self.exog_columns.as_slice() != columns {
            return Err(IngarchError::ExogColumnNames {
                expected: self.exog_columns.clone(),
                actual: columns.to_vec(),
            });
        }
        Ok(())
    }
}

fn covariates<'a>(
    exog: Option<&'a ExogenousMatrix>, params: &IngarchParams,
) -> Option<ndarray::ArrayView2<'a, f64>> {
    if params.gamma.is_empty() { None } else { exog.map(|x| x.values()) }
}
