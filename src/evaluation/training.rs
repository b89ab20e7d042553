//! Training pipeline: fit, score, gate, and optionally backtest.
//!
//! Purpose
//! -------
//! Turn a validated series (plus optional covariates) into a fitted model, a
//! serializable artifact and a report describing how good the model is.
//!
//! Key behaviors
//! -------------
//! - [`SamplingMode`] chooses the optimizer budget (300/400/600 iterations
//!   for Demo/Fast/Full), the gate mode (relaxed for Demo/Fast, strict for
//!   Full) and whether the monthly backtest runs (Full only). Each choice
//!   can be overridden in [`TrainingOptions`].
//! - The model is fitted with the degeneracy guard, then scored in-sample on
//!   one-step predictions from burn-in onwards where the actual is positive.
//! - MA7 and naive baselines are scored on the same observations; the
//!   quality gate compares the model against MA7.
//! - Progress is reported through a [`ProgressSink`] at every stage, with a
//!   non-decreasing percentage.
//!
//! Invariants & assumptions
//! ------------------------
//! - The number of covariate columns defines `n_exog`; their names are
//!   recorded in the report and the artifact.
//! - "Trained" is not "validated": a relaxed gate can let a model through
//!   with `quality_gate.passed == false`.
use crate::{
    evaluation::{
        backtest::{BacktestOptions, BacktestReport, Backtester, MIN_TRAIN_MARGIN},
        baselines::{Baseline, MA7_WINDOW},
        errors::EvalResult,
        metrics::{DEFAULT_SEASONAL_PERIOD, ForecastMetrics, in_sample_pairs, smape},
        quality_gate::{DEFAULT_GATE_THRESHOLD_PCT, GateMode, GateVerdict, QualityGate},
    },
    ingarch::{
        core::{
            data::{ExogenousMatrix, ObservationSeries, check_exog},
            options::FitOptions,
            progress::{FitStage, FitState, ProgressEvent, ProgressSink},
            shape::ModelSpec,
        },
        models::{
            fallback::FallbackReason,
            fitted::{EstimatorKind, FittedModel, ModelArtifact},
            ingarch::fit_guarded,
        },
    },
};
use chrono::NaiveDate;
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SamplingMode {
    Demo,
    #[default]
    Fast,
    Full,
}

impl SamplingMode {
    /// Nelder–Mead iteration cap.
    pub fn max_iter(self) -> usize {
        match self {
            SamplingMode::Demo => 300,
            SamplingMode::Fast => 400,
            SamplingMode::Full => 600,
        }
    }

    pub fn gate_mode(self) -> GateMode {
        match self {
            SamplingMode::Demo | SamplingMode::Fast => GateMode::Relaxed,
            SamplingMode::Full => GateMode::Strict,
        }
    }

    pub fn runs_backtest(self) -> bool {
        matches!(self, SamplingMode::Full)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingOptions {
    pub p: usize,
    pub q: usize,
    pub mode: SamplingMode,
    /// Base fit options; the iteration cap is replaced by `mode.max_iter()`.
    pub fit_opts: FitOptions,
    pub gate_threshold_pct: f64,
    /// Overrides `mode.gate_mode()`.
    pub gate_mode: Option<GateMode>,
    /// Overrides `mode.runs_backtest()`.
    pub run_backtest: Option<bool>,
    pub parallel_backtest: bool,
}

impl TrainingOptions {
    pub fn new(p: usize, q: usize, mode: SamplingMode) -> Self {
        TrainingOptions { p, q, mode, ..TrainingOptions::default() }
    }

    pub fn effective_gate_mode(&self) -> GateMode {
        self.gate_mode.unwrap_or(self.mode.gate_mode())
    }

    pub fn runs_backtest(&self) -> bool {
        self.run_backtest.unwrap_or(self.mode.runs_backtest())
    }

    fn gate(&self) -> EvalResult<QualityGate> {
        QualityGate::new(self.gate_threshold_pct, self.effective_gate_mode())
    }

    fn fit_options(&self) -> EvalResult<FitOptions> {
        Ok(self.fit_opts.with_max_iter(self.mode.max_iter())?)
    }
}

impl Default for TrainingOptions {
    fn default() -> Self {
        TrainingOptions {
            p: 2,
            q: 1,
            mode: SamplingMode::default(),
            fit_opts: FitOptions::default(),
            gate_threshold_pct: DEFAULT_GATE_THRESHOLD_PCT,
            gate_mode: None,
            run_backtest: None,
            parallel_backtest: true,
        }
    }
}

/// In-sample accuracy of the model and the baselines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetrics {
    pub smape: f64,
    pub mase: f64,
    pub rmse: f64,
    pub ma7_smape: f64,
    pub naive_smape: f64,
    /// Observations that entered the model scores.
    pub n_scored: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub rows: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub feature_columns: Vec<String>,
    pub model_spec: ModelSpec,
    pub estimator: EstimatorKind,
    pub fallback_reason: Option<FallbackReason>,
    pub converged: bool,
    pub log_likelihood: Option<f64>,
    pub mode: SamplingMode,
    pub training_metrics: TrainingMetrics,
    pub quality_gate: GateVerdict,
    pub backtest: Option<BacktestReport>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingOutcome {
    pub model: FittedModel,
    pub artifact: ModelArtifact,
    pub report: TrainingReport,
}

/// Run the full training pipeline.
///
/// Errors
/// ------
/// - Covariate shape errors (wrapped `IngarchError`).
/// - `EvalError::InvalidThreshold` for a non-finite gate threshold.
/// - `EvalError::QualityGateFailure` when the gate is strict and missed.
/// - Model-layer errors from fitting or backtesting.
pub fn train(
    series: &ObservationSeries, exog: Option<&ExogenousMatrix>, options: &TrainingOptions,
    progress: &dyn ProgressSink,
) -> EvalResult<TrainingOutcome> {
    progress.report(ProgressEvent::new(
        FitStage::Started,
        FitState::Initialized,
        format!("training NB-INGARCH({},{}) on {} observations", options.p, options.q, series.len()),
    ));
    let feature_columns: Vec<String> = exog.map_or_else(Vec::new, |x| x.columns().to_vec());
    let spec = ModelSpec::new(options.p, options.q, feature_columns.len());
    check_exog(exog, spec.n_exog, series.len())?;
    let fit_opts = options.fit_options()?;
    let gate = options.gate()?;
    progress.report(ProgressEvent::new(FitStage::Validated, FitState::Initialized, "inputs validated"));

    progress.report(ProgressEvent::new(
        FitStage::Optimizing,
        FitState::Fitting,
        format!("maximizing likelihood (max_iter = {})", options.mode.max_iter()),
    ));
    let model = fit_guarded(series, exog, spec, &fit_opts)?;
    progress.report(ProgressEvent::new(
        FitStage::Optimized,
        model.state(),
        format!("estimator: {:?}", model.kind()),
    ));

    let training_metrics = score_in_sample(series, exog, &model)?;
    info!(
        smape = training_metrics.smape,
        ma7_smape = training_metrics.ma7_smape,
        n_scored = training_metrics.n_scored,
        "in-sample metrics"
    );
    let quality_gate = gate.evaluate(training_metrics.smape, training_metrics.ma7_smape)?;
    progress.report(ProgressEvent::new(FitStage::Scored, model.state(), "metrics computed"));

    let backtest = if options.runs_backtest() {
        let backtester = Backtester::new(BacktestOptions {
            spec,
            fit_opts,
            min_train_margin: MIN_TRAIN_MARGIN,
            seasonal_period: DEFAULT_SEASONAL_PERIOD,
            parallel: options.parallel_backtest,
        });
        Some(backtester.run(series, exog)?)
    } else {
        info!(mode = ?options.mode, "skipping backtest");
        None
    };
    progress.report(ProgressEvent::new(FitStage::Backtested, model.state(), "backtest finished"));

    let artifact = model.to_artifact(&feature_columns)?;
    let timestamps = series.timestamps();
    let report = TrainingReport {
        rows: series.len(),
        first_date: timestamps[0],
        last_date: timestamps[timestamps.len() - 1],
        feature_columns,
        model_spec: spec,
        estimator: model.kind(),
        fallback_reason: model.fallback_reason(),
        converged: model.converged(),
        log_likelihood: model.log_likelihood(),
        mode: options.mode,
        training_metrics,
        quality_gate,
        backtest,
    };
    progress.report(ProgressEvent::new(FitStage::Done, model.state(), "training complete"));
    Ok(TrainingOutcome { model, artifact, report })
}

fn score_in_sample(
    series: &ObservationSeries, exog: Option<&ExogenousMatrix>, model: &FittedModel,
) -> EvalResult<TrainingMetrics> {
    let counts = series.counts();
    let burn_in = model.spec().burn_in();
    let predicted = model.one_step_ahead(counts, exog)?;
    let (actual, fitted) = in_sample_pairs(counts, predicted.view(), burn_in);
    let scores = ForecastMetrics::compute(actual.view(), fitted.view(), DEFAULT_SEASONAL_PERIOD);

    let ma7 = Baseline::MovingAverage(MA7_WINDOW).predict(counts);
    let naive = Baseline::Naive.predict(counts);
    let mask: Vec<usize> = (burn_in..counts.len())
        .filter(|&t| counts[t] > 0.0 && predicted[t].is_finite() && ma7[t].is_finite())
        .collect();
    let pick = |values: ArrayView1<f64>| mask.iter().map(|&t| values[t]).collect::<Array1<f64>>();
    let baseline_actual = pick(counts);

    Ok(TrainingMetrics {
        smape: scores.smape,
        mase: scores.mase,
        rmse: scores.rmse,
        ma7_smape: smape(baseline_actual.view(), pick(ma7.view()).view()),
        naive_smape: smape(baseline_actual.view(), pick(naive.view()).view()),
        n_scored: actual.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{evaluation::errors::EvalError, ingarch::core::progress::NoProgress};
    use std::sync::mpsc;

    // ---- Scope -------------------------------------------------------------
    // These tests cover:
    // - Sampling-mode defaults and overrides.
    // - Progress reporting order and percentages.
    // - Report contents with and without the backtest.
    // -------------------------------------------------------------------------

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date")
    }

    fn weekly_series(n: usize) -> ObservationSeries {
        let counts = (0..n).map(|t| if t % 7 >= 5 { 32.0 } else { 20.0 + (t % 4) as f64 }).collect();
        ObservationSeries::daily(start(), counts).expect("valid series")
    }

    #[test]
    // Purpose
    // -------
    // Sampling modes map to iteration caps, gate modes and backtesting, and
    // explicit overrides win.
    //
    // Given
    // -----
    // - Each mode; Fast with `gate_mode = Some(Strict)` and
    //   `run_backtest = Some(true)`.
    //
    // Expect
    // ------
    // - 300/400/600; Relaxed/Relaxed/Strict; backtest only in Full.
    // - The overridden Fast options use Strict and run the backtest.
    fn sampling_modes_and_overrides() {
        assert_eq!(
            [SamplingMode::Demo, SamplingMode::Fast, SamplingMode::Full].map(SamplingMode::max_iter),
            [300, 400, 600]
        );
        assert_eq!(SamplingMode::Demo.gate_mode(), GateMode::Relaxed);
        assert_eq!(SamplingMode::Full.gate_mode(), GateMode::Strict);
        assert!(!SamplingMode::Fast.runs_backtest());

        let options = TrainingOptions {
            gate_mode: Some(GateMode::Strict),
            run_backtest: Some(true),
            ..TrainingOptions::new(1, 1, SamplingMode::Fast)
        };

        assert_eq!(options.effective_gate_mode(), GateMode::Strict);
        assert!(options.runs_backtest());
    }

    #[test]
    // Purpose
    // -------
    // A relaxed run trains, scores and reports progress in stage order.
    //
    // Given
    // -----
    // - 90 points with a weekly pattern, Demo mode, an mpsc progress sink.
    //
    // Expect
    // ------
    // - Seven events from Started to Done with non-decreasing percentages
    //   ending at 100.
    // - Report rows = 90, no backtest, finite in-sample sMAPE, and an
    //   artifact matching the model.
    fn train_reports_progress_and_metrics() {
        let series = weekly_series(90);
        let options = TrainingOptions::new(1, 1, SamplingMode::Demo);
        let (tx, rx) = mpsc::channel();

        let outcome = train(&series, None, &options, &tx).expect("relaxed gate");
        drop(tx);
        let events: Vec<ProgressEvent> = rx.iter().collect();

        assert_eq!(events.len(), 7);
        assert_eq!(events[0].stage, FitStage::Started);
        assert_eq!(events[6].stage, FitStage::Done);
        assert!(events.windows(2).all(|w| w[0].percent <= w[1].percent));
        assert_eq!(events[6].percent, 100);
        assert_eq!(outcome.report.rows, 90);
        assert!(outcome.report.backtest.is_none());
        assert!(outcome.report.training_metrics.smape.is_finite());
        assert_eq!(outcome.report.last_date, series.timestamps()[89]);
        assert_eq!(FittedModel::from_artifact(&outcome.artifact), Ok(outcome.model));
    }

    #[test]
    // Purpose
    // -------
    // A forced backtest is attached to the report, and an impossible strict
    // gate fails the run.
    //
    // Given
    // -----
    // - 91 points spanning three months; Fast mode with `run_backtest`.
    // - The same series with a strict 1000 % threshold.
    //
    // Expect
    // ------
    // - Two backtest folds.
    // - `EvalError::QualityGateFailure`.
    fn train_runs_backtest_and_enforces_strict_gate() {
        let series = weekly_series(91);
        let with_backtest = TrainingOptions {
            run_backtest: Some(true),
            parallel_backtest: false,
            ..TrainingOptions::new(1, 1, SamplingMode::Fast)
        };
        let impossible = TrainingOptions {
            gate_threshold_pct: 1000.0,
            gate_mode: Some(GateMode::Strict),
            ..TrainingOptions::new(1, 1, SamplingMode::Fast)
        };

        let outcome = train(&series, None, &with_backtest, &NoProgress).expect("relaxed gate");
        let failure = train(&series, None, &impossible, &NoProgress);

        assert_eq!(outcome.report.backtest.map(|b| b.folds.len()), Some(2));
        assert!(matches!(failure, Err(EvalError::QualityGateFailure { .. })));
    }
}
