//! Walk-forward backtesting with calendar-month folds.
//!
//! Purpose
//! -------
//! Estimate out-of-sample accuracy the way the model is used in practice:
//! fit on everything before a month, forecast that whole month, score, move
//! on. Each fold is compared against the MA7 and naive baselines on the same
//! days.
//!
//! Key behaviors
//! -------------
//! - Observations are grouped by calendar month (`YYYY-MM`) of their
//!   timestamps. The first month never forms a fold.
//! - For month `k ≥ 1`: train on all earlier observations, forecast the
//!   month as a multi-step path, score with sMAPE, MASE and RMSE.
//! - A fold is skipped (logged at `debug`) when the training window is
//!   shorter than `max(p, q) + min_train_margin` or the month is empty.
//! - Baselines are one-step predictions built from the actuals up to the end
//!   of the test month, restricted to the test days.
//! - Out-of-sample residuals `y − ŷ` are returned per period so they can be
//!   fed straight into the conformal calibrator.
//!
//! Invariants & assumptions
//! ------------------------
//! - Folds are independent. With `parallel = true` they run on the rayon
//!   pool; each fold builds its own estimator and scratch buffers.
//! - Fold order in the report follows calendar order regardless of
//!   parallelism.
use crate::{
    evaluation::{
        baselines::{Baseline, MA7_WINDOW},
        errors::{EvalError, EvalResult},
        metrics::{DEFAULT_SEASONAL_PERIOD, ForecastMetrics, nan_mean, smape},
    },
    ingarch::{
        core::{
            data::{ExogenousMatrix, ObservationSeries, check_exog},
            options::FitOptions,
            shape::ModelSpec,
        },
        models::{fitted::EstimatorKind, ingarch::fit_guarded},
    },
};
use chrono::NaiveDate;
use ndarray::s;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, ops::Range};
use tracing::{debug, info};

/// Extra observations required beyond burn-in before a fold is scored.
pub const MIN_TRAIN_MARGIN: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestOptions {
    pub spec: ModelSpec,
    pub fit_opts: FitOptions,
    pub min_train_margin: usize,
    pub seasonal_period: usize,
    pub parallel: bool,
}

impl BacktestOptions {
    /// Errors
    /// ------
    /// - `EvalError::InvalidSeasonalPeriod` for `seasonal_period == 0`.
    pub fn new(
        spec: ModelSpec, fit_opts: FitOptions, seasonal_period: usize, parallel: bool,
    ) -> EvalResult<Self> {
        if seasonal_period == 0 {
            return Err(EvalError::InvalidSeasonalPeriod { period: seasonal_period });
        }
        Ok(BacktestOptions {
            spec,
            fit_opts,
            min_train_margin: MIN_TRAIN_MARGIN,
            seasonal_period,
            parallel,
        })
    }
}

impl Default for BacktestOptions {
    fn default() -> Self {
        BacktestOptions {
            spec: ModelSpec::default(),
            fit_opts: FitOptions::default(),
            min_train_margin: MIN_TRAIN_MARGIN,
            seasonal_period: DEFAULT_SEASONAL_PERIOD,
            parallel: true,
        }
    }
}

/// Scores of one monthly fold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldMetrics {
    /// Month index within the series (the first month is 0 and never scored).
    pub fold: usize,
    /// Calendar month, `YYYY-MM`.
    pub period: String,
    pub n_train: usize,
    pub n_samples: usize,
    pub model_smape: f64,
    pub model_mase: f64,
    pub model_rmse: f64,
    pub ma7_smape: f64,
    pub naive_smape: f64,
    pub estimator: EstimatorKind,
}

/// NaN-skipping means over folds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestSummary {
    pub n_folds: usize,
    pub model_smape: f64,
    pub model_mase: f64,
    pub model_rmse: f64,
    pub ma7_smape: f64,
    pub naive_smape: f64,
}

impl BacktestSummary {
    fn from_folds(folds: &[FoldMetrics]) -> Self {
        BacktestSummary {
            n_folds: folds.len(),
            model_smape: nan_mean(folds.iter().map(|f| f.model_smape)),
            model_mase: nan_mean(folds.iter().map(|f| f.model_mase)),
            model_rmse: nan_mean(folds.iter().map(|f| f.model_rmse)),
            ma7_smape: nan_mean(folds.iter().map(|f| f.ma7_smape)),
            naive_smape: nan_mean(folds.iter().map(|f| f.naive_smape)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    pub folds: Vec<FoldMetrics>,
    pub summary: BacktestSummary,
    /// Out-of-sample residuals `y − ŷ` keyed by period.
    pub residuals: BTreeMap<String, Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Backtester {
    pub options: BacktestOptions,
}

struct FoldOutcome {
    metrics: FoldMetrics,
    residuals: Vec<f64>,
}

impl Backtester {
    pub fn new(options: BacktestOptions) -> Self {
        Backtester { options }
    }

    /// Run every eligible monthly fold of `series`.
    ///
    /// Errors
    /// ------
    /// - Covariate shape errors when `exog` does not match the series and
    ///   `options.spec.n_exog`.
    /// - Model-layer errors from fitting or forecasting a fold.
    pub fn run(
        &self, series: &ObservationSeries, exog: Option<&ExogenousMatrix>,
    ) -> EvalResult<BacktestReport> {
        check_exog(exog, self.options.spec.n_exog, series.len())?;
        let candidates: Vec<(usize, String, Range<usize>)> = monthly_periods(series.timestamps())
            .into_iter()
            .enumerate()
            .skip(1)
            .map(|(fold, (period, range))| (fold, period, range))
            .collect();

        let run_one = |(fold, period, range): &(usize, String, Range<usize>)| {
            self.run_fold(series, exog, *fold, period, range.clone())
        };
        let outcomes: Vec<Option<FoldOutcome>> = if self.options.parallel {
            candidates.par_iter().map(run_one).collect::<EvalResult<_>>()?
        } else {
            candidates.iter().map(run_one).collect::<EvalResult<_>>()?
        };

        let mut folds = Vec::new();
        let mut residuals = BTreeMap::new();
        for outcome in outcomes.into_iter().flatten() {
            residuals.insert(outcome.metrics.period.clone(), outcome.residuals);
            folds.push(outcome.metrics);
        }
        let summary = BacktestSummary::from_folds(&folds);
        info!(
            folds = summary.n_folds,
            model_smape = summary.model_smape,
            ma7_smape = summary.ma7_smape,
            "backtest complete"
        );
        Ok(BacktestReport { folds, summary, residuals })
    }

    fn run_fold(
        &self, series: &ObservationSeries, exog: Option<&ExogenousMatrix>, fold: usize,
        period: &str, test: Range<usize>,
    ) -> EvalResult<Option<FoldOutcome>> {
        let opts = &self.options;
        let n_train = test.start;
        let required = opts.spec.burn_in() + opts.min_train_margin;
        if n_train < required || test.is_empty() {
            debug!(fold, period, n_train, required, "skipping backtest fold");
            return Ok(None);
        }

        let train = series.window(0..n_train)?;
        let train_exog = exog.map(|x| x.rows(0..n_train)).transpose()?;
        let test_exog = exog.map(|x| x.rows(test.clone())).transpose()?;
        let model = fit_guarded(&train, train_exog.as_ref(), opts.spec, &opts.fit_opts)?;
        let forecast = model.forecast(train.counts(), test_exog.as_ref(), test.len())?;

        let counts = series.counts();
        let actual = counts.slice(s![test.clone()]);
        let scores = ForecastMetrics::compute(actual, forecast.view(), opts.seasonal_period);
        let history = counts.slice(s![..test.end]);
        let ma7 = Baseline::MovingAverage(MA7_WINDOW).predict(history);
        let naive = Baseline::Naive.predict(history);

        let metrics = FoldMetrics {
            fold,
            period: period.to_string(),
            n_train,
            n_samples: test.len(),
            model_smape: scores.smape,
            model_mase: scores.mase,
            model_rmse: scores.rmse,
            ma7_smape: smape(actual, ma7.slice(s![test.clone()])),
            naive_smape: smape(actual, naive.slice(s![test.clone()])),
            estimator: model.kind(),
        };
        debug!(fold, period, model_smape = metrics.model_smape, "backtest fold scored");
        let residuals = (&actual - &forecast).to_vec();
        Ok(Some(FoldOutcome { metrics, residuals }))
    }
}

/// Contiguous index ranges of each calendar month, in order.
pub fn monthly_periods(timestamps: &[NaiveDate]) -> Vec<(String, Range<usize>)> {
    let mut periods: Vec<(String, Range<usize>)> = Vec::new();
    for (i, date) in timestamps.iter().enumerate() {
        let key = date.format("%Y-%m").to_string();
        match periods.last_mut() {
            Some((last, range)) if *last == key => range.end = i + 1,
            _ => periods.push((key, i..i + 1)),
        }
    }
    periods
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    // ---- Scope -------------------------------------------------------------
    // These tests cover:
    // - Month grouping.
    // - Fold eligibility and the first-month skip.
    // - Sequential and parallel runs agreeing.
    // -------------------------------------------------------------------------

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn weekly_series(n: usize) -> ObservationSeries {
        let counts = (0..n).map(|t| if t % 7 >= 5 { 30.0 } else { 18.0 + (t % 3) as f64 }).collect();
        ObservationSeries::daily(date(2024, 1, 1), counts).expect("valid series")
    }

    #[test]
    // Purpose
    // -------
    // Months are grouped into contiguous ranges across a year boundary.
    //
    // Given
    // -----
    // - 2023-12-30, 2023-12-31, 2024-01-01, 2024-02-15.
    //
    // Expect
    // ------
    // - [("2023-12", 0..2), ("2024-01", 2..3), ("2024-02", 3..4)].
    fn monthly_periods_groups_by_calendar_month() {
        let ts = [date(2023, 12, 30), date(2023, 12, 31), date(2024, 1, 1), date(2024, 2, 15)];

        let periods = monthly_periods(&ts);

        assert_eq!(
            periods,
            vec![
                ("2023-12".to_string(), 0..2),
                ("2024-01".to_string(), 2..3),
                ("2024-02".to_string(), 3..4),
            ]
        );
    }

    #[test]
    // Purpose
    // -------
    // Every month after the first with enough history becomes a fold;
    // residuals are keyed by period.
    //
    // Given
    // -----
    // - 91 daily points from 2024-01-01 (Jan, Feb, Mar), INGARCH(1,1).
    //
    // Expect
    // ------
    // - Folds for 2024-02 and 2024-03 with finite sMAPEs; residual counts
    //   match the month lengths (29 and 31).
    fn run_scores_each_month_after_the_first() {
        let series = weekly_series(91);
        let backtester = Backtester::new(BacktestOptions { parallel: false, ..Default::default() });

        let report = backtester.run(&series, None).expect("valid inputs");

        let periods: Vec<&str> = report.folds.iter().map(|f| f.period.as_str()).collect();
        assert_eq!(periods, vec!["2024-02", "2024-03"]);
        assert!(report.folds.iter().all(|f| f.model_smape.is_finite() && f.ma7_smape.is_finite()));
        assert_eq!(report.residuals["2024-02"].len(), 29);
        assert_eq!(report.residuals["2024-03"].len(), 31);
        assert_eq!(report.summary.n_folds, 2);
    }

    #[test]
    // Purpose
    // -------
    // Short training windows are skipped and parallel execution matches the
    // sequential result.
    //
    // Given
    // -----
    // - A margin of 40 on a 91-point series (January has 31 points).
    //
    // Expect
    // ------
    // - Only the March fold remains, with identical residuals in both modes.
    fn run_skips_short_training_windows() {
        let series = weekly_series(91);
        let base = BacktestOptions { min_train_margin: 40, ..Default::default() };
        let sequential = Backtester::new(BacktestOptions { parallel: false, ..base.clone() });
        let parallel = Backtester::new(BacktestOptions { parallel: true, ..base });

        let seq = sequential.run(&series, None).expect("valid inputs");
        let par = parallel.run(&series, None).expect("valid inputs");

        assert_eq!(seq.folds.len(), 1);
        assert_eq!(seq.folds[0].period, "2024-03");
        assert_eq!(seq.residuals, par.residuals);
        assert_eq!(seq.folds[0].model_smape, par.folds[0].model_smape);
    }

    #[test]
    // Purpose
    // -------
    // Mis-shaped covariates are rejected up front and a zero seasonal period
    // is refused.
    //
    // Given
    // -----
    // - A model order without regressors but a one-column exog matrix.
    //
    // Expect
    // ------
    // - `EvalError::Model(ExogColumnMismatch)`; `InvalidSeasonalPeriod`.
    fn run_rejects_misaligned_exog() {
        let series = weekly_series(40);
        let exog = ExogenousMatrix::new(
            vec!["promo".to_string()],
            Array1::<f64>::zeros(40).insert_axis(ndarray::Axis(1)),
        )
        .expect("one column");

        let result = Backtester::new(BacktestOptions::default()).run(&series, Some(&exog));

        assert!(matches!(result, Err(EvalError::Model(_))));
        assert_eq!(
            BacktestOptions::new(ModelSpec::default(), FitOptions::default(), 0, false),
            Err(EvalError::InvalidSeasonalPeriod { period: 0 })
        );
    }
}
