//! ingarch_forecast: Negative-Binomial INGARCH forecasting of daily counts.
//!
//! Purpose
//! -------
//! Fit NB-INGARCH(p, q) models (with optional exogenous regressors) to
//! daily, non-negative, overdispersed count series by maximum likelihood,
//! produce multi-step forecasts, judge them against simple baselines with a
//! monthly walk-forward backtest and a quality gate, and calibrate forecast
//! bands from out-of-sample residuals.
//!
//! Key behaviors
//! -------------
//! - [`optimization`]: a generic log-likelihood maximizer (argmin
//!   Nelder–Mead), numerical guards, and the optimizer error surface.
//! - [`ingarch`]: data containers, the NB-INGARCH recursions and likelihood,
//!   the MLE estimator with its AR(1) fallback, and fitted models/artifacts.
//! - [`evaluation`]: metrics, baselines, backtesting, the quality gate and
//!   the training pipeline.
//! - [`calibration`]: conformal band calibration.
//! - [`cache`]: a caller-owned model cache keyed by training run.
//!
//! Invariants & assumptions
//! ------------------------
//! - The library holds no global state and installs no `tracing`
//!   subscriber; applications decide where logs go.
//! - Fitting is synchronous; the only internal parallelism is the optional
//!   rayon fan-out over backtest folds.
//!
//! Downstream usage
//! ----------------
//! ```no_run
//! use ingarch_forecast::evaluation::{SamplingMode, TrainingOptions, train};
//! use ingarch_forecast::ingarch::{ObservationSeries, ProgressEvent};
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let counts = (0..120).map(|t| 20.0 + (t % 7) as f64).collect();
//! let series = ObservationSeries::daily(start, counts).unwrap();
//! let options = TrainingOptions::new(1, 1, SamplingMode::Fast);
//! let outcome = train(&series, None, &options, &|e: ProgressEvent| println!("{}%", e.percent))
//!     .unwrap();
//! let path = outcome.model.forecast(series.counts(), None, 14).unwrap();
//! ```

pub mod cache;
pub mod calibration;
pub mod evaluation;
pub mod ingarch;
pub mod optimization;
