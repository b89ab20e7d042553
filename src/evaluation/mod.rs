//! evaluation: accuracy metrics, baselines, backtesting and training.
//!
//! Purpose
//! -------
//! Decide whether a fitted count model is worth using. Everything here
//! consumes `ingarch` models through the uniform [`FittedModel`] surface.
//!
//! Key behaviors
//! -------------
//! - [`metrics`]: sMAPE, MASE, RMSE and in-sample pair selection.
//! - [`baselines`]: MA7 and naive lag-1 reference forecasters.
//! - [`backtest`]: walk-forward monthly folds, optionally on rayon.
//! - [`quality_gate`]: minimum lift over MA7, strict or relaxed.
//! - [`training`]: the end-to-end pipeline producing a model, an artifact
//!   and a [`TrainingReport`].
//!
//! Conventions
//! -----------
//! - Metrics that cannot be computed are `NaN`, never errors; aggregates skip
//!   them.
//! - Percentages are in percent.
//!
//! [`FittedModel`]: crate::ingarch::FittedModel

pub mod backtest;
pub mod baselines;
pub mod errors;
pub mod metrics;
pub mod quality_gate;
pub mod training;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::backtest::{
    BacktestOptions, BacktestReport, BacktestSummary, Backtester, FoldMetrics, monthly_periods,
};
pub use self::baselines::{Baseline, MA7_WINDOW};
pub use self::errors::{EvalError, EvalResult};
pub use self::metrics::{DEFAULT_SEASONAL_PERIOD, ForecastMetrics, mase, rmse, smape};
pub use self::quality_gate::{
    DEFAULT_GATE_THRESHOLD_PCT, GateMode, GateVerdict, QualityGate, lift_pct,
};
pub use self::training::{
    SamplingMode, TrainingMetrics, TrainingOptions, TrainingOutcome, TrainingReport, train,
};

pub mod prelude {
    pub use super::{
        BacktestOptions, BacktestReport, Backtester, Baseline, EvalError, EvalResult, GateMode,
        QualityGate, SamplingMode, TrainingOptions, TrainingReport, train,
    };
}
