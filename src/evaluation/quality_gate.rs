//! Quality gate: require a minimum sMAPE improvement over a baseline.
//!
//! The lift is `(baseline − model) / baseline × 100`. A model that does not
//! reach `threshold_pct` either fails the pipeline ([`GateMode::Strict`]) or
//! is accepted with a warning ([`GateMode::Relaxed`]). In both modes the
//! verdict records whether the gate was actually passed.
use crate::evaluation::errors::{EvalError, EvalResult};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Minimum sMAPE lift over MA7, in percent.
pub const DEFAULT_GATE_THRESHOLD_PCT: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateMode {
    /// A missed threshold is an error.
    Strict,
    /// A missed threshold is logged and recorded.
    Relaxed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateVerdict {
    pub passed: bool,
    /// `NaN` when either metric is `NaN`; `+∞` for a zero baseline.
    pub lift_pct: f64,
    pub threshold_pct: f64,
    pub mode: GateMode,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityGate {
    pub threshold_pct: f64,
    pub mode: GateMode,
}

impl QualityGate {
    /// Errors
    /// ------
    /// - `EvalError::InvalidThreshold` for a non-finite threshold.
    pub fn new(threshold_pct: f64, mode: GateMode) -> EvalResult<Self> {
        if !threshold_pct.is_finite() {
            return Err(EvalError::InvalidThreshold { value: threshold_pct });
        }
        Ok(QualityGate { threshold_pct, mode })
    }

    /// Judge `model_smape` against `baseline_smape`.
    ///
    /// NaN metrics never raise: they produce a failed verdict with reason
    /// `"NaN metrics"` in either mode.
    ///
    /// Errors
    /// ------
    /// - `EvalError::QualityGateFailure` in strict mode when the lift is below
    ///   the threshold.
    pub fn evaluate(&self, model_smape: f64, baseline_smape: f64) -> EvalResult<GateVerdict> {
        let mut verdict = GateVerdict {
            passed: false,
            lift_pct: f64::NAN,
            threshold_pct: self.threshold_pct,
            mode: self.mode,
            reason: None,
        };
        if model_smape.is_nan() || baseline_smape.is_nan() {
            warn!(model_smape, baseline_smape, "quality gate skipped: NaN metrics");
            verdict.reason = Some("NaN metrics".to_string());
            return Ok(verdict);
        }

        verdict.lift_pct = lift_pct(model_smape, baseline_smape);
        verdict.passed = verdict.lift_pct >= self.threshold_pct;
        if verdict.passed {
            info!(lift_pct = verdict.lift_pct, "quality gate passed");
            return Ok(verdict);
        }
        match self.mode {
            GateMode::Strict => Err(EvalError::QualityGateFailure {
                lift_pct: verdict.lift_pct,
                threshold_pct: self.threshold_pct,
            }),
            GateMode::Relaxed => {
                warn!(
                    lift_pct = verdict.lift_pct,
                    threshold_pct = self.threshold_pct,
                    "quality gate not met; continuing in relaxed mode"
                );
                verdict.reason = Some(format!(
                    "lift {:.2}% below threshold {:.2}%",
                    verdict.lift_pct, self.threshold_pct
                ));
                Ok(verdict)
            }
        }
    }
}

impl Default for QualityGate {
    fn default() -> Self {
        QualityGate { threshold_pct: DEFAULT_GATE_THRESHOLD_PCT, mode: GateMode::Strict }
    }
}

/// Percentage sMAPE improvement of the model over the baseline.
pub fn lift_pct(model_smape: f64, baseline_smape: f64) -> f64 {
    if baseline_smape == 0.0 {
        return f64::INFINITY;
    }
    (baseline_smape - model_smape) / baseline_smape * 100.0
}
