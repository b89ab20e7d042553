//! Inductive conformal calibration of forecast bands from fold residuals.
//!
//! Purpose
//! -------
//! Turn out-of-sample residuals `y − ŷ` (typically from the monthly
//! backtest) into an additive band `[ŷ + α_low, ŷ + α_high]` whose empirical
//! coverage lies inside a target interval.
//!
//! Key behaviors
//! -------------
//! - Residuals from every fold are pooled and sorted; non-finite values are
//!   dropped with a warning.
//! - The band edges start at the `lower`/`upper` empirical quantile indices
//!   `⌊lower·(n−1)⌋` and `⌈upper·(n−1)⌉`, nudged apart if they collide.
//! - Coverage below the target widens both edges by `max(⌈0.01·n⌉, 1)`
//!   indices per iteration until it is in band or the edges reach the ends;
//!   coverage above the target narrows them the same way without letting
//!   them cross.
//! - Per-fold coverage is reported for diagnostics. Out-of-band coverage is
//!   a warning, never an error.
//!
//! Invariants & assumptions
//! ------------------------
//! - Coverage counts residuals in the closed interval `[α_low, α_high]`.
//! - `α_low ≤ α_high` always holds: both are order statistics with
//!   `lower_idx ≤ upper_idx`.
//! - The procedure is deterministic: the same residual map gives the same
//!   result. Fold iteration order is the `BTreeMap` key order.
use crate::calibration::errors::{CalResult, CalibrationError};
use chrono::NaiveDate;
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub const DEFAULT_LOWER_QUANTILE: f64 = 0.1;
pub const DEFAULT_UPPER_QUANTILE: f64 = 0.9;
pub const DEFAULT_COVERAGE_BAND: (f64, f64) = (0.80, 0.95);

/// Fraction of the pooled sample moved per widening/narrowing step.
const STEP_FRACTION: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationOptions {
    /// Seed quantile of the lower edge.
    pub lower: f64,
    /// Seed quantile of the upper edge.
    pub upper: f64,
    /// Accepted coverage `(low, high)`.
    pub coverage_band: (f64, f64),
}

impl CalibrationOptions {
    /// Errors
    /// ------
    /// - `InvalidQuantiles` unless `0 < lower < upper < 1`.
    /// - `InvalidCoverageBand` unless `0 < low < high ≤ 1`.
    pub fn new(lower: f64, upper: f64, coverage_band: (f64, f64)) -> CalResult<Self> {
        let options = CalibrationOptions { lower, upper, coverage_band };
        options.validate()?;
        Ok(options)
    }

    fn validate(&self) -> CalResult<()> {
        let (lower, upper) = (self.lower, self.upper);
        if !(0.0 < lower && lower < upper && upper < 1.0) {
            return Err(CalibrationError::InvalidQuantiles { lower, upper });
        }
        let (low, high) = self.coverage_band;
        if !(0.0 < low && low < high && high <= 1.0) {
            return Err(CalibrationError::InvalidCoverageBand { low, high });
        }
        Ok(())
    }

    fn in_band(&self, coverage: f64) -> bool {
        coverage >= self.coverage_band.0 && coverage <= self.coverage_band.1
    }
}

impl Default for CalibrationOptions {
    fn default() -> Self {
        CalibrationOptions {
            lower: DEFAULT_LOWER_QUANTILE,
            upper: DEFAULT_UPPER_QUANTILE,
            coverage_band: DEFAULT_COVERAGE_BAND,
        }
    }
}

/// Coverage of the calibrated band on one fold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldCoverage {
    pub fold_id: String,
    /// `None` for a fold without finite residuals.
    pub coverage: Option<f64>,
    pub count: usize,
    pub within_band: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationResult {
    pub alpha_low: f64,
    pub alpha_high: f64,
    /// Coverage on the pooled residuals.
    pub coverage: f64,
    /// Widening or narrowing steps taken after seeding.
    pub iterations: usize,
    pub fold_coverages: Vec<FoldCoverage>,
    pub target_band: (f64, f64),
    pub lower_idx: usize,
    pub upper_idx: usize,
    pub n_residuals: usize,
}

impl CalibrationResult {
    pub fn within_band(&self) -> bool {
        self.coverage >= self.target_band.0 && self.coverage <= self.target_band.1
    }

    /// Shift median forecasts by the band offsets: `(p10, p90)`.
    pub fn apply(&self, medians: ArrayView1<f64>) -> (Array1<f64>, Array1<f64>) {
        (medians.mapv(|m| m + self.alpha_low), medians.mapv(|m| m + self.alpha_high))
    }

    /// Dated forecast points with the lower bound clamped at zero.
    ///
    /// Errors
    /// ------
    /// - `LengthMismatch` if `dates` and `medians` differ in length.
    pub fn calibrated_points(
        &self, dates: &[NaiveDate], medians: ArrayView1<f64>,
    ) -> CalResult<Vec<ForecastPoint>> {
        if dates.len() != medians.len() {
            return Err(CalibrationError::LengthMismatch {
                dates: dates.len(),
                medians: medians.len(),
            });
        }
        let (p10, p90) = self.apply(medians);
        Ok(dates
            .iter()
            .enumerate()
            .map(|(i, &date)| ForecastPoint {
                date,
                point: medians[i],
                lower: p10[i].max(0.0),
                upper: p90[i],
            })
            .collect())
    }
}

/// A dated point forecast with its calibrated band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub point: f64,
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConformalCalibrator {
    pub options: CalibrationOptions,
}

impl ConformalCalibrator {
    pub fn new(options: CalibrationOptions) -> Self {
        ConformalCalibrator { options }
    }

    /// Calibrate band offsets from residuals grouped by fold.
    ///
    /// Errors
    /// ------
    /// - `InvalidQuantiles` / `InvalidCoverageBand` for bad options.
    /// - `NoFolds` for an empty map.
    /// - `EmptyResiduals` when no fold holds a finite residual.
    pub fn calibrate(
        &self, residuals_by_fold: &BTreeMap<String, Vec<f64>>,
    ) -> CalResult<CalibrationResult> {
        let opts = &self.options;
        opts.validate()?;
        if residuals_by_fold.is_empty() {
            return Err(CalibrationError::NoFolds);
        }

        let folds: Vec<(&String, Vec<f64>)> =
            residuals_by_fold.iter().map(|(id, values)| (id, finite_residuals(id, values))).collect();
        let mut pooled: Vec<f64> = folds.iter().flat_map(|(_, v)| v.iter().copied()).collect();
        if pooled.is_empty() {
            return Err(CalibrationError::EmptyResiduals);
        }
        pooled.sort_by(f64::total_cmp);

        let n = pooled.len();
        let last = n - 1;
        let mut lower_idx = ((opts.lower * last as f64).floor() as usize).min(last);
        let mut upper_idx = ((opts.upper * last as f64).ceil() as usize).min(last);
        if lower_idx >= upper_idx {
            lower_idx = lower_idx.saturating_sub(1);
            upper_idx = (upper_idx + 1).min(last);
        }
        let step = ((STEP_FRACTION * n as f64).ceil() as usize).max(1);
        let (band_min, band_max) = opts.coverage_band;

        let band_coverage = |lo: usize, hi: usize| {
            coverage_ratio(&pooled, pooled[lo], pooled[hi]).unwrap_or(0.0)
        };
        let mut coverage = band_coverage(lower_idx, upper_idx);
        let mut iterations = 0usize;
        if coverage < band_min {
            while coverage < band_min && (lower_idx > 0 || upper_idx < last) {
                lower_idx = lower_idx.saturating_sub(step);
                upper_idx = (upper_idx + step).min(last);
                coverage = band_coverage(lower_idx, upper_idx);
                iterations += 1;
            }
        } else if coverage > band_max {
            while coverage > band_max && lower_idx < upper_idx {
                lower_idx = (lower_idx + step).min(upper_idx);
                if upper_idx > lower_idx {
                    upper_idx = upper_idx.saturating_sub(step).max(lower_idx);
                }
                coverage = band_coverage(lower_idx, upper_idx);
                iterations += 1;
            }
        }
        let (alpha_low, alpha_high) = (pooled[lower_idx], pooled[upper_idx]);
        debug!(alpha_low, alpha_high, coverage, iterations, n, "conformal band calibrated");

        if !opts.in_band(coverage) {
            warn!(coverage, band_min, band_max, "overall coverage outside target band");
        }
        let fold_coverages = folds
            .iter()
            .map(|(id, values)| {
                let coverage = coverage_ratio(values, alpha_low, alpha_high);
                let within_band = coverage.is_some_and(|c| opts.in_band(c));
                if let Some(c) = coverage.filter(|_| !within_band) {
                    warn!(fold = %id, coverage = c, "fold coverage outside target band");
                }
                FoldCoverage { fold_id: (*id).clone(), coverage, count: values.len(), within_band }
            })
            .collect();

        Ok(CalibrationResult {
            alpha_low,
            alpha_high,
            coverage,
            iterations,
            fold_coverages,
            target_band: opts.coverage_band,
            lower_idx,
            upper_idx,
            n_residuals: n,
        })
    }
}

/// Share of `residuals` inside `[low, high]`; `None` when empty.
pub fn coverage_ratio(residuals: &[f64], low: f64, high: f64) -> Option<f64> {
    if residuals.is_empty() {
        return None;
    }
    let inside = residuals.iter().filter(|&&r| r >= low && r <= high).count();
    Some(inside as f64 / residuals.len() as f64)
}

fn finite_residuals(fold_id: &str, values: &[f64]) -> Vec<f64> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.len() < values.len() {
        warn!(fold = fold_id, dropped = values.len() - finite.len(), "dropped non-finite residuals");
    }
    finite
}
