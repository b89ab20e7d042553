//! Count data containers for NB-INGARCH models.
//!
//! Purpose
//! -------
//! Provide small, validated containers for daily count series and their
//! exogenous covariates. This module centralizes input validation so the
//! recursion, likelihood and forecasting code can assume clean data.
//!
//! Key behaviors
//! -------------
//! - [`ObservationSeries`] enforces basic data invariants (non-empty, equal
//!   lengths, finite non-negative counts, strictly increasing dates).
//! - [`ExogenousMatrix`] pairs a named column list with a dense row-major
//!   design matrix and sanitizes non-finite entries to `0.0`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Counts are stored as `f64` but represent non-negative integers; fractional
//!   values are accepted (the likelihood uses `lnΓ`, not factorials).
//! - A series is never empty once constructed; windows taken with
//!   [`ObservationSeries::window`] inherit every invariant.
//! - Exogenous rows align 1:1 with series timestamps (training) or forecast
//!   steps (prediction); the alignment itself is checked by the model layer.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based, oldest observation first.
//! - Dates are calendar days (`chrono::NaiveDate`); no timezone handling.
//!
//! Testing notes
//! -------------
//! - Unit tests cover construction failures for each invariant, window
//!   extraction, and exogenous sanitization.
use crate::ingarch::errors::{IngarchError, IngarchResult};
use chrono::{Duration, NaiveDate};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, s};
use std::ops::Range;
use tracing::warn;

/// Validated, date-indexed count series.
///
/// Fields are private so the invariants established by
/// [`ObservationSeries::new`] cannot be broken afterwards; the core only ever
/// borrows a series immutably.
///
/// Invariants
/// ----------
/// - `timestamps.len() == counts.len() > 0`.
/// - All counts are finite and `>= 0`.
/// - Timestamps are strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSeries {
    timestamps: Vec<NaiveDate>,
    counts: Array1<f64>,
}

impl ObservationSeries {
    /// Construct a validated series.
    ///
    /// Errors
    /// ------
    /// - `IngarchError::EmptySeries` when no observations are given.
    /// - `IngarchError::LengthMismatch` when the two inputs differ in length.
    /// - `IngarchError::NonFiniteCount` / `NegativeCount` for the first bad count.
    /// - `IngarchError::NonIncreasingTimestamps` for the first out-of-order date.
    pub fn new(timestamps: Vec<NaiveDate>, counts: Array1<f64>) -> IngarchResult<Self> {
        if counts.is_empty() && timestamps.is_empty() {
            return Err(IngarchError::EmptySeries);
        }
        if timestamps.len() != counts.len() {
            return Err(IngarchError::LengthMismatch {
                timestamps: timestamps.len(),
                counts: counts.len(),
            });
        }
        for (index, &value) in counts.iter().enumerate() {
            if !value.is_finite() {
                return Err(IngarchError::NonFiniteCount { index, value });
            }
            if value < 0.0 {
                return Err(IngarchError::NegativeCount { index, value });
            }
        }
        for index in 1..timestamps.len() {
            if timestamps[index] <= timestamps[index - 1] {
                return Err(IngarchError::NonIncreasingTimestamps { index });
            }
        }
        Ok(ObservationSeries { timestamps, counts })
    }

    /// Build a series of consecutive daily observations starting at `start`.
    ///
    /// Errors
    /// ------
    /// Same as [`ObservationSeries::new`].
    pub fn daily(start: NaiveDate, counts: Vec<f64>) -> IngarchResult<Self> {
        let timestamps = (0..counts.len()).map(|i| start + Duration::days(i as i64)).collect();
        Self::new(timestamps, Array1::from(counts))
    }

    /// Copy of the observations in `range`.
    ///
    /// Errors
    /// ------
    /// - `IngarchError::EmptySeries` if the range selects nothing or lies
    ///   outside the series.
    pub fn window(&self, range: Range<usize>) -> IngarchResult<Self> {
        if range.start >= range.end || range.end > self.len() {
            return Err(IngarchError::EmptySeries);
        }
        Ok(ObservationSeries {
            timestamps: self.timestamps[range.clone()].to_vec(),
            counts: self.counts.slice(s![range]).to_owned(),
        })
    }

    pub fn timestamps(&self) -> &[NaiveDate] {
        &self.timestamps
    }

    pub fn counts(&self) -> ArrayView1<'_, f64> {
        self.counts.view()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Always `false` for a constructed series; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sample mean of the counts.
    pub fn mean(&self) -> f64 {
        self.counts.mean().unwrap_or(0.0)
    }
}

/// Named covariates aligned with a series or a horizon.
///
/// Non-finite entries are replaced by `0.0` at construction (with a warning),
/// matching how missing covariates are treated at training time.
#[derive(Debug, Clone, PartialEq)]
pub struct ExogenousMatrix {
    columns: Vec<String>,
    values: Array2<f64>,
}

impl ExogenousMatrix {
    /// Construct a named design matrix.
    ///
    /// Errors
    /// ------
    /// - `IngarchError::ExogColumnMismatch` if `values.ncols() != columns.len()`.
    pub fn new(columns: Vec<String>, mut values: Array2<f64>) -> IngarchResult<Self> {
        if values.ncols() != columns.len() {
            return Err(IngarchError::ExogColumnMismatch {
                expected: columns.len(),
                actual: values.ncols(),
            });
        }
        let mut replaced = 0usize;
        values.mapv_inplace(|v| {
            if v.is_finite() {
                v
            } else {
                replaced += 1;
                0.0
            }
        });
        if replaced > 0 {
            warn!(replaced, "replaced non-finite exogenous values with 0.0");
        }
        Ok(ExogenousMatrix { columns, values })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    /// Covariates for step/observation `t`.
    pub fn row(&self, t: usize) -> ArrayView1<'_, f64> {
        self.values.row(t)
    }

    /// Copy of the rows in `range`, keeping the column names.
    ///
    /// Errors
    /// ------
    /// - `IngarchError::ExogRowMismatch` if the range runs past the last row.
    pub fn rows(&self, range: Range<usize>) -> IngarchResult<Self> {
        if range.end > self.nrows() || range.start > range.end {
            return Err(IngarchError::ExogRowMismatch {
                expected: range.end,
                actual: self.nrows(),
            });
        }
        Ok(ExogenousMatrix {
            columns: self.columns.clone(),
            values: self.values.slice(s![range, ..]).to_owned(),
        })
    }

    /// Check that this matrix has `rows × cols` shape.
    ///
    /// Errors
    /// ------
    /// - `ExogColumnMismatch` first, then `ExogRowMismatch`.
    pub fn check_shape(&self, rows: usize, cols: usize) -> IngarchResult<()> {
        if self.ncols() != cols {
            return Err(IngarchError::ExogColumnMismatch { expected: cols, actual: self.ncols() });
        }
        if self.nrows() != rows {
            return Err(IngarchError::ExogRowMismatch { expected: rows, actual: self.nrows() });
        }
        Ok(())
    }
}

/// Counts and aligned covariates handed to the likelihood.
///
/// Built once per fit from a validated series; `exog` is `None` exactly when
/// the model has no exogenous terms.
#[derive(Debug, Clone, PartialEq)]
pub struct FitData {
    pub counts: Array1<f64>,
    pub exog: Option<Array2<f64>>,
}

impl FitData {
    /// Bundle `series` with its covariates after checking the alignment.
    ///
    /// Errors
    /// ------
    /// - Propagates [`check_exog`] failures.
    pub fn new(
        series: &ObservationSeries, exog: Option<&ExogenousMatrix>, n_exog: usize,
    ) -> IngarchResult<Self> {
        check_exog(exog, n_exog, series.len())?;
        Ok(FitData {
            counts: series.counts.clone(),
            exog: if n_exog == 0 { None } else { exog.map(|x| x.values.clone()) },
        })
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Validate an optional exogenous matrix against `n_exog` columns and `rows`.
///
/// `None` is accepted only when the model has no exogenous terms.
pub fn check_exog(exog: Option<&ExogenousMatrix>, n_exog: usize, rows: usize) -> IngarchResult<()> {
    match exog {
        Some(x) => x.check_shape(rows, n_exog),
        None if n_exog == 0 => Ok(()),
        None => Err(IngarchError::ExogColumnMismatch { expected: n_exog, actual: 0 }),
    }
}
