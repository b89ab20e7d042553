//! Progress reporting for long-running fits.
//!
//! Fitting and backtesting are synchronous; callers that need to surface
//! progress (a UI, a streaming endpoint) pass a [`ProgressSink`]. Events carry
//! a pipeline [`FitStage`], the estimator [`FitState`] at that point, a
//! percentage that never decreases within one run, and a short message.
//!
//! Sinks must not block: the `mpsc::Sender` implementation uses `send`
//! on an unbounded channel and drops events once the receiver is gone.
use serde::{Deserialize, Serialize};
use std::sync::mpsc::Sender;

/// Lifecycle of a single estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FitState {
    Initialized,
    Fitting,
    /// Maximum likelihood finished with the stopping rule firing.
    Converged,
    /// Maximum likelihood hit the iteration cap or timeout; the best point
    /// was kept.
    ConvergenceWarning,
    /// The AR(1) fallback produced the model.
    Fallback,
}

/// Checkpoints of the training pipeline, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FitStage {
    Started,
    Validated,
    Optimizing,
    Optimized,
    Scored,
    Backtested,
    Done,
}

impl FitStage {
    /// Percentage reported when this checkpoint is reached.
    pub fn percent(self) -> u8 {
        match self {
            FitStage::Started => 0,
            FitStage::Validated => 10,
            FitStage::Optimizing => 20,
            FitStage::Optimized => 60,
            FitStage::Scored => 75,
            FitStage::Backtested => 90,
            FitStage::Done => 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub stage: FitStage,
    pub state: FitState,
    pub percent: u8,
    pub message: String,
}

impl ProgressEvent {
    pub fn new(stage: FitStage, state: FitState, message: impl Into<String>) -> Self {
        ProgressEvent { stage, state, percent: stage.percent(), message: message.into() }
    }
}

/// Receiver of progress events.
pub trait ProgressSink {
    fn report(&self, event: ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(ProgressEvent),
{
    fn report(&self, event: ProgressEvent) {
        self(event)
    }
}

impl ProgressSink for Sender<ProgressEvent> {
    fn report(&self, event: ProgressEvent) {
        // A closed receiver means nobody is listening any more.
        let _ = self.send(event);
    }
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _event: ProgressEvent) {}
}
