use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::StepKind;

/// Events emitted while a [`super::Pipeline`] is built and evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    RunStarted { name: String },
    StepAdded { index: usize, kind: StepKind },
    /// Only emitted when `PipelineOptions::emit_element_events` is set.
    ElementDropped { step: usize },
    SortMaterialized { step: usize, len: usize },
    /// A `min`/`max`/`average`/`summarize` terminal saw no elements.
    AggregateFailed { operation: &'static str },
    RunFinished {
        name: String,
        elapsed: Duration,
        metrics: PipelineMetricsSnapshot,
    },
}

/// Observer hook for pipeline events.
pub trait PipelineObserver: Send + Sync {
    fn on_event(&self, event: &PipelineEvent);
}

/// A simple stderr logger for pipeline events.
#[derive(Debug, Default)]
pub struct StdErrPipelineObserver;

impl PipelineObserver for StdErrPipelineObserver {
    fn on_event(&self, event: &PipelineEvent) {
        eprintln!("[pipeline] {event:?}");
    }
}

/// Forwards pipeline events to `tracing`.
///
/// Run boundaries are logged at `info`, everything else at `debug`, and per-element events at
/// `trace`.
#[derive(Debug, Default)]
pub struct TracingPipelineObserver;

impl PipelineObserver for TracingPipelineObserver {
    fn on_event(&self, event: &PipelineEvent) {
        match event {
            PipelineEvent::RunStarted { name } => {
                tracing::info!(pipeline = %name, "pipeline started");
            }
            PipelineEvent::StepAdded { index, kind } => {
                tracing::debug!(step = index, kind = ?kind, "step added");
            }
            PipelineEvent::ElementDropped { step } => {
                tracing::trace!(step = step, "element dropped");
            }
            PipelineEvent::SortMaterialized { step, len } => {
                tracing::debug!(step = step, len = len, "sort materialized input");
            }
            PipelineEvent::AggregateFailed { operation } => {
                tracing::warn!(operation = operation, "aggregate over empty input");
            }
            PipelineEvent::RunFinished {
                name,
                elapsed,
                metrics,
            } => {
                tracing::info!(pipeline = %name, ?elapsed, %metrics, "pipeline finished");
            }
        }
    }
}

/// Fans every event out to a list of observers, in order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn PipelineObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl PipelineObserver for CompositeObserver {
    fn on_event(&self, event: &PipelineEvent) {
        for o in &self.observers {
            o.on_event(event);
        }
    }
}

/// Counters for a single pipeline run.
///
/// Step closures update these as elements flow through; callers can snapshot them at any time.
pub struct PipelineMetrics {
    steps: AtomicU64,
    elements_tested: AtomicU64,
    elements_dropped: AtomicU64,
    elements_mapped: AtomicU64,
    elements_sorted: AtomicU64,
    elements_emitted: AtomicU64,
    elapsed_ns: AtomicU64,
    finished: AtomicBool,
}

impl PipelineMetrics {
    pub fn new() -> Self {
        Self {
            steps: AtomicU64::new(0),
            elements_tested: AtomicU64::new(0),
            elements_dropped: AtomicU64::new(0),
            elements_mapped: AtomicU64::new(0),
            elements_sorted: AtomicU64::new(0),
            elements_emitted: AtomicU64::new(0),
            elapsed_ns: AtomicU64::new(0),
            finished: AtomicBool::new(false),
        }
    }

    pub fn on_step(&self) {
        let _ = self.steps.fetch_add(1, Ordering::SeqCst);
    }

    pub fn on_element_tested(&self, kept: bool) {
        let _ = self.elements_tested.fetch_add(1, Ordering::SeqCst);
        if !kept {
            let _ = self.elements_dropped.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn on_element_mapped(&self) {
        let _ = self.elements_mapped.fetch_add(1, Ordering::SeqCst);
    }

    pub fn on_sorted(&self, len: usize) {
        let _ = self.elements_sorted.fetch_add(len as u64, Ordering::SeqCst);
    }

    pub fn on_element_emitted(&self) {
        let _ = self.elements_emitted.fetch_add(1, Ordering::SeqCst);
    }

    pub fn end_run(&self, elapsed: Duration) {
        self.elapsed_ns
            .store(elapsed.as_nanos().min(u64::MAX as u128) as u64, Ordering::SeqCst);
        self.finished.store(true, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> PipelineMetricsSnapshot {
        let elapsed = if self.finished.load(Ordering::SeqCst) {
            Some(Duration::from_nanos(self.elapsed_ns.load(Ordering::SeqCst)))
        } else {
            None
        };

        PipelineMetricsSnapshot {
            steps: self.steps.load(Ordering::SeqCst),
            elements_tested: self.elements_tested.load(Ordering::SeqCst),
            elements_dropped: self.elements_dropped.load(Ordering::SeqCst),
            elements_mapped: self.elements_mapped.load(Ordering::SeqCst),
            elements_sorted: self.elements_sorted.load(Ordering::SeqCst),
            elements_emitted: self.elements_emitted.load(Ordering::SeqCst),
            elapsed,
        }
    }
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable snapshot of [`PipelineMetrics`].
///
/// `elapsed` is `None` until the run reaches a terminal operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineMetricsSnapshot {
    pub steps: u64,
    pub elements_tested: u64,
    pub elements_dropped: u64,
    pub elements_mapped: u64,
    pub elements_sorted: u64,
    pub elements_emitted: u64,
    pub elapsed: Option<Duration>,
}

impl fmt::Display for PipelineMetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "steps={}, tested={}, dropped={}, mapped={}, sorted={}, emitted={}, elapsed={:?}",
            self.steps,
            self.elements_tested,
            self.elements_dropped,
            self.elements_mapped,
            self.elements_sorted,
            self.elements_emitted,
            self.elapsed
        )
    }
}
