//! The pipeline evaluator.
//!
//! This module sits "above" [`crate::processing`]: a [`Pipeline`] chains the same operations as
//! a builder and adds:
//!
//! - a record of the applied steps ([`StepKind`])
//! - run metrics ([`PipelineMetrics`])
//! - observer hooks for logging ([`PipelineObserver`])
//!
//! `filter`/`map`/`inspect` stay lazy; nothing runs until a terminal (`collect`, `reduce`, `sum`,
//! ...) consumes the pipeline. `sorted*` steps materialize the elements seen so far.
//!
//! ```rust
//! use collection_pipelines::execution::Pipeline;
//!
//! let evens = Pipeline::new([12, 13, 14, 67, 12])
//!     .filter(|v| v % 2 == 0)
//!     .sorted()
//!     .collect::<Vec<_>>();
//! assert_eq!(evens, vec![12, 12, 14]);
//! ```
//!
//! The `try_*` steps switch to a [`TryPipeline`], whose terminals return the first callback error
//! unchanged:
//!
//! ```rust
//! use collection_pipelines::execution::Pipeline;
//!
//! let parsed: Result<Vec<i64>, _> = Pipeline::new(["12", "x", "14"])
//!     .try_map(str::parse::<i64>)
//!     .collect();
//! assert!(parsed.is_err());
//! ```

mod observer;

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::error::PipelineResult;
use crate::processing::{self, AggregateOp, AggregateValue, Summary};
use crate::types::Numeric;

pub use observer::{
    CompositeObserver, PipelineEvent, PipelineMetrics, PipelineMetricsSnapshot, PipelineObserver,
    StdErrPipelineObserver, TracingPipelineObserver,
};

/// The kind of a step applied by a [`Pipeline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Filter,
    Map,
    Inspect,
    Sort,
    Reduce,
}

/// Configuration for a [`Pipeline`].
#[derive(Clone)]
pub struct PipelineOptions {
    /// Label carried by run events.
    pub name: String,
    /// Emit one [`PipelineEvent::ElementDropped`] per filtered-out element.
    ///
    /// Off by default; counters in [`PipelineMetrics`] are always kept.
    pub emit_element_events: bool,
    /// Optional observer for logging.
    pub observer: Option<Arc<dyn PipelineObserver>>,
}

impl fmt::Debug for PipelineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineOptions")
            .field("name", &self.name)
            .field("emit_element_events", &self.emit_element_events)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            name: "pipeline".to_string(),
            emit_element_events: false,
            observer: None,
        }
    }
}

impl PipelineOptions {
    /// Default options with the given run label.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Attach an observer.
    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = Some(observer);
        self
    }
}

/// Bookkeeping shared by every stage of one pipeline run.
///
/// `RunFinished` is emitted exactly once: by the terminal operation, or on drop if the pipeline
/// is abandoned before reaching one.
struct RunContext {
    options: PipelineOptions,
    steps: Vec<StepKind>,
    metrics: Arc<PipelineMetrics>,
    started: Instant,
    finished: bool,
}

impl RunContext {
    fn start(options: PipelineOptions) -> Self {
        let ctx = Self {
            options,
            steps: Vec::new(),
            metrics: Arc::new(PipelineMetrics::new()),
            started: Instant::now(),
            finished: false,
        };
        ctx.emit(PipelineEvent::RunStarted {
            name: ctx.options.name.clone(),
        });
        ctx
    }

    /// Records a step and returns its index.
    fn push_step(&mut self, kind: StepKind) -> usize {
        let index = self.steps.len();
        self.steps.push(kind);
        self.metrics.on_step();
        self.emit(PipelineEvent::StepAdded { index, kind });
        index
    }

    fn element_observer(&self) -> Option<Arc<dyn PipelineObserver>> {
        if self.options.emit_element_events {
            self.options.observer.clone()
        } else {
            None
        }
    }

    /// Wraps `iter` so every element handed to a terminal is counted.
    fn emitted<I>(&self, iter: I) -> Emitted<I> {
        Emitted {
            iter,
            metrics: Arc::clone(&self.metrics),
        }
    }

    fn sorted<T>(&self, step: usize, items: &[T]) {
        self.metrics.on_sorted(items.len());
        self.emit(PipelineEvent::SortMaterialized {
            step,
            len: items.len(),
        });
    }

    fn emit(&self, event: PipelineEvent) {
        if let Some(obs) = &self.options.observer {
            obs.on_event(&event);
        }
    }

    fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        let elapsed = self.started.elapsed();
        self.metrics.end_run(elapsed);
        self.emit(PipelineEvent::RunFinished {
            name: self.options.name.clone(),
            elapsed,
            metrics: self.metrics.snapshot(),
        });
    }
}

impl Drop for RunContext {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Counts elements consumed by a terminal operation.
struct Emitted<I> {
    iter: I,
    metrics: Arc<PipelineMetrics>,
}

impl<I: Iterator> Iterator for Emitted<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let item = self.iter.next()?;
        self.metrics.on_element_emitted();
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// A chain of steps over a single input sequence.
///
/// A pipeline is consumed by its terminal operation; it cannot be restarted. Dropping it before
/// a terminal still reports `RunFinished` with whatever the metrics saw so far.
pub struct Pipeline<I> {
    iter: I,
    ctx: RunContext,
}

impl<I: Iterator> Pipeline<I> {
    /// Start a pipeline with default options.
    pub fn new<S>(input: S) -> Self
    where
        S: IntoIterator<IntoIter = I>,
    {
        Self::with_options(input, PipelineOptions::default())
    }

    /// Start a pipeline with explicit options.
    pub fn with_options<S>(input: S, options: PipelineOptions) -> Self
    where
        S: IntoIterator<IntoIter = I>,
    {
        Self {
            iter: input.into_iter(),
            ctx: RunContext::start(options),
        }
    }

    /// Steps applied so far, in order.
    pub fn steps(&self) -> &[StepKind] {
        &self.ctx.steps
    }

    /// Live metrics handle for this run.
    pub fn metrics(&self) -> Arc<PipelineMetrics> {
        Arc::clone(&self.ctx.metrics)
    }

    /// Keep only elements for which `predicate` returns `true`.
    pub fn filter<P>(self, mut predicate: P) -> Pipeline<impl Iterator<Item = I::Item>>
    where
        P: FnMut(&I::Item) -> bool,
    {
        let Pipeline { iter, mut ctx } = self;
        let step = ctx.push_step(StepKind::Filter);
        let metrics = Arc::clone(&ctx.metrics);
        let observer = ctx.element_observer();

        let iter = iter.filter(move |item| {
            let keep = predicate(item);
            metrics.on_element_tested(keep);
            if !keep {
                if let Some(obs) = &observer {
                    obs.on_event(&PipelineEvent::ElementDropped { step });
                }
            }
            keep
        });
        Pipeline { iter, ctx }
    }

    /// Replace every element with `transform(element)`.
    pub fn map<U, F>(self, mut transform: F) -> Pipeline<impl Iterator<Item = U>>
    where
        F: FnMut(I::Item) -> U,
    {
        let Pipeline { iter, mut ctx } = self;
        ctx.push_step(StepKind::Map);
        let metrics = Arc::clone(&ctx.metrics);

        let iter = iter.map(move |item| {
            metrics.on_element_mapped();
            transform(item)
        });
        Pipeline { iter, ctx }
    }

    /// Call `f` on every element as it passes, without changing it.
    pub fn inspect<F>(self, f: F) -> Pipeline<impl Iterator<Item = I::Item>>
    where
        F: FnMut(&I::Item),
    {
        let Pipeline { iter, mut ctx } = self;
        ctx.push_step(StepKind::Inspect);
        Pipeline {
            iter: iter.inspect(f),
            ctx,
        }
    }

    /// Materialize and order by `comparator` (stable).
    pub fn sorted_by<C>(self, comparator: C) -> Pipeline<std::vec::IntoIter<I::Item>>
    where
        C: FnMut(&I::Item, &I::Item) -> Ordering,
    {
        let Pipeline { iter, mut ctx } = self;
        let step = ctx.push_step(StepKind::Sort);
        let items = processing::sort(iter, comparator);
        ctx.sorted(step, &items);
        Pipeline {
            iter: items.into_iter(),
            ctx,
        }
    }

    /// Materialize and order ascending.
    pub fn sorted(self) -> Pipeline<std::vec::IntoIter<I::Item>>
    where
        I::Item: Ord,
    {
        self.sorted_by(Ord::cmp)
    }

    /// Materialize and order descending.
    pub fn sorted_descending(self) -> Pipeline<std::vec::IntoIter<I::Item>>
    where
        I::Item: Ord,
    {
        self.sorted_by(|a, b| b.cmp(a))
    }

    /// Materialize and order ascending by a derived key.
    pub fn sorted_by_key<K, F>(self, mut key: F) -> Pipeline<std::vec::IntoIter<I::Item>>
    where
        K: Ord,
        F: FnMut(&I::Item) -> K,
    {
        self.sorted_by(move |a, b| key(a).cmp(&key(b)))
    }

    /// Switch to a [`TryPipeline`] whose later steps may fail with `E`.
    pub fn fallible<E>(self) -> TryPipeline<impl Iterator<Item = Result<I::Item, E>>> {
        let Pipeline { iter, ctx } = self;
        TryPipeline {
            inner: Pipeline {
                iter: iter.map(Ok::<I::Item, E>),
                ctx,
            },
        }
    }

    /// Keep elements for which `predicate` returns `Ok(true)`; see [`TryPipeline::try_filter`].
    pub fn try_filter<E, P>(
        self,
        predicate: P,
    ) -> TryPipeline<impl Iterator<Item = Result<I::Item, E>>>
    where
        P: FnMut(&I::Item) -> Result<bool, E>,
    {
        self.fallible().try_filter(predicate)
    }

    /// Fallible map; see [`TryPipeline::try_map`].
    pub fn try_map<U, E, F>(self, transform: F) -> TryPipeline<impl Iterator<Item = Result<U, E>>>
    where
        F: FnMut(I::Item) -> Result<U, E>,
    {
        self.fallible().try_map(transform)
    }

    /// Fallible sort; see [`TryPipeline::try_sorted_by`].
    pub fn try_sorted_by<E, C>(
        self,
        comparator: C,
    ) -> TryPipeline<std::vec::IntoIter<Result<I::Item, E>>>
    where
        C: FnMut(&I::Item, &I::Item) -> Result<Ordering, E>,
    {
        self.fallible().try_sorted_by(comparator)
    }

    /// Collect the remaining elements.
    pub fn collect<B>(self) -> B
    where
        B: FromIterator<I::Item>,
    {
        let Pipeline { iter, mut ctx } = self;
        let out = ctx.emitted(iter).collect();
        ctx.finish();
        out
    }

    /// Fold the remaining elements left to right starting from `seed`.
    pub fn reduce<R, F>(self, seed: R, combine: F) -> R
    where
        F: FnMut(R, I::Item) -> R,
    {
        let Pipeline { iter, mut ctx } = self;
        ctx.push_step(StepKind::Reduce);
        let out = processing::reduce(ctx.emitted(iter), seed, combine);
        ctx.finish();
        out
    }

    /// Fallible fold; the first `Err` from `combine` is returned unchanged.
    pub fn try_reduce<R, E, F>(self, seed: R, combine: F) -> Result<R, E>
    where
        F: FnMut(R, I::Item) -> Result<R, E>,
    {
        let Pipeline { iter, mut ctx } = self;
        ctx.push_step(StepKind::Reduce);
        let out = processing::try_reduce(ctx.emitted(iter), seed, combine);
        ctx.finish();
        out
    }

    /// Call `f` on every remaining element.
    pub fn for_each<F>(self, f: F)
    where
        F: FnMut(I::Item),
    {
        let Pipeline { iter, mut ctx } = self;
        ctx.emitted(iter).for_each(f);
        ctx.finish();
    }

    /// Number of remaining elements.
    pub fn count(self) -> usize {
        self.aggregate_with(AggregateOp::Count.name(), |items| Ok(processing::count(items)))
            .unwrap_or_default()
    }

    fn aggregate_with<T, F>(self, operation: &'static str, f: F) -> PipelineResult<T>
    where
        F: FnOnce(Emitted<I>) -> PipelineResult<T>,
    {
        let Pipeline { iter, mut ctx } = self;
        let out = f(ctx.emitted(iter));
        if out.is_err() {
            ctx.emit(PipelineEvent::AggregateFailed { operation });
        }
        ctx.finish();
        out
    }
}

impl<I> Pipeline<I>
where
    I: Iterator,
    I::Item: Numeric,
{
    /// Sum of the remaining elements; zero if none remain.
    pub fn sum(self) -> I::Item {
        self.aggregate_with(AggregateOp::Sum.name(), |items| Ok(processing::sum(items)))
            .unwrap_or(<I::Item as Numeric>::ZERO)
    }

    /// Smallest remaining element.
    pub fn min(self) -> PipelineResult<I::Item> {
        self.aggregate_with(AggregateOp::Min.name(), processing::min)
    }

    /// Largest remaining element.
    pub fn max(self) -> PipelineResult<I::Item> {
        self.aggregate_with(AggregateOp::Max.name(), processing::max)
    }

    /// Mean of the remaining elements.
    pub fn average(self) -> PipelineResult<f64> {
        self.aggregate_with(AggregateOp::Average.name(), processing::average)
    }

    /// Count, sum, min, max and average of the remaining elements.
    pub fn summarize(self) -> PipelineResult<Summary<I::Item>> {
        self.aggregate_with("summarize", processing::summarize)
    }

    /// Evaluate a built-in aggregate.
    pub fn aggregate(self, op: AggregateOp) -> PipelineResult<AggregateValue<I::Item>> {
        self.aggregate_with(op.name(), |items| processing::aggregate(items, op))
    }
}

impl<I> fmt::Debug for Pipeline<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.ctx.options.name)
            .field("steps", &self.ctx.steps)
            .finish()
    }
}

/// A pipeline whose steps may fail.
///
/// Elements travel as `Result<T, E>`. The first `Err`, from a callback or from upstream, ends the
/// sequence: later callbacks are not invoked and the terminal returns that error unchanged.
pub struct TryPipeline<I> {
    inner: Pipeline<I>,
}

impl<I, T, E> TryPipeline<I>
where
    I: Iterator<Item = Result<T, E>>,
{
    /// Steps applied so far, in order.
    pub fn steps(&self) -> &[StepKind] {
        self.inner.steps()
    }

    /// Live metrics handle for this run.
    pub fn metrics(&self) -> Arc<PipelineMetrics> {
        self.inner.metrics()
    }

    /// Keep elements for which `predicate` returns `Ok(true)`.
    pub fn try_filter<P>(self, mut predicate: P) -> TryPipeline<impl Iterator<Item = Result<T, E>>>
    where
        P: FnMut(&T) -> Result<bool, E>,
    {
        let Pipeline { iter, mut ctx } = self.inner;
        let step = ctx.push_step(StepKind::Filter);
        let metrics = Arc::clone(&ctx.metrics);
        let observer = ctx.element_observer();

        let judged = processing::try_map(iter, move |item: Result<T, E>| {
            let item = item?;
            let keep = predicate(&item)?;
            metrics.on_element_tested(keep);
            if !keep {
                if let Some(obs) = &observer {
                    obs.on_event(&PipelineEvent::ElementDropped { step });
                }
            }
            Ok(keep.then_some(item))
        });
        TryPipeline {
            inner: Pipeline {
                iter: judged.filter_map(Result::transpose),
                ctx,
            },
        }
    }

    /// Replace every element with `transform(element)`, stopping at the first `Err`.
    pub fn try_map<U, F>(self, mut transform: F) -> TryPipeline<impl Iterator<Item = Result<U, E>>>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        let Pipeline { iter, mut ctx } = self.inner;
        ctx.push_step(StepKind::Map);
        let metrics = Arc::clone(&ctx.metrics);

        let iter = processing::try_map(iter, move |item: Result<T, E>| {
            let out = transform(item?);
            metrics.on_element_mapped();
            out
        });
        TryPipeline {
            inner: Pipeline { iter, ctx },
        }
    }

    /// Infallible filter over the successful elements.
    pub fn filter<P>(self, predicate: P) -> TryPipeline<impl Iterator<Item = Result<T, E>>>
    where
        P: FnMut(&T) -> bool,
    {
        let mut predicate = predicate;
        self.try_filter(move |item| Ok(predicate(item)))
    }

    /// Infallible map over the successful elements.
    pub fn map<U, F>(self, transform: F) -> TryPipeline<impl Iterator<Item = Result<U, E>>>
    where
        F: FnMut(T) -> U,
    {
        let mut transform = transform;
        self.try_map(move |item| Ok(transform(item)))
    }

    /// Materialize and order by a fallible comparator (stable).
    ///
    /// An upstream error or the first comparator error becomes the only element left.
    pub fn try_sorted_by<C>(self, comparator: C) -> TryPipeline<std::vec::IntoIter<Result<T, E>>>
    where
        C: FnMut(&T, &T) -> Result<Ordering, E>,
    {
        let Pipeline { iter, mut ctx } = self.inner;
        let step = ctx.push_step(StepKind::Sort);
        let sorted = iter
            .collect::<Result<Vec<T>, E>>()
            .and_then(|items| processing::try_sort(items, comparator));

        let items: Vec<Result<T, E>> = match sorted {
            Ok(items) => {
                ctx.sorted(step, &items);
                items.into_iter().map(Ok).collect()
            }
            Err(e) => vec![Err(e)],
        };
        TryPipeline {
            inner: Pipeline {
                iter: items.into_iter(),
                ctx,
            },
        }
    }

    /// Collect the successful elements, or return the first error.
    pub fn collect<B>(self) -> Result<B, E>
    where
        B: FromIterator<T>,
    {
        let Pipeline { iter, mut ctx } = self.inner;
        let out = ctx.emitted(iter).collect();
        ctx.finish();
        out
    }

    /// Fold the successful elements, stopping at the first error from upstream or `combine`.
    pub fn try_reduce<R, F>(self, seed: R, mut combine: F) -> Result<R, E>
    where
        F: FnMut(R, T) -> Result<R, E>,
    {
        let Pipeline { iter, mut ctx } = self.inner;
        ctx.push_step(StepKind::Reduce);
        let out = processing::try_reduce(ctx.emitted(iter), seed, |acc, item| combine(acc, item?));
        ctx.finish();
        out
    }
}

impl<I> fmt::Debug for TryPipeline<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryPipeline")
            .field("name", &self.inner.ctx.options.name)
            .field("steps", &self.inner.ctx.steps)
            .finish()
    }
}
