//! Numeric aggregates over a sequence.
//!
//! `sum` and `count` are defined for empty input; `min`, `max`, `average` and `summarize` fail
//! with [`PipelineError::EmptyInput`] instead.

use std::cmp::Ordering;

use crate::error::{PipelineError, PipelineResult};
use crate::types::Numeric;

/// Built-in aggregate operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOp {
    /// Number of elements.
    Count,
    /// Sum of elements; zero for empty input.
    Sum,
    /// Smallest element.
    Min,
    /// Largest element.
    Max,
    /// Arithmetic mean as `f64`.
    Average,
}

impl AggregateOp {
    /// Lower-case operation name, used in error messages and events.
    pub fn name(self) -> &'static str {
        match self {
            AggregateOp::Count => "count",
            AggregateOp::Sum => "sum",
            AggregateOp::Min => "min",
            AggregateOp::Max => "max",
            AggregateOp::Average => "average",
        }
    }
}

/// Result of [`aggregate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AggregateValue<N> {
    Count(usize),
    Number(N),
    Float(f64),
}

/// One-pass statistics over a non-empty numeric sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary<N> {
    pub count: usize,
    pub sum: N,
    pub min: N,
    pub max: N,
    pub average: f64,
}

/// Number of elements in `input`.
pub fn count<I: IntoIterator>(input: I) -> usize {
    input.into_iter().count()
}

/// Sum of all elements, or `N::ZERO` for empty input.
pub fn sum<I, N>(input: I) -> N
where
    I: IntoIterator<Item = N>,
    N: Numeric,
{
    input.into_iter().fold(N::ZERO, |acc, v| acc + v)
}

/// Smallest element. Elements unordered with themselves (float NaN) are skipped.
pub fn min<I, N>(input: I) -> PipelineResult<N>
where
    I: IntoIterator<Item = N>,
    N: Numeric,
{
    extremum(input, Ordering::Less).ok_or(PipelineError::empty(AggregateOp::Min.name()))
}

/// Largest element. Elements unordered with themselves (float NaN) are skipped.
pub fn max<I, N>(input: I) -> PipelineResult<N>
where
    I: IntoIterator<Item = N>,
    N: Numeric,
{
    extremum(input, Ordering::Greater).ok_or(PipelineError::empty(AggregateOp::Max.name()))
}

/// Arithmetic mean, computed in `f64`.
pub fn average<I, N>(input: I) -> PipelineResult<f64>
where
    I: IntoIterator<Item = N>,
    N: Numeric,
{
    let (n, total) = input
        .into_iter()
        .fold((0usize, 0.0f64), |(n, total), v| (n + 1, total + v.to_f64()));
    if n == 0 {
        return Err(PipelineError::empty(AggregateOp::Average.name()));
    }
    Ok(total / n as f64)
}

/// Count, sum, min, max and average in a single pass.
pub fn summarize<I, N>(input: I) -> PipelineResult<Summary<N>>
where
    I: IntoIterator<Item = N>,
    N: Numeric,
{
    let mut count = 0usize;
    let mut sum = N::ZERO;
    let mut total = 0.0f64;
    let mut min: Option<N> = None;
    let mut max: Option<N> = None;

    for v in input {
        count += 1;
        sum = sum + v;
        total += v.to_f64();
        min = Some(pick(min, v, Ordering::Less));
        max = Some(pick(max, v, Ordering::Greater));
    }

    match (min.filter(is_ordered), max.filter(is_ordered)) {
        (Some(min), Some(max)) => Ok(Summary {
            count,
            sum,
            min,
            max,
            average: total / count as f64,
        }),
        _ => Err(PipelineError::empty("summarize")),
    }
}

/// Evaluate a built-in [`AggregateOp`].
pub fn aggregate<I, N>(input: I, op: AggregateOp) -> PipelineResult<AggregateValue<N>>
where
    I: IntoIterator<Item = N>,
    N: Numeric,
{
    match op {
        AggregateOp::Count => Ok(AggregateValue::Count(count(input))),
        AggregateOp::Sum => Ok(AggregateValue::Number(sum(input))),
        AggregateOp::Min => min(input).map(AggregateValue::Number),
        AggregateOp::Max => max(input).map(AggregateValue::Number),
        AggregateOp::Average => average(input).map(AggregateValue::Float),
    }
}

fn extremum<I, N>(input: I, wanted: Ordering) -> Option<N>
where
    I: IntoIterator<Item = N>,
    N: Numeric,
{
    input
        .into_iter()
        .fold(None, |acc, v| Some(pick(acc, v, wanted)))
        .filter(is_ordered)
}

// Keeps the current value on ties so the first occurrence wins.
fn pick<N: Numeric>(current: Option<N>, candidate: N, wanted: Ordering) -> N {
    match current {
        None => candidate,
        Some(cur) if !is_ordered(&cur) => candidate,
        Some(cur) if candidate.partial_cmp(&cur) == Some(wanted) => candidate,
        Some(cur) => cur,
    }
}

fn is_ordered<N: Numeric>(v: &N) -> bool {
    v.partial_cmp(v).is_some()
}
