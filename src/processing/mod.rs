//! Stateless sequence operations.
//!
//! Each function takes anything implementing [`IntoIterator`] (owned collections, slices via
//! `&v`, arrays, other iterators) and leaves the caller's data untouched when given a borrow.
//!
//! Currently implemented:
//!
//! - [`filter()`] / [`map()`]: lazy, order-preserving
//! - [`sort()`] and friends: materialize and reorder (stable)
//! - [`reduce()`]: left fold with a seed
//! - [`aggregate()`]: count/sum/min/max/average over numeric sequences
//!
//! Every callback-taking operation has a `try_*` variant whose callback returns `Result`; the
//! first callback error is handed back to the caller as-is.
//!
//! ## Example: filter → map → sort
//!
//! ```rust
//! use collection_pipelines::processing::{filter, map, sort_natural};
//!
//! let names = ["Ana", "Marcos", "Carlos", "Beatriz", "Amanda"];
//! let starts_with_a = filter(names, |n| n.starts_with('A'));
//! let upper = map(starts_with_a, str::to_uppercase);
//! assert_eq!(sort_natural(upper), vec!["AMANDA", "ANA"]);
//! ```
//!
//! ## Example: aggregates
//!
//! ```rust
//! use collection_pipelines::processing::{average, max, min, reduce, sum};
//!
//! let values = [12, 13, 14, 67, 12];
//! assert_eq!(sum(values), 118);
//! assert_eq!(min(values).unwrap(), 12);
//! assert_eq!(max(values).unwrap(), 67);
//! assert_eq!(average(values).unwrap(), 23.6);
//! assert_eq!(reduce(values, 0, |a, b| a + b), 118);
//!
//! assert!(average(Vec::<i32>::new()).is_err());
//! assert_eq!(sum(Vec::<i32>::new()), 0);
//! ```

pub mod aggregate;
pub mod filter;
pub mod map;
pub mod reduce;
pub mod sort;

pub use aggregate::{
    aggregate, average, count, max, min, sum, summarize, AggregateOp, AggregateValue, Summary,
};
pub use filter::{filter, try_filter};
pub use map::{map, try_map};
pub use reduce::{reduce, try_reduce};
pub use sort::{sort, sort_by_key, sort_descending, sort_natural, try_sort};
