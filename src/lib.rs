//! `collection-pipelines` is a small library for functional-style processing of in-memory
//! sequences: filter, map, sort, reduce and numeric aggregates.
//!
//! There are two ways to use it:
//!
//! - the free functions in [`processing`], which take any [`IntoIterator`] and compose by
//!   nesting calls
//! - the [`execution::Pipeline`] builder, which chains the same steps fluently and can report
//!   run events and metrics to a [`execution::PipelineObserver`]
//!
//! Filtering and mapping are lazy; sorting materializes; reductions and aggregates consume the
//! sequence. Everything is single-threaded and synchronous.
//!
//! ## Quick example: pipeline builder
//!
//! ```rust
//! use collection_pipelines::execution::Pipeline;
//!
//! let names = ["Ana", "Marcos", "Carlos", "Beatriz", "Amanda"];
//! let out: Vec<String> = Pipeline::new(names)
//!     .filter(|n| n.starts_with('A'))
//!     .map(str::to_uppercase)
//!     .sorted()
//!     .collect();
//! assert_eq!(out, vec!["AMANDA", "ANA"]);
//! ```
//!
//! ## Quick example: records
//!
//! ```rust
//! use collection_pipelines::execution::Pipeline;
//! use collection_pipelines::types::Employee;
//!
//! let staff = vec![
//!     Employee::new(1, "Ana", 1200.0, "TI"),
//!     Employee::new(3, "Beatriz", 2000.0, "Financeiro"),
//!     Employee::new(5, "Tereza", 3000.0, "TI"),
//! ];
//!
//! // Salary >= 2000, ordered by name descending.
//! let names: Vec<&str> = Pipeline::new(&staff)
//!     .filter(|e| e.salary >= 2000.0)
//!     .sorted_by(|a, b| b.name.cmp(&a.name))
//!     .map(|e| e.name.as_str())
//!     .collect();
//! assert_eq!(names, vec!["Tereza", "Beatriz"]);
//! ```
//!
//! ## Errors
//!
//! - `min`, `max`, `average` and `summarize` return [`PipelineError::EmptyInput`] for empty
//!   input; `sum` returns zero and `reduce` returns its seed.
//! - Callback failures are expressed with the `try_*` operations and are returned to the caller
//!   unchanged.
//!
//! ```rust
//! use collection_pipelines::processing::{average, try_map};
//! use collection_pipelines::PipelineError;
//!
//! assert!(matches!(
//!     average(Vec::<i32>::new()),
//!     Err(PipelineError::EmptyInput { .. })
//! ));
//!
//! let parsed: Result<Vec<i32>, _> = try_map(["1", "two"], str::parse::<i32>).collect();
//! assert!(parsed.is_err());
//! ```
//!
//! ## Modules
//!
//! - [`processing`]: stateless filter/map/sort/reduce/aggregate functions
//! - [`execution`]: the pipeline builder, observers and metrics
//! - [`types`]: the employee record and numeric element bound
//! - [`ingestion`]: parsing record lists from JSON text
//! - [`error`]: error types

pub mod error;
pub mod execution;
pub mod ingestion;
pub mod processing;
pub mod types;

pub use error::{PipelineError, PipelineResult};
