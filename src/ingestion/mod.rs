//! Building input sequences from text.
//!
//! Pipelines themselves never perform I/O; this module turns caller-provided JSON text into
//! records. Malformed input is reported as a [`crate::PipelineError`] and never partially
//! accepted.

pub mod json;

pub use json::{employees_from_json, records_from_json};
