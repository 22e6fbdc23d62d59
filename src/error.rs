use thiserror::Error;

/// Convenience result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error type returned by aggregates and record ingestion.
///
/// Failures raised by caller-supplied predicates, transforms and comparators are never wrapped in
/// this type: the `try_*` operations return the caller's own error unchanged.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An aggregate that has no meaningful value for zero elements (`min`, `max`, `average`,
    /// `summarize`) was evaluated over an empty sequence.
    #[error("empty input: '{operation}' requires at least one element")]
    EmptyInput { operation: &'static str },

    /// The input text is not valid JSON / NDJSON, or does not match the record shape.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record parsed successfully but violates a field constraint.
    #[error("invalid record at position {index}: {message}")]
    InvalidRecord { index: usize, message: String },
}

impl PipelineError {
    pub(crate) fn empty(operation: &'static str) -> Self {
        Self::EmptyInput { operation }
    }

    /// Returns `true` for [`PipelineError::EmptyInput`].
    pub fn is_empty_input(&self) -> bool {
        matches!(self, Self::EmptyInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::PipelineError;

    #[test]
    fn empty_input_message_names_operation() {
        let err = PipelineError::empty("average");
        assert!(err.is_empty_input());
        assert_eq!(
            err.to_string(),
            "empty input: 'average' requires at least one element"
        );
    }

    #[test]
    fn json_errors_convert_via_from() {
        let raw = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: PipelineError = raw.into();
        assert!(!err.is_empty_input());
        assert!(err.to_string().starts_with("json error:"));
    }
}
