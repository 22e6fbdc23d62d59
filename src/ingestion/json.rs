//! JSON record ingestion.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"id":1, ...}, {"id":2, ...}]`
//! - A single JSON object
//! - Newline-delimited JSON (NDJSON): `{"id":1, ...}\n{"id":2, ...}\n`

use serde::de::DeserializeOwned;

use crate::error::{PipelineError, PipelineResult};
use crate::types::Employee;

/// Parse employee records from JSON text.
///
/// Every record must carry all four fields; field values are taken as given.
pub fn employees_from_json(input: &str) -> PipelineResult<Vec<Employee>> {
    records_from_json(input)
}

/// Parse any deserializable record type from a JSON array, a single object, or NDJSON.
pub fn records_from_json<T: DeserializeOwned>(input: &str) -> PipelineResult<Vec<T>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    // First try parsing as a single JSON value (array or object).
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Array(items)) => items
            .into_iter()
            .map(|v| serde_json::from_value(v).map_err(PipelineError::from))
            .collect(),
        Ok(v @ serde_json::Value::Object(_)) => Ok(vec![serde_json::from_value(v)?]),
        Ok(_) => Err(PipelineError::InvalidRecord {
            index: 0,
            message: "json must be an object, an array of objects, or NDJSON".to_string(),
        }),
        // Fall back to NDJSON.
        Err(_) => trimmed
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| serde_json::from_str(line).map_err(PipelineError::from))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::{employees_from_json, records_from_json};
    use crate::error::PipelineError;
    use crate::types::Employee;

    #[test]
    fn parses_array_of_objects() {
        let input = r#"[
            {"id": 1, "name": "Ana", "salary": 1200.0, "department": "TI"},
            {"id": 2, "name": "Carlos", "salary": 1500, "department": "Comercial"}
        ]"#;
        let out = employees_from_json(input).unwrap();
        assert_eq!(
            out,
            vec![
                Employee::new(1, "Ana", 1200.0, "TI"),
                Employee::new(2, "Carlos", 1500.0, "Comercial"),
            ]
        );
    }

    #[test]
    fn parses_single_object_and_ndjson() {
        let one = r#"{"id": 5, "name": "Tereza", "salary": 3000.0, "department": "TI"}"#;
        assert_eq!(employees_from_json(one).unwrap().len(), 1);

        let ndjson = "{\"id\":1,\"name\":\"Ana\",\"salary\":1200.0,\"department\":\"TI\"}\n\n\
                      {\"id\":4,\"name\":\"Marcos\",\"salary\":1800.0,\"department\":\"TI\"}\n";
        let out = employees_from_json(ndjson).unwrap();
        assert_eq!(out.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 4]);
    }

    #[test]
    fn empty_input_yields_no_records() {
        assert!(employees_from_json("   \n").unwrap().is_empty());
    }

    #[test]
    fn missing_field_is_a_json_error() {
        let input = r#"[{"id": 1, "name": "Ana", "department": "TI"}]"#;
        let err = employees_from_json(input).unwrap_err();
        assert!(matches!(err, PipelineError::Json(_)));
        assert!(err.to_string().contains("salary"));
    }

    #[test]
    fn field_values_are_not_validated() {
        let input = r#"[
            {"id": 1, "name": "", "salary": -5.0, "department": "TI"},
            {"id": 2, "name": "  ", "salary": 0, "department": ""}
        ]"#;
        let out = employees_from_json(input).unwrap();
        assert_eq!(
            out,
            vec![
                Employee::new(1, "", -5.0, "TI"),
                Employee::new(2, "  ", 0.0, ""),
            ]
        );
    }

    #[test]
    fn scalar_json_is_rejected() {
        assert!(matches!(
            records_from_json::<i64>("42"),
            Err(PipelineError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn records_from_json_is_generic() {
        let values: Vec<i64> = records_from_json("[12, 13, 14, 67, 12]").unwrap();
        assert_eq!(values, vec![12, 13, 14, 67, 12]);
    }
}
