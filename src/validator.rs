//! Record validation against discovered schemas.

use serde_json::Value;

use crate::error::{RecordError, ValidateError};

/// Validate one record against a final stream schema.
///
/// Every violation is collected, not just the first.
///
/// # Errors
///
/// Returns `ValidateError::InvalidSchema` if the schema does not compile, or
/// `ValidateError::Invalid` if the record doesn't match it.
pub fn validate_record(schema: &Value, record: &Value) -> Result<(), ValidateError> {
    let validator = jsonschema::validator_for(schema).map_err(|e| ValidateError::InvalidSchema {
        message: e.to_string(),
    })?;

    let errors: Vec<RecordError> = validator
        .iter_errors(record)
        .map(|e| RecordError {
            path: e.instance_path.to_string(),
            message: e.to_string(),
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidateError::Invalid { errors })
    }
}
