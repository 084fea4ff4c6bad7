//! Schema validation for structured responses.

use crate::{Error, Result};
use jsonschema::{Draft, JSONSchema};
use std::fmt;

/// One schema violation with its location in the instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON pointer into the validated instance (e.g. "/pets/0/age").
    pub path: String,
    pub message: String,
}

impl SchemaViolation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Validator holding a compiled JSON schema.
///
/// Compile once per agent, validate per response.
pub struct SchemaValidator {
    compiled: JSONSchema,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator").finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Compile a draft-07 schema (the draft schemars emits).
    pub fn new(schema: &serde_json::Value) -> Result<Self> {
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(schema)
            .map_err(|e| Error::Configuration(format!("Failed to compile JSON schema: {}", e)))?;
        Ok(Self { compiled })
    }

    /// Validate an instance, collecting every violation.
    pub fn validate(&self, instance: &serde_json::Value) -> Result<()> {
        if let Err(errors) = self.compiled.validate(instance) {
            let violations: Vec<SchemaViolation> = errors
                .map(|e| SchemaViolation::new(e.instance_path.to_string(), e.to_string()))
                .collect();
            return Err(Error::SchemaValidation(violations));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pet_schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "age": {"type": "integer", "minimum": 0}
            },
            "required": ["name", "age"]
        })
    }

    #[test]
    fn test_valid_instance() {
        let validator = SchemaValidator::new(&pet_schema()).unwrap();
        assert!(validator.validate(&json!({"name": "Luna", "age": 5})).is_ok());
    }

    #[test]
    fn test_wrong_type_reports_path() {
        let validator = SchemaValidator::new(&pet_schema()).unwrap();
        let err = validator
            .validate(&json!({"name": "Luna", "age": "five"}))
            .unwrap_err();
        match err {
            Error::SchemaValidation(violations) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].path, "/age");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_field() {
        let validator = SchemaValidator::new(&pet_schema()).unwrap();
        let err = validator.validate(&json!({"name": "Loki"})).unwrap_err();
        assert!(err.to_string().contains("age"));
    }

    #[test]
    fn test_multiple_violations_collected() {
        let validator = SchemaValidator::new(&pet_schema()).unwrap();
        let err = validator
            .validate(&json!({"name": 1, "age": -3}))
            .unwrap_err();
        match err {
            Error::SchemaValidation(violations) => assert!(violations.len() >= 2),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_schema_is_configuration_error() {
        let err = SchemaValidator::new(&json!({"type": 42})).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
