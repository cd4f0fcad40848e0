use jsonschema::JSONSchema;
use serde_json::Value;
use uiplan_core::{FieldPath, StructuredIssue};

use crate::registry::get_json_schema;
use crate::versions::SCHEMA_PLAN_0_1_0;

/// Validates `instance` against the embedded schema `schema_id`.
///
/// Issues are returned in the order the validator encountered them, so the
/// first entry is the first violation.
pub fn validate_schema_instance(schema_id: &str, instance: &Value) -> Vec<StructuredIssue> {
    let Some(schema) = get_json_schema(schema_id) else {
        return vec![schema_error(
            FieldPath::root(),
            format!("unknown schema id: {schema_id}"),
            "schema_registry.unknown_schema",
        )];
    };

    let schema_json: Value = match serde_json::from_str(schema.json) {
        Ok(value) => value,
        Err(err) => {
            return vec![schema_error(
                FieldPath::root(),
                format!("embedded schema json parse failed: {err}"),
                "schema_registry.invalid_embedded_schema",
            )];
        }
    };

    let compiled = match JSONSchema::options().compile(&schema_json) {
        Ok(compiled) => compiled,
        Err(err) => {
            return vec![schema_error(
                FieldPath::root(),
                format!("schema compile failed for {schema_id}: {err}"),
                "schema_registry.compile_failed",
            )];
        }
    };

    let mut issues = Vec::new();
    if let Err(errors) = compiled.validate(instance) {
        for error in errors {
            issues.push(schema_error(
                FieldPath::from_json_pointer(error.instance_path.to_string().as_str()),
                error.to_string(),
                "json_schema.validation",
            ));
        }
    }
    issues
}

/// Validates a raw plan document against the plan schema.
pub fn validate_plan_value(instance: &Value) -> Vec<StructuredIssue> {
    validate_schema_instance(SCHEMA_PLAN_0_1_0, instance)
}

fn schema_error(field_path: FieldPath, message: String, reference: &str) -> StructuredIssue {
    StructuredIssue::error("schema_error", field_path, message).with_reference(reference)
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
