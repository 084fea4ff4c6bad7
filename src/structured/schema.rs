//! Schema generation from Rust types.

use schemars::JsonSchema;
use serde_json::json;

/// Schema name and JSON Schema value for a Rust type.
///
/// schemars emits draft-07 schemas, which is what the validator compiles
/// against and what the providers' `json_schema` response format accepts.
pub fn schema_for_type<T: JsonSchema>() -> (String, serde_json::Value) {
    let name = T::schema_name();
    let schema = schemars::schema_for!(T);
    let value = serde_json::to_value(&schema).unwrap_or_else(|_| json!({}));
    (name, value)
}

/// Prompt block instructing the model to answer with schema-conformant JSON.
///
/// Used when a provider (or model) lacks native `json_schema` support and the
/// schema has to travel in the prompt instead, paired with plain
/// `json_object` mode.
pub fn schema_instruction(schema: &serde_json::Value) -> String {
    let rendered = serde_json::to_string_pretty(schema).unwrap_or_else(|_| "{}".to_string());
    format!(
        "Provide the output as a single JSON object that strictly adheres to the \
         following JSON schema:\n{}",
        rendered
    )
}

/// The `response_format` request parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseFormat {
    /// Guarantees syntactically valid JSON, no schema enforcement.
    JsonObject,
    /// Provider-side schema enforcement.
    JsonSchema {
        name: String,
        schema: serde_json::Value,
        strict: bool,
    },
}

impl ResponseFormat {
    /// Schema-enforced format for a Rust type.
    pub fn for_type<T: JsonSchema>(strict: bool) -> Self {
        let (name, schema) = schema_for_type::<T>();
        ResponseFormat::JsonSchema {
            name,
            schema,
            strict,
        }
    }

    /// Value for the request body's `response_format` field.
    ///
    /// In strict mode the schema is rewritten to the providers' strict
    /// contract first (see [`to_strict_schema`]); the client-side validator
    /// keeps working against the untouched schema.
    pub fn to_request_value(&self) -> serde_json::Value {
        match self {
            ResponseFormat::JsonObject => json!({"type": "json_object"}),
            ResponseFormat::JsonSchema {
                name,
                schema,
                strict,
            } => {
                let schema = if *strict {
                    to_strict_schema(schema)
                } else {
                    schema.clone()
                };
                json!({
                    "type": "json_schema",
                    "json_schema": {
                        "name": name,
                        "strict": strict,
                        "schema": schema
                    }
                })
            }
        }
    }
}

/// Rewrite a schemars-generated schema to satisfy the strict `json_schema`
/// contract (OpenAI and compatible endpoints): every object schema carries
/// `additionalProperties: false` and lists every property in `required`, and
/// the `$schema`/`title` metadata keys are dropped from the top level.
///
/// Option fields stay optional in effect because schemars already emits them
/// as nullable (`"type": [..., "null"]`); strict mode wants them required
/// with an explicit null arm, which is exactly that shape.
pub fn to_strict_schema(schema: &serde_json::Value) -> serde_json::Value {
    let mut schema = schema.clone();
    if let Some(obj) = schema.as_object_mut() {
        obj.remove("$schema");
        obj.remove("title");
    }
    strictify(&mut schema);
    schema
}

fn strictify(value: &mut serde_json::Value) {
    let obj = match value.as_object_mut() {
        Some(obj) => obj,
        None => return,
    };

    let is_object_schema = obj.get("type").and_then(|t| t.as_str()) == Some("object")
        || obj.contains_key("properties");
    if is_object_schema {
        let keys: Vec<serde_json::Value> = obj
            .get("properties")
            .and_then(|p| p.as_object())
            .map(|p| p.keys().map(|k| k.as_str().into()).collect())
            .unwrap_or_default();
        obj.insert("required".into(), serde_json::Value::Array(keys));
        obj.insert("additionalProperties".into(), serde_json::Value::Bool(false));
    }

    for key in ["properties", "definitions", "$defs"] {
        if let Some(children) = obj.get_mut(key).and_then(|v| v.as_object_mut()) {
            for child in children.values_mut() {
                strictify(child);
            }
        }
    }
    if let Some(items) = obj.get_mut("items") {
        strictify(items);
    }
    for key in ["anyOf", "allOf", "oneOf"] {
        if let Some(variants) = obj.get_mut(key).and_then(|v| v.as_array_mut()) {
            for variant in variants {
                strictify(variant);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;

    #[derive(JsonSchema)]
    #[allow(dead_code)]
    struct Pet {
        name: String,
        age: u32,
        color: Option<String>,
    }

    #[test]
    fn test_schema_for_type() {
        let (name, schema) = schema_for_type::<Pet>();
        assert_eq!(name, "Pet");
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["name"]["type"], "string");
        // Option fields are not required
        let required = schema["required"].as_array().unwrap();
        assert!(required.iter().any(|v| v == "name"));
        assert!(!required.iter().any(|v| v == "color"));
    }

    #[test]
    fn test_json_object_request_value() {
        assert_eq!(
            ResponseFormat::JsonObject.to_request_value(),
            serde_json::json!({"type": "json_object"})
        );
    }

    #[test]
    fn test_json_schema_request_value() {
        let format = ResponseFormat::for_type::<Pet>(true);
        let value = format.to_request_value();
        assert_eq!(value["type"], "json_schema");
        assert_eq!(value["json_schema"]["name"], "Pet");
        assert_eq!(value["json_schema"]["strict"], true);
        assert_eq!(value["json_schema"]["schema"]["type"], "object");
    }

    #[test]
    fn test_strict_schema_closes_objects_and_requires_every_property() {
        let (_, schema) = schema_for_type::<Pet>();
        let strict = to_strict_schema(&schema);

        assert_eq!(strict["additionalProperties"], false);
        let required = strict["required"].as_array().unwrap();
        // Strict mode requires every key, Option fields included.
        for key in ["name", "age", "color"] {
            assert!(required.iter().any(|v| v == key), "missing {}", key);
        }
        // Option fields stay nullable, so requiring them is harmless.
        let color_type = strict["properties"]["color"]["type"].as_array().unwrap();
        assert!(color_type.iter().any(|v| v == "null"));
        // Metadata keys the strict contract rejects are gone.
        assert!(strict.get("$schema").is_none());
        assert!(strict.get("title").is_none());
        // The input schema is untouched (the validator keeps using it).
        assert!(schema.get("$schema").is_some());
    }

    #[derive(JsonSchema)]
    #[allow(dead_code)]
    struct Household {
        address: String,
        pets: Vec<Pet>,
    }

    #[test]
    fn test_strict_schema_recurses_into_items_and_definitions() {
        let (_, schema) = schema_for_type::<Household>();
        let strict = to_strict_schema(&schema);

        let pet = &strict["definitions"]["Pet"];
        assert_eq!(pet["additionalProperties"], false);
        assert!(pet["required"].as_array().unwrap().iter().any(|v| v == "color"));
    }

    #[test]
    fn test_strict_request_value_rewrites_wire_schema_only() {
        let format = ResponseFormat::for_type::<Pet>(true);
        let value = format.to_request_value();
        assert_eq!(
            value["json_schema"]["schema"]["additionalProperties"],
            false
        );
        // Non-strict requests keep the schema as generated.
        let format = ResponseFormat::for_type::<Pet>(false);
        let value = format.to_request_value();
        assert!(value["json_schema"]["schema"]
            .get("additionalProperties")
            .is_none());
    }

    #[test]
    fn test_schema_instruction_embeds_schema() {
        let (_, schema) = schema_for_type::<Pet>();
        let instruction = schema_instruction(&schema);
        assert!(instruction.contains("JSON schema"));
        assert!(instruction.contains("\"name\""));
    }
}
