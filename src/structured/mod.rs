//! Structured output support.
//!
//! Three concerns, one per submodule:
//! - `schema`: generate JSON schemas from Rust types and build the
//!   `response_format` request parameter or a schema prompt block
//! - `extract`: pull the JSON payload out of raw model output
//! - `validator`: validate the payload against the schema
//!
//! # Examples
//!
//! ```
//! use hosted_models::structured::{schema_for_type, SchemaValidator};
//! use schemars::JsonSchema;
//! use serde_json::json;
//!
//! #[derive(JsonSchema)]
//! struct CityLocation {
//!     city: String,
//!     country: String,
//! }
//!
//! let (name, schema) = schema_for_type::<CityLocation>();
//! assert_eq!(name, "CityLocation");
//!
//! let validator = SchemaValidator::new(&schema).unwrap();
//! assert!(validator
//!     .validate(&json!({"city": "London", "country": "United Kingdom"}))
//!     .is_ok());
//! ```

pub mod extract;
pub mod schema;
pub mod validator;

pub use extract::extract_json;
pub use schema::{schema_for_type, schema_instruction, to_strict_schema, ResponseFormat};
pub use validator::{SchemaValidator, SchemaViolation};
