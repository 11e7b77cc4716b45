//! Configuration validation against a [`Schema`].
//!
//! Checks presence of required attributes, value types, and runs the string
//! validators declared on each attribute.
//!
//! # Example
//!
//! ```
//! use singlestoredb_provider::schema::{Attribute, Schema};
//! use singlestoredb_provider::validation::{validate, StringValidator};
//! use serde_json::json;
//!
//! let schema = Schema::v0().with_attribute(
//!     "id",
//!     Attribute::required_string().with_validators(vec![StringValidator::Uuid]),
//! );
//!
//! let diagnostics = validate(&schema, &json!({"id": "3c1e7a52-8a0e-4f5c-9b7d-1f2e3d4c5b6a"}));
//! assert!(diagnostics.is_empty());
//!
//! let diagnostics = validate(&schema, &json!({"id": "not-a-uuid"}));
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].attribute, Some("id".to_string()));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::schema::{Attribute, AttributeType, Diagnostic, Schema};

/// A validator applied to configured string values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringValidator {
    /// The value must be a UUID.
    Uuid,
}

impl StringValidator {
    /// Human-readable description of the constraint.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Uuid => "value must be a valid UUID",
        }
    }

    /// Validate a string value, returning a diagnostic on failure.
    pub fn validate(&self, path: &str, value: &str) -> Option<Diagnostic> {
        match self {
            Self::Uuid => match Uuid::parse_str(value) {
                Ok(_) => None,
                Err(err) => Some(
                    Diagnostic::error("Invalid UUID")
                        .with_detail(format!("Attribute {} {}: {}", path, self.description(), err))
                        .with_attribute(path),
                ),
            },
        }
    }
}

/// Validate a JSON value against a schema.
///
/// Returns a list of diagnostics for any validation errors found.
/// An empty list means the value is valid.
///
/// - Required attributes must be present and non-null
/// - Computed-only attributes are skipped (the provider sets these)
/// - Attribute types must match the schema
/// - String validators run on every present string value
pub fn validate(schema: &Schema, value: &Value) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    validate_object(&schema.attributes, value, "", &mut diagnostics);
    diagnostics
}

/// Validate a JSON value against a schema, returning Ok if valid or Err with diagnostics.
pub fn validate_result(schema: &Schema, value: &Value) -> Result<(), Vec<Diagnostic>> {
    let diagnostics = validate(schema, value);
    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(diagnostics)
    }
}

/// Check if a JSON value is valid against a schema.
pub fn is_valid(schema: &Schema, value: &Value) -> bool {
    validate(schema, value).is_empty()
}

fn validate_object(
    attributes: &BTreeMap<String, Attribute>,
    value: &Value,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let empty = serde_json::Map::new();
    let obj = match value {
        Value::Object(map) => map,
        // Null stands for an entirely empty configuration
        Value::Null => &empty,
        _ => {
            let diag = Diagnostic::error("Expected object")
                .with_detail(format!("Got {}", value_type_name(value)));
            diagnostics.push(if path.is_empty() {
                diag
            } else {
                diag.with_attribute(path)
            });
            return;
        },
    };

    for (name, attr) in attributes {
        let attr_path = join_path(path, name);
        validate_attribute(attr, obj.get(name), &attr_path, diagnostics);
    }
}

fn validate_attribute(
    attr: &Attribute,
    value: Option<&Value>,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if attr.flags.is_computed_only() {
        return;
    }

    match value {
        None | Some(Value::Null) => {
            if attr.flags.required {
                diagnostics.push(
                    Diagnostic::error(format!("Missing required attribute '{}'", path))
                        .with_detail("This attribute is required and must be provided")
                        .with_attribute(path),
                );
            }
        },
        Some(v) => {
            if validate_attribute_type(&attr.attr_type, v, path, diagnostics) {
                if let Some(s) = v.as_str() {
                    diagnostics.extend(
                        attr.validators
                            .iter()
                            .filter_map(|validator| validator.validate(path, s)),
                    );
                }
            }
        },
    }
}

/// Returns false if the value has the wrong type.
fn validate_attribute_type(
    attr_type: &AttributeType,
    value: &Value,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> bool {
    let expected = match attr_type {
        AttributeType::String if value.is_string() => return true,
        AttributeType::String => "string",
        AttributeType::Int64 if value.is_i64() => return true,
        AttributeType::Int64 => "int64",
        AttributeType::Bool if value.is_boolean() => return true,
        AttributeType::Bool => "bool",
        AttributeType::List(element_type) => match value.as_array() {
            Some(arr) => {
                let before = diagnostics.len();
                for (i, elem) in arr.iter().enumerate() {
                    let elem_path = format!("{}.{}", path, i);
                    validate_attribute_type(element_type, elem, &elem_path, diagnostics);
                }
                return diagnostics.len() == before;
            },
            None => "list",
        },
        AttributeType::SingleNested(attributes) => match value {
            Value::Object(_) => {
                let before = diagnostics.len();
                validate_object(attributes, value, path, diagnostics);
                return diagnostics.len() == before;
            },
            _ => "object",
        },
        AttributeType::ListNested(attributes) => match value.as_array() {
            Some(arr) => {
                let before = diagnostics.len();
                for (i, item) in arr.iter().enumerate() {
                    let item_path = format!("{}.{}", path, i);
                    validate_object(attributes, item, &item_path, diagnostics);
                }
                return diagnostics.len() == before;
            },
            None => "list",
        },
    };

    diagnostics.push(type_error(path, expected, value));
    false
}

fn join_path(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", base, name)
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_error(path: &str, expected: &str, got: &Value) -> Diagnostic {
    Diagnostic::error(format!("Invalid type for attribute '{}'", path))
        .with_detail(format!("Expected {}, got {}", expected, value_type_name(got)))
        .with_attribute(path)
}
