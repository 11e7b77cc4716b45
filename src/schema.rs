//! Schema types for describing provider configuration and data sources.
//!
//! A schema is a flat map of named attributes. Each attribute carries a type,
//! usage flags (required, optional, computed), a markdown description and an
//! optional list of value validators. Nested objects are expressed with
//! [`AttributeType::SingleNested`] and [`AttributeType::ListNested`].
//!
//! Maps are ordered so that schemas and states serialize deterministically.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::validation::StringValidator;

/// The type of an attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    /// A string value.
    String,
    /// A 64-bit integer.
    Int64,
    /// A boolean value.
    Bool,
    /// A list of values of a single type.
    List(Box<AttributeType>),
    /// A single object with its own attributes; may be null.
    SingleNested(BTreeMap<String, Attribute>),
    /// A list of objects sharing the same attributes.
    ListNested(BTreeMap<String, Attribute>),
}

impl AttributeType {
    /// Create a list type.
    pub fn list(element_type: AttributeType) -> Self {
        Self::List(Box::new(element_type))
    }
}

/// Describes how an attribute can be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AttributeFlags {
    /// The attribute is required in configuration.
    pub required: bool,
    /// The attribute is optional in configuration.
    pub optional: bool,
    /// The attribute is computed by the provider (read-only).
    pub computed: bool,
    /// The attribute is sensitive and should be hidden in logs/UI.
    pub sensitive: bool,
}

impl AttributeFlags {
    /// Create flags for a required attribute.
    pub fn required() -> Self {
        Self {
            required: true,
            ..Default::default()
        }
    }

    /// Create flags for an optional attribute.
    pub fn optional() -> Self {
        Self {
            optional: true,
            ..Default::default()
        }
    }

    /// Create flags for a computed attribute (read-only, set by provider).
    pub fn computed() -> Self {
        Self {
            computed: true,
            ..Default::default()
        }
    }

    /// Create flags from explicit required/computed switches.
    ///
    /// Used by schema builders whose identifier attribute is an input in one
    /// data source and an output in its list companion.
    pub fn from_switches(required: bool, computed: bool) -> Self {
        Self {
            required,
            computed,
            ..Default::default()
        }
    }

    /// Whether the attribute is set by the provider only.
    pub fn is_computed_only(&self) -> bool {
        self.computed && !self.optional && !self.required
    }
}

/// Describes a single attribute in a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// The type of the attribute.
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    /// Flags describing how the attribute can be used.
    #[serde(flatten)]
    pub flags: AttributeFlags,
    /// Markdown description of the attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Validators applied to configured string values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<StringValidator>,
}

impl Attribute {
    /// Create a new attribute with the given type and flags.
    pub fn new(attr_type: AttributeType, flags: AttributeFlags) -> Self {
        Self {
            attr_type,
            flags,
            description: None,
            validators: Vec::new(),
        }
    }

    /// Create a required string attribute.
    pub fn required_string() -> Self {
        Self::new(AttributeType::String, AttributeFlags::required())
    }

    /// Create an optional string attribute.
    pub fn optional_string() -> Self {
        Self::new(AttributeType::String, AttributeFlags::optional())
    }

    /// Create a computed string attribute.
    pub fn computed_string() -> Self {
        Self::new(AttributeType::String, AttributeFlags::computed())
    }

    /// Create a computed int64 attribute.
    pub fn computed_int64() -> Self {
        Self::new(AttributeType::Int64, AttributeFlags::computed())
    }

    /// Create a computed bool attribute.
    pub fn computed_bool() -> Self {
        Self::new(AttributeType::Bool, AttributeFlags::computed())
    }

    /// Create a computed list of strings.
    pub fn computed_string_list() -> Self {
        Self::new(
            AttributeType::list(AttributeType::String),
            AttributeFlags::computed(),
        )
    }

    /// Create a computed single nested object.
    pub fn computed_single_nested(attributes: BTreeMap<String, Attribute>) -> Self {
        Self::new(
            AttributeType::SingleNested(attributes),
            AttributeFlags::computed(),
        )
    }

    /// Create a computed list of nested objects.
    pub fn computed_list_nested(attributes: BTreeMap<String, Attribute>) -> Self {
        Self::new(
            AttributeType::ListNested(attributes),
            AttributeFlags::computed(),
        )
    }

    /// Set the markdown description for this attribute.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the validators for this attribute.
    pub fn with_validators(mut self, validators: Vec<StringValidator>) -> Self {
        self.validators = validators;
        self
    }

    /// Mark this attribute as sensitive.
    pub fn sensitive(mut self) -> Self {
        self.flags.sensitive = true;
        self
    }
}

/// Schema for the provider configuration or a data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Schema {
    /// The version of this schema.
    #[serde(default)]
    pub version: u64,
    /// Attributes keyed by name.
    #[serde(default)]
    pub attributes: BTreeMap<String, Attribute>,
    /// Markdown description of the data source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Schema {
    /// Create a schema at version 0.
    pub fn v0() -> Self {
        Self::default()
    }

    /// Create a schema at version 0 from a prepared attribute map.
    pub fn from_attributes(attributes: BTreeMap<String, Attribute>) -> Self {
        Self {
            attributes,
            ..Self::default()
        }
    }

    /// Add an attribute to the schema.
    pub fn with_attribute(mut self, name: impl Into<String>, attr: Attribute) -> Self {
        self.attributes.insert(name.into(), attr);
        self
    }

    /// Set the description for the schema.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Schema for the whole provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProviderSchema {
    /// Schema for provider configuration.
    #[serde(default)]
    pub provider: Schema,
    /// Schemas for each data source type.
    #[serde(default)]
    pub data_sources: BTreeMap<String, Schema>,
}

impl ProviderSchema {
    /// Create a new empty provider schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the provider configuration schema.
    pub fn with_provider_config(mut self, schema: Schema) -> Self {
        self.provider = schema;
        self
    }

    /// Add a data source schema.
    pub fn with_data_source(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.data_sources.insert(name.into(), schema);
        self
    }
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// An error that prevents the operation from completing.
    Error,
    /// A warning that doesn't prevent the operation but should be addressed.
    Warning,
}

/// A diagnostic message reported to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity of the diagnostic.
    pub severity: DiagnosticSeverity,
    /// A short summary of the issue.
    pub summary: String,
    /// A detailed description of the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// The attribute path where the issue occurred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(summary: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            summary: summary.into(),
            detail: None,
            attribute: None,
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(summary: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            summary: summary.into(),
            detail: None,
            attribute: None,
        }
    }

    /// Add detail to this diagnostic.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the attribute path for this diagnostic.
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Whether this diagnostic is an error.
    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}

/// Returns true if any of the diagnostics is an error.
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_flags() {
        let required = AttributeFlags::required();
        assert!(required.required);
        assert!(!required.computed);
        assert!(!required.is_computed_only());

        let computed = AttributeFlags::computed();
        assert!(computed.computed);
        assert!(computed.is_computed_only());

        let switched = AttributeFlags::from_switches(false, true);
        assert_eq!(switched, AttributeFlags::computed());
    }

    #[test]
    fn test_attribute_builders() {
        let attr = Attribute::required_string()
            .with_description("ID of the workspace")
            .with_validators(vec![StringValidator::Uuid]);

        assert_eq!(attr.attr_type, AttributeType::String);
        assert!(attr.flags.required);
        assert_eq!(attr.description.as_deref(), Some("ID of the workspace"));
        assert_eq!(attr.validators, vec![StringValidator::Uuid]);
    }

    #[test]
    fn test_schema_serializes_in_name_order() {
        let schema = Schema::v0()
            .with_attribute("state", Attribute::computed_string())
            .with_attribute("id", Attribute::required_string())
            .with_attribute("name", Attribute::computed_string());

        let names: Vec<_> = schema.attributes.keys().cloned().collect();
        assert_eq!(names, vec!["id", "name", "state"]);

        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value["attributes"]["id"]["type"], "string");
        assert_eq!(value["attributes"]["id"]["required"], true);
        assert!(value["attributes"]["id"].get("validators").is_none());
    }

    #[test]
    fn test_nested_attribute_serialization() {
        let mut window = BTreeMap::new();
        window.insert("hour".to_string(), Attribute::computed_int64());
        window.insert("day".to_string(), Attribute::computed_int64());
        let schema = Schema::v0().with_attribute(
            "update_window",
            Attribute::computed_single_nested(window),
        );

        let value = serde_json::to_value(&schema).unwrap();
        let nested = &value["attributes"]["update_window"]["type"]["single_nested"];
        assert_eq!(nested["hour"]["type"], "int64");
        assert_eq!(nested["day"]["computed"], true);
    }

    #[test]
    fn test_provider_schema() {
        let provider_schema = ProviderSchema::new()
            .with_provider_config(
                Schema::v0().with_attribute("api_key", Attribute::optional_string().sensitive()),
            )
            .with_data_source(
                "singlestoredb_workspace",
                Schema::v0().with_attribute("id", Attribute::required_string()),
            );

        assert!(provider_schema.provider.attributes["api_key"].flags.sensitive);
        assert!(provider_schema
            .data_sources
            .contains_key("singlestoredb_workspace"));
    }

    #[test]
    fn test_diagnostic() {
        let err = Diagnostic::error("Invalid workspace ID")
            .with_detail("The workspace ID should be a valid UUID")
            .with_attribute("id");

        assert!(err.is_error());
        assert_eq!(err.summary, "Invalid workspace ID");
        assert_eq!(err.attribute.as_deref(), Some("id"));

        assert!(has_errors(&[Diagnostic::warning("w"), err]));
        assert!(!has_errors(&[Diagnostic::warning("w")]));
    }
}
