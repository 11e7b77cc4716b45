//! The data source abstraction and its read response.
//!
//! A data source declares its schema and turns a configuration value into a
//! state value. [`ReadResponse`] collects diagnostics and holds the state write;
//! a response never carries state once an error diagnostic was added.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::management::ManagementClient;
use crate::schema::{Diagnostic, Schema};

/// A read-only data source.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Short name, without the provider prefix (e.g. `workspace`).
    fn name(&self) -> &'static str;

    /// Schema of the data source.
    fn schema(&self) -> Schema;

    /// Read the data source for the given configuration.
    async fn read(&self, client: &dyn ManagementClient, config: Value) -> ReadResponse;
}

/// Outcome of a data source read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadResponse {
    /// State written by the data source.
    pub state: Option<Value>,
    /// Diagnostics reported during the read.
    pub diagnostics: Vec<Diagnostic>,
}

impl ReadResponse {
    /// Create an empty response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any error diagnostic was reported.
    pub fn has_error(&self) -> bool {
        crate::schema::has_errors(&self.diagnostics)
    }

    /// Add a generic error.
    pub fn add_error(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Diagnostic::error(summary).with_detail(detail));
    }

    /// Add an error scoped to a configuration attribute.
    pub fn add_attribute_error(
        &mut self,
        attribute: &str,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) {
        self.push(
            Diagnostic::error(summary)
                .with_detail(detail)
                .with_attribute(attribute),
        );
    }

    /// Append a diagnostic. An error discards any state already written.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_error() {
            self.state = None;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Write the mapped record as the new state.
    ///
    /// Ignored when an error was already reported.
    pub fn set_state<T: Serialize>(&mut self, record: &T) {
        if self.has_error() {
            return;
        }
        match serde_json::to_value(record) {
            Ok(value) => self.state = Some(value),
            Err(err) => self.add_error(
                "Failed to store state",
                format!("The record could not be serialized: {}", err),
            ),
        }
    }
}

/// Decode a configuration value into a typed model.
///
/// On failure an error diagnostic is added and `None` is returned.
pub fn decode_config<T: serde::de::DeserializeOwned>(
    config: Value,
    resp: &mut ReadResponse,
) -> Option<T> {
    match serde_json::from_value(config) {
        Ok(model) => Some(model),
        Err(err) => {
            resp.add_error(
                "Invalid configuration",
                format!("The data source configuration could not be decoded: {}", err),
            );
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Serialize)]
    struct Record {
        name: &'static str,
        endpoint: Option<&'static str>,
    }

    #[derive(Debug, Deserialize)]
    struct Config {
        id: String,
    }

    #[test]
    fn test_set_state() {
        let mut resp = ReadResponse::new();
        resp.set_state(&Record {
            name: "w1",
            endpoint: None,
        });

        assert!(!resp.has_error());
        assert_eq!(resp.state, Some(json!({"name": "w1", "endpoint": null})));
    }

    #[test]
    fn test_error_blocks_state() {
        let mut resp = ReadResponse::new();
        resp.add_attribute_error("id", "Invalid workspace ID", "should be a UUID");
        resp.set_state(&Record {
            name: "w1",
            endpoint: None,
        });

        assert!(resp.has_error());
        assert!(resp.state.is_none());
        assert_eq!(resp.diagnostics[0].attribute.as_deref(), Some("id"));
    }

    #[test]
    fn test_error_after_state_discards_it() {
        let mut resp = ReadResponse::new();
        resp.set_state(&Record {
            name: "w1",
            endpoint: None,
        });
        resp.push(Diagnostic::warning("just a warning"));
        assert!(resp.state.is_some());

        resp.add_error("boom", "detail");
        assert!(resp.state.is_none());
    }

    #[test]
    fn test_decode_config() {
        let mut resp = ReadResponse::new();
        let config: Option<Config> = decode_config(json!({"id": "abc"}), &mut resp);
        assert_eq!(config.unwrap().id, "abc");
        assert!(resp.diagnostics.is_empty());

        let config: Option<Config> = decode_config(json!({"id": 5}), &mut resp);
        assert!(config.is_none());
        assert_eq!(resp.diagnostics[0].summary, "Invalid configuration");
    }
}
