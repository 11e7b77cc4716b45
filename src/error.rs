//! Error types for the SingleStoreDB provider.
//!
//! [`ProviderError`] covers infrastructure failures (configuration, transport,
//! decoding). Conditions a user can act on are reported as diagnostics instead;
//! see [`crate::schema::Diagnostic`].

use thiserror::Error;

use crate::schema::Diagnostic;

/// Errors that can occur while serving data sources.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A configuration error occurred.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The requested data source type is unknown.
    #[error("Unknown data source type: {0}")]
    UnknownResource(String),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The HTTP request to the management API failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The management API could not be reached.
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// A failure that carries a ready-made diagnostic summary and detail.
///
/// Produced by [`crate::util::status_ok`] when a management API call did not
/// return `200 OK`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{summary}: {detail}")]
pub struct SummaryWithDetailError {
    /// Short, one-line summary.
    pub summary: String,
    /// Longer explanation, including the API response body when available.
    pub detail: String,
}

impl SummaryWithDetailError {
    /// Create a new error from a summary and detail.
    pub fn new(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    /// Convert into a generic (not attribute-scoped) error diagnostic.
    pub fn into_diagnostic(self) -> Diagnostic {
        Diagnostic::error(self.summary).with_detail(self.detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DiagnosticSeverity;

    #[test]
    fn test_error_display() {
        let err = ProviderError::Configuration("missing api key".to_string());
        assert_eq!(format!("{}", err), "Configuration error: missing api key");

        let err = ProviderError::UnknownResource("singlestoredb_cluster".to_string());
        assert_eq!(
            format!("{}", err),
            "Unknown data source type: singlestoredb_cluster"
        );

        let err = ProviderError::Unavailable("connection refused".to_string());
        assert_eq!(format!("{}", err), "Service unavailable: connection refused");
    }

    #[test]
    fn test_serde_error_converts() {
        let err: ProviderError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ProviderError::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error: "));
    }

    #[test]
    fn test_summary_with_detail_into_diagnostic() {
        let err = SummaryWithDetailError::new("Request failed", "Body: {}");
        assert_eq!(err.to_string(), "Request failed: Body: {}");

        let diag = err.into_diagnostic();
        assert_eq!(diag.severity, DiagnosticSeverity::Error);
        assert_eq!(diag.summary, "Request failed");
        assert_eq!(diag.detail.as_deref(), Some("Body: {}"));
        assert!(diag.attribute.is_none());
    }
}
