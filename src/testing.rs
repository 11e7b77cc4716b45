//! Testing utilities for the provider.
//!
//! [`ProviderTester`] drives a [`ProviderService`] without a host process, and
//! [`MockManagementClient`] stands in for the management API with canned
//! responses per endpoint.
//!
//! # Example
//!
//! ```ignore
//! use singlestoredb_provider::testing::{
//!     CannedResponse, Endpoint, MockManagementClient, ProviderTester,
//! };
//! use singlestoredb_provider::SingleStoreProvider;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::test]
//! async fn test_read_workspace_group() {
//!     let client = MockManagementClient::new()
//!         .respond(Endpoint::GetWorkspaceGroup, CannedResponse::text(404, "not found"));
//!     let tester = ProviderTester::new(SingleStoreProvider::with_client(Arc::new(client)));
//!
//!     let err = tester
//!         .read_data_source("singlestoredb_workspace_group", json!({
//!             "workspace_group_id": "3c1e7a52-8a0e-4f5c-9b7d-1f2e3d4c5b6a"
//!         }))
//!         .await
//!         .unwrap_err();
//!     assert!(err.to_string().contains("Not Found"));
//! }
//! ```

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::error::ProviderError;
use crate::management::{ApiResponse, ManagementClient, Workspace, WorkspaceGroup};
use crate::schema::{Diagnostic, DiagnosticSeverity, ProviderSchema};
use crate::service::ProviderService;

/// A test harness for provider implementations.
pub struct ProviderTester<P: ProviderService> {
    provider: P,
}

impl<P: ProviderService> ProviderTester<P> {
    /// Create a new tester for the given provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Get a reference to the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Get the provider's schema.
    pub fn schema(&self) -> ProviderSchema {
        self.provider.schema()
    }

    /// Get the list of data source type names.
    pub fn data_source_types(&self) -> Vec<String> {
        self.provider.metadata().data_sources
    }

    /// Validate provider configuration.
    pub async fn validate_provider_config(&self, config: Value) -> Result<(), TestError> {
        let diagnostics = self.provider.validate_provider_config(config).await?;
        check_diagnostics(diagnostics)
    }

    /// Configure the provider.
    ///
    /// Returns `Err` with the error diagnostics if configuration fails.
    pub async fn configure(&self, config: Value) -> Result<(), TestError> {
        let diagnostics = self.provider.configure(config).await?;
        check_diagnostics(diagnostics)
    }

    /// Stop the provider.
    pub async fn stop(&self) -> Result<(), ProviderError> {
        self.provider.stop().await
    }

    /// Validate a data source configuration.
    pub async fn validate_data_source_config(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<(), TestError> {
        let diagnostics = self
            .provider
            .validate_data_source_config(data_source_type, config)
            .await?;
        check_diagnostics(diagnostics)
    }

    /// Read a data source and return the state it wrote.
    pub async fn read_data_source(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Value, TestError> {
        let resp = self
            .provider
            .read_data_source(data_source_type, config)
            .await?;
        check_diagnostics(resp.diagnostics)?;
        resp.state.ok_or(TestError::MissingState)
    }
}

/// Error type for test operations that may fail with diagnostics.
#[derive(Debug)]
pub enum TestError {
    /// The operation failed with diagnostics.
    Diagnostics(Vec<Diagnostic>),
    /// The operation failed with a provider error.
    Provider(ProviderError),
    /// The read succeeded without writing any state.
    MissingState,
}

impl TestError {
    /// Diagnostics carried by the error, empty for other failures.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            TestError::Diagnostics(diags) => diags,
            _ => &[],
        }
    }
}

impl std::fmt::Display for TestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestError::Diagnostics(diags) => {
                writeln!(f, "Operation failed with {} diagnostic(s):", diags.len())?;
                for diag in diags {
                    write!(f, "  [{:?}] {}", diag.severity, diag.summary)?;
                    if let Some(detail) = &diag.detail {
                        write!(f, ": {}", detail)?;
                    }
                    if let Some(attr) = &diag.attribute {
                        write!(f, " (at {})", attr)?;
                    }
                    writeln!(f)?;
                }
                Ok(())
            },
            TestError::Provider(e) => write!(f, "Provider error: {}", e),
            TestError::MissingState => write!(f, "Data source wrote no state"),
        }
    }
}

impl std::error::Error for TestError {}

impl From<ProviderError> for TestError {
    fn from(e: ProviderError) -> Self {
        TestError::Provider(e)
    }
}

fn check_diagnostics(diagnostics: Vec<Diagnostic>) -> Result<(), TestError> {
    let errors: Vec<_> = diagnostics
        .into_iter()
        .filter(|d| matches!(d.severity, DiagnosticSeverity::Error))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(TestError::Diagnostics(errors))
    }
}

/// Management API operations a [`MockManagementClient`] can answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `GET /v1/workspaceGroups/{id}`
    GetWorkspaceGroup,
    /// `GET /v1/workspaceGroups`
    ListWorkspaceGroups,
    /// `GET /v1/workspaces/{id}`
    GetWorkspace,
    /// `GET /v1/workspaces?workspaceGroupID={id}`
    ListWorkspaces,
}

/// A canned answer for one endpoint.
#[derive(Debug, Clone)]
pub enum CannedResponse {
    /// The service answered with this status and body.
    Reply {
        /// HTTP status code.
        status: u16,
        /// Raw body.
        body: String,
    },
    /// The request never got an answer.
    TransportError(String),
}

impl CannedResponse {
    /// Answer with a JSON body.
    pub fn json(status: u16, body: Value) -> Self {
        CannedResponse::Reply {
            status,
            body: body.to_string(),
        }
    }

    /// Answer with a plain text body.
    pub fn text(status: u16, body: &str) -> Self {
        CannedResponse::Reply {
            status,
            body: body.to_string(),
        }
    }

    /// Fail the call before any answer.
    pub fn transport_error(message: &str) -> Self {
        CannedResponse::TransportError(message.to_string())
    }

    fn to_api_response<T: DeserializeOwned>(&self) -> Result<ApiResponse<T>, ProviderError> {
        match self {
            CannedResponse::Reply { status, body } => {
                ApiResponse::from_parts(*status, body.as_str())
            },
            CannedResponse::TransportError(msg) => Err(ProviderError::Unavailable(msg.clone())),
        }
    }
}

/// In-memory [`ManagementClient`] returning canned responses.
///
/// Calls to an endpoint without a canned response fail with
/// [`ProviderError::Unavailable`].
#[derive(Debug, Default)]
pub struct MockManagementClient {
    responses: HashMap<Endpoint, CannedResponse>,
    calls: Mutex<Vec<(Endpoint, Option<Uuid>)>>,
}

impl MockManagementClient {
    /// Create a client with no canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `endpoint` with `response`.
    pub fn respond(mut self, endpoint: Endpoint, response: CannedResponse) -> Self {
        self.responses.insert(endpoint, response);
        self
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.lock_calls().len()
    }

    /// IDs passed to the calls made so far, in order.
    pub fn requested_ids(&self) -> Vec<Uuid> {
        self.lock_calls().iter().filter_map(|(_, id)| *id).collect()
    }

    /// Endpoints called so far, in order.
    pub fn requested_endpoints(&self) -> Vec<Endpoint> {
        self.lock_calls().iter().map(|(endpoint, _)| *endpoint).collect()
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<(Endpoint, Option<Uuid>)>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn answer<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        id: Option<Uuid>,
    ) -> Result<ApiResponse<T>, ProviderError> {
        self.lock_calls().push((endpoint, id));
        match self.responses.get(&endpoint) {
            Some(response) => response.to_api_response(),
            None => Err(ProviderError::Unavailable(format!(
                "no canned response for {:?}",
                endpoint
            ))),
        }
    }
}

#[async_trait]
impl ManagementClient for MockManagementClient {
    async fn get_workspace_group(
        &self,
        id: Uuid,
    ) -> Result<ApiResponse<WorkspaceGroup>, ProviderError> {
        self.answer(Endpoint::GetWorkspaceGroup, Some(id))
    }

    async fn list_workspace_groups(
        &self,
    ) -> Result<ApiResponse<Vec<WorkspaceGroup>>, ProviderError> {
        self.answer(Endpoint::ListWorkspaceGroups, None)
    }

    async fn get_workspace(&self, id: Uuid) -> Result<ApiResponse<Workspace>, ProviderError> {
        self.answer(Endpoint::GetWorkspace, Some(id))
    }

    async fn list_workspaces(
        &self,
        workspace_group_id: Uuid,
    ) -> Result<ApiResponse<Vec<Workspace>>, ProviderError> {
        self.answer(Endpoint::ListWorkspaces, Some(workspace_group_id))
    }
}

/// Assert that diagnostics contain no errors.
///
/// # Panics
///
/// Panics if there are any error diagnostics.
pub fn assert_no_errors(diagnostics: &[Diagnostic]) {
    let errors: Vec<_> = diagnostics
        .iter()
        .filter(|d| matches!(d.severity, DiagnosticSeverity::Error))
        .collect();

    assert!(
        errors.is_empty(),
        "Expected no errors, but got {} error(s): {:?}",
        errors.len(),
        errors.iter().map(|d| &d.summary).collect::<Vec<_>>()
    );
}

/// Assert that diagnostics contain at least one error.
///
/// # Panics
///
/// Panics if there are no error diagnostics.
pub fn assert_has_errors(diagnostics: &[Diagnostic]) {
    let has_errors = diagnostics
        .iter()
        .any(|d| matches!(d.severity, DiagnosticSeverity::Error));

    assert!(has_errors, "Expected at least one error, but got none");
}

/// Assert that diagnostics contain an error with the given summary substring.
///
/// # Panics
///
/// Panics if no error diagnostic contains the given substring.
pub fn assert_error_contains(diagnostics: &[Diagnostic], substring: &str) {
    let has_matching_error = diagnostics
        .iter()
        .any(|d| d.is_error() && d.summary.contains(substring));

    assert!(
        has_matching_error,
        "Expected an error containing '{}', but no matching error found. Errors: {:?}",
        substring,
        diagnostics
            .iter()
            .filter(|d| d.is_error())
            .map(|d| &d.summary)
            .collect::<Vec<_>>()
    );
}

/// Assert that an error scoped to `attribute` has a summary containing
/// `substring`.
///
/// # Panics
///
/// Panics if no such error exists.
pub fn assert_attribute_error(diagnostics: &[Diagnostic], attribute: &str, substring: &str) {
    let found = diagnostics.iter().any(|d| {
        d.is_error() && d.attribute.as_deref() == Some(attribute) && d.summary.contains(substring)
    });

    assert!(
        found,
        "Expected an error on '{}' containing '{}', but got: {:?}",
        attribute,
        substring,
        diagnostics
            .iter()
            .map(|d| (&d.attribute, &d.summary))
            .collect::<Vec<_>>()
    );
}
