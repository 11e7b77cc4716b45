//! Client seam for the SingleStoreDB management API.
//!
//! Data sources talk to the service through the [`ManagementClient`] trait.
//! [`HttpManagementClient`] is the production implementation; tests use
//! [`crate::testing::MockManagementClient`].
//!
//! A call yields an [`ApiResponse`] whenever the service answered at all, even
//! with a non-success status. Only transport and decode failures are errors.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::ProviderError;

mod http;
#[allow(missing_docs)]
pub mod models;

pub use http::HttpManagementClient;
pub use models::{UpdateWindow, Workspace, WorkspaceGroup, WorkspaceGroupState, WorkspaceState};

/// HTTP status code for a successful read.
pub const STATUS_OK: u16 = 200;

/// HTTP status code for a missing object.
pub const STATUS_NOT_FOUND: u16 = 404;

/// A management API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse<T> {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
    /// Decoded body, present only for `200 OK`.
    pub json200: Option<T>,
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Build a response from a status and body, decoding the body on `200 OK`.
    pub fn from_parts(status: u16, body: impl Into<String>) -> Result<Self, ProviderError> {
        let body = body.into();
        let json200 = if status == STATUS_OK {
            Some(serde_json::from_str(&body)?)
        } else {
            None
        };

        Ok(Self {
            status,
            body,
            json200,
        })
    }
}

impl<T> ApiResponse<T> {
    /// Canonical reason phrase of the status code, e.g. `Not Found`.
    ///
    /// Empty for codes without a registered reason.
    pub fn status_text(&self) -> &'static str {
        reqwest::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or_default()
    }
}

/// Operations of the management API used by the data sources.
#[async_trait]
pub trait ManagementClient: Send + Sync {
    /// `GET /v1/workspaceGroups/{id}`
    async fn get_workspace_group(
        &self,
        id: Uuid,
    ) -> Result<ApiResponse<WorkspaceGroup>, ProviderError>;

    /// `GET /v1/workspaceGroups`
    async fn list_workspace_groups(&self)
        -> Result<ApiResponse<Vec<WorkspaceGroup>>, ProviderError>;

    /// `GET /v1/workspaces/{id}`
    async fn get_workspace(&self, id: Uuid) -> Result<ApiResponse<Workspace>, ProviderError>;

    /// `GET /v1/workspaces?workspaceGroupID={id}`
    async fn list_workspaces(
        &self,
        workspace_group_id: Uuid,
    ) -> Result<ApiResponse<Vec<Workspace>>, ProviderError>;
}
