//! `reqwest`-backed management API client.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::{ApiResponse, ManagementClient, Workspace, WorkspaceGroup};
use crate::config::ResolvedConfig;
use crate::error::ProviderError;

/// Management API client speaking HTTPS with a bearer API key.
///
/// The underlying `reqwest::Client` pools connections and is safe to share
/// between concurrent reads.
#[derive(Debug, Clone)]
pub struct HttpManagementClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpManagementClient {
    /// Create a client for the resolved provider configuration.
    pub fn new(config: &ResolvedConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_service_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<T>, ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "Calling management API");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(query)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(%url, status, "Management API responded");

        ApiResponse::from_parts(status, body)
    }
}

#[async_trait]
impl ManagementClient for HttpManagementClient {
    #[instrument(skip(self))]
    async fn get_workspace_group(
        &self,
        id: Uuid,
    ) -> Result<ApiResponse<WorkspaceGroup>, ProviderError> {
        self.get(&format!("/v1/workspaceGroups/{}", id), &[]).await
    }

    #[instrument(skip(self))]
    async fn list_workspace_groups(
        &self,
    ) -> Result<ApiResponse<Vec<WorkspaceGroup>>, ProviderError> {
        self.get("/v1/workspaceGroups", &[]).await
    }

    #[instrument(skip(self))]
    async fn get_workspace(&self, id: Uuid) -> Result<ApiResponse<Workspace>, ProviderError> {
        self.get(&format!("/v1/workspaces/{}", id), &[]).await
    }

    #[instrument(skip(self))]
    async fn list_workspaces(
        &self,
        workspace_group_id: Uuid,
    ) -> Result<ApiResponse<Vec<Workspace>>, ProviderError> {
        self.get(
            "/v1/workspaces",
            &[("workspaceGroupID", workspace_group_id.to_string())],
        )
        .await
    }
}
