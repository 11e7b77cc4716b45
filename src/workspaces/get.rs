use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::{schema_attributes, to_workspace_model, WorkspaceSchemaConfig};
use crate::config::{CONTACT_SUPPORT_ERROR_DETAIL, ID_ATTRIBUTE};
use crate::datasource::{decode_config, DataSource, ReadResponse};
use crate::management::{ManagementClient, WorkspaceState};
use crate::schema::Schema;
use crate::util::{parse_uuid, status_ok};
use crate::validation::StringValidator;

const DATA_SOURCE_GET_NAME: &str = "workspace";

/// Reads a single workspace by ID.
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkspaceDataSourceGet;

#[derive(Debug, Deserialize)]
struct WorkspaceGetConfig {
    id: String,
}

#[async_trait]
impl DataSource for WorkspaceDataSourceGet {
    fn name(&self) -> &'static str {
        DATA_SOURCE_GET_NAME
    }

    fn schema(&self) -> Schema {
        Schema::from_attributes(schema_attributes(WorkspaceSchemaConfig {
            require_workspace_id: true,
            workspace_id_validators: vec![StringValidator::Uuid],
            ..Default::default()
        }))
        .with_description("Retrieves information about a workspace by its ID.")
    }

    #[instrument(skip_all, name = "workspace.read")]
    async fn read(&self, client: &dyn ManagementClient, config: Value) -> ReadResponse {
        let mut resp = ReadResponse::new();
        let Some(data) = decode_config::<WorkspaceGetConfig>(config, &mut resp) else {
            return resp;
        };

        let Some(id) = parse_uuid(&data.id) else {
            resp.add_attribute_error(
                ID_ATTRIBUTE,
                "Invalid workspace ID",
                "The workspace ID should be a valid UUID",
            );
            return resp;
        };

        debug!(workspace_id = %id, "Reading workspace");
        let workspace = match status_ok(client.get_workspace(id).await) {
            Ok(workspace) => workspace,
            Err(serr) => {
                warn!(workspace_id = %id, summary = %serr.summary, "Workspace request failed");
                resp.add_error(serr.summary, serr.detail);
                return resp;
            },
        };

        if let Some(terminated_at) = &workspace.terminated_at {
            resp.add_attribute_error(
                ID_ATTRIBUTE,
                format!(
                    "Workspace with the specified ID existed, but got terminated at {}",
                    terminated_at
                ),
                "Make sure to set the workspace ID of the workspace that exists.",
            );
            return resp;
        }

        if workspace.state == WorkspaceState::Failed {
            resp.add_error(
                format!(
                    "Workspace with the specified ID exists, but is at the {} state",
                    workspace.state
                ),
                CONTACT_SUPPORT_ERROR_DETAIL,
            );
            return resp;
        }

        let result = to_workspace_model(workspace);
        resp.set_state(&result);
        resp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        assert_attribute_error, assert_error_contains, CannedResponse, Endpoint,
        MockManagementClient,
    };
    use crate::workspaces::fixtures::{active_workspace, GROUP_ID, WORKSPACE_ID};
    use serde_json::json;

    fn config() -> Value {
        json!({ "id": WORKSPACE_ID })
    }

    fn client_returning(response: CannedResponse) -> MockManagementClient {
        MockManagementClient::new().respond(Endpoint::GetWorkspace, response)
    }

    #[tokio::test]
    async fn test_read_maps_workspace() {
        let client = client_returning(CannedResponse::json(200, active_workspace()));

        let resp = WorkspaceDataSourceGet.read(&client, config()).await;

        assert!(resp.diagnostics.is_empty());
        assert_eq!(
            resp.state,
            Some(json!({
                "id": WORKSPACE_ID,
                "workspace_group_id": GROUP_ID,
                "name": "w1",
                "state": "ACTIVE",
                "size": "S-00",
                "suspended": false,
                "created_at": "2024-01-01T00:00:00Z",
                "endpoint": "svc-9b1d2c3e.example.singlestore.com",
                "last_resumed_at": "2024-01-02T00:00:00Z"
            }))
        );
    }

    #[tokio::test]
    async fn test_empty_endpoint_and_last_resumed_at_are_absent() {
        let mut workspace = active_workspace();
        workspace["state"] = json!("SUSPENDED");
        workspace["endpoint"] = json!("");
        workspace["lastResumedAt"] = json!("");
        let client = client_returning(CannedResponse::json(200, workspace));

        let resp = WorkspaceDataSourceGet.read(&client, config()).await;

        let state = resp.state.unwrap();
        assert!(state["endpoint"].is_null());
        assert!(state["last_resumed_at"].is_null());
        assert_eq!(state["suspended"], true);
    }

    #[tokio::test]
    async fn test_invalid_id_makes_no_call() {
        let client = MockManagementClient::new();

        let resp = WorkspaceDataSourceGet
            .read(&client, json!({ "id": "not-a-uuid" }))
            .await;

        assert!(resp.state.is_none());
        assert_attribute_error(&resp.diagnostics, ID_ATTRIBUTE, "Invalid workspace ID");
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_not_found_is_generic_error() {
        let client = client_returning(CannedResponse::text(404, "workspace not found"));

        let resp = WorkspaceDataSourceGet.read(&client, config()).await;

        assert!(resp.state.is_none());
        assert_error_contains(&resp.diagnostics, "Not Found");
        assert!(resp.diagnostics[0].attribute.is_none());
        assert!(resp.diagnostics[0]
            .detail
            .as_deref()
            .unwrap()
            .contains("workspace not found"));
    }

    #[tokio::test]
    async fn test_unexpected_status_and_transport_errors() {
        let client = client_returning(CannedResponse::text(502, "upstream"));
        let resp = WorkspaceDataSourceGet.read(&client, config()).await;
        assert_error_contains(&resp.diagnostics, "Bad Gateway");
        assert!(resp.diagnostics[0]
            .detail
            .as_deref()
            .unwrap()
            .contains("SINGLESTOREDB_API_KEY"));

        let client = client_returning(CannedResponse::transport_error("timed out"));
        let resp = WorkspaceDataSourceGet.read(&client, config()).await;
        assert!(resp.state.is_none());
        assert_error_contains(&resp.diagnostics, "SingleStore API client failed");
    }

    #[tokio::test]
    async fn test_terminated_workspace() {
        let mut workspace = active_workspace();
        workspace["terminatedAt"] = json!("2024-02-01T00:00:00Z");
        let client = client_returning(CannedResponse::json(200, workspace));

        let resp = WorkspaceDataSourceGet.read(&client, config()).await;

        assert!(resp.state.is_none());
        assert_attribute_error(
            &resp.diagnostics,
            ID_ATTRIBUTE,
            "terminated at 2024-02-01T00:00:00Z",
        );
    }

    #[tokio::test]
    async fn test_failed_workspace() {
        let mut workspace = active_workspace();
        workspace["state"] = json!("FAILED");
        let client = client_returning(CannedResponse::json(200, workspace));

        let resp = WorkspaceDataSourceGet.read(&client, config()).await;

        assert!(resp.state.is_none());
        assert_error_contains(&resp.diagnostics, "at the FAILED state");
        assert_eq!(
            resp.diagnostics[0].detail.as_deref(),
            Some(CONTACT_SUPPORT_ERROR_DETAIL)
        );
    }
}
