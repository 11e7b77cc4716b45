use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::{
    schema_attributes, to_workspace_group_model, WorkspaceGroupModel, WorkspaceGroupSchemaConfig,
};
use crate::datasource::{DataSource, ReadResponse};
use crate::management::ManagementClient;
use crate::schema::{Attribute, Schema};
use crate::util::status_ok;

const DATA_SOURCE_LIST_NAME: &str = "workspace_groups";

/// Lists all workspace groups that have not been terminated.
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkspaceGroupsDataSourceList;

#[derive(Debug, Serialize)]
struct WorkspaceGroupsListModel {
    workspace_groups: Vec<WorkspaceGroupModel>,
}

#[async_trait]
impl DataSource for WorkspaceGroupsDataSourceList {
    fn name(&self) -> &'static str {
        DATA_SOURCE_LIST_NAME
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("Provides a list of workspace groups that the user has access to.")
            .with_attribute(
                DATA_SOURCE_LIST_NAME,
                Attribute::computed_list_nested(schema_attributes(WorkspaceGroupSchemaConfig {
                    compute_workspace_group_id: true,
                    ..Default::default()
                })),
            )
    }

    #[instrument(skip_all, name = "workspace_groups.read")]
    async fn read(&self, client: &dyn ManagementClient, _config: Value) -> ReadResponse {
        let mut resp = ReadResponse::new();

        let groups = match status_ok(client.list_workspace_groups().await) {
            Ok(groups) => groups,
            Err(serr) => {
                resp.push(serr.into_diagnostic());
                return resp;
            },
        };

        let workspace_groups: Vec<_> = groups
            .into_iter()
            .filter(|group| group.terminated_at.is_none())
            .map(to_workspace_group_model)
            .collect();
        debug!(count = workspace_groups.len(), "Listed workspace groups");

        resp.set_state(&WorkspaceGroupsListModel { workspace_groups });
        resp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{assert_error_contains, CannedResponse, Endpoint, MockManagementClient};
    use crate::validation::validate;
    use crate::workspace_groups::fixtures::{active_group, GROUP_ID};
    use serde_json::json;

    #[tokio::test]
    async fn test_list_skips_terminated_groups() {
        let mut terminated = active_group();
        terminated["workspaceGroupID"] = json!("5b8f0c1d-2e3f-4a5b-9c6d-7e8f9a0b1c2d");
        terminated["terminatedAt"] = json!("2024-02-01T00:00:00Z");
        let client = MockManagementClient::new().respond(
            Endpoint::ListWorkspaceGroups,
            CannedResponse::json(200, json!([active_group(), terminated])),
        );

        let resp = WorkspaceGroupsDataSourceList.read(&client, Value::Null).await;

        assert!(resp.diagnostics.is_empty());
        let state = resp.state.unwrap();
        let groups = state["workspace_groups"].as_array().unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0]["workspace_group_id"], GROUP_ID);
        assert_eq!(groups[0]["update_window"], json!({"hour": 3, "day": 0}));
    }

    #[tokio::test]
    async fn test_list_status_error() {
        let client = MockManagementClient::new().respond(
            Endpoint::ListWorkspaceGroups,
            CannedResponse::text(500, "internal"),
        );

        let resp = WorkspaceGroupsDataSourceList.read(&client, Value::Null).await;

        assert!(resp.state.is_none());
        assert_error_contains(&resp.diagnostics, "Internal Server Error");
    }

    #[test]
    fn test_schema_takes_no_input() {
        let schema = WorkspaceGroupsDataSourceList.schema();
        assert!(validate(&schema, &json!({})).is_empty());
        assert!(schema.attributes[DATA_SOURCE_LIST_NAME]
            .flags
            .is_computed_only());
    }
}
