use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use super::{schema_attributes, to_workspace_model, WorkspaceModel, WorkspaceSchemaConfig};
use crate::datasource::{decode_config, DataSource, ReadResponse};
use crate::management::ManagementClient;
use crate::schema::{Attribute, Schema};
use crate::util::{parse_uuid, status_ok};
use crate::validation::StringValidator;
use crate::workspace_groups::WORKSPACE_GROUP_ID_ATTRIBUTE;

const DATA_SOURCE_LIST_NAME: &str = "workspaces";

/// Lists the live workspaces of one workspace group.
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkspacesDataSourceList;

#[derive(Debug, Deserialize)]
struct WorkspacesListConfig {
    workspace_group_id: String,
}

#[derive(Debug, Serialize)]
struct WorkspacesListModel {
    workspace_group_id: String,
    workspaces: Vec<WorkspaceModel>,
}

#[async_trait]
impl DataSource for WorkspacesDataSourceList {
    fn name(&self) -> &'static str {
        DATA_SOURCE_LIST_NAME
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("Provides a list of workspaces in a workspace group.")
            .with_attribute(
                WORKSPACE_GROUP_ID_ATTRIBUTE,
                Attribute::required_string()
                    .with_description("ID of the workspace group")
                    .with_validators(vec![StringValidator::Uuid]),
            )
            .with_attribute(
                DATA_SOURCE_LIST_NAME,
                Attribute::computed_list_nested(schema_attributes(WorkspaceSchemaConfig {
                    compute_workspace_id: true,
                    ..Default::default()
                })),
            )
    }

    #[instrument(skip_all, name = "workspaces.read")]
    async fn read(&self, client: &dyn ManagementClient, config: Value) -> ReadResponse {
        let mut resp = ReadResponse::new();
        let Some(data) = decode_config::<WorkspacesListConfig>(config, &mut resp) else {
            return resp;
        };

        let Some(group_id) = parse_uuid(&data.workspace_group_id) else {
            resp.add_attribute_error(
                WORKSPACE_GROUP_ID_ATTRIBUTE,
                "Invalid workspace group ID",
                "The workspace group ID should be a valid UUID",
            );
            return resp;
        };

        let workspaces = match status_ok(client.list_workspaces(group_id).await) {
            Ok(workspaces) => workspaces,
            Err(serr) => {
                resp.push(serr.into_diagnostic());
                return resp;
            },
        };

        let workspaces: Vec<_> = workspaces
            .into_iter()
            .filter(|workspace| workspace.terminated_at.is_none())
            .map(to_workspace_model)
            .collect();
        debug!(workspace_group_id = %group_id, count = workspaces.len(), "Listed workspaces");

        resp.set_state(&WorkspacesListModel {
            workspace_group_id: group_id.to_string(),
            workspaces,
        });
        resp
    }
}
