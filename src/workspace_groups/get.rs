use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::{
    schema_attributes, to_workspace_group_model, WorkspaceGroupSchemaConfig,
    WORKSPACE_GROUP_ID_ATTRIBUTE,
};
use crate::config::{api_key_hint, CONTACT_SUPPORT_ERROR_DETAIL};
use crate::datasource::{decode_config, DataSource, ReadResponse};
use crate::management::{ManagementClient, WorkspaceGroupState, STATUS_NOT_FOUND, STATUS_OK};
use crate::schema::Schema;
use crate::util::{client_error_detail, parse_uuid};
use crate::validation::StringValidator;

const DATA_SOURCE_GET_NAME: &str = "workspace_group";

/// Reads a single workspace group by ID.
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkspaceGroupDataSourceGet;

#[derive(Debug, Deserialize)]
struct WorkspaceGroupGetConfig {
    workspace_group_id: String,
}

#[async_trait]
impl DataSource for WorkspaceGroupDataSourceGet {
    fn name(&self) -> &'static str {
        DATA_SOURCE_GET_NAME
    }

    fn schema(&self) -> Schema {
        Schema::from_attributes(schema_attributes(WorkspaceGroupSchemaConfig {
            require_workspace_group_id: true,
            workspace_group_id_validators: vec![StringValidator::Uuid],
            ..Default::default()
        }))
        .with_description("Retrieves information about a workspace group by its ID.")
    }

    #[instrument(skip_all, name = "workspace_group.read")]
    async fn read(&self, client: &dyn ManagementClient, config: Value) -> ReadResponse {
        let mut resp = ReadResponse::new();
        let Some(data) = decode_config::<WorkspaceGroupGetConfig>(config, &mut resp) else {
            return resp;
        };

        let Some(id) = parse_uuid(&data.workspace_group_id) else {
            resp.add_attribute_error(
                WORKSPACE_GROUP_ID_ATTRIBUTE,
                "Invalid workspace group ID",
                "The workspace group ID should be a valid UUID",
            );
            return resp;
        };

        debug!(workspace_group_id = %id, "Reading workspace group");
        let workspace_group = match client.get_workspace_group(id).await {
            Ok(response) => response,
            Err(err) => {
                warn!(workspace_group_id = %id, error = %err, "Workspace group request failed");
                resp.add_error(
                    "SingleStore API client failed to get the workspace group",
                    client_error_detail(&err),
                );
                return resp;
            },
        };

        let code = workspace_group.status;
        if code == STATUS_NOT_FOUND {
            resp.add_attribute_error(
                WORKSPACE_GROUP_ID_ATTRIBUTE,
                format!(
                    "SingleStore API client returned status code {} while reading the workspace group",
                    workspace_group.status_text()
                ),
                format!(
                    "An unsuccessful status code occurred when calling SingleStore API workspace groups. \
                     Make sure to set the workspace group ID of the workspace group that exists.\n\n\
                     SingleStore client response body: {}",
                    workspace_group.body
                ),
            );
            return resp;
        }

        if code != STATUS_OK {
            warn!(
                workspace_group_id = %id,
                status = code,
                "Unexpected status reading workspace group"
            );
            resp.add_error(
                format!(
                    "SingleStore API client returned status code {} while reading the workspace group",
                    workspace_group.status_text()
                ),
                format!(
                    "An unsuccessful status code occurred when calling SingleStore API workspace groups. \
                     {}If the error is not clear, please contact the provider developers.\n\n\
                     SingleStore client response body: {}",
                    api_key_hint(),
                    workspace_group.body
                ),
            );
            return resp;
        }

        let Some(group) = workspace_group.json200 else {
            resp.add_error(
                "SingleStore API client returned an empty response",
                "The workspace group response body could not be decoded.",
            );
            return resp;
        };

        if let Some(terminated_at) = &group.terminated_at {
            resp.add_attribute_error(
                WORKSPACE_GROUP_ID_ATTRIBUTE,
                format!(
                    "Workspace group with the specified ID existed, but got terminated at {}",
                    terminated_at
                ),
                "Make sure to set the workspace group ID of the workspace group that exists.",
            );
            return resp;
        }

        if group.state == WorkspaceGroupState::Failed {
            resp.add_error(
                format!(
                    "Workspace group with the specified ID exists, but is at the {} state",
                    group.state
                ),
                CONTACT_SUPPORT_ERROR_DETAIL,
            );
            return resp;
        }

        let result = to_workspace_group_model(group);
        resp.set_state(&result);
        resp
    }
}
