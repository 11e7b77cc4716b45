//! Workspace data sources.
//!
//! `singlestoredb_workspace` reads one workspace by ID and
//! `singlestoredb_workspaces` lists the live workspaces of a group.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::ID_ATTRIBUTE;
use crate::management::{Workspace, WorkspaceState};
use crate::schema::{Attribute, AttributeFlags, AttributeType};
use crate::util::maybe_string;
use crate::validation::StringValidator;

mod get;
mod list;

pub use get::WorkspaceDataSourceGet;
pub use list::WorkspacesDataSourceList;

/// How the workspace `id` attribute behaves in a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceSchemaConfig {
    /// The ID is an output.
    pub compute_workspace_id: bool,
    /// The ID is an input.
    pub require_workspace_id: bool,
    /// Validators applied to a configured ID.
    pub workspace_id_validators: Vec<StringValidator>,
}

/// Workspace state as written by the data sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceModel {
    id: String,
    workspace_group_id: String,
    name: String,
    state: String,
    size: String,
    suspended: bool,
    created_at: String,
    endpoint: Option<String>,
    last_resumed_at: Option<String>,
}

/// Map an API workspace onto its state model.
pub fn to_workspace_model(workspace: Workspace) -> WorkspaceModel {
    WorkspaceModel {
        id: workspace.workspace_id.to_string(),
        workspace_group_id: workspace.workspace_group_id.to_string(),
        name: workspace.name,
        suspended: workspace.state == WorkspaceState::Suspended,
        state: workspace.state.to_string(),
        size: workspace.size,
        created_at: workspace.created_at,
        endpoint: maybe_string(workspace.endpoint.as_deref()),
        last_resumed_at: maybe_string(workspace.last_resumed_at.as_deref()),
    }
}

/// Attributes of a workspace.
pub fn schema_attributes(conf: WorkspaceSchemaConfig) -> BTreeMap<String, Attribute> {
    let mut attributes = BTreeMap::new();
    attributes.insert(
        ID_ATTRIBUTE.to_string(),
        Attribute::new(
            AttributeType::String,
            AttributeFlags::from_switches(conf.require_workspace_id, conf.compute_workspace_id),
        )
        .with_description("ID of the workspace")
        .with_validators(conf.workspace_id_validators),
    );
    attributes.insert(
        "workspace_group_id".to_string(),
        Attribute::computed_string().with_description("ID of the workspace group"),
    );
    attributes.insert(
        "name".to_string(),
        Attribute::computed_string().with_description("Name of the workspace"),
    );
    attributes.insert(
        "state".to_string(),
        Attribute::computed_string().with_description("State of the workspace"),
    );
    attributes.insert(
        "created_at".to_string(),
        Attribute::computed_string()
            .with_description("The timestamp of when the workspace was created"),
    );
    attributes.insert(
        "size".to_string(),
        Attribute::computed_string().with_description(
            "Size of the workspace (in workspace size notation), such as S-00 or S-1",
        ),
    );
    attributes.insert(
        "suspended".to_string(),
        Attribute::computed_bool()
            .with_description("State of the workspace, suspended if set to true"),
    );
    attributes.insert(
        "endpoint".to_string(),
        Attribute::computed_string().with_description("Endpoint to connect to the workspace"),
    );
    attributes.insert(
        "last_resumed_at".to_string(),
        Attribute::computed_string().with_description(
            "(If included in the output) The timestamp of when the workspace was last resumed",
        ),
    );
    attributes
}
