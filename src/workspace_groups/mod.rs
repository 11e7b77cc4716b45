//! Workspace group data sources.
//!
//! `singlestoredb_workspace_group` reads one group by ID and
//! `singlestoredb_workspace_groups` lists every live group. Both share the
//! attribute set built by [`schema_attributes`] and the record mapping in
//! [`to_workspace_group_model`].

use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::ID_ATTRIBUTE;
use crate::management::{UpdateWindow, WorkspaceGroup};
use crate::schema::{Attribute, AttributeFlags, AttributeType};
use crate::validation::StringValidator;

mod get;
mod list;

pub use get::WorkspaceGroupDataSourceGet;
pub use list::WorkspaceGroupsDataSourceList;

/// Attribute holding the workspace group ID.
pub const WORKSPACE_GROUP_ID_ATTRIBUTE: &str = "workspace_group_id";

/// How the `workspace_group_id` attribute behaves in a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceGroupSchemaConfig {
    /// The ID is an output.
    pub compute_workspace_group_id: bool,
    /// The ID is an input.
    pub require_workspace_group_id: bool,
    /// Validators applied to a configured ID.
    pub workspace_group_id_validators: Vec<StringValidator>,
}

/// Workspace group state as written by the data sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceGroupModel {
    id: String,
    name: String,
    state: String,
    workspace_group_id: String,
    firewall_ranges: Vec<String>,
    allow_all_traffic: bool,
    created_at: String,
    expires_at: Option<String>,
    region_id: String,
    update_window: Option<UpdateWindowModel>,
}

/// Update window as written by the data sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateWindowModel {
    hour: i64,
    day: i64,
}

impl From<UpdateWindow> for UpdateWindowModel {
    fn from(window: UpdateWindow) -> Self {
        Self {
            hour: window.hour,
            day: window.day,
        }
    }
}

/// Map an API workspace group onto its state model.
pub fn to_workspace_group_model(group: WorkspaceGroup) -> WorkspaceGroupModel {
    let id = group.workspace_group_id.to_string();
    WorkspaceGroupModel {
        workspace_group_id: id.clone(),
        id,
        name: group.name,
        state: group.state.to_string(),
        firewall_ranges: group.firewall_ranges,
        allow_all_traffic: group.allow_all_traffic.unwrap_or_default(),
        created_at: group.created_at,
        expires_at: group.expires_at,
        region_id: group.region_id,
        update_window: group.update_window.map(UpdateWindowModel::from),
    }
}

/// Attributes of a workspace group.
pub fn schema_attributes(conf: WorkspaceGroupSchemaConfig) -> BTreeMap<String, Attribute> {
    let mut update_window = BTreeMap::new();
    update_window.insert(
        "hour".to_string(),
        Attribute::computed_int64().with_description("Hour of day - 0 to 23 (UTC)"),
    );
    update_window.insert(
        "day".to_string(),
        Attribute::computed_int64().with_description("Day of week (0-6), starting on Sunday"),
    );

    let mut attributes = BTreeMap::new();
    attributes.insert(ID_ATTRIBUTE.to_string(), Attribute::computed_string());
    attributes.insert(
        "name".to_string(),
        Attribute::computed_string().with_description("Name of the workspace group"),
    );
    attributes.insert(
        "state".to_string(),
        Attribute::computed_string().with_description("State of the workspace group"),
    );
    attributes.insert(
        WORKSPACE_GROUP_ID_ATTRIBUTE.to_string(),
        Attribute::new(
            AttributeType::String,
            AttributeFlags::from_switches(
                conf.require_workspace_group_id,
                conf.compute_workspace_group_id,
            ),
        )
        .with_description("ID of the workspace group")
        .with_validators(conf.workspace_group_id_validators),
    );
    attributes.insert(
        "firewall_ranges".to_string(),
        Attribute::computed_string_list()
            .with_description("The list of allowed inbound IP addresses"),
    );
    attributes.insert(
        "allow_all_traffic".to_string(),
        Attribute::computed_bool()
            .with_description("Whether or not all traffic is allowed to the workspace group"),
    );
    attributes.insert(
        "created_at".to_string(),
        Attribute::computed_string()
            .with_description("The timestamp of when the workspace group was created"),
    );
    attributes.insert(
        "expires_at".to_string(),
        Attribute::computed_string().with_description(
            "The timestamp of when the workspace group will expire. \
             At expiration, the workspace group is terminated and all the data is lost.",
        ),
    );
    attributes.insert(
        "region_id".to_string(),
        Attribute::computed_string().with_description("ID of the region"),
    );
    attributes.insert(
        "update_window".to_string(),
        Attribute::computed_single_nested(update_window)
            .with_description("Represents information related to an update window"),
    );
    attributes
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Value};

    pub const GROUP_ID: &str = "3c1e7a52-8a0e-4f5c-9b7d-1f2e3d4c5b6a";
    pub const REGION_ID: &str = "r1";

    pub fn active_group() -> Value {
        json!({
            "workspaceGroupID": GROUP_ID,
            "name": "g1",
            "state": "ACTIVE",
            "firewallRanges": ["10.0.0.0/8"],
            "allowAllTraffic": false,
            "createdAt": "2024-01-01T00:00:00Z",
            "regionID": REGION_ID,
            "updateWindow": {"hour": 3, "day": 0}
        })
    }
}
