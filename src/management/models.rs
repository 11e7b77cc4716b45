//! Wire types of the management API.
//!
//! Field names follow the JSON the service emits. Lifecycle states keep any
//! value the service adds later as [`WorkspaceState::Other`] /
//! [`WorkspaceGroupState::Other`] so that it can still be reported verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lifecycle state of a workspace group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WorkspaceGroupState {
    /// Being provisioned.
    Pending,
    /// Ready for use.
    Active,
    /// Provisioning or maintenance failed.
    Failed,
    /// Deleted.
    Terminated,
    /// A state this crate does not know about.
    Other(String),
}

impl WorkspaceGroupState {
    /// The state as the API spells it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::Active => "ACTIVE",
            Self::Failed => "FAILED",
            Self::Terminated => "TERMINATED",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for WorkspaceGroupState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "PENDING" => Self::Pending,
            "ACTIVE" => Self::Active,
            "FAILED" => Self::Failed,
            "TERMINATED" => Self::Terminated,
            _ => Self::Other(s),
        }
    }
}

impl From<WorkspaceGroupState> for String {
    fn from(state: WorkspaceGroupState) -> Self {
        match state {
            WorkspaceGroupState::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl Default for WorkspaceGroupState {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl fmt::Display for WorkspaceGroupState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WorkspaceState {
    /// Being provisioned or resized.
    Pending,
    /// Running.
    Active,
    /// Suspended; compute is released, data is kept.
    Suspended,
    /// Provisioning or maintenance failed.
    Failed,
    /// Deleted.
    Terminated,
    /// A state this crate does not know about.
    Other(String),
}

impl WorkspaceState {
    /// The state as the API spells it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::Active => "ACTIVE",
            Self::Suspended => "SUSPENDED",
            Self::Failed => "FAILED",
            Self::Terminated => "TERMINATED",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for WorkspaceState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "PENDING" => Self::Pending,
            "ACTIVE" => Self::Active,
            "SUSPENDED" => Self::Suspended,
            "FAILED" => Self::Failed,
            "TERMINATED" => Self::Terminated,
            _ => Self::Other(s),
        }
    }
}

impl From<WorkspaceState> for String {
    fn from(state: WorkspaceState) -> Self {
        match state {
            WorkspaceState::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl Default for WorkspaceState {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl fmt::Display for WorkspaceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maintenance slot of a workspace group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateWindow {
    /// Hour of day, 0 to 23 (UTC).
    pub hour: i64,
    /// Day of week, 0 to 6, starting on Sunday.
    pub day: i64,
}

/// A workspace group as returned by `GET /v1/workspaceGroups/{id}`.
///
/// Fields the service leaves out decode to their zero values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceGroup {
    #[serde(rename = "workspaceGroupID", default)]
    pub workspace_group_id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: WorkspaceGroupState,
    #[serde(default)]
    pub firewall_ranges: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_all_traffic: Option<bool>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminated_at: Option<String>,
    #[serde(rename = "regionID", alias = "regionId", default)]
    pub region_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_window: Option<UpdateWindow>,
}

/// A workspace as returned by `GET /v1/workspaces/{id}`.
///
/// Fields the service leaves out decode to their zero values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    #[serde(rename = "workspaceID", default)]
    pub workspace_id: Uuid,
    #[serde(rename = "workspaceGroupID", default)]
    pub workspace_group_id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: WorkspaceState,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_resumed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminated_at: Option<String>,
}
