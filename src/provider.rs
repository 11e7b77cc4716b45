//! The SingleStoreDB provider.
//!
//! Holds the registered data sources and the management client installed by
//! `configure`.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::config::ProviderConfig;
use crate::datasource::{DataSource, ReadResponse};
use crate::error::ProviderError;
use crate::management::{HttpManagementClient, ManagementClient};
use crate::schema::{Diagnostic, ProviderSchema};
use crate::service::ProviderService;
use crate::util::data_source_type_name;
use crate::workspace_groups::{WorkspaceGroupDataSourceGet, WorkspaceGroupsDataSourceList};
use crate::workspaces::{WorkspaceDataSourceGet, WorkspacesDataSourceList};

type EnvLookup = fn(&str) -> Option<String>;

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Provider exposing the workspace and workspace group data sources.
pub struct SingleStoreProvider {
    data_sources: Vec<Box<dyn DataSource>>,
    client: RwLock<Option<Arc<dyn ManagementClient>>>,
    env_lookup: EnvLookup,
}

impl SingleStoreProvider {
    /// Create an unconfigured provider.
    pub fn new() -> Self {
        Self {
            data_sources: vec![
                Box::new(WorkspaceGroupDataSourceGet),
                Box::new(WorkspaceGroupsDataSourceList),
                Box::new(WorkspaceDataSourceGet),
                Box::new(WorkspacesDataSourceList),
            ],
            client: RwLock::new(None),
            env_lookup: process_env,
        }
    }

    /// Create a provider that already talks to `client`.
    pub fn with_client(client: Arc<dyn ManagementClient>) -> Self {
        Self {
            client: RwLock::new(Some(client)),
            ..Self::new()
        }
    }

    /// Replace the environment lookup used for configuration fallbacks.
    pub fn with_env_lookup(mut self, lookup: EnvLookup) -> Self {
        self.env_lookup = lookup;
        self
    }

    /// Whether a management client is installed.
    pub async fn is_configured(&self) -> bool {
        self.client.read().await.is_some()
    }

    fn data_source(&self, data_source_type: &str) -> Option<&dyn DataSource> {
        self.data_sources
            .iter()
            .find(|ds| data_source_type_name(ds.name()) == data_source_type)
            .map(|ds| ds.as_ref())
    }
}

impl Default for SingleStoreProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ProviderService for SingleStoreProvider {
    fn schema(&self) -> ProviderSchema {
        self.data_sources.iter().fold(
            ProviderSchema::new().with_provider_config(ProviderConfig::schema()),
            |schema, ds| schema.with_data_source(data_source_type_name(ds.name()), ds.schema()),
        )
    }

    #[instrument(skip_all)]
    async fn configure(&self, config: Value) -> Result<Vec<Diagnostic>, ProviderError> {
        let raw: ProviderConfig = if config.is_null() {
            ProviderConfig::default()
        } else {
            serde_json::from_value(config)?
        };

        let resolved = match raw.resolve_with(self.env_lookup) {
            Ok(resolved) => resolved,
            Err(diag) => {
                warn!(summary = %diag.summary, "Provider configuration rejected");
                return Ok(vec![diag]);
            },
        };

        let client = HttpManagementClient::new(&resolved)?;
        *self.client.write().await = Some(Arc::new(client));
        info!(api_service_url = %resolved.api_service_url, "Provider configured");
        Ok(vec![])
    }

    #[instrument(skip(self, config))]
    async fn read_data_source(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<ReadResponse, ProviderError> {
        let data_source = self.data_source(data_source_type).ok_or_else(|| {
            ProviderError::UnknownResource(format!(
                "Unknown data source type: {}",
                data_source_type
            ))
        })?;

        let client = self.client.read().await.clone().ok_or_else(|| {
            ProviderError::Configuration(
                "The provider must be configured before reading data sources".to_string(),
            )
        })?;

        let resp = data_source.read(client.as_ref(), config).await;
        if resp.has_error() {
            warn!(diagnostics = resp.diagnostics.len(), "Data source read failed");
        }
        Ok(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{API_KEY_ATTRIBUTE, ENV_API_KEY, ID_ATTRIBUTE};
    use crate::testing::{
        assert_attribute_error, assert_error_contains, assert_has_errors, assert_no_errors,
        CannedResponse, Endpoint, MockManagementClient, ProviderTester, TestError,
    };
    use crate::workspace_groups::fixtures::{active_group, GROUP_ID, REGION_ID};
    use crate::workspace_groups::WORKSPACE_GROUP_ID_ATTRIBUTE;
    use crate::workspaces::fixtures::{active_workspace, WORKSPACE_ID};
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};
    use uuid::Uuid;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn key_in_env(name: &str) -> Option<String> {
        (name == ENV_API_KEY).then(|| "env-key".to_string())
    }

    fn tester_with(
        client: MockManagementClient,
    ) -> (ProviderTester<SingleStoreProvider>, Arc<MockManagementClient>) {
        let client = Arc::new(client);
        let tester = ProviderTester::new(SingleStoreProvider::with_client(client.clone()));
        (tester, client)
    }

    #[test]
    fn test_schema_lists_all_data_sources() {
        let tester = ProviderTester::new(SingleStoreProvider::new());
        let schema = tester.schema();

        assert_eq!(
            tester.data_source_types(),
            vec![
                "singlestoredb_workspace",
                "singlestoredb_workspace_group",
                "singlestoredb_workspace_groups",
                "singlestoredb_workspaces",
            ]
        );
        assert!(schema.provider.attributes[API_KEY_ATTRIBUTE].flags.sensitive);
        assert!(schema.data_sources["singlestoredb_workspace"].attributes[ID_ATTRIBUTE]
            .flags
            .required);
    }

    #[tokio::test]
    async fn test_configure_without_key() {
        let provider = SingleStoreProvider::new().with_env_lookup(no_env);
        let tester = ProviderTester::new(provider);

        let err = tester.configure(json!({})).await.unwrap_err();
        assert_attribute_error(err.diagnostics(), API_KEY_ATTRIBUTE, "Missing API key");
        assert!(!tester.provider().is_configured().await);
    }

    #[tokio::test]
    async fn test_configure_installs_client() {
        let tester = ProviderTester::new(SingleStoreProvider::new().with_env_lookup(no_env));
        assert_ok!(tester.configure(json!({"api_key": "secret"})).await);
        assert!(tester.provider().is_configured().await);

        let tester = ProviderTester::new(SingleStoreProvider::new().with_env_lookup(key_in_env));
        assert_ok!(tester.configure(Value::Null).await);
        assert!(tester.provider().is_configured().await);
    }

    #[tokio::test]
    async fn test_configure_rejects_wrong_shape() {
        let tester = ProviderTester::new(SingleStoreProvider::new().with_env_lookup(no_env));
        let err = tester.configure(json!({"api_key": 42})).await.unwrap_err();
        assert!(matches!(err, TestError::Provider(ProviderError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_validate_provider_config() {
        let tester = ProviderTester::new(SingleStoreProvider::new());
        assert_ok!(tester.validate_provider_config(json!({"api_key": "k"})).await);
        assert_err!(tester.validate_provider_config(json!({"api_key": 1})).await);
    }

    #[tokio::test]
    async fn test_read_before_configure() {
        let tester = ProviderTester::new(SingleStoreProvider::new());
        let err = tester
            .read_data_source(
                "singlestoredb_workspace_group",
                json!({"workspace_group_id": GROUP_ID}),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TestError::Provider(ProviderError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_unknown_data_source() {
        let (tester, client) = tester_with(MockManagementClient::new());

        let err = tester
            .read_data_source("singlestoredb_cluster", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, TestError::Provider(ProviderError::UnknownResource(_))));

        let err = tester
            .validate_data_source_config("singlestoredb_cluster", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, TestError::Provider(ProviderError::UnknownResource(_))));
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_validate_data_source_config_checks_uuid() {
        let (tester, _) = tester_with(MockManagementClient::new());

        let err = tester
            .validate_data_source_config("singlestoredb_workspace", json!({"id": "not-a-uuid"}))
            .await
            .unwrap_err();
        assert_attribute_error(err.diagnostics(), ID_ATTRIBUTE, "Invalid UUID");

        assert_ok!(
            tester
                .validate_data_source_config("singlestoredb_workspace", json!({"id": WORKSPACE_ID}))
                .await
        );
        assert_ok!(
            tester
                .validate_data_source_config("singlestoredb_workspace_groups", json!({}))
                .await
        );
    }

    #[tokio::test]
    async fn test_read_workspace_group_full_mapping() {
        let (tester, client) = tester_with(
            MockManagementClient::new()
                .respond(Endpoint::GetWorkspaceGroup, CannedResponse::json(200, active_group())),
        );

        let state = tester
            .read_data_source(
                "singlestoredb_workspace_group",
                json!({"workspace_group_id": GROUP_ID}),
            )
            .await
            .unwrap();

        assert_eq!(
            state,
            json!({
                "id": GROUP_ID,
                "workspace_group_id": GROUP_ID,
                "name": "g1",
                "state": "ACTIVE",
                "firewall_ranges": ["10.0.0.0/8"],
                "allow_all_traffic": false,
                "created_at": "2024-01-01T00:00:00Z",
                "expires_at": null,
                "region_id": REGION_ID,
                "update_window": {"hour": 3, "day": 0}
            })
        );
        assert_eq!(client.requested_ids(), vec![GROUP_ID.parse::<Uuid>().unwrap()]);
    }

    #[tokio::test]
    async fn test_repeated_reads_are_identical() {
        let (tester, client) = tester_with(
            MockManagementClient::new()
                .respond(Endpoint::GetWorkspace, CannedResponse::json(200, active_workspace())),
        );
        let config = json!({"id": WORKSPACE_ID});

        let first = tester
            .read_data_source("singlestoredb_workspace", config.clone())
            .await
            .unwrap();
        let second = tester
            .read_data_source("singlestoredb_workspace", config)
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(client.call_count(), 2);
    }

    #[tokio::test]
    async fn test_read_workspace_group_not_found() {
        let (tester, _) = tester_with(
            MockManagementClient::new()
                .respond(Endpoint::GetWorkspaceGroup, CannedResponse::text(404, "not found")),
        );

        let resp = tester
            .provider()
            .read_data_source(
                "singlestoredb_workspace_group",
                json!({"workspace_group_id": GROUP_ID}),
            )
            .await
            .unwrap();

        assert!(resp.state.is_none());
        assert_attribute_error(&resp.diagnostics, WORKSPACE_GROUP_ID_ATTRIBUTE, "Not Found");
    }

    #[tokio::test]
    async fn test_malformed_id_makes_no_call() {
        let (tester, client) = tester_with(MockManagementClient::new());

        let resp = tester
            .provider()
            .read_data_source(
                "singlestoredb_workspace_group",
                json!({"workspace_group_id": "not-a-uuid"}),
            )
            .await
            .unwrap();

        assert_has_errors(&resp.diagnostics);
        assert_error_contains(&resp.diagnostics, "Invalid workspace group ID");
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_read_workspaces_of_group() {
        let (tester, client) = tester_with(MockManagementClient::new().respond(
            Endpoint::ListWorkspaces,
            CannedResponse::json(200, json!([active_workspace()])),
        ));

        let resp = tester
            .provider()
            .read_data_source("singlestoredb_workspaces", json!({"workspace_group_id": GROUP_ID}))
            .await
            .unwrap();

        assert_no_errors(&resp.diagnostics);
        let state = resp.state.unwrap();
        assert_eq!(state["workspaces"][0]["id"], WORKSPACE_ID);
        assert_eq!(client.requested_endpoints(), vec![Endpoint::ListWorkspaces]);
    }

    #[tokio::test]
    async fn test_stop() {
        let tester = ProviderTester::new(SingleStoreProvider::new());
        assert_ok!(tester.stop().await);
    }
}
