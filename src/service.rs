//! The provider service seam.
//!
//! [`ProviderService`] is the surface a host drives: schema discovery,
//! provider configuration and data source reads. [`crate::SingleStoreProvider`]
//! is the implementation; [`crate::testing::ProviderTester`] drives it in tests.

use serde_json::Value;

use crate::datasource::ReadResponse;
use crate::error::ProviderError;
use crate::schema::{Diagnostic, ProviderSchema};
use crate::types::ProviderMetadata;
use crate::validation::validate;

/// Trait that provider implementations must implement.
///
/// # Example
///
/// ```ignore
/// use singlestoredb_provider::{ProviderService, ProviderError, ProviderSchema};
/// use singlestoredb_provider::datasource::ReadResponse;
/// use singlestoredb_provider::schema::Diagnostic;
///
/// struct MyProvider;
///
/// #[async_trait::async_trait]
/// impl ProviderService for MyProvider {
///     fn schema(&self) -> ProviderSchema {
///         ProviderSchema::new()
///     }
///
///     async fn configure(
///         &self,
///         config: serde_json::Value,
///     ) -> Result<Vec<Diagnostic>, ProviderError> {
///         Ok(vec![])
///     }
///
///     async fn read_data_source(
///         &self,
///         data_source_type: &str,
///         config: serde_json::Value,
///     ) -> Result<ReadResponse, ProviderError> {
///         Ok(ReadResponse::new())
///     }
/// }
/// ```
#[async_trait::async_trait]
pub trait ProviderService: Send + Sync + 'static {
    /// Return the provider's schema including all data sources.
    fn schema(&self) -> ProviderSchema;

    /// Return provider metadata, derived from the schema by default.
    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            data_sources: self.schema().data_sources.keys().cloned().collect(),
        }
    }

    /// Validate the provider configuration before configuring.
    async fn validate_provider_config(
        &self,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        Ok(validate(&self.schema().provider, &config))
    }

    /// Configure the provider with credentials and settings.
    /// Returns diagnostics (errors and warnings).
    async fn configure(&self, config: Value) -> Result<Vec<Diagnostic>, ProviderError>;

    /// Stop the provider gracefully.
    async fn stop(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    /// Validate a data source's configuration against its schema.
    async fn validate_data_source_config(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        let schema = self.schema();
        let ds_schema = schema.data_sources.get(data_source_type).ok_or_else(|| {
            ProviderError::UnknownResource(format!(
                "Unknown data source type: {}",
                data_source_type
            ))
        })?;
        Ok(validate(ds_schema, &config))
    }

    /// Read a data source.
    async fn read_data_source(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<ReadResponse, ProviderError>;
}
