//! Provider configuration and shared constants.
//!
//! The provider block accepts an API key and an optional management API URL.
//! Both fall back to environment variables when unset:
//!
//! - `SINGLESTOREDB_API_KEY`
//! - `SINGLESTOREDB_API_SERVICE_URL` (defaults to `https://api.singlestore.com`)

use serde::Deserialize;

use crate::schema::{Attribute, Diagnostic, Schema};

/// Prefix of every data source type name.
pub const PROVIDER_TYPE_NAME: &str = "singlestoredb";

/// Provider attribute holding the management API key.
pub const API_KEY_ATTRIBUTE: &str = "api_key";

/// Provider attribute holding the management API base URL.
pub const API_SERVICE_URL_ATTRIBUTE: &str = "api_service_url";

/// Environment variable consulted when `api_key` is not configured.
pub const ENV_API_KEY: &str = "SINGLESTOREDB_API_KEY";

/// Environment variable consulted when `api_service_url` is not configured.
pub const ENV_API_SERVICE_URL: &str = "SINGLESTOREDB_API_SERVICE_URL";

/// Management API used when nothing else is configured.
pub const DEFAULT_API_SERVICE_URL: &str = "https://api.singlestore.com";

/// Common identifier attribute name.
pub const ID_ATTRIBUTE: &str = "id";

/// Detail attached to errors that only SingleStore support can resolve.
pub const CONTACT_SUPPORT_ERROR_DETAIL: &str =
    "Contact SingleStore support https://www.singlestore.com/support/.";

/// Hint appended to unexpected status errors, pointing at credentials.
pub fn api_key_hint() -> String {
    format!(
        "Make sure to set the {} value in the configuration or use the {} environment variable. ",
        API_KEY_ATTRIBUTE, ENV_API_KEY
    )
}

/// Raw provider configuration as supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProviderConfig {
    /// Management API key.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Management API base URL.
    #[serde(default)]
    pub api_service_url: Option<String>,
}

/// Configuration with environment fallbacks applied.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Management API key.
    pub api_key: String,
    /// Management API base URL, without a trailing slash.
    pub api_service_url: String,
}

impl std::fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("api_key", &"<redacted>")
            .field("api_service_url", &self.api_service_url)
            .finish()
    }
}

impl ProviderConfig {
    /// Schema of the provider block.
    pub fn schema() -> Schema {
        Schema::v0()
            .with_attribute(
                API_KEY_ATTRIBUTE,
                Attribute::optional_string()
                    .sensitive()
                    .with_description(format!(
                        "API key used to authenticate against the management API. Falls back to the {} environment variable.",
                        ENV_API_KEY
                    )),
            )
            .with_attribute(
                API_SERVICE_URL_ATTRIBUTE,
                Attribute::optional_string().with_description(format!(
                    "Base URL of the management API. Falls back to the {} environment variable, then to {}.",
                    ENV_API_SERVICE_URL, DEFAULT_API_SERVICE_URL
                )),
            )
    }

    /// Apply environment fallbacks read through `lookup`.
    ///
    /// Empty strings count as unset.
    pub fn resolve_with<F>(self, lookup: F) -> Result<ResolvedConfig, Diagnostic>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = non_empty(self.api_key)
            .or_else(|| non_empty(lookup(ENV_API_KEY)))
            .ok_or_else(|| {
                Diagnostic::error("Missing API key")
                    .with_detail(format!(
                        "The provider cannot create the management API client because the API key is missing. {}",
                        api_key_hint()
                    ))
                    .with_attribute(API_KEY_ATTRIBUTE)
            })?;

        let api_service_url = non_empty(self.api_service_url)
            .or_else(|| non_empty(lookup(ENV_API_SERVICE_URL)))
            .unwrap_or_else(|| DEFAULT_API_SERVICE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(ResolvedConfig {
            api_key,
            api_service_url,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
