//! Convenience types shared by the provider surface.

use serde::{Deserialize, Serialize};

/// Provider metadata returned ahead of the full schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMetadata {
    /// List of data source type names.
    pub data_sources: Vec<String>,
}
