//! SingleStoreDB provider
//!
//! Read-only data sources for SingleStoreDB workspace groups and workspaces,
//! backed by the SingleStoreDB management API.
//!
//! # Overview
//!
//! - **Data sources**: `singlestoredb_workspace_group`, `singlestoredb_workspace_groups`,
//!   `singlestoredb_workspace` and `singlestoredb_workspaces`
//! - **ProviderService trait**: the surface a host drives, implemented by
//!   [`SingleStoreProvider`]
//! - **Management client**: the [`ManagementClient`] seam and its HTTP implementation
//! - **Schema types**: attribute descriptions, validators and diagnostics
//! - **Logging**: Integration with `tracing` for structured logging
//!
//! # Quick Start
//!
//! ```ignore
//! use singlestoredb_provider::{init_logging, ProviderService, SingleStoreProvider};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_logging();
//!
//!     let provider = SingleStoreProvider::new();
//!     provider.configure(json!({ "api_key": "..." })).await?;
//!
//!     let resp = provider
//!         .read_data_source(
//!             "singlestoredb_workspace_group",
//!             json!({ "workspace_group_id": "3c1e7a52-8a0e-4f5c-9b7d-1f2e3d4c5b6a" }),
//!         )
//!         .await?;
//!     println!("{:?}", resp.state);
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Read failures are reported as diagnostics on the [`ReadResponse`]; a read
//! that reports an error never writes state. [`ProviderError`] covers
//! failures outside a read, such as an unknown data source type.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod datasource;
pub mod error;
pub mod logging;
pub mod management;
pub mod provider;
pub mod schema;
pub mod service;
pub mod testing;
pub mod types;
pub mod util;
pub mod validation;
pub mod workspace_groups;
pub mod workspaces;

// Re-export main types at crate root
pub use datasource::{DataSource, ReadResponse};
pub use error::{ProviderError, SummaryWithDetailError};
pub use logging::{init_logging, init_logging_with_default, try_init_logging};
pub use management::{ApiResponse, HttpManagementClient, ManagementClient};
pub use provider::SingleStoreProvider;
pub use schema::ProviderSchema;
pub use service::ProviderService;
pub use types::ProviderMetadata;
pub use validation::{is_valid, validate, validate_result};

// Re-export async_trait for convenience
pub use async_trait::async_trait;

// Re-export commonly used external types
pub use serde_json;
pub use tracing;
