//! Small helpers shared by the data sources.

use uuid::Uuid;

use crate::config::{api_key_hint, PROVIDER_TYPE_NAME};
use crate::error::{ProviderError, SummaryWithDetailError};
use crate::management::{ApiResponse, STATUS_NOT_FOUND, STATUS_OK};

/// Full data source type name, e.g. `singlestoredb_workspace`.
pub fn data_source_type_name(name: &str) -> String {
    format!("{}_{}", PROVIDER_TYPE_NAME, name)
}

/// Parse a canonical UUID string.
pub fn parse_uuid(value: &str) -> Option<Uuid> {
    Uuid::parse_str(value).ok()
}

/// Map a missing or empty API string to an absent value.
pub fn maybe_string(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Generic detail for transport and decode failures.
pub fn client_error_detail(err: &ProviderError) -> String {
    format!(
        "An unexpected error occurred when calling SingleStore API. \
         If the error is not clear, please contact the provider developers.\n\n\
         SingleStore client error: {}",
        err
    )
}

/// Collapse a management API call into its `200 OK` payload or an error
/// carrying summary and detail text.
pub fn status_ok<T>(
    result: Result<ApiResponse<T>, ProviderError>,
) -> Result<T, SummaryWithDetailError> {
    let response = match result {
        Ok(response) => response,
        Err(err) => {
            return Err(SummaryWithDetailError::new(
                "SingleStore API client failed",
                client_error_detail(&err),
            ))
        },
    };

    let summary = format!(
        "SingleStore API client returned status code {}",
        response.status_text()
    );

    match response.status {
        STATUS_OK => response.json200.ok_or_else(|| {
            SummaryWithDetailError::new(
                "SingleStore API client returned an empty response",
                "The response body could not be decoded. \
                 If the error is not clear, please contact the provider developers.",
            )
        }),
        STATUS_NOT_FOUND => Err(SummaryWithDetailError::new(
            summary,
            format!(
                "An unsuccessful status code occurred when calling SingleStore API. \
                 Make sure to set the ID of the object that exists.\n\n\
                 SingleStore client response body: {}",
                response.body
            ),
        )),
        _ => Err(SummaryWithDetailError::new(
            summary,
            format!(
                "An unsuccessful status code occurred when calling SingleStore API. \
                 {}If the error is not clear, please contact the provider developers.\n\n\
                 SingleStore client response body: {}",
                api_key_hint(),
                response.body
            ),
        )),
    }
}
