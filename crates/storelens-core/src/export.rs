//! Contract types for export and service-status endpoints.

use serde::{Deserialize, Serialize};

/// Response of `GET /export-data/{format}`.
///
/// The export endpoint's body is backend-defined; this is the shape the
/// analysis service currently returns. Callers that need the raw payload use
/// the untyped export call instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReceipt {
    pub export_id: String,
    pub format: String,
    pub data_types: Vec<String>,
    /// Human-readable size, e.g. `"2.3 MB"`.
    pub file_size: String,
    /// Server-relative path to fetch the exported file from.
    pub download_url: String,
    pub expires_at: String,
}

impl ExportReceipt {
    /// Last path segment of `download_url`, suitable as a local file name.
    ///
    /// Returns `None` when the URL ends in a slash or has no usable segment.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        let path = self.download_url.split(['?', '#']).next()?;
        path.rsplit('/')
            .next()
            .filter(|name| !name.is_empty() && *name != "." && *name != "..")
    }
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
}

impl HealthStatus {
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// Response of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
}
