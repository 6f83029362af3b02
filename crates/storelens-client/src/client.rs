//! HTTP client for the store insights analysis service.
//!
//! Every public method performs exactly one request. There is no retry,
//! caching or de-duplication: concurrent calls run independently and a
//! failure surfaces to the caller as a [`ClientError`]. Dropping a returned
//! future abandons the request.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use storelens_core::{
    decode, CompetitorAnalysisRequest, CompetitorAnalysisResult, ErrorBody, ExportReceipt,
    HealthStatus, ServiceInfo, StoreAnalysisRequest, StoreInsights,
};

use crate::error::ClientError;
use crate::operation::Operation;
use crate::settings::ClientSettings;

/// Data type list sent when the caller does not narrow the export.
const DEFAULT_DATA_TYPES: &[&str] = &["all"];

/// Client for the store insights REST API.
///
/// Cheap to clone; clones share the underlying connection pool. Use
/// [`InsightsClient::new`] with [`ClientSettings`] for real deployments or
/// [`InsightsClient::with_base_url`] to point at a mock server in tests.
#[derive(Clone)]
pub struct InsightsClient {
    client: Client,
    /// Base URL without a trailing slash.
    base_url: String,
    api_token: Option<String>,
}

impl InsightsClient {
    /// Creates a client from explicit settings.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidBaseUrl`] if `settings.base_url` is not an
    ///   absolute `http(s)` URL.
    /// - [`ClientError::Network`] if the underlying `reqwest::Client` cannot
    ///   be constructed.
    pub fn new(settings: &ClientSettings) -> Result<Self, ClientError> {
        let base_url = normalise_base_url(&settings.base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .user_agent(settings.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_token: settings.api_token.clone(),
        })
    }

    /// Creates a client with default settings and a custom base URL (for
    /// testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`InsightsClient::new`].
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, ClientError> {
        Self::new(&ClientSettings {
            base_url: base_url.to_owned(),
            request_timeout_secs: timeout_secs,
            ..ClientSettings::default()
        })
    }

    /// Base URL requests are resolved against, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submits a storefront for analysis and returns the decoded insights.
    ///
    /// The URL is not validated beyond being non-empty; the service decides
    /// whether it is acceptable.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidInput`] if `website_url` is empty (no request
    ///   is sent).
    /// - [`ClientError::Http`] on a non-2xx status, carrying the service's
    ///   `detail` message or `"Failed to analyze store"`.
    /// - [`ClientError::Validation`] if the 2xx body is not a valid
    ///   [`StoreInsights`].
    /// - [`ClientError::Network`] on connection failure or timeout.
    pub async fn analyze_store(&self, website_url: &str) -> Result<StoreInsights, ClientError> {
        require_non_empty("website URL", website_url)?;
        let url = self.endpoint("/analyze-store")?;
        let body = StoreAnalysisRequest {
            website_url: website_url.to_owned(),
        };
        let request = self.client.post(url).json(&body);
        self.fetch_json(request, Operation::AnalyzeStore).await
    }

    /// Requests a competitor comparison for the given store.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidInput`] if `target_store_url` is empty.
    /// - [`ClientError::Http`] on a non-2xx status (fallback message
    ///   `"Failed to analyze competitors"`).
    /// - [`ClientError::Validation`] if the body does not match
    ///   [`CompetitorAnalysisResult`].
    /// - [`ClientError::Network`] on connection failure or timeout.
    pub async fn analyze_competitors(
        &self,
        target_store_url: &str,
    ) -> Result<CompetitorAnalysisResult, ClientError> {
        require_non_empty("target store URL", target_store_url)?;
        let url = self.endpoint("/analyze-competitors")?;
        let body = CompetitorAnalysisRequest {
            target_store_url: target_store_url.to_owned(),
        };
        let request = self.client.post(url).json(&body);
        self.fetch_json(request, Operation::AnalyzeCompetitors).await
    }

    /// Requests an export and returns the service's JSON response untouched.
    ///
    /// An empty `data_types` slice exports everything (`data_types=all`).
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidInput`] if `format` is empty.
    /// - [`ClientError::Http`] on a non-2xx status (fallback message
    ///   `"Failed to export data"`).
    /// - [`ClientError::Validation`] if the 2xx body is not JSON.
    /// - [`ClientError::Network`] on connection failure or timeout.
    pub async fn export_data(
        &self,
        format: &str,
        data_types: &[&str],
    ) -> Result<serde_json::Value, ClientError> {
        let url = self.export_url(format, data_types)?;
        let request = self.client.get(url);
        self.fetch_json(request, Operation::ExportData).await
    }

    /// Like [`export_data`](Self::export_data), decoded as an
    /// [`ExportReceipt`].
    ///
    /// # Errors
    ///
    /// As for [`export_data`](Self::export_data); additionally
    /// [`ClientError::Validation`] if the JSON is not a receipt.
    pub async fn export_receipt(
        &self,
        format: &str,
        data_types: &[&str],
    ) -> Result<ExportReceipt, ClientError> {
        let url = self.export_url(format, data_types)?;
        let request = self.client.get(url);
        self.fetch_json(request, Operation::ExportData).await
    }

    /// Downloads a file and returns its raw bytes.
    ///
    /// `download_url` is normally a server-relative path such as
    /// `/download/export_20250314.csv`; absolute `http(s)` URLs are fetched
    /// as given.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidInput`] if `download_url` is empty or cannot
    ///   be resolved to a URL.
    /// - [`ClientError::Http`] with `"Failed to download file"` on any
    ///   non-2xx status.
    /// - [`ClientError::Network`] on connection failure or timeout.
    pub async fn download_file(&self, download_url: &str) -> Result<Vec<u8>, ClientError> {
        let url = self.download_url(download_url)?;
        let request = self.client.get(url);
        let response = self.execute(request, Operation::DownloadFile).await?;
        let bytes = response.bytes().await?;
        tracing::debug!(len = bytes.len(), "downloaded file");
        Ok(bytes.to_vec())
    }

    /// Calls `GET /health`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Http`], [`ClientError::Validation`] or
    /// [`ClientError::Network`] as for the other endpoints.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let url = self.endpoint("/health")?;
        self.fetch_json(self.client.get(url), Operation::Health).await
    }

    /// Calls `GET /` for the service name and version.
    ///
    /// # Errors
    ///
    /// [`ClientError::Http`], [`ClientError::Validation`] or
    /// [`ClientError::Network`] as for the other endpoints.
    pub async fn service_info(&self) -> Result<ServiceInfo, ClientError> {
        let url = self.endpoint("/")?;
        self.fetch_json(self.client.get(url), Operation::ServiceInfo).await
    }

    /// Joins an absolute path onto the base URL, keeping any base path
    /// prefix (e.g. `https://host/api` + `/health`).
    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        let raw = format!("{}{path}", self.base_url);
        Url::parse(&raw)
            .map_err(|e| ClientError::InvalidInput(format!("invalid URL '{raw}': {e}")))
    }

    /// Builds `/export-data/{format}?data_types=a,b`.
    ///
    /// `format` becomes a single percent-encoded path segment, so a value
    /// such as `"../admin"` cannot escape the export route.
    fn export_url(&self, format: &str, data_types: &[&str]) -> Result<Url, ClientError> {
        require_non_empty("export format", format)?;
        let data_types = if data_types.is_empty() {
            DEFAULT_DATA_TYPES
        } else {
            data_types
        };

        let mut url = self.endpoint("/export-data")?;
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidInput("base URL cannot take a path".to_string()))?
            .push(format);
        url.query_pairs_mut()
            .append_pair("data_types", &data_types.join(","));
        Ok(url)
    }

    fn download_url(&self, download_url: &str) -> Result<Url, ClientError> {
        require_non_empty("download URL", download_url)?;
        if download_url.starts_with("http://") || download_url.starts_with("https://") {
            return Url::parse(download_url).map_err(|e| {
                ClientError::InvalidInput(format!("invalid download URL '{download_url}': {e}"))
            });
        }
        if download_url.starts_with('/') {
            self.endpoint(download_url)
        } else {
            self.endpoint(&format!("/{download_url}"))
        }
    }

    /// Sends the request, decodes a 2xx body as `T`.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        op: Operation,
    ) -> Result<T, ClientError> {
        let response = self.execute(request, op).await?;
        let body = response.bytes().await?;
        decode(op.name(), &body).map_err(ClientError::from)
    }

    /// Sends the request and turns a non-2xx status into [`ClientError::Http`].
    async fn execute(
        &self,
        request: RequestBuilder,
        op: Operation,
    ) -> Result<Response, ClientError> {
        let request = match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        tracing::debug!(operation = op.name(), "sending request");
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(operation = op.name(), status = status.as_u16(), "received response");

        if status.is_success() {
            return Ok(response);
        }

        let detail = if op.reads_error_detail() {
            error_detail(response, op).await
        } else {
            None
        };
        let message = detail.unwrap_or_else(|| op.fallback_message().to_string());
        tracing::warn!(
            operation = op.name(),
            status = status.as_u16(),
            %message,
            "analysis service returned an error"
        );
        Err(ClientError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

/// Reads the `detail` message from an error response, if there is one.
async fn error_detail(response: Response, op: Operation) -> Option<String> {
    let body = match response.bytes().await {
        Ok(body) => body,
        Err(error) => {
            tracing::debug!(operation = op.name(), %error, "could not read error body");
            return None;
        }
    };
    decode::<ErrorBody>(op.name(), &body)
        .ok()
        .and_then(|b| b.message())
}

fn require_non_empty(what: &str, value: &str) -> Result<(), ClientError> {
    if value.is_empty() {
        return Err(ClientError::InvalidInput(format!("{what} must not be empty")));
    }
    Ok(())
}

/// Validates the base URL and strips trailing slashes.
fn normalise_base_url(base_url: &str) -> Result<String, ClientError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|e| ClientError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: format!("unsupported scheme \"{}\"", parsed.scheme()),
        });
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: "must not contain a query or fragment".to_string(),
        });
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
