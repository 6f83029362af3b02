use storelens_core::AppConfig;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Connection settings for [`InsightsClient`](crate::InsightsClient).
///
/// Store analysis runs a full scrape on the server, so the default request
/// timeout is generous. It is still finite: a hung analysis fails with a
/// timeout instead of blocking the caller forever.
#[derive(Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub api_token: Option<String>,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
}

impl ClientSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            api_token: config.api_token.clone(),
            request_timeout_secs: config.request_timeout_secs,
            connect_timeout_secs: config.connect_timeout_secs,
            user_agent: config.user_agent.clone(),
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: None,
            request_timeout_secs: 120,
            connect_timeout_secs: 10,
            user_agent: "storelens/0.1 (store-insights)".to_string(),
        }
    }
}

impl std::fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSettings")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[redacted]"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
