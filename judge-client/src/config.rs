use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://judge0-ce.p.rapidapi.com";
pub const DEFAULT_API_HOST: &str = "judge0-ce.p.rapidapi.com";

#[derive(Debug, Clone)]
pub struct Judge0Config {
    /// Base URL of the Judge0 deployment
    pub api_url: String,

    /// API key sent as `X-RapidAPI-Key`
    pub api_key: String,

    /// Value of the `X-RapidAPI-Host` header, omitted when `None`
    pub api_host: Option<String>,

    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Judge0Config {
    pub fn new(api_key: String) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key,
            api_host: Some(DEFAULT_API_HOST.to_string()),
            request_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_api_url(mut self, api_url: String) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_host(mut self, api_host: Option<String>) -> Self {
        self.api_host = api_host.filter(|h| !h.is_empty());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
