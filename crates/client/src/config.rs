use std::time::Duration;

/// Default base URL of the layout API.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/v1";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL the layout paths are appended to (no trailing slash).
    pub api_url: String,
    /// Bearer token sent in the `Authorization` header, if any.
    pub api_token: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Configuration for `api_url` with no token and the default timeout.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: normalize_url(api_url.into()),
            api_token: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                           | Default                        |
    /// |-----------------------------------|--------------------------------|
    /// | `VITALBOARD_API_URL`              | `http://localhost:3000/api/v1` |
    /// | `VITALBOARD_API_TOKEN`            | unset                          |
    /// | `VITALBOARD_REQUEST_TIMEOUT_SECS` | `30`                           |
    ///
    /// An unparsable timeout falls back to the default with a warning.
    pub fn from_env() -> Self {
        let api_url = std::env::var("VITALBOARD_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());

        let api_token = std::env::var("VITALBOARD_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let request_timeout_secs = match std::env::var("VITALBOARD_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    value = %raw,
                    default = DEFAULT_REQUEST_TIMEOUT_SECS,
                    "VITALBOARD_REQUEST_TIMEOUT_SECS is not a number, using default",
                );
                DEFAULT_REQUEST_TIMEOUT_SECS
            }),
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Self {
            api_url: normalize_url(api_url),
            api_token,
            request_timeout_secs,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

fn normalize_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
