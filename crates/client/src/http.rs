//! REST binding of the layout gateway.
//!
//! Wraps the three layout endpoints using [`reqwest`]:
//!
//! ```text
//! GET  {api_url}/users/dashboard-layout
//! PUT  {api_url}/users/dashboard-layout
//! POST {api_url}/users/dashboard-layout/reset
//! ```

use async_trait::async_trait;
use reqwest::StatusCode;
use vitalboard_core::widget::{DashboardLayoutData, SaveLayoutRequest, WidgetConfig};

use crate::config::ClientConfig;
use crate::gateway::{GatewayError, LayoutGateway};

/// Path of the layout resource relative to the API base URL.
const LAYOUT_PATH: &str = "/users/dashboard-layout";

/// HTTP client for the dashboard layout endpoints.
pub struct HttpLayoutGateway {
    client: reqwest::Client,
    api_url: String,
    api_token: Option<String>,
}

impl HttpLayoutGateway {
    /// Build a gateway with its own [`reqwest::Client`] honouring the
    /// configured request timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Build a gateway reusing an existing [`reqwest::Client`]
    /// (useful for sharing a connection pool with other API clients).
    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            api_token: config.api_token.clone(),
        }
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}{LAYOUT_PATH}{suffix}", self.api_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`GatewayError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GatewayError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl LayoutGateway for HttpLayoutGateway {
    async fn fetch_layout(&self) -> Result<Option<DashboardLayoutData>, GatewayError> {
        let response = self.authorize(self.client.get(self.url(""))).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!("No stored dashboard layout for this user");
            return Ok(None);
        }

        Self::parse_response(response).await.map(Some)
    }

    async fn save_layout(&self, widgets: &[WidgetConfig]) -> Result<DashboardLayoutData, GatewayError> {
        let body = SaveLayoutRequest {
            widgets: widgets.to_vec(),
        };

        let response = self
            .authorize(self.client.put(self.url("")))
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn reset_layout(&self) -> Result<DashboardLayoutData, GatewayError> {
        let response = self
            .authorize(self.client.post(self.url("/reset")))
            .send()
            .await?;

        Self::parse_response(response).await
    }
}
