//! HTTP utilities for the payments CLI client.
//!
//! This module wraps a `reqwest` client with the base URL, default headers and
//! response handling shared by every API call.

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, trace};

use crate::payments_api::ApiError;

pub const USER_AGENT: &str = "paycli";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Configuration for HTTP requests with common settings
#[derive(Debug, Clone)]
pub struct HttpRequestConfig {
    /// Base URL for the API, without a trailing slash
    pub base_url: String,
    /// Default headers to include with all requests
    pub default_headers: HashMap<String, String>,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl HttpRequestConfig {
    pub fn new(base_url: &str) -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), USER_AGENT.to_string());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            default_headers,
            timeout: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    pub fn from_configuration(configuration: &crate::configuration::Configuration) -> Self {
        Self::new(configuration.get_api_base_url().as_str())
    }
}

/// HTTP client wrapper with common request handling logic
#[derive(Clone)]
pub struct HttpClient {
    client: Arc<Client>,
    config: HttpRequestConfig,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: HttpRequestConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    pub fn config(&self) -> &HttpRequestConfig {
        &self.config
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Make a GET request to the specified path
    pub async fn get<T>(&self, path: &str, auth_token: Option<&str>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        self.execute_request(|client| client.get(url), auth_token).await
    }

    /// Make a POST request to the specified path with a JSON body
    pub async fn post<T, B>(
        &self,
        path: &str,
        body: &B,
        auth_token: Option<&str>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: serde::Serialize,
    {
        let url = self.url(path);
        self.execute_request(|client| client.post(url).json(body), auth_token)
            .await
    }

    /// Make a POST request with extra headers and no body, as used by login
    pub async fn post_with_headers<T>(
        &self,
        path: &str,
        headers: &[(&str, &str)],
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        self.execute_request(
            |client| {
                headers
                    .iter()
                    .fold(client.post(url), |request, (name, value)| {
                        request.header(*name, *value)
                    })
            },
            None,
        )
        .await
    }

    /// Execute an HTTP request with common error handling and optional authentication
    async fn execute_request<F, T>(
        &self,
        request_builder: F,
        auth_token: Option<&str>,
    ) -> Result<T, ApiError>
    where
        F: FnOnce(&Client) -> reqwest::RequestBuilder,
        T: DeserializeOwned,
    {
        let mut request = request_builder(&self.client);

        if let Some(token) = auth_token {
            request = request.bearer_auth(token);
        }

        for (key, value) in &self.config.default_headers {
            request = request.header(key, value);
        }

        let response = request.send().await?;
        let status = response.status();
        let response_text = response.text().await?;
        trace!("Raw response ({}): {}", status, response_text);

        if !status.is_success() {
            debug!("Request failed with status {}", status);
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: response_text,
            });
        }

        // DELETE and some POST endpoints answer with an empty body
        let response_text = if response_text.trim().is_empty() {
            "null".to_string()
        } else {
            response_text
        };

        serde_json::from_str::<T>(&response_text).map_err(|e| {
            error!(
                "Failed to deserialize response: {}. Raw response: {}",
                e, response_text
            );
            ApiError::JsonError(e)
        })
    }
}
