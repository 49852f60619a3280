//! Shared HTTP plumbing for every backend call.
//!
//! Wraps a single `reqwest::Client` configured with the request deadline and a
//! cookie store (the auth endpoint keeps its session in a cookie), and maps
//! transport and status failures onto [`ApiError`].

use crate::api::common::ErrorBody;
use crate::config::Config;
use crate::errors::{ApiError, ApiResult};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(config: &Config) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .cookie_store(true)
            .user_agent("TechStartup-Admin/0.1")
            .build()
            .map_err(|e| ApiError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            timeout: config.request_timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves path segments against the base URL, percent-encoding each one.
    pub fn url(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::network(format!("Base URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn request(&self, method: Method, segments: &[&str]) -> ApiResult<RequestBuilder> {
        let url = self.url(segments)?;
        debug!("{} {}", method, url);
        Ok(self.client.request(method, url))
    }

    /// Sends the request, mapping only transport failures.
    pub async fn execute(&self, request: RequestBuilder) -> ApiResult<Response> {
        request.send().await.map_err(|e| self.transport_error(e))
    }

    /// Sends the request and decodes a 2xx JSON body.
    pub async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = self.execute(request).await?;
        let response = self.check_status(response).await?;
        self.decode(response).await
    }

    /// Turns a non-2xx response into [`ApiError::Server`].
    pub async fn check_status(&self, response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_message)
            .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());

        Err(ApiError::server(status.as_u16(), message))
    }

    pub async fn decode<T: DeserializeOwned>(&self, response: Response) -> ApiResult<T> {
        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                self.timeout_error()
            } else {
                ApiError::invalid_response(e.to_string())
            }
        })
    }

    fn transport_error(&self, error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            self.timeout_error()
        } else {
            ApiError::network(error.to_string())
        }
    }

    fn timeout_error(&self) -> ApiError {
        ApiError::Timeout {
            timeout_ms: self.timeout.as_millis() as u64,
        }
    }
}
