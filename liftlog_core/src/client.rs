//! Authenticated API client for the Liftlog REST backend.
//!
//! Builds requests against a single fixed base URL, attaches the JSON
//! content type and (when the session store holds a token) a bearer
//! `Authorization` header, parses JSON bodies, and classifies non-2xx
//! responses into the error taxonomy:
//!
//! - 401/403 → [`Error::Unauthorized`] with a fixed message, whatever
//!   the backend said
//! - other non-2xx → [`Error::Api`] with the backend `message` field
//!   when present, else `"API error: <status>"`
//! - transport and parse failures → logged, then returned unclassified
//!
//! The auth header is merged last, so nothing a caller supplies can
//! shadow it. There is no retry, no deduplication of in-flight
//! requests, and no cancellation propagation.

use crate::{Config, Error, Result, SessionStore};
use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Backend error envelope; anything else in the body is ignored
#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: Option<String>,
}

/// HTTP client bound to one backend origin and one session store
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: SessionStore,
}

/// Builder for creating an ApiClient
pub struct ApiClientBuilder {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    store: Option<SessionStore>,
}

impl ApiClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout_secs: None,
            store: None,
        }
    }

    /// Set the backend origin (defaults to the stock localhost backend)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Set the session store the bearer token is read from
    pub fn store(mut self, store: SessionStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the ApiClient
    pub fn build(self) -> Result<ApiClient> {
        let store = self
            .store
            .ok_or_else(|| Error::Config("API client requires a session store".into()))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs.unwrap_or(30)))
            .build()?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| "http://localhost:3000".into());

        Ok(ApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
        })
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    /// Create a client from configuration and a session store
    pub fn new(config: &Config, store: SessionStore) -> Result<Self> {
        ApiClientBuilder::new()
            .base_url(config.server.base_url.clone())
            .timeout_secs(config.server.timeout_secs)
            .store(store)
            .build()
    }

    /// Create a new builder for ApiClient
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    /// The origin all requests go to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None::<&()>).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::DELETE, path, None::<&()>).await
    }

    /// Core request path: merge headers, send, classify the outcome.
    pub async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(body) = body {
            request = request.json(body);
        }

        // Merged last: the token in the store always wins
        if let Some(token) = self.store.token() {
            request = request.bearer_auth(token);
        }

        tracing::debug!("{} {}", method, url);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Request to {} failed: {}", url, e);
                return Err(Error::Transport(e));
            }
        };

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!("{} {} rejected with {}", method, url, status);
            return Err(Error::Unauthorized);
        }

        if !status.is_success() {
            let message = response
                .text()
                .await
                .ok()
                .and_then(|body| serde_json::from_str::<ApiMessage>(&body).ok())
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| format!("API error: {}", status.as_u16()));
            tracing::warn!("{} {} failed: {} ({})", method, url, message, status);
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!("Failed to parse response from {}: {}", url, e);
                Err(Error::Json(e))
            }
        }
    }
}
