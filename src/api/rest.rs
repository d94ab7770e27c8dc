//! reqwest-backed transport for the hospital REST API.
//!
//! The bearer token is held in a `SecretString` and never appears in
//! Debug output; the Authorization header is marked sensitive so it is
//! redacted if reqwest's own logging is ever enabled.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{self, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use url::Url;

use crate::error::{MedideskError, Result};

use super::{ApiTransport, Envelope};

pub struct RestClient {
    http: reqwest::Client,
    base: Url,
    token: Option<SecretString>,
}

impl fmt::Debug for RestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("base", &self.base.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl RestClient {
    /// Build a client against `base_url` with the given request timeout.
    ///
    /// Requests that exceed the timeout fail instead of hanging a
    /// loading state forever.
    pub fn new(base_url: &str, token: Option<String>, timeout_secs: u64) -> Result<Self> {
        let base = Url::parse(base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(MedideskError::Config(format!(
                "unsupported URL scheme '{}'",
                base.scheme()
            )));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .build()?;
        Ok(RestClient {
            http,
            base,
            token: token.map(SecretString::from),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let joined = format!(
            "{}/{}",
            self.base.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&joined)?)
    }

    fn auth_header(&self) -> Result<Option<HeaderValue>> {
        let Some(token) = &self.token else {
            return Ok(None);
        };
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|_| MedideskError::Auth("token contains invalid characters".to_string()))?;
        value.set_sensitive(true);
        Ok(Some(value))
    }

    async fn decode(response: reqwest::Response) -> Result<Envelope> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<Envelope>().await?);
        }
        // Error statuses may still carry the envelope's error field
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Envelope>(&body)
            .ok()
            .and_then(|e| e.error)
            .unwrap_or_else(|| format!("server returned {}", status));
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(MedideskError::Auth(message));
        }
        Err(MedideskError::Api(message))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Envelope> {
        let request = match self.auth_header()? {
            Some(value) => request.header(header::AUTHORIZATION, value),
            None => request,
        };
        let response = request.send().await?;
        Self::decode(response).await
    }
}

#[async_trait]
impl ApiTransport for RestClient {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Envelope> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, params = query.len(), "GET");
        self.send(self.http.get(url).query(query)).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Envelope> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "POST");
        self.send(self.http.post(url).json(&body)).await
    }

    async fn put(&self, path: &str, body: Value) -> Result<Envelope> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "PUT");
        self.send(self.http.put(url).json(&body)).await
    }

    async fn delete(&self, path: &str) -> Result<Envelope> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "DELETE");
        self.send(self.http.delete(url)).await
    }
}
