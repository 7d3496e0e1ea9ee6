use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::DomainError;

/// Trait for HTTP client operations (for mocking)
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    async fn get_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
    ) -> Result<serde_json::Value, DomainError>;

    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError>;
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(timeout: std::time::Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<serde_json::Value, DomainError> {
        let response = request
            .send()
            .await
            .map_err(|e| DomainError::provider("http", format!("Request failed: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(remote_error(status, &error_body));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DomainError::provider("http", format!("Failed to read response: {}", e)))?;

        if body.is_empty() {
            return Ok(serde_json::Value::Object(serde_json::Map::new()));
        }

        serde_json::from_slice(&body)
            .map_err(|e| DomainError::provider("http", format!("Failed to parse response: {}", e)))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn get_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
    ) -> Result<serde_json::Value, DomainError> {
        let mut request = self.client.get(url);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        self.send(request).await
    }

    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError> {
        let mut request = self.client.post(url);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        self.send(request.json(body)).await
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Longest raw body shown to the user before it is cut off
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Turn a non-success response into a user-presentable error.
///
/// Prefers the JSON `message` field, then a plain-text body, then the status
/// text. Markup bodies such as proxy error pages are never shown.
fn remote_error(status: reqwest::StatusCode, body: &str) -> DomainError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|e| e.message)
        .ok()
        .filter(|m| !m.is_empty())
        .or_else(|| plain_text(body))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
        });

    DomainError::remote_with_status(status.as_u16(), message)
}

fn plain_text(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() || body.starts_with('<') {
        return None;
    }

    let mut text: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    if body.chars().count() > MAX_ERROR_BODY_CHARS {
        text.push_str("...");
    }
    Some(text)
}
