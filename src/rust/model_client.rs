use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;

const API_VERSION: &str = "2023-06-01";

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("No API key configured")]
    MissingApiKey,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Model API returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Model API returned no text content")]
    EmptyResponse,
}

/// A single prompt-in, text-out language model call.
///
/// Implementations return the raw text; callers must not assume it holds only JSON.
#[async_trait]
pub trait ModelCall: Send + Sync {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, ModelError>;
}

#[async_trait]
impl<T: ModelCall + ?Sized> ModelCall for Arc<T> {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, ModelError> {
        (**self).complete(prompt, max_tokens).await
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// [`ModelCall`] over the Anthropic Messages HTTP API.
#[derive(Clone, Debug)]
pub struct HttpModelClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpModelClient {
    pub fn new(config: ClientConfig) -> Result<Self, ModelError> {
        let http = reqwest::Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ModelCall for HttpModelClient {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, ModelError> {
        let api_key = self.config.api_key.as_deref().ok_or(ModelError::MissingApiKey)?;

        let request = MessagesRequest {
            model: &self.config.model,
            max_tokens,
            messages: [Message { role: "user", content: prompt }],
        };

        log::debug!("Requesting judgment from {} (model {})", self.endpoint(), self.config.model);
        let response = self
            .http
            .post(self.endpoint())
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        log::debug!("Model response status: {}", status);
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Status { status, body });
        }

        let parsed: MessagesResponse = response.json().await?;
        let text: String = parsed
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect();

        if text.trim().is_empty() {
            return Err(ModelError::EmptyResponse);
        }
        Ok(text)
    }
}
