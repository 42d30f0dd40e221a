// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! OpenAI-compatible insight backend.
//!
//! Works with any chat-completions endpoint speaking the OpenAI wire
//! format (OpenAI API, Azure OpenAI, vLLM, Ollama, LocalAI).

use async_trait::async_trait;
use reqwest::{Client, header};
use serde::{Deserialize, Serialize};

use crate::generator::{Insight, InsightError, InsightGenerator, InsightRequest, parse_insight};

/// OpenAI-compatible backend.
pub struct OpenAiInsights {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiInsights {
    /// Create a backend for an arbitrary OpenAI-compatible endpoint.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self, InsightError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| InsightError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key,
            model: model.into(),
        })
    }

    /// Create a backend for the hosted OpenAI API.
    pub fn openai(model: &str, api_key: impl Into<String>) -> Result<Self, InsightError> {
        Self::new("https://api.openai.com/v1", model, Some(api_key.into()))
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn auth_header(&self) -> Option<String> {
        self.api_key.as_ref().map(|k| format!("Bearer {}", k))
    }
}

/// Chat completion request body.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// Chat completion response body.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageResponse,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Option<String>,
}

#[async_trait]
impl InsightGenerator for OpenAiInsights {
    fn id(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: InsightRequest) -> Result<Insight, InsightError> {
        let chat_request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system,
                },
                ChatMessage {
                    role: "user",
                    content: request.prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let mut http_request = self.client.post(self.chat_completions_url());
        if let Some(auth) = self.auth_header() {
            http_request = http_request.header(header::AUTHORIZATION, auth);
        }

        let response = http_request
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| InsightError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            if status.as_u16() == 429 {
                tracing::debug!(model = %self.model, "insight backend rate limited");
                return Err(InsightError::RateLimited);
            }
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(model = %self.model, %status, "insight request failed");
            return Err(InsightError::RequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| InsightError::Parse(e.to_string()))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| InsightError::Parse("no choices in response".to_string()))?;

        parse_insight(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> InsightRequest {
        InsightRequest {
            system: "coach".to_string(),
            prompt: "snapshot".to_string(),
            max_tokens: 200,
            temperature: 0.7,
        }
    }

    fn chat_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        })
    }

    #[tokio::test]
    async fn test_generate_parses_model_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body(
                r#"{"message": "45 days in, keep going", "tip": "Batch two videos"}"#,
            )))
            .mount(&server)
            .await;

        let backend = OpenAiInsights::new(server.uri(), "gpt-4o-mini", None).unwrap();
        let insight = backend.generate(request()).await.unwrap();
        assert_eq!(insight.message, "45 days in, keep going");
        assert_eq!(insight.tip, "Batch two videos");
    }

    #[tokio::test]
    async fn test_generate_maps_rate_limit() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let backend = OpenAiInsights::new(server.uri(), "gpt-4o-mini", None).unwrap();
        let err = backend.generate(request()).await.unwrap_err();
        assert!(matches!(err, InsightError::RateLimited));
    }

    #[tokio::test]
    async fn test_generate_maps_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let backend = OpenAiInsights::new(server.uri(), "gpt-4o-mini", None).unwrap();
        let err = backend.generate(request()).await.unwrap_err();
        assert!(matches!(err, InsightError::RequestFailed(_)));
    }

    #[tokio::test]
    async fn test_generate_rejects_prose_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(chat_body("Keep up the great work!")),
            )
            .mount(&server)
            .await;

        let backend = OpenAiInsights::new(server.uri(), "gpt-4o-mini", None).unwrap();
        let err = backend.generate(request()).await.unwrap_err();
        assert!(matches!(err, InsightError::Parse(_)));
    }
}
