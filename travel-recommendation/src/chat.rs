use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::ChatError;

/// Role of a single chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One role/content pair in a chat exchange.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// A chat completion request: model, ordered message list, temperature.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
}

/// Client able to answer a chat completion request with the text content of
/// the first choice.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> std::result::Result<String, ChatError>;
}

// Deadline applied to every completion call; expiry surfaces as a transient
// request error and is handled by the strategy's retry loop.
const REQUEST_DEADLINE: Duration = Duration::from_secs(60);

/// `ChatClient` backed by an OpenAI-compatible chat completions endpoint.
pub struct OpenAiChatClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiChatClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";

    pub fn new(api_key: impl Into<String>) -> std::result::Result<Self, ChatError> {
        Self::with_base_url(api_key, Self::DEFAULT_BASE_URL)
    }

    /// Point the client at a different OpenAI-compatible endpoint.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> std::result::Result<Self, ChatError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_DEADLINE)
            .build()
            .map_err(|e| ChatError::InvalidRequest(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete(&self, request: ChatRequest) -> std::result::Result<String, ChatError> {
        let payload = json!({
            "model": request.model,
            "messages": request.messages,
            "temperature": request.temperature,
        });

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| ChatError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Request(format!(
                "chat completion API returned {status}"
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ChatError::Malformed(format!("response body was not JSON: {e}")))?;

        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                ChatError::Malformed("missing choices[0].message.content".to_string())
            })?;

        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_serialize_with_lowercase_roles() {
        let message = ChatMessage::assistant("hello");
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(value, json!({ "role": "assistant", "content": "hello" }));
    }

    #[test]
    fn requests_carry_model_messages_and_temperature() {
        let request = ChatRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![ChatMessage::system("be brief"), ChatMessage::user("hi")],
            temperature: 0.8,
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "hi");
        assert_eq!(value["temperature"], 0.8);
    }

    #[test]
    fn base_url_loses_its_trailing_slash() {
        let client = OpenAiChatClient::with_base_url("key", "http://localhost:8080/v1/").unwrap();
        assert_eq!(client.base_url, "http://localhost:8080/v1");
    }
}
