//! Chat-completion client for terrain flavor text.
//!
//! Talks to any OpenAI-compatible `/v1/chat/completions` endpoint (vLLM,
//! llama.cpp server, hosted APIs). The bearer token is read from the
//! environment variable named in [`LlmConfig::api_key_env`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for the lore server
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the server (e.g., "http://localhost:8000")
    pub base_url: String,
    /// Model name to use (optional, server may have default)
    pub model: Option<String>,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus sampling cutoff
    pub top_p: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            model: None,
            api_key_env: "LORE_API_KEY".to_string(),
            max_tokens: 1024,
            temperature: 0.8,
            top_p: 0.95,
            timeout_secs: 60,
        }
    }
}

impl LlmConfig {
    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// API key from the configured environment variable, if set and non-empty.
    pub fn api_key_from_env(&self) -> Option<String> {
        std::env::var(&self.api_key_env).ok().filter(|k| !k.trim().is_empty())
    }
}

/// Errors that can occur while talking to the server
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("no API key (set {0})")]
    MissingApiKey(String),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP client unavailable: {0}")]
    ClientUnavailable(String),
    #[error("API error: status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("empty response from model")]
    EmptyResponse,
}

/// OpenAI-compatible chat message
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Serialize, Debug)]
struct ChatCompletionRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatMessageResponse,
}

/// Response message - handles both standard and reasoning models
#[derive(Deserialize, Debug)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    reasoning_content: Option<String>,
}

impl ChatMessageResponse {
    fn into_content(self) -> Option<String> {
        self.content
            .filter(|s| !s.trim().is_empty())
            .or(self.reasoning_content)
            .filter(|s| !s.trim().is_empty())
    }
}

/// Pull the first choice's text out of a completion body.
pub fn parse_completion(body: &str) -> Result<String, LlmError> {
    let completion: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|e| LlmError::Parse(e.to_string()))?;

    completion
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.into_content())
        .ok_or(LlmError::EmptyResponse)
}

/// Prompt asking for a named location, atmosphere and encounter hooks.
pub fn lore_prompt(width: usize, height: usize) -> String {
    format!(
        "You are a creative dungeon master. I have generated a maze that is {} units wide and {} units tall.\n\
         Please provide a creative name for this location, a brief atmospheric description, \
         and three potential 'encounter' hooks for a game.\n\
         Format the response in Markdown.",
        width, height
    )
}

/// Async client for one server.
#[derive(Clone)]
pub struct LlmClient {
    config: LlmConfig,
    client: reqwest::Client,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    /// Send one chat completion and return the generated text.
    pub async fn chat_completion(&self, api_key: &str, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let request = ChatCompletionRequest {
            model: self.config.model.as_deref(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            top_p: self.config.top_p,
        };

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        parse_completion(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard_completion() {
        let body = r##"{"choices":[{"message":{"role":"assistant","content":"# The Hollow Grid\nDust."}}]}"##;
        assert_eq!(parse_completion(body).unwrap(), "# The Hollow Grid\nDust.");
    }

    #[test]
    fn test_parse_reasoning_fallback() {
        let body = r#"{"choices":[{"message":{"content":"","reasoning_content":"Echoing halls."}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "Echoing halls.");
    }

    #[test]
    fn test_parse_empty_and_malformed() {
        assert!(matches!(parse_completion(r#"{"choices":[]}"#), Err(LlmError::EmptyResponse)));
        assert!(matches!(
            parse_completion(r#"{"choices":[{"message":{"content":"   "}}]}"#),
            Err(LlmError::EmptyResponse)
        ));
        assert!(matches!(parse_completion("<html>502</html>"), Err(LlmError::Parse(_))));
    }

    #[test]
    fn test_prompt_mentions_dimensions() {
        let prompt = lore_prompt(129, 64);
        assert!(prompt.contains("129 units wide"));
        assert!(prompt.contains("64 units tall"));
        assert!(prompt.contains("Markdown"));
    }

    #[test]
    fn test_request_serialization() {
        let messages = [ChatMessage::user("hi")];
        let request = ChatCompletionRequest {
            model: None,
            messages: &messages,
            max_tokens: 10,
            temperature: 0.8,
            top_p: 0.95,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("model").is_none());
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 10);
    }

    #[test]
    fn test_completions_url_trims_slash() {
        let config = LlmConfig {
            base_url: "http://example.test/".to_string(),
            ..LlmConfig::default()
        };
        assert_eq!(config.completions_url(), "http://example.test/v1/chat/completions");
    }
}
