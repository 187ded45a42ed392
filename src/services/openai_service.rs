use std::env;
use std::error::Error;
use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const MODEL: &str = "gpt-4o-mini";
const TEMPERATURE: f64 = 0.6;

#[derive(Debug)]
pub enum GenerationError {
    EnvironmentError(String),
    HttpError(reqwest::Error),
    ApiError(String),
    EmptyResponse,
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::EnvironmentError(msg) => write!(f, "Environment error: {}", msg),
            GenerationError::HttpError(err) => write!(f, "HTTP error: {}", err),
            GenerationError::ApiError(msg) => write!(f, "API error: {}", msg),
            GenerationError::EmptyResponse => write!(f, "No response from model"),
        }
    }
}

impl Error for GenerationError {}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::HttpError(err)
    }
}

/// The external generation service as an opaque
/// `(system prompt, user payload) -> text` collaborator. Handlers depend on
/// this trait so tests can substitute a fake for the real API.
#[async_trait]
pub trait TextGeneration: Send + Sync {
    async fn generate(
        &self,
        system_prompt: &str,
        user_payload: &Value,
    ) -> Result<String, GenerationError>;
}

#[derive(Clone)]
pub struct OpenAiService {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiService {
    pub fn from_env() -> Result<Self, GenerationError> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| GenerationError::EnvironmentError("OPENAI_API_KEY not set".to_string()))?;
        let base_url =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self::new(api_key, base_url))
    }

    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }
}

#[async_trait]
impl TextGeneration for OpenAiService {
    /// Single chat-completion request, JSON output mode, no retry. Whatever
    /// text comes back is handed to the repair step untrusted.
    async fn generate(
        &self,
        system_prompt: &str,
        user_payload: &Value,
    ) -> Result<String, GenerationError> {
        let request = json!({
            "model": MODEL,
            "temperature": TEMPERATURE,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_payload.to_string() },
            ],
        });

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenerationError::ApiError(format!(
                "Completion request failed with status {}: {}",
                status, error_text
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::ApiError(format!("Failed to parse response: {}", e)))?;

        let text = body["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string();

        if text.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_rt::test]
    async fn test_generate_extracts_completion_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(mockito::Matcher::PartialJson(json!({
                "model": "gpt-4o-mini",
                "temperature": 0.6,
                "response_format": { "type": "json_object" },
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices": [{"message": {"role": "assistant", "content": "{\"destination\": \"Tokyo\"}"}}]}"#,
            )
            .create_async()
            .await;

        let service = OpenAiService::new("test-key".to_string(), server.url());
        let text = service
            .generate("plan a trip", &json!({"destination": "Tokyo"}))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(text, r#"{"destination": "Tokyo"}"#);
    }

    #[actix_rt::test]
    async fn test_generate_empty_content_is_empty_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": [{"message": {"role": "assistant", "content": ""}}]}"#)
            .create_async()
            .await;

        let service = OpenAiService::new("test-key".to_string(), server.url());
        let err = service.generate("plan", &json!({})).await.unwrap_err();

        assert!(matches!(err, GenerationError::EmptyResponse));
    }

    #[actix_rt::test]
    async fn test_generate_surfaces_api_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let service = OpenAiService::new("test-key".to_string(), server.url());
        let err = service.generate("plan", &json!({})).await.unwrap_err();

        match err {
            GenerationError::ApiError(msg) => assert!(msg.contains("429")),
            other => panic!("expected ApiError, got {:?}", other),
        }
    }
}
