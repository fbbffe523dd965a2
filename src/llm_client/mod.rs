/// LLM Client — the single point of entry for all chat-completion calls.
///
/// ARCHITECTURAL RULE: no other module may talk to the remote endpoint
/// directly. Feature modules depend on the narrow [`ChatClient`] trait
/// (messages + temperature + max_tokens in, reply text out), so the
/// parsing and fallback logic above this layer is testable with a
/// scripted client and no network.
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

/// Default OpenAI-compatible endpoint, overridable via `SERVICE_BASE_URL`.
pub const DEFAULT_BASE_URL: &str = "https://ai.megallm.io/v1";
/// Default model identifier, overridable via `SERVICE_MODEL`.
pub const DEFAULT_MODEL: &str = "gpt-5";
const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned no message content")]
    EmptyContent,

    #[error("Request failed after {retries} retries")]
    RetriesExhausted { retries: u32 },
}

/// A single role-tagged chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// The transport capability consumed by every operation in this crate.
///
/// Returns the first choice's message content as plain text. No streaming,
/// no tool calling, no multi-turn state — this is the entire contract with
/// the remote collaborator.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn send(
        &self,
        messages: &[Message],
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

impl ChatCompletionResponse {
    /// Consumes the response, yielding the first choice's message content.
    fn into_content(self) -> Result<String, LlmError> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(LlmError::EmptyContent)
    }
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Chat-completion client for an OpenAI-compatible endpoint.
/// Retries on 429 (rate limit), 5xx, and network errors with exponential
/// backoff; other failures surface immediately.
#[derive(Clone)]
pub struct HttpChatClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl HttpChatClient {
    pub fn new(config: &crate::config::Config) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    async fn send(
        &self,
        messages: &[Message],
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature,
            max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                // Try to parse a structured error message
                let message = serde_json::from_str::<ApiErrorResponse>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let completion: ChatCompletionResponse = response.json().await?;

            if let Some(usage) = &completion.usage {
                debug!(
                    "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                    usage.prompt_tokens, usage.completion_tokens
                );
            }

            return completion.into_content();
        }

        Err(last_error.unwrap_or(LlmError::RetriesExhausted {
            retries: MAX_RETRIES,
        }))
    }
}

/// Extracts the JSON payload from possibly-fenced model output and parses
/// it into `T`. A parse failure here is the internal decode signal — each
/// call site decides whether to degrade or raise.
pub fn extract_json<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    serde_json::from_str(extract_json_block(text)).map_err(LlmError::Parse)
}

/// Pulls the payload out of ```json ... ``` or ``` ... ``` fences,
/// tolerating prose around the fence. An unclosed fence yields everything
/// after the opening marker; unfenced text is returned whole.
fn extract_json_block(text: &str) -> &str {
    let text = text.trim();
    if let Some(start) = text.find("```json") {
        let rest = &text[start + "```json".len()..];
        match rest.find("```") {
            Some(end) => rest[..end].trim(),
            None => rest.trim(),
        }
    } else if let Some(start) = text.find("```") {
        let rest = &text[start + "```".len()..];
        match rest.find("```") {
            Some(end) => rest[..end].trim(),
            None => rest.trim(),
        }
    } else {
        text
    }
}

/// First `max` characters of `text`, never splitting a multi-byte char.
/// Used for the raw-output snippets embedded in degraded results.
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_block_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json_block(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_json_block_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json_block(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_json_block_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(extract_json_block(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_json_block_prose_around_fence() {
        let input = "Here is your analysis:\n```json\n{\"a\": 1}\n```\nHope this helps!";
        assert_eq!(extract_json_block(input), "{\"a\": 1}");
    }

    #[test]
    fn test_extract_json_block_unclosed_fence_uses_rest() {
        let input = "```json\n{\"a\": 1}";
        assert_eq!(extract_json_block(input), "{\"a\": 1}");
    }

    #[test]
    fn test_extract_json_same_value_regardless_of_wrapping() {
        let unfenced: serde_json::Value = extract_json("{\"a\":1}").unwrap();
        let fenced: serde_json::Value = extract_json("```json\n{\"a\":1}\n```").unwrap();
        let generic: serde_json::Value = extract_json("```\n{\"a\":1}\n```").unwrap();
        assert_eq!(unfenced, fenced);
        assert_eq!(unfenced, generic);
        assert_eq!(unfenced["a"], 1);
    }

    #[test]
    fn test_extract_json_array() {
        let parsed: Vec<u32> = extract_json("```json\n[1, 2, 3]\n```").unwrap();
        assert_eq!(parsed, vec![1, 2, 3]);
    }

    #[test]
    fn test_extract_json_prose_is_parse_error() {
        let result: Result<serde_json::Value, _> = extract_json("Sorry, I cannot analyze this.");
        assert!(matches!(result, Err(LlmError::Parse(_))));
    }

    #[test]
    fn test_truncate_chars_short_input_untouched() {
        assert_eq!(truncate_chars("hello", 500), "hello");
    }

    #[test]
    fn test_truncate_chars_counts_chars_not_bytes() {
        let input = "é".repeat(600);
        let truncated = truncate_chars(&input, 500);
        assert_eq!(truncated.chars().count(), 500);
    }

    #[test]
    fn test_message_constructors() {
        let system = Message::system("be terse");
        let user = Message::user("hello");
        assert_eq!(system.role, "system");
        assert_eq!(user.role, "user");
        assert_eq!(user.content, "hello");
    }

    #[test]
    fn test_completion_response_first_choice() {
        let json = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "first"}},
                {"message": {"role": "assistant", "content": "second"}}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5}
        }"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.into_content().unwrap(), "first");
    }

    #[test]
    fn test_completion_response_empty_choices_is_empty_content() {
        let json = r#"{"choices": []}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(
            parsed.into_content(),
            Err(LlmError::EmptyContent)
        ));
    }

    #[test]
    fn test_api_error_body_parses() {
        let json = r#"{"error": {"message": "Invalid API key", "type": "auth_error"}}"#;
        let parsed: ApiErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.error.message, "Invalid API key");
    }
}
