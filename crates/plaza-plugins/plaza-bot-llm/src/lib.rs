//! # plaza-bot-llm
//!
//! `DialogueService` client for a chat-completion endpoint. Each turn is a
//! single-shot request: a fixed system instruction plus the user text,
//! capped at a configured output length. No conversation history is kept.

use async_trait::async_trait;
use plaza_core::traits::DialogueService;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// The assistant's standing role: regional youth-policy guidance.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a guide to South Korean youth policy. \
Given a region, introduce the programs available there across five fields: jobs, housing, \
education, welfare & culture, and participation & rights. Answer in polite, formal Korean, \
keeping each answer short, clear, and factual, and note eligibility limits where they apply.";

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: String,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

pub struct LlmDialogue {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<SecretString>,
    model: String,
    max_tokens: u32,
    system_prompt: String,
}

impl LlmDialogue {
    pub fn new(
        endpoint: String,
        api_key: Option<SecretString>,
        model: String,
        max_tokens: u32,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            api_key,
            model,
            max_tokens,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }
}

#[async_trait]
impl DialogueService for LlmDialogue {
    async fn converse(&self, _sender: &str, message: &str) -> anyhow::Result<Vec<String>> {
        let body = CompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: message,
                },
            ],
            max_tokens: self.max_tokens,
        };

        let mut request = self.http.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let completion: CompletionResponse = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("completion returned no choices"))?;

        tracing::debug!(chars = choice.message.content.len(), "llm dialogue answered");
        Ok(vec![choice.message.content])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_payload_shape() {
        let body = CompletionRequest {
            model: "gpt-4o",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: DEFAULT_SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: "housing programs in Busan",
                },
            ],
            max_tokens: 1000,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["max_tokens"], 1000);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "housing programs in Busan");
    }

    #[test]
    fn test_response_first_choice_extracted() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"Here are the programs."}},{"message":{"role":"assistant","content":"alt"}}]}"#;
        let parsed: CompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, "Here are the programs.");
    }

    #[test]
    fn test_system_prompt_override() {
        let client = LlmDialogue::new("http://localhost/v1".into(), None, "gpt-4o".into(), 100)
            .with_system_prompt("You only answer about Busan.");
        assert_eq!(client.system_prompt, "You only answer about Busan.");
    }

    #[test]
    fn test_zero_choices_parses_but_is_unusable() {
        let parsed: CompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(parsed.choices.is_empty());
    }
}
