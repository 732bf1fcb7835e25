use hqa_core::error::AppError;
use serde::{Deserialize, Serialize};

use super::Generator;
use crate::openai::OpenAiClient;

#[derive(Debug, Clone)]
pub struct OpenAiGenerator {
    client: OpenAiClient,
    model: String,
    temperature: f32,
    seed: u64,
}

impl OpenAiGenerator {
    pub fn new(client: OpenAiClient, model: impl Into<String>, temperature: f32, seed: u64) -> Self {
        Self {
            client,
            model: model.into(),
            temperature,
            seed,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    seed: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

impl Generator for OpenAiGenerator {
    fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AppError> {
        let url = format!("{}/v1/chat/completions", self.client.base_url());
        let req = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: self.temperature,
            seed: self.seed,
        };

        let resp = ureq::post(&url)
            .set("Authorization", &self.client.bearer())
            .timeout(std::time::Duration::from_secs(30))
            .send_json(serde_json::to_value(req).map_err(|e| {
                AppError::new("SYNTHESIS_FAILED", "Failed to encode generation request")
                    .with_details(e.to_string())
            })?);

        match resp {
            Ok(r) if r.status() == 200 => {
                let v: ChatResponse = r.into_json().map_err(|e| {
                    AppError::new("SYNTHESIS_FAILED", "Failed to decode generation response")
                        .with_details(e.to_string())
                })?;
                let content = v
                    .choices
                    .into_iter()
                    .next()
                    .and_then(|c| c.message.content)
                    .unwrap_or_default();
                if content.trim().is_empty() {
                    return Err(AppError::new(
                        "SYNTHESIS_FAILED",
                        "Generation response was empty",
                    ));
                }
                Ok(content)
            }
            Ok(r) => Err(
                AppError::new("SYNTHESIS_FAILED", "Generation request failed")
                    .with_details(format!("status={}", r.status())),
            ),
            Err(e) => Err(
                AppError::new("SYNTHESIS_FAILED", "Failed to call generation endpoint")
                    .with_details(e.to_string())
                    .with_retryable(true),
            ),
        }
    }
}
