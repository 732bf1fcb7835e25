use hqa_core::error::AppError;
use serde::{Deserialize, Serialize};

use super::Embedder;
use crate::openai::OpenAiClient;

#[derive(Debug, Clone)]
pub struct OpenAiEmbedder {
    client: OpenAiClient,
    model: String,
}

impl OpenAiEmbedder {
    pub fn new(client: OpenAiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct EmbeddingsData {
    embedding: Vec<f32>,
}

#[derive(Debug, Clone, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingsData>,
}

impl Embedder for OpenAiEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, AppError> {
        let url = format!("{}/v1/embeddings", self.client.base_url());
        let req = EmbeddingsRequest {
            model: &self.model,
            input: text,
        };
        let resp = ureq::post(&url)
            .set("Authorization", &self.client.bearer())
            .timeout(std::time::Duration::from_secs(10))
            .send_json(serde_json::to_value(req).map_err(|e| {
                AppError::new("RETRIEVAL_EMBED_FAILED", "Failed to encode embeddings request")
                    .with_details(e.to_string())
            })?);

        match resp {
            Ok(r) if r.status() == 200 => {
                let v: EmbeddingsResponse = r.into_json().map_err(|e| {
                    AppError::new("RETRIEVAL_EMBED_FAILED", "Failed to decode embeddings response")
                        .with_details(e.to_string())
                })?;
                let first = v.data.into_iter().next().ok_or_else(|| {
                    AppError::new("RETRIEVAL_EMBED_FAILED", "Embeddings response had no data")
                })?;
                if first.embedding.is_empty() {
                    return Err(AppError::new(
                        "RETRIEVAL_EMBED_FAILED",
                        "Embeddings response was empty",
                    ));
                }
                Ok(first.embedding)
            }
            Ok(r) => Err(
                AppError::new("RETRIEVAL_EMBED_FAILED", "Embeddings request failed")
                    .with_details(format!("status={}", r.status())),
            ),
            Err(e) => Err(
                AppError::new("RETRIEVAL_EMBED_FAILED", "Failed to call embeddings endpoint")
                    .with_details(e.to_string())
                    .with_retryable(true),
            ),
        }
    }
}
