use hqa_core::error::AppError;
use serde::{Deserialize, Serialize};

use super::{RerankedDoc, Reranker};
use crate::cohere::CohereClient;

#[derive(Debug, Clone)]
pub struct CohereReranker {
    client: CohereClient,
    model: String,
}

impl CohereReranker {
    pub fn new(client: CohereClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct RerankRequest<'a> {
    model: &'a str,
    query: &'a str,
    documents: &'a [String],
    top_n: u32,
    return_documents: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct RerankDocument {
    text: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RerankResult {
    index: usize,
    relevance_score: f32,
    document: Option<RerankDocument>,
}

#[derive(Debug, Clone, Deserialize)]
struct RerankResponse {
    results: Vec<RerankResult>,
}

impl Reranker for CohereReranker {
    fn rerank(
        &self,
        query: &str,
        documents: &[String],
        top_n: u32,
    ) -> Result<Vec<RerankedDoc>, AppError> {
        let url = format!("{}/v2/rerank", self.client.base_url());
        let req = RerankRequest {
            model: &self.model,
            query,
            documents,
            top_n,
            return_documents: true,
        };

        let resp = ureq::post(&url)
            .set("Authorization", &self.client.bearer())
            .timeout(std::time::Duration::from_secs(15))
            .send_json(serde_json::to_value(req).map_err(|e| {
                AppError::new("RERANK_FAILED", "Failed to encode rerank request")
                    .with_details(e.to_string())
            })?);

        match resp {
            Ok(r) if r.status() == 200 => {
                let v: RerankResponse = r.into_json().map_err(|e| {
                    AppError::new("RERANK_FAILED", "Failed to decode rerank response")
                        .with_details(e.to_string())
                })?;
                let mut out: Vec<RerankedDoc> = Vec::with_capacity(v.results.len());
                for result in v.results {
                    let document = result.document.ok_or_else(|| {
                        AppError::new("RERANK_FAILED", "Rerank result missing document text")
                            .with_details(format!("index={}", result.index))
                    })?;
                    out.push(RerankedDoc {
                        index: result.index,
                        text: document.text,
                        score: result.relevance_score,
                    });
                }
                Ok(out)
            }
            Ok(r) => Err(
                AppError::new("RERANK_FAILED", "Rerank request failed")
                    .with_details(format!("status={}", r.status())),
            ),
            Err(e) => Err(
                AppError::new("RERANK_FAILED", "Failed to reach reranking endpoint")
                    .with_details(e.to_string())
                    .with_retryable(true),
            ),
        }
    }
}
