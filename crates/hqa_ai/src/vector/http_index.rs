use hqa_core::error::AppError;
use serde::{Deserialize, Serialize};

use super::{VectorHit, VectorIndex};

/// Client for a vector-index gateway exposing `POST /search`. The index
/// engine behind the gateway is an external capability; this client only
/// carries the query contract.
#[derive(Debug, Clone)]
pub struct HttpVectorIndex {
    base_url: String,
}

impl HttpVectorIndex {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("https://") && !base_url.starts_with("http://") {
            return Err(AppError::new(
                "CONFIG_INVALID",
                "Vector index base URL must start with http:// or https://",
            )
            .with_details(format!("base_url={base_url}")));
        }
        Ok(Self { base_url })
    }
}

#[derive(Debug, Clone, Serialize)]
struct SearchRequest<'a> {
    vector: &'a [f32],
    top_k: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct SearchResponse {
    hits: Vec<VectorHit>,
}

impl VectorIndex for HttpVectorIndex {
    fn query(&self, vector: &[f32], top_k: u32) -> Result<Vec<VectorHit>, AppError> {
        let url = format!("{}/search", self.base_url);
        let req = SearchRequest { vector, top_k };
        let resp = ureq::post(&url)
            .timeout(std::time::Duration::from_secs(10))
            .send_json(serde_json::to_value(req).map_err(|e| {
                AppError::new("RETRIEVAL_VECTOR_FAILED", "Failed to encode vector query")
                    .with_details(e.to_string())
            })?);

        match resp {
            Ok(r) if r.status() == 200 => {
                let v: SearchResponse = r.into_json().map_err(|e| {
                    AppError::new("RETRIEVAL_VECTOR_FAILED", "Failed to decode vector query response")
                        .with_details(e.to_string())
                })?;
                Ok(v.hits)
            }
            Ok(r) => Err(
                AppError::new("RETRIEVAL_VECTOR_FAILED", "Vector query failed")
                    .with_details(format!("status={}", r.status())),
            ),
            Err(e) => Err(
                AppError::new("RETRIEVAL_VECTOR_FAILED", "Failed to reach vector index")
                    .with_details(e.to_string())
                    .with_retryable(true),
            ),
        }
    }
}
