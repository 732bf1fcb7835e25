use hqa_core::error::AppError;
use serde::Serialize;

use super::GraphStore;

/// Client for a graph-store gateway exposing `POST /cypher`. The response
/// body is taken verbatim as the structured query result.
#[derive(Debug, Clone)]
pub struct HttpGraphStore {
    base_url: String,
}

impl HttpGraphStore {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("https://") && !base_url.starts_with("http://") {
            return Err(AppError::new(
                "CONFIG_INVALID",
                "Graph store base URL must start with http:// or https://",
            )
            .with_details(format!("base_url={base_url}")));
        }
        Ok(Self { base_url })
    }
}

#[derive(Debug, Clone, Serialize)]
struct CypherRequest<'a> {
    query: &'a str,
}

impl GraphStore for HttpGraphStore {
    fn execute(&self, query: &str) -> Result<serde_json::Value, AppError> {
        let url = format!("{}/cypher", self.base_url);
        let req = CypherRequest { query };
        let resp = ureq::post(&url)
            .timeout(std::time::Duration::from_secs(15))
            .send_json(serde_json::to_value(req).map_err(|e| {
                AppError::new("RETRIEVAL_GRAPH_FAILED", "Failed to encode graph query")
                    .with_details(e.to_string())
            })?);

        match resp {
            Ok(r) if r.status() == 200 => r.into_json::<serde_json::Value>().map_err(|e| {
                AppError::new("RETRIEVAL_GRAPH_FAILED", "Failed to decode graph query result")
                    .with_details(e.to_string())
            }),
            Ok(r) => Err(
                AppError::new("RETRIEVAL_GRAPH_FAILED", "Graph query failed")
                    .with_details(format!("status={}", r.status())),
            ),
            Err(e) => Err(
                AppError::new("RETRIEVAL_GRAPH_FAILED", "Failed to reach graph store")
                    .with_details(e.to_string())
                    .with_retryable(true),
            ),
        }
    }
}
