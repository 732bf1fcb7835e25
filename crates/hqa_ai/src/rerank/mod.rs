use hqa_core::error::AppError;
use serde::{Deserialize, Serialize};

/// One reranked document: the relevance score, the document text, and the
/// index of the document in the submitted candidate list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RerankedDoc {
    pub index: usize,
    pub text: String,
    pub score: f32,
}

pub trait Reranker {
    fn rerank(
        &self,
        query: &str,
        documents: &[String],
        top_n: u32,
    ) -> Result<Vec<RerankedDoc>, AppError>;
}

pub mod cohere_rerank;
