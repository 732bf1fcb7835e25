use hqa_core::error::AppError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorHit {
    pub text: String,
    pub score: Option<f32>,
}

pub trait VectorIndex {
    fn query(&self, vector: &[f32], top_k: u32) -> Result<Vec<VectorHit>, AppError>;
}

pub mod http_index;
