use hqa_core::error::AppError;

pub trait Embedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, AppError>;
}

pub mod openai_embed;
