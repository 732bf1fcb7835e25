use hqa_core::error::AppError;

/// Answer-generation capability. Model identity, temperature, and seed are
/// fixed inside the implementation so identical inputs reproduce.
pub trait Generator {
    fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AppError>;
}

pub mod openai_llm;
