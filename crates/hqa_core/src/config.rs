use crate::error::AppError;

/// Process-wide configuration, built once at startup. Credentials and model
/// identity come from the environment; a missing required key fails here,
/// never mid-request.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: String,
    pub cohere_api_key: String,
    pub openai_base_url: String,
    pub cohere_base_url: String,
    pub vector_base_url: String,
    pub graph_base_url: String,
    pub chat_model: String,
    pub embed_model: String,
    pub rerank_model: String,
    pub graph_schema: String,
    pub temperature: f32,
    pub seed: u64,
    pub vector_top_k: u32,
    pub rerank_top_n: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    /// Build from an injected lookup so tests can supply a fixed map instead
    /// of mutating process environment.
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let config = Self {
            openai_api_key: required(lookup, "OPENAI_API_KEY")?,
            cohere_api_key: required(lookup, "COHERE_API_KEY")?,
            openai_base_url: optional(lookup, "OPENAI_BASE_URL", "https://api.openai.com"),
            cohere_base_url: optional(lookup, "COHERE_BASE_URL", "https://api.cohere.com"),
            vector_base_url: optional(lookup, "VECTOR_BASE_URL", "http://127.0.0.1:8100"),
            graph_base_url: optional(lookup, "GRAPH_BASE_URL", "http://127.0.0.1:8200"),
            chat_model: optional(lookup, "HQA_CHAT_MODEL", "gpt-4o-mini"),
            embed_model: optional(lookup, "HQA_EMBED_MODEL", "text-embedding-3-small"),
            rerank_model: optional(lookup, "HQA_RERANK_MODEL", "rerank-english-v3.0"),
            graph_schema: optional(lookup, "HQA_GRAPH_SCHEMA", ""),
            temperature: parse_f32(lookup, "HQA_TEMPERATURE", 0.3)?,
            seed: parse_u64(lookup, "HQA_SEED", 42)?,
            vector_top_k: parse_u32(lookup, "HQA_VECTOR_TOP_K", 10)?,
            rerank_top_n: parse_u32(lookup, "HQA_RERANK_TOP_N", 20)?,
        };

        if config.vector_top_k == 0 {
            return Err(AppError::new("CONFIG_INVALID", "HQA_VECTOR_TOP_K must be >= 1"));
        }
        if config.rerank_top_n == 0 {
            return Err(AppError::new("CONFIG_INVALID", "HQA_RERANK_TOP_N must be >= 1"));
        }

        Ok(config)
    }
}

fn required(lookup: &dyn Fn(&str) -> Option<String>, key: &str) -> Result<String, AppError> {
    match lookup(key) {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(
            AppError::new("CONFIG_MISSING_KEY", "Required credential is not set")
                .with_details(format!("key={key}")),
        ),
    }
}

fn optional(lookup: &dyn Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    match lookup(key) {
        Some(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

fn parse_u32(lookup: &dyn Fn(&str) -> Option<String>, key: &str, default: u32) -> Result<u32, AppError> {
    match lookup(key) {
        Some(v) if !v.trim().is_empty() => v.trim().parse::<u32>().map_err(|e| {
            AppError::new("CONFIG_INVALID", "Configuration value is not a valid integer")
                .with_details(format!("key={key}; value={v}; err={e}"))
        }),
        _ => Ok(default),
    }
}

fn parse_u64(lookup: &dyn Fn(&str) -> Option<String>, key: &str, default: u64) -> Result<u64, AppError> {
    match lookup(key) {
        Some(v) if !v.trim().is_empty() => v.trim().parse::<u64>().map_err(|e| {
            AppError::new("CONFIG_INVALID", "Configuration value is not a valid integer")
                .with_details(format!("key={key}; value={v}; err={e}"))
        }),
        _ => Ok(default),
    }
}

fn parse_f32(lookup: &dyn Fn(&str) -> Option<String>, key: &str, default: f32) -> Result<f32, AppError> {
    match lookup(key) {
        Some(v) if !v.trim().is_empty() => v.trim().parse::<f32>().map_err(|e| {
            AppError::new("CONFIG_INVALID", "Configuration value is not a valid number")
                .with_details(format!("key={key}; value={v}; err={e}"))
        }),
        _ => Ok(default),
    }
}
