use hqa_core::error::AppError;

#[derive(Debug, Clone)]
pub struct CohereClient {
    base_url: String,
    api_key: String,
}

impl CohereClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, AppError> {
        let base_url = base_url.trim_end_matches('/').to_string();

        if !base_url.starts_with("https://") && !base_url.starts_with("http://") {
            return Err(AppError::new(
                "CONFIG_INVALID",
                "Cohere base URL must start with http:// or https://",
            )
            .with_details(format!("base_url={base_url}")));
        }
        if api_key.trim().is_empty() {
            return Err(AppError::new(
                "CONFIG_MISSING_KEY",
                "Cohere API key must not be empty",
            ));
        }

        Ok(Self {
            base_url,
            api_key: api_key.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key)
    }
}
