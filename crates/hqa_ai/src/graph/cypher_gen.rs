use hqa_core::error::AppError;

use super::QueryGenerator;
use crate::llm::Generator;
use crate::prompts;

/// Query generation backed by a language model: the schema and the question
/// go into a Cypher-generation prompt, and the reply (minus any Markdown
/// code fence) is the query.
#[derive(Debug, Clone)]
pub struct LlmQueryGenerator<G: Generator> {
    llm: G,
    schema: String,
}

impl<G: Generator> LlmQueryGenerator<G> {
    pub fn new(llm: G, schema: impl Into<String>) -> Self {
        Self {
            llm,
            schema: schema.into(),
        }
    }
}

impl<G: Generator> QueryGenerator for LlmQueryGenerator<G> {
    fn generate_query(&self, question: &str) -> Result<String, AppError> {
        let user_prompt = prompts::cypher_generation_prompt(&self.schema, question);
        let reply = self
            .llm
            .generate(prompts::CYPHER_SYSTEM_PROMPT, &user_prompt)
            .map_err(|e| {
                AppError::new(
                    "RETRIEVAL_CYPHER_GEN_FAILED",
                    "Failed to generate graph query",
                )
                .with_details(e.to_string())
                .with_retryable(e.retryable)
            })?;

        let query = strip_code_fences(&reply);
        if query.is_empty() {
            return Err(AppError::new(
                "RETRIEVAL_CYPHER_GEN_FAILED",
                "Query generation returned an empty query",
            ));
        }
        Ok(query)
    }
}

/// Models often wrap queries in ```cypher fences; unwrap them.
fn strip_code_fences(reply: &str) -> String {
    let t = reply.trim();
    if let Some(rest) = t.strip_prefix("```") {
        // Drop the info string ("cypher") on the opening fence line.
        let body = match rest.find('\n') {
            Some(i) => &rest[i + 1..],
            None => "",
        };
        let body = body.strip_suffix("```").unwrap_or(body);
        body.trim().to_string()
    } else {
        t.to_string()
    }
}
