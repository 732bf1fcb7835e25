use std::cell::RefCell;
use std::rc::Rc;

use hqa_ai::graph::cypher_gen::LlmQueryGenerator;
use hqa_ai::graph::QueryGenerator;
use hqa_ai::llm::Generator;
use hqa_ai::vector::VectorHit;
use hqa_core::error::AppError;
use pretty_assertions::assert_eq;

struct CannedGenerator {
    reply: String,
    prompts: Rc<RefCell<Vec<(String, String)>>>,
}

impl CannedGenerator {
    fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl Generator for CannedGenerator {
    fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AppError> {
        self.prompts
            .borrow_mut()
            .push((system_prompt.to_string(), user_prompt.to_string()));
        Ok(self.reply.clone())
    }
}

struct BrokenGenerator;

impl Generator for BrokenGenerator {
    fn generate(&self, _system_prompt: &str, _user_prompt: &str) -> Result<String, AppError> {
        Err(AppError::new("SYNTHESIS_FAILED", "Generation request failed").with_retryable(true))
    }
}

#[test]
fn cypher_generator_strips_markdown_fences() {
    let llm = CannedGenerator::replying("```cypher\nMATCH (p:Person) RETURN p.name\n```");
    let generator = LlmQueryGenerator::new(llm, "(:Person {name})");

    let query = generator.generate_query("Who is there?").expect("query");
    assert_eq!(query, "MATCH (p:Person) RETURN p.name");
}

#[test]
fn cypher_generator_passes_bare_queries_through() {
    let llm = CannedGenerator::replying("MATCH (p:Person) RETURN p.name");
    let generator = LlmQueryGenerator::new(llm, "(:Person {name})");

    let query = generator.generate_query("Who is there?").expect("query");
    assert_eq!(query, "MATCH (p:Person) RETURN p.name");
}

#[test]
fn cypher_prompt_carries_schema_and_question() {
    let llm = CannedGenerator::replying("MATCH (n) RETURN n");
    let recorded = Rc::clone(&llm.prompts);
    let generator = LlmQueryGenerator::new(llm, "(:Company)-[:FOUNDED_BY]->(:Person)");

    generator
        .generate_query("Who founded Company X?")
        .expect("query");

    let prompts = recorded.borrow();
    assert_eq!(prompts.len(), 1);
    let (_system, user) = &prompts[0];
    assert!(user.contains("(:Company)-[:FOUNDED_BY]->(:Person)"));
    assert!(user.contains("Who founded Company X?"));
}

#[test]
fn empty_model_reply_is_a_query_generation_failure() {
    let llm = CannedGenerator::replying("```cypher\n```");
    let generator = LlmQueryGenerator::new(llm, "");

    let err = generator.generate_query("anything").expect_err("should fail");
    assert_eq!(err.code, "RETRIEVAL_CYPHER_GEN_FAILED");
}

#[test]
fn generator_failure_surfaces_as_query_generation_failure() {
    let generator = LlmQueryGenerator::new(BrokenGenerator, "");

    let err = generator.generate_query("anything").expect_err("should fail");
    assert_eq!(err.code, "RETRIEVAL_CYPHER_GEN_FAILED");
    assert!(err.details.as_deref().unwrap_or("").contains("SYNTHESIS_FAILED"));
    assert!(err.retryable);
}

#[test]
fn vector_hits_deserialize_with_and_without_scores() {
    let with_score: VectorHit =
        serde_json::from_str(r#"{"text": "passage", "score": 0.75}"#).expect("decode");
    assert_eq!(with_score.text, "passage");
    assert_eq!(with_score.score, Some(0.75));

    let without_score: VectorHit = serde_json::from_str(r#"{"text": "passage"}"#).expect("decode");
    assert_eq!(without_score.score, None);
}
