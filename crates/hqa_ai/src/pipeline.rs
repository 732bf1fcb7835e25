use hqa_core::error::AppError;
use hqa_core::evidence::RankedEvidence;

use crate::embeddings::Embedder;
use crate::fuse;
use crate::graph::{GraphStore, QueryGenerator};
use crate::llm::Generator;
use crate::prompts;
use crate::rerank::Reranker;
use crate::vector::VectorIndex;

#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    pub vector_top_k: u32,
    pub rerank_top_n: u32,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            vector_top_k: 10,
            rerank_top_n: 20,
        }
    }
}

/// One-question pipeline: retrieve from both modalities, fuse and rerank,
/// synthesize. Holds capabilities by reference and no mutable state, so
/// concurrent question runs need no coordination.
pub struct HybridPipeline<'a> {
    embedder: &'a dyn Embedder,
    vector_index: &'a dyn VectorIndex,
    query_generator: &'a dyn QueryGenerator,
    graph_store: &'a dyn GraphStore,
    reranker: &'a dyn Reranker,
    generator: &'a dyn Generator,
    options: PipelineOptions,
}

impl<'a> HybridPipeline<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        embedder: &'a dyn Embedder,
        vector_index: &'a dyn VectorIndex,
        query_generator: &'a dyn QueryGenerator,
        graph_store: &'a dyn GraphStore,
        reranker: &'a dyn Reranker,
        generator: &'a dyn Generator,
        options: PipelineOptions,
    ) -> Self {
        Self {
            embedder,
            vector_index,
            query_generator,
            graph_store,
            reranker,
            generator,
            options,
        }
    }

    /// Steps 1-5: embed the question, query the vector index, generate and
    /// execute the graph query, then fuse and rerank. The vector and graph
    /// paths share no data; they run back to back only because the clients
    /// are synchronous.
    pub fn retrieve(&self, question: &str) -> Result<RankedEvidence, AppError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::new(
                "PIPELINE_INVALID_QUESTION",
                "Question must not be empty",
            ));
        }

        let embedding = self.embedder.embed(question)?;
        let vector_hits = self
            .vector_index
            .query(&embedding, self.options.vector_top_k)?;

        let graph_query = self.query_generator.generate_query(question)?;
        let graph_result = self.graph_store.execute(&graph_query)?;

        fuse::fuse_and_rerank(
            self.reranker,
            question,
            &graph_result,
            &vector_hits,
            self.options.rerank_top_n,
        )
    }

    /// Full run: retrieve, render the ranked evidence into one context
    /// string, synthesize the answer. Any stage failure aborts the run; no
    /// partial answer is returned.
    pub fn run(&self, question: &str) -> Result<String, AppError> {
        let evidence = self.retrieve(question)?;
        let context = evidence.context_string();
        let user_prompt = prompts::rag_user_prompt(question.trim(), &context);
        self.generator
            .generate(prompts::RAG_SYSTEM_PROMPT, &user_prompt)
    }
}
