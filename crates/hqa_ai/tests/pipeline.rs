use std::cell::RefCell;

use hqa_ai::embeddings::Embedder;
use hqa_ai::graph::{GraphStore, QueryGenerator};
use hqa_ai::llm::Generator;
use hqa_ai::pipeline::{HybridPipeline, PipelineOptions};
use hqa_ai::rerank::{RerankedDoc, Reranker};
use hqa_ai::vector::{VectorHit, VectorIndex};
use hqa_core::error::AppError;
use hqa_core::evidence::EvidenceOrigin;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

struct FixedEmbedder;

impl Embedder for FixedEmbedder {
    fn embed(&self, _text: &str) -> Result<Vec<f32>, AppError> {
        Ok(vec![1.0, 0.0, 0.5])
    }
}

struct FailingEmbedder;

impl Embedder for FailingEmbedder {
    fn embed(&self, _text: &str) -> Result<Vec<f32>, AppError> {
        Err(AppError::new("RETRIEVAL_EMBED_FAILED", "Embeddings request failed").with_retryable(true))
    }
}

struct FixedVectorIndex {
    hits: Vec<VectorHit>,
}

impl VectorIndex for FixedVectorIndex {
    fn query(&self, _vector: &[f32], _top_k: u32) -> Result<Vec<VectorHit>, AppError> {
        Ok(self.hits.clone())
    }
}

struct FixedQueryGenerator {
    query: String,
}

impl QueryGenerator for FixedQueryGenerator {
    fn generate_query(&self, _question: &str) -> Result<String, AppError> {
        Ok(self.query.clone())
    }
}

struct RecordingGraphStore {
    result: Value,
    executed: RefCell<Vec<String>>,
}

impl GraphStore for RecordingGraphStore {
    fn execute(&self, query: &str) -> Result<Value, AppError> {
        self.executed.borrow_mut().push(query.to_string());
        Ok(self.result.clone())
    }
}

struct DescendingReranker;

impl Reranker for DescendingReranker {
    fn rerank(
        &self,
        _query: &str,
        documents: &[String],
        top_n: u32,
    ) -> Result<Vec<RerankedDoc>, AppError> {
        Ok(documents
            .iter()
            .enumerate()
            .take(top_n as usize)
            .map(|(i, d)| RerankedDoc {
                index: i,
                text: d.clone(),
                score: 1.0 - i as f32 * 0.01,
            })
            .collect())
    }
}

struct FailingReranker;

impl Reranker for FailingReranker {
    fn rerank(
        &self,
        _query: &str,
        _documents: &[String],
        _top_n: u32,
    ) -> Result<Vec<RerankedDoc>, AppError> {
        Err(AppError::new("RERANK_FAILED", "Rerank request failed"))
    }
}

struct RecordingGenerator {
    answer: String,
    calls: RefCell<Vec<(String, String)>>,
}

impl RecordingGenerator {
    fn answering(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl Generator for RecordingGenerator {
    fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AppError> {
        self.calls
            .borrow_mut()
            .push((system_prompt.to_string(), user_prompt.to_string()));
        Ok(self.answer.clone())
    }
}

#[test]
fn founders_question_flows_through_the_whole_pipeline() {
    let embedder = FixedEmbedder;
    let vector_index = FixedVectorIndex {
        hits: vec![VectorHit {
            text: "X was founded in 1990 by A and B.".to_string(),
            score: Some(0.8),
        }],
    };
    let query_generator = FixedQueryGenerator {
        query: "MATCH (c:Company {name: 'X'})-[:FOUNDED_BY]->(p) RETURN p.name".to_string(),
    };
    let graph_store = RecordingGraphStore {
        result: json!({"founders": ["A", "B"]}),
        executed: RefCell::new(Vec::new()),
    };
    let reranker = DescendingReranker;
    let generator = RecordingGenerator::answering("Company X was founded by A and B.");

    let pipeline = HybridPipeline::new(
        &embedder,
        &vector_index,
        &query_generator,
        &graph_store,
        &reranker,
        &generator,
        PipelineOptions::default(),
    );

    let question = "Who founded Company X?";
    let evidence = pipeline.retrieve(question).expect("retrieve");

    // Pre-rerank fusion: serialized graph record first, then the passage.
    assert_eq!(evidence.len(), 2);
    assert_eq!(evidence.items[0].origin, EvidenceOrigin::Graph);
    assert_eq!(evidence.items[0].text, r#"{"founders":["A","B"]}"#);
    assert_eq!(evidence.items[0].candidate_index, 0);
    assert_eq!(evidence.items[1].origin, EvidenceOrigin::Vector);
    assert_eq!(evidence.items[1].text, "X was founded in 1990 by A and B.");

    let answer = pipeline.run(question).expect("run");
    assert_eq!(answer, "Company X was founded by A and B.");

    // The generated query is what reached the graph store, once per run.
    let executed = graph_store.executed.borrow();
    assert_eq!(executed.len(), 2);
    for query in executed.iter() {
        assert_eq!(
            query,
            "MATCH (c:Company {name: 'X'})-[:FOUNDED_BY]->(p) RETURN p.name"
        );
    }
    drop(executed);

    // The synthesizer saw both pieces of evidence in its context.
    let calls = generator.calls.borrow();
    assert_eq!(calls.len(), 1);
    let (_system, user) = &calls[0];
    assert!(user.contains(question));
    assert!(user.contains(r#"{"founders":["A","B"]}"#));
    assert!(user.contains("X was founded in 1990 by A and B."));
}

#[test]
fn identical_inputs_reproduce_identical_evidence_and_answer() {
    let embedder = FixedEmbedder;
    let vector_index = FixedVectorIndex {
        hits: vec![
            VectorHit {
                text: "passage one".to_string(),
                score: Some(0.9),
            },
            VectorHit {
                text: "passage two".to_string(),
                score: None,
            },
        ],
    };
    let query_generator = FixedQueryGenerator {
        query: "MATCH (n) RETURN n".to_string(),
    };
    let graph_store = RecordingGraphStore {
        result: json!([{"name": "A"}]),
        executed: RefCell::new(Vec::new()),
    };
    let reranker = DescendingReranker;
    let generator = RecordingGenerator::answering("the answer");

    let pipeline = HybridPipeline::new(
        &embedder,
        &vector_index,
        &query_generator,
        &graph_store,
        &reranker,
        &generator,
        PipelineOptions::default(),
    );

    let first = pipeline.retrieve("same question").expect("retrieve");
    let second = pipeline.retrieve("same question").expect("retrieve");
    assert_eq!(first, second);

    let answer_a = pipeline.run("same question").expect("run");
    let answer_b = pipeline.run("same question").expect("run");
    assert_eq!(answer_a, answer_b);
}

#[test]
fn empty_retrievals_still_produce_one_candidate_and_an_answer() {
    let embedder = FixedEmbedder;
    let vector_index = FixedVectorIndex { hits: vec![] };
    let query_generator = FixedQueryGenerator {
        query: "MATCH (n) RETURN n".to_string(),
    };
    let graph_store = RecordingGraphStore {
        result: Value::Null,
        executed: RefCell::new(Vec::new()),
    };
    let reranker = DescendingReranker;
    let generator = RecordingGenerator::answering("I do not know.");

    let pipeline = HybridPipeline::new(
        &embedder,
        &vector_index,
        &query_generator,
        &graph_store,
        &reranker,
        &generator,
        PipelineOptions::default(),
    );

    let evidence = pipeline.retrieve("anything?").expect("retrieve");
    assert_eq!(evidence.len(), 1);
    assert_eq!(evidence.items[0].text, "");
    assert_eq!(evidence.items[0].origin, EvidenceOrigin::Graph);

    let answer = pipeline.run("anything?").expect("run");
    assert_eq!(answer, "I do not know.");
}

#[test]
fn embedding_failure_aborts_the_run_before_synthesis() {
    let embedder = FailingEmbedder;
    let vector_index = FixedVectorIndex { hits: vec![] };
    let query_generator = FixedQueryGenerator {
        query: "MATCH (n) RETURN n".to_string(),
    };
    let graph_store = RecordingGraphStore {
        result: Value::Null,
        executed: RefCell::new(Vec::new()),
    };
    let reranker = DescendingReranker;
    let generator = RecordingGenerator::answering("never");

    let pipeline = HybridPipeline::new(
        &embedder,
        &vector_index,
        &query_generator,
        &graph_store,
        &reranker,
        &generator,
        PipelineOptions::default(),
    );

    let err = pipeline.run("q").expect_err("should fail");
    assert_eq!(err.code, "RETRIEVAL_EMBED_FAILED");
    assert!(generator.calls.borrow().is_empty());
}

#[test]
fn rerank_failure_yields_no_answer() {
    let embedder = FixedEmbedder;
    let vector_index = FixedVectorIndex {
        hits: vec![VectorHit {
            text: "passage".to_string(),
            score: Some(0.5),
        }],
    };
    let query_generator = FixedQueryGenerator {
        query: "MATCH (n) RETURN n".to_string(),
    };
    let graph_store = RecordingGraphStore {
        result: json!("row"),
        executed: RefCell::new(Vec::new()),
    };
    let reranker = FailingReranker;
    let generator = RecordingGenerator::answering("never");

    let pipeline = HybridPipeline::new(
        &embedder,
        &vector_index,
        &query_generator,
        &graph_store,
        &reranker,
        &generator,
        PipelineOptions::default(),
    );

    let err = pipeline.run("q").expect_err("should fail");
    assert_eq!(err.code, "RERANK_FAILED");
    assert!(generator.calls.borrow().is_empty());
}

#[test]
fn blank_question_is_rejected() {
    let embedder = FixedEmbedder;
    let vector_index = FixedVectorIndex { hits: vec![] };
    let query_generator = FixedQueryGenerator {
        query: "MATCH (n) RETURN n".to_string(),
    };
    let graph_store = RecordingGraphStore {
        result: Value::Null,
        executed: RefCell::new(Vec::new()),
    };
    let reranker = DescendingReranker;
    let generator = RecordingGenerator::answering("never");

    let pipeline = HybridPipeline::new(
        &embedder,
        &vector_index,
        &query_generator,
        &graph_store,
        &reranker,
        &generator,
        PipelineOptions::default(),
    );

    let err = pipeline.run("   ").expect_err("should fail");
    assert_eq!(err.code, "PIPELINE_INVALID_QUESTION");
    assert!(graph_store.executed.borrow().is_empty());
    assert!(generator.calls.borrow().is_empty());
}
